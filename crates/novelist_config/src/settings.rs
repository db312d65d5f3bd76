//! Per-section settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the Gemini API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// `[gemini]`: model selection, sampling and retry behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    /// Model name, e.g. `gemini-2.5-flash`
    pub model: String,
    /// API key; `GEMINI_API_KEY` is used when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Sampling temperature
    pub temperature: f32,
    /// Output token cap per call
    pub max_output_tokens: u32,
    /// Retry attempts, overriding the per-status default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<usize>,
    /// Initial backoff, overriding the per-status default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_backoff_ms: Option<u64>,
    /// Fail on the first error instead of retrying
    pub no_retry: bool,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            api_key: None,
            temperature: 0.7,
            max_output_tokens: 8192,
            max_retries: None,
            retry_backoff_ms: None,
            no_retry: false,
        }
    }
}

impl GeminiSettings {
    /// The configured key, or `GEMINI_API_KEY` from the environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var(API_KEY_VAR).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

/// `[storage]`: where records and exports live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Root of the JSON record store
    pub data_dir: PathBuf,
    /// Directory for text exports; `<data_dir>/output` when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            output_dir: None,
        }
    }
}

impl StorageSettings {
    /// Effective directory for text exports.
    ///
    /// ```
    /// use novelist_config::StorageSettings;
    /// use std::path::PathBuf;
    ///
    /// let settings = StorageSettings::default();
    /// assert_eq!(settings.output_dir(), PathBuf::from("data").join("output"));
    /// ```
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("output"))
    }
}

/// `[pipeline]`: the end-to-end generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Characters to create (capped at the number of role briefs)
    pub characters: usize,
    /// Chapters to write (capped at the plot's outline length)
    pub chapters: usize,
    /// Pause between chapter generations
    pub chapter_delay_ms: u64,
    /// Language the story is written in
    pub language: String,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            characters: 3,
            chapters: 3,
            chapter_delay_ms: 1000,
            language: "Simplified Chinese".to_string(),
        }
    }
}
