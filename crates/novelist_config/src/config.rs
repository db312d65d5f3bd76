//! Configuration loading.

use crate::{GeminiSettings, PipelineSettings, StorageSettings};
use config::{Config, ConfigBuilder, File, FileFormat, builder::DefaultState};
use novelist_error::{ConfigError, NovelistError, NovelistResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../novelist.toml");

/// Top-level Novelist configuration.
///
/// # Example
///
/// ```
/// use novelist_config::NovelistConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = NovelistConfig::from_toml_str("[pipeline]\nchapters = 5\n")?;
/// assert_eq!(config.pipeline.chapters, 5);
/// // Untouched values keep their bundled defaults
/// assert_eq!(config.pipeline.characters, 3);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NovelistConfig {
    /// Gemini model settings
    #[serde(default)]
    pub gemini: GeminiSettings,
    /// Record store settings
    #[serde(default)]
    pub storage: StorageSettings,
    /// End-to-end generation settings
    #[serde(default)]
    pub pipeline: PipelineSettings,
}

impl NovelistConfig {
    /// Load configuration with precedence: current dir > home dir > bundled default.
    ///
    /// User config files are optional and silently skipped when absent.
    #[instrument]
    pub fn load() -> NovelistResult<Self> {
        Self::load_with(None)
    }

    /// Like [`load`](Self::load), with an explicit file layered on top.
    ///
    /// The explicit file must exist.
    #[instrument]
    pub fn load_with(explicit: Option<&Path>) -> NovelistResult<Self> {
        debug!("Loading configuration with precedence: explicit > current dir > home dir > bundled defaults");

        let mut builder = Self::defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/novelist/novelist.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("novelist").required(false));

        if let Some(path) = explicit {
            debug!(path = %path.display(), "Adding explicit configuration file");
            builder = builder.add_source(File::from(path));
        }

        Self::finish(builder)
    }

    /// Load a single configuration file over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> NovelistResult<Self> {
        debug!("Loading configuration from file");
        Self::finish(Self::defaults().add_source(File::from(path.as_ref())))
    }

    /// Parse TOML text over the bundled defaults.
    pub fn from_toml_str(text: &str) -> NovelistResult<Self> {
        Self::finish(Self::defaults().add_source(File::from_str(text, FileFormat::Toml)))
    }

    /// Check value ranges that TOML types alone cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gemini.model.trim().is_empty() {
            return Err(ConfigError::new("gemini.model must not be empty"));
        }
        if !(0.0..=2.0).contains(&self.gemini.temperature) {
            return Err(ConfigError::new(format!(
                "gemini.temperature must be within 0.0..=2.0, got {}",
                self.gemini.temperature
            )));
        }
        if self.gemini.max_output_tokens == 0 {
            return Err(ConfigError::new("gemini.max_output_tokens must be positive"));
        }
        if i32::try_from(self.gemini.max_output_tokens).is_err() {
            return Err(ConfigError::new(format!(
                "gemini.max_output_tokens must be at most {}, got {}",
                i32::MAX,
                self.gemini.max_output_tokens
            )));
        }
        if self.pipeline.characters == 0 {
            return Err(ConfigError::new("pipeline.characters must be at least 1"));
        }
        if self.pipeline.chapters == 0 {
            return Err(ConfigError::new("pipeline.chapters must be at least 1"));
        }
        if self.pipeline.language.trim().is_empty() {
            return Err(ConfigError::new("pipeline.language must not be empty"));
        }
        Ok(())
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> NovelistResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                NovelistError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                NovelistError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;
        config.validate()?;
        Ok(config)
    }
}
