//! Per-invocation state shared by the command handlers.

use novelist_config::{NovelistConfig, PipelineSettings};
use novelist_error::{NovelistResult, PipelineError, PipelineErrorKind};
use novelist_models::GeminiClient;
use novelist_pipeline::{Exporter, NovelPipeline};
use novelist_storage::{Category, JsonStorage};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Configuration plus the record store.
///
/// The Gemini client is only built by commands that call the model, so
/// listing, querying and exporting work without an API key.
#[derive(Debug, Clone)]
pub struct Session {
    config: NovelistConfig,
    storage: JsonStorage,
}

impl Session {
    /// Load configuration, apply the `--data-dir` override and open storage.
    #[tracing::instrument(skip_all)]
    pub fn open(config_path: Option<&Path>, data_dir: Option<PathBuf>) -> NovelistResult<Self> {
        let mut config = NovelistConfig::load_with(config_path)?;
        if let Some(dir) = data_dir {
            tracing::debug!(path = %dir.display(), "Overriding data directory");
            config.storage.data_dir = dir;
        }
        Self::with_config(config)
    }

    /// Open storage for an already loaded configuration.
    pub fn with_config(config: NovelistConfig) -> NovelistResult<Self> {
        let storage = JsonStorage::new(&config.storage.data_dir)?;
        Ok(Self { config, storage })
    }

    /// Effective configuration after layering and overrides.
    pub fn config(&self) -> &NovelistConfig {
        &self.config
    }

    /// The record store under the configured data directory.
    pub fn storage(&self) -> &JsonStorage {
        &self.storage
    }

    /// Text exporter writing to the configured output directory.
    pub fn exporter(&self) -> Exporter {
        Exporter::new(self.storage.clone(), self.config.storage.output_dir())
    }

    /// Pipeline with the configured run settings.
    pub fn pipeline(&self) -> NovelistResult<NovelPipeline<GeminiClient>> {
        self.pipeline_with(self.config.pipeline.clone())
    }

    /// Pipeline with explicit run settings.
    pub fn pipeline_with(
        &self,
        settings: PipelineSettings,
    ) -> NovelistResult<NovelPipeline<GeminiClient>> {
        let driver = Arc::new(GeminiClient::from_settings(&self.config.gemini)?);
        Ok(NovelPipeline::new(
            driver,
            self.storage.clone(),
            self.config.storage.output_dir(),
            settings,
        ))
    }

    /// Load a typed record.
    pub async fn load<T: DeserializeOwned>(&self, category: Category, id: &str) -> NovelistResult<T> {
        self.storage.load(category, id).await
    }
}

/// Reject blank free-text arguments before any model call.
pub fn require_text(text: &str) -> NovelistResult<&str> {
    let text = text.trim();
    if text.is_empty() {
        return Err(PipelineError::new(PipelineErrorKind::EmptyDescription).into());
    }
    Ok(text)
}

/// Zero-based index for a 1-based chapter number, checked against `len`.
///
/// `allow_append` admits the number one past the last chapter.
pub fn chapter_index(number: usize, len: usize, allow_append: bool) -> NovelistResult<usize> {
    let limit = if allow_append { len + 1 } else { len };
    match number.checked_sub(1) {
        Some(index) if number <= limit => Ok(index),
        _ => Err(PipelineError::new(PipelineErrorKind::ChapterOutOfRange {
            index: number.saturating_sub(1),
            len,
        })
        .into()),
    }
}
