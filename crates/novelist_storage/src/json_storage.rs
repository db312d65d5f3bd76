//! Filesystem-backed JSON record store.

use crate::{Category, RecordSummary, get_path, set_path};
use novelist_error::{JsonError, NovelistResult, StorageError, StorageErrorKind};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;

/// Fields that tie a record to its file and its world.
const IDENTITY_KEYS: [&str; 2] = ["id", "world_id"];

/// JSON record store rooted at a base directory.
///
/// Writes go to a temporary file that is then renamed over the target, so
/// a crash never leaves a half-written record behind.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    base_dir: PathBuf,
}

impl JsonStorage {
    /// Open a store, creating the base directory and every category
    /// directory if needed.
    ///
    /// # Errors
    ///
    /// Returns error if a directory cannot be created.
    #[tracing::instrument(skip(base_dir))]
    pub fn new(base_dir: impl Into<PathBuf>) -> NovelistResult<Self> {
        let base_dir = base_dir.into();

        for category in Category::iter() {
            let dir = base_dir.join(category.as_str());
            std::fs::create_dir_all(&dir).map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    dir.display(),
                    e
                )))
            })?;
        }

        tracing::debug!(path = %base_dir.display(), "Opened JSON storage");
        Ok(Self { base_dir })
    }

    /// Root directory of the store.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// File path of a record. Ids may not contain path separators.
    pub fn record_path(&self, category: Category, id: &str) -> NovelistResult<PathBuf> {
        let id = id.trim();
        if id.is_empty() || id.contains(['/', '\\']) || id.starts_with('.') {
            return Err(StorageError::new(StorageErrorKind::InvalidValue(format!(
                "invalid record id '{}'",
                id
            )))
            .into());
        }
        Ok(self
            .base_dir
            .join(category.as_str())
            .join(format!("{}.json", id)))
    }

    /// Serialize and store a record, returning the file path.
    #[tracing::instrument(skip(self, record), fields(category = %category))]
    pub async fn save<T>(&self, category: Category, id: &str, record: &T) -> NovelistResult<PathBuf>
    where
        T: Serialize + ?Sized,
    {
        let path = self.record_path(category, id)?;
        let text = serde_json::to_string_pretty(record).map_err(|e| {
            JsonError::new(e.to_string()).with_path(path.display().to_string())
        })?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let temp_path = path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, text.as_bytes())
            .await
            .map_err(|e| {
                StorageError::new(StorageErrorKind::FileWrite(format!(
                    "{}: {}",
                    temp_path.display(),
                    e
                )))
            })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::info!(path = %path.display(), bytes = text.len(), "Saved record");
        Ok(path)
    }

    /// Load a record as untyped JSON.
    ///
    /// # Errors
    ///
    /// `NotFound("{category}/{id}")` when no such record exists.
    #[tracing::instrument(skip(self), fields(category = %category))]
    pub async fn load_value(&self, category: Category, id: &str) -> NovelistResult<Value> {
        let path = self.record_path(category, id)?;
        let text = tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(format!("{}/{}", category, id)))
            } else {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        })?;

        let value = serde_json::from_str::<Value>(&text).map_err(|e| {
            JsonError::new(e.to_string()).with_path(path.display().to_string())
        })?;
        tracing::debug!(path = %path.display(), "Loaded record");
        Ok(value)
    }

    /// Load and deserialize a record.
    pub async fn load<T: DeserializeOwned>(&self, category: Category, id: &str) -> NovelistResult<T> {
        let value = self.load_value(category, id).await?;
        serde_json::from_value(value).map_err(|e| {
            JsonError::new(e.to_string())
                .with_path(format!("{}/{}", category, id))
                .into()
        })
    }

    /// Whether a record exists.
    pub async fn exists(&self, category: Category, id: &str) -> NovelistResult<bool> {
        let path = self.record_path(category, id)?;
        Ok(tokio::fs::try_exists(&path).await.unwrap_or(false))
    }

    /// Delete a record. Returns false when it did not exist.
    #[tracing::instrument(skip(self), fields(category = %category))]
    pub async fn delete(&self, category: Category, id: &str) -> NovelistResult<bool> {
        let path = self.record_path(category, id)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), "Deleted record");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::new(StorageErrorKind::FileDelete(format!(
                "{}: {}",
                path.display(),
                e
            )))
            .into()),
        }
    }

    /// Summaries of every record in a category, newest first.
    ///
    /// Files that cannot be read or parsed are skipped with a warning.
    #[tracing::instrument(skip(self), fields(category = %category))]
    pub async fn list(&self, category: Category) -> NovelistResult<Vec<RecordSummary>> {
        let dir = self.base_dir.join(category.as_str());
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    dir.display(),
                    e
                )))
                .into());
            }
        };

        let mut summaries = Vec::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), error = %e, "Failed to read directory entry");
                    continue;
                }
            };
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();

            let parsed = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| e.to_string())
                .and_then(|text| {
                    serde_json::from_str::<Value>(&text).map_err(|e| e.to_string())
                });
            match parsed {
                Ok(record) => summaries.push(RecordSummary::from_record(&record, &stem)),
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "Skipping unreadable record");
                }
            }
        }

        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        tracing::debug!(count = summaries.len(), "Listed records");
        Ok(summaries)
    }

    /// Summaries of the records in a category that belong to `world_id`.
    pub async fn list_by_world(
        &self,
        category: Category,
        world_id: &str,
    ) -> NovelistResult<Vec<RecordSummary>> {
        Ok(self
            .list(category)
            .await?
            .into_iter()
            .filter(|summary| summary.world_id.as_deref() == Some(world_id))
            .collect())
    }

    /// Read the value at a dot path inside a record. The empty path
    /// returns the whole record.
    pub async fn query(&self, category: Category, id: &str, path: &str) -> NovelistResult<Value> {
        let record = self.load_value(category, id).await?;
        Ok(get_path(&record, path)?.clone())
    }

    /// Set the value at a dot path inside a record and save it, returning
    /// the updated record.
    ///
    /// With an empty path the record is replaced wholesale; the replacement
    /// must be an object, and the stored `id` and `world_id` are kept. Paths
    /// into `id` or `world_id` are rejected. An existing `updated_at` is
    /// refreshed.
    #[tracing::instrument(skip(self, value), fields(category = %category))]
    pub async fn update(
        &self,
        category: Category,
        id: &str,
        path: &str,
        value: Value,
    ) -> NovelistResult<Value> {
        let root = path
            .split('.')
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or_default();
        if IDENTITY_KEYS.contains(&root) {
            return Err(StorageError::new(StorageErrorKind::InvalidValue(format!(
                "'{}' identifies the record and cannot be updated",
                root
            )))
            .into());
        }

        let mut record = self.load_value(category, id).await?;

        if root.is_empty() {
            let Value::Object(mut replacement) = value else {
                return Err(StorageError::new(StorageErrorKind::InvalidValue(
                    "a whole-record replacement must be a JSON object".to_string(),
                ))
                .into());
            };
            for key in IDENTITY_KEYS {
                if let Some(kept) = record.get(key) {
                    replacement.insert(key.to_string(), kept.clone());
                }
            }
            record = Value::Object(replacement);
        } else {
            set_path(&mut record, path, value)?;
        }

        if let Some(updated_at) = record.get_mut("updated_at") {
            *updated_at = Value::String(
                chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true),
            );
        }

        self.save(category, id, &record).await?;
        Ok(record)
    }
}
