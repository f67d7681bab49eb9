//! Crash-safe draft persistence for the edit form.
//!
//! In-progress edits are periodically snapshotted to durable storage and
//! offered for recovery on startup. Storage is a string blob under a
//! single key; a malformed blob is treated as absent and purged.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;
use tokio::fs;
use tracing::debug;

use crate::form::JobForm;

/// Draft persistence errors.
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage error: {0}")]
    Storage(String),
}

/// String-blob persistence under string keys.
///
/// Full-overwrite semantics: `set` replaces the whole blob, so the last
/// writer wins and no partial state is ever observable.
#[async_trait]
pub trait DraftStorage: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, DraftError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), DraftError>;
    async fn remove(&self, key: &str) -> Result<(), DraftError>;
}

/// Persisted snapshot of in-progress edits.
///
/// Carries the baseline alongside the form so recovery restores the
/// original dirty state, not the recovery-time one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub form: JobForm,
    pub baseline: String,
    pub saved_at: DateTime<Utc>,
}

impl Draft {
    pub fn new(form: JobForm, baseline: String) -> Self {
        Self {
            form,
            baseline,
            saved_at: Utc::now(),
        }
    }

    /// Parse a persisted blob. `None` when the blob fails to parse or is
    /// missing its form payload.
    pub fn parse(blob: &str) -> Option<Self> {
        let value: serde_json::Value = serde_json::from_str(blob).ok()?;
        if !value.get("form").is_some_and(serde_json::Value::is_object) {
            return None;
        }
        serde_json::from_value(value).ok()
    }

    /// Encode for storage.
    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// In-memory draft storage for testing.
pub struct MemoryDraftStorage {
    blobs: tokio::sync::RwLock<HashMap<String, String>>,
}

impl MemoryDraftStorage {
    pub fn new() -> Self {
        Self {
            blobs: tokio::sync::RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryDraftStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DraftStorage for MemoryDraftStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, DraftError> {
        Ok(self.blobs.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DraftError> {
        self.blobs
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), DraftError> {
        self.blobs.write().await.remove(key);
        Ok(())
    }
}

/// File-backed draft storage: one JSON file per key in a base directory.
pub struct FileDraftStorage {
    base_dir: PathBuf,
}

impl FileDraftStorage {
    /// Create a store rooted at `base_dir`, creating it if needed.
    pub async fn new(base_dir: impl Into<PathBuf>) -> Result<Self, DraftError> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).await?;
        debug!("FileDraftStorage initialized at {:?}", base_dir);
        Ok(Self { base_dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let sanitized: String = key
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_dir.join(format!("{sanitized}.json"))
    }
}

#[async_trait]
impl DraftStorage for FileDraftStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, DraftError> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DraftError> {
        fs::write(self.path_for(key), value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), DraftError> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
