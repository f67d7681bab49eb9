//! Store configuration.

use std::time::Duration;

/// Timing constants and storage keys for the store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// How long a notification stays up before expiring on its own.
    pub toast_duration: Duration,
    /// Undo window between an optimistic delete and the remote delete.
    pub undo_grace: Duration,
    /// Debounce applied to draft autosaves while the form is dirty.
    pub draft_debounce: Duration,
    /// Storage key of the persisted draft blob.
    pub draft_key: String,
    /// How many log entries to request per fetch.
    pub log_fetch_limit: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            toast_duration: Duration::from_millis(3000),
            undo_grace: Duration::from_millis(5000),
            draft_debounce: Duration::from_millis(300),
            draft_key: "wincron.draft".to_string(),
            log_fetch_limit: 100,
        }
    }
}
