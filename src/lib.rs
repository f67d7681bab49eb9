//! # wincron
//!
//! Application composition root for the wincron UI core: constructs the
//! state store with its injected collaborators and re-exports the public
//! surface of the workspace crates.
//!
//! The host embedding this core provides three things: a [`RemoteBridge`]
//! to its asynchronous command interface, a [`DraftStorage`] blob store,
//! and an [`EventSource`] delivering `jobExecuted` push events. Everything
//! else - the job list, edit form, optimistic deletes, draft recovery,
//! notifications - lives behind [`CronStore`].
//!
//! ```no_run
//! # use std::sync::Arc;
//! # async fn wire(
//! #     bridge: Arc<dyn wincron::remote::RemoteBridge>,
//! #     drafts: Arc<dyn wincron::store::DraftStorage>,
//! #     events: Arc<dyn wincron::remote::EventSource>,
//! # ) {
//! let core = wincron::AppCore::new(bridge, drafts, events);
//! core.start().await;
//! // ... hand core.store() to the rendering layer ...
//! core.shutdown();
//! # }
//! ```

use std::sync::Arc;

use wincron_protocols::{EnglishMessages, Localizer};
use wincron_remote::{EventSource, RemoteAdapter, RemoteBridge, RemoteConfig};
use wincron_store::{CronStore, DraftStorage, DragTransfer, StoreConfig};

pub use wincron_protocols as protocols;
pub use wincron_remote as remote;
pub use wincron_store as store;

pub use wincron_protocols::{
    AppSettings, CloseBehavior, ConcurrencyPolicy, ExportOptions, ImportStrategy, Job,
    JobLogEntry, PreviewRunRequest, ProcessCreationFlag,
};
pub use wincron_remote::{EventHub, RemoteError};
pub use wincron_store::{
    JobForm, Notification, NotificationKind, StoreError, UiSignal,
};

/// The application root: owns the store and the drag codec, wired to the
/// host's collaborators.
pub struct AppCore {
    store: Arc<CronStore>,
    drag: Arc<DragTransfer>,
}

impl AppCore {
    /// Wire the core with default timeouts and the built-in English
    /// message catalog.
    pub fn new(
        bridge: Arc<dyn RemoteBridge>,
        drafts: Arc<dyn DraftStorage>,
        events: Arc<dyn EventSource>,
    ) -> Self {
        Self::with_config(
            bridge,
            drafts,
            events,
            Arc::new(EnglishMessages),
            RemoteConfig::default(),
            StoreConfig::default(),
        )
    }

    /// Wire the core with explicit configuration and localization.
    pub fn with_config(
        bridge: Arc<dyn RemoteBridge>,
        drafts: Arc<dyn DraftStorage>,
        events: Arc<dyn EventSource>,
        localizer: Arc<dyn Localizer>,
        remote_config: RemoteConfig,
        store_config: StoreConfig,
    ) -> Self {
        let adapter = RemoteAdapter::new(bridge, remote_config);
        let store = CronStore::new(adapter, drafts, events, localizer, store_config);
        Self {
            store,
            drag: Arc::new(DragTransfer::new()),
        }
    }

    /// The state store.
    pub fn store(&self) -> &Arc<CronStore> {
        &self.store
    }

    /// The drag identity codec.
    pub fn drag(&self) -> &Arc<DragTransfer> {
        &self.drag
    }

    /// Start the core: initial loads, draft recovery offer, and the push
    /// subscription. Safe to call more than once.
    pub async fn start(&self) {
        self.store.init().await;
    }

    /// Tear the core down: ends the subscription and cancels every
    /// outstanding timer.
    pub fn shutdown(&self) {
        self.store.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use wincron_store::MemoryDraftStorage;

    struct EmptyBridge;

    #[async_trait]
    impl RemoteBridge for EmptyBridge {
        async fn call(
            &self,
            _service: &str,
            _method: &str,
            _args: Vec<Value>,
        ) -> Result<Value, RemoteError> {
            Ok(json!(null))
        }
    }

    #[tokio::test]
    async fn test_app_core_starts_and_shuts_down() {
        let core = AppCore::new(
            Arc::new(EmptyBridge),
            Arc::new(MemoryDraftStorage::new()),
            Arc::new(EventHub::new()),
        );

        core.start().await;
        assert!(core.store().jobs().is_empty());
        assert!(!core.store().is_dirty());

        core.shutdown();
    }
}
