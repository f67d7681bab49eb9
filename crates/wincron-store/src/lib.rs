//! # WinCron Store
//!
//! The state-synchronization engine behind the wincron UI: a single
//! [`CronStore`] keeps the rendered job list, the edit form, and the
//! execution log consistent with the asynchronous remote service while
//! providing optimistic deletion with undo, crash-safe draft recovery, and
//! a single-slot notification channel.
//!
//! Three independent change sources feed the store - user edits, pushed
//! execution events, and locally deferred operations - reconciled with
//! timers and message passing only; there is no server-side coordination.
//!
//! ## Construction
//!
//! The store is an explicitly constructed, dependency-injected object:
//! the remote adapter, draft storage, push-event source, and localizer are
//! passed to [`CronStore::new`], so tests substitute fakes freely.

pub mod config;
pub mod deferred;
pub mod draft;
pub mod drag;
pub mod error;
pub mod form;
pub mod notify;
pub mod signal;
pub mod store;
mod store_delete;
mod store_drafts;
mod store_events;
mod store_jobs;
mod store_settings;

pub use config::StoreConfig;
pub use deferred::Deferred;
pub use draft::{Draft, DraftError, DraftStorage, FileDraftStorage, MemoryDraftStorage};
pub use drag::{DragData, DragTransfer};
pub use error::StoreError;
pub use form::JobForm;
pub use notify::{Notification, NotificationChannel, NotificationKind, NotifyOptions};
pub use signal::UiSignal;
pub use store::CronStore;
