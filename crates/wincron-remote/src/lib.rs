//! # WinCron Remote
//!
//! Remote call adapter for the wincron UI core: the [`RemoteBridge`] seam to
//! the host's asynchronous command interface, per-call timeouts, total
//! response normalization, and the typed service APIs the store consumes.
//!
//! The remote contract is not guaranteed stable: responses may arrive as a
//! native array, a native object, or a JSON-encoded string, optionally
//! wrapped in an envelope object. The [`normalize`] module absorbs all of
//! that into canonical values and never errors.

pub mod adapter;
pub mod bridge;
pub mod config;
pub mod config_api;
pub mod cron_api;
pub mod error;
pub mod events;
pub mod normalize;
pub mod settings_api;

pub use adapter::RemoteAdapter;
pub use bridge::{CONFIG_SERVICE, CRON_SERVICE, RemoteBridge, SETTINGS_SERVICE};
pub use config::RemoteConfig;
pub use config_api::ConfigApi;
pub use cron_api::CronApi;
pub use error::RemoteError;
pub use events::{EventHub, EventSource};
pub use settings_api::SettingsApi;
