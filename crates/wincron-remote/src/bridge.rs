//! Bridge trait to the host's command interface.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::RemoteError;

/// Remote service hosting job CRUD, execution, and the global switch.
pub const CRON_SERVICE: &str = "main.CronService";
/// Remote service hosting application settings.
pub const SETTINGS_SERVICE: &str = "main.SettingsService";
/// Remote service hosting config import/export.
pub const CONFIG_SERVICE: &str = "main.ConfigService";

/// The single seam to the host's asynchronous command interface.
///
/// Implementations invoke the named remote operation and resolve with its
/// raw response value. The response shape is not guaranteed; callers pass
/// results through the [`crate::normalize`] routines.
#[async_trait]
pub trait RemoteBridge: Send + Sync {
    /// Invoke `service.method` with positional JSON arguments.
    async fn call(
        &self,
        service: &str,
        method: &str,
        args: Vec<Value>,
    ) -> Result<Value, RemoteError>;
}
