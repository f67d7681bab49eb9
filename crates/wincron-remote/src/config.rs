//! Remote adapter configuration.

use std::time::Duration;

/// Timeouts applied to remote calls.
#[derive(Debug, Clone, Copy)]
pub struct RemoteConfig {
    /// Timeout for ordinary calls. Zero disables the timeout.
    pub call_timeout: Duration,
    /// Timeout for calls that execute a job and wait for it to finish.
    pub run_timeout: Duration,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_millis(5000),
            run_timeout: Duration::from_millis(60_000),
        }
    }
}
