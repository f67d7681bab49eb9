//! Remote call errors.

use thiserror::Error;

/// Errors surfaced by the remote call adapter.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The call did not settle within its timeout window. The underlying
    /// call keeps running; only the waiting is abandoned.
    #[error("timeout after {0}ms")]
    Timeout(u64),

    /// The remote side reported a failure.
    #[error("{service}.{method} failed: {message}")]
    Call {
        service: String,
        method: String,
        message: String,
    },

    /// A request payload could not be encoded.
    #[error("invalid payload: {0}")]
    Payload(String),
}
