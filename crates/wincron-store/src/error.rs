//! Store errors.

use thiserror::Error;

use crate::draft::DraftError;
use wincron_remote::RemoteError;

/// Errors surfaced by store operations.
///
/// Every remote-call site inside the store catches at the boundary; these
/// values are recorded on the transient error field and shown through the
/// notification channel rather than escaping to the UI uncaught.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A remote call failed or timed out.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// The upsert response carried no valid entity.
    #[error("failed to save job")]
    SaveFailed,

    /// An update response carried no valid entity.
    #[error("failed to update job")]
    UpdateFailed,

    /// A run request produced no log entry.
    #[error("failed to run job")]
    RunFailed,

    /// A preview run produced no log entry.
    #[error("failed to run preview")]
    PreviewFailed,

    /// Draft persistence failed.
    #[error(transparent)]
    Draft(#[from] DraftError),
}
