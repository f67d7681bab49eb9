//! Wire types exchanged with the remote service.

mod job;
mod log;
mod settings;

pub use job::{ConcurrencyPolicy, Job, PreviewRunRequest, ProcessCreationFlag};
pub use log::JobLogEntry;
pub use settings::{AppSettings, CloseBehavior, ExportOptions, ImportStrategy};
