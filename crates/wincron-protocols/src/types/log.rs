//! Execution log entries.

use serde::{Deserialize, Serialize};

/// Result of one job execution.
///
/// Immutable once produced by the service. Also the payload of the
/// `jobExecuted` push event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobLogEntry {
    pub id: String,
    pub job_id: String,
    pub job_name: String,
    pub command_line: String,
    pub started_at: String,
    pub finished_at: String,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub error: String,
}

impl JobLogEntry {
    /// Whether the execution finished successfully.
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_entry_defaults() {
        let entry: JobLogEntry = serde_json::from_str(r#"{"jobId":"j1"}"#).unwrap();
        assert_eq!(entry.job_id, "j1");
        assert_eq!(entry.exit_code, 0);
        assert!(entry.succeeded());
    }

    #[test]
    fn test_log_entry_failure() {
        let entry: JobLogEntry =
            serde_json::from_str(r#"{"jobId":"j1","exitCode":2}"#).unwrap();
        assert!(!entry.succeeded());
    }
}
