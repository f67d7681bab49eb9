//! Job entity and run-request types.

use serde::{Deserialize, Serialize};

/// What happens when a scheduled run fires while a previous run of the
/// same job is still executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConcurrencyPolicy {
    /// Skip the new run entirely.
    #[default]
    Skip,
    /// Terminate the running instance, then start the new run.
    KillOld,
    /// Let both instances run.
    Allow,
}

impl ConcurrencyPolicy {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skip => "skip",
            Self::KillOld => "kill_old",
            Self::Allow => "allow",
        }
    }
}

impl From<String> for ConcurrencyPolicy {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "kill_old" => Self::KillOld,
            "allow" => Self::Allow,
            // Unknown values collapse to the default, matching the service.
            _ => Self::Skip,
        }
    }
}

impl From<ConcurrencyPolicy> for String {
    fn from(value: ConcurrencyPolicy) -> Self {
        value.as_str().to_string()
    }
}

/// Windows process-creation flag applied when the job command is spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProcessCreationFlag {
    /// Inherit the parent's console (empty wire value).
    #[default]
    Inherit,
    NewConsole,
    NoWindow,
    Detached,
}

impl ProcessCreationFlag {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inherit => "",
            Self::NewConsole => "CREATE_NEW_CONSOLE",
            Self::NoWindow => "CREATE_NO_WINDOW",
            Self::Detached => "DETACHED_PROCESS",
        }
    }
}

impl From<String> for ProcessCreationFlag {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "CREATE_NEW_CONSOLE" => Self::NewConsole,
            "CREATE_NO_WINDOW" => Self::NoWindow,
            "DETACHED_PROCESS" => Self::Detached,
            _ => Self::Inherit,
        }
    }
}

impl From<ProcessCreationFlag> for String {
    fn from(value: ProcessCreationFlag) -> Self {
        value.as_str().to_string()
    }
}

/// A schedulable unit of work: command + schedule + run policy.
///
/// Owned canonically by the remote service; the store holds a cached copy.
/// An empty `id` means "unsaved/new".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub name: String,
    /// Grouping label, empty = ungrouped.
    pub folder: String,
    /// Schedule expression, opaque to this core.
    pub cron: String,
    pub command: String,
    pub args: Vec<String>,
    pub work_dir: String,
    #[serde(rename = "flagProcessCreation")]
    pub flag_process_creation: ProcessCreationFlag,
    /// Run timeout in seconds, `0` = no timeout.
    pub timeout: u32,
    pub concurrency_policy: ConcurrencyPolicy,
    pub enabled: bool,
    pub max_consecutive_failures: u32,

    // Server-derived, read-only fields carried for display.
    pub consecutive_failures: u32,
    pub executed_count: u64,
    pub last_executed_at: String,
    pub next_run_at: String,
}

/// Request payload for a one-off preview run driven from the edit form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PreviewRunRequest {
    pub command: String,
    pub args: Vec<String>,
    pub work_dir: String,
    #[serde(rename = "flagProcessCreation")]
    pub flag_process_creation: ProcessCreationFlag,
    pub timeout: u32,
    pub job_id: String,
    pub job_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concurrency_policy_round_trip() {
        for (wire, policy) in [
            ("skip", ConcurrencyPolicy::Skip),
            ("kill_old", ConcurrencyPolicy::KillOld),
            ("allow", ConcurrencyPolicy::Allow),
        ] {
            assert_eq!(ConcurrencyPolicy::from(wire.to_string()), policy);
            assert_eq!(policy.as_str(), wire);
        }
    }

    #[test]
    fn test_concurrency_policy_unknown_defaults_to_skip() {
        assert_eq!(
            ConcurrencyPolicy::from("sometimes".to_string()),
            ConcurrencyPolicy::Skip
        );
        assert_eq!(ConcurrencyPolicy::from("  ".to_string()), ConcurrencyPolicy::Skip);
    }

    #[test]
    fn test_process_creation_flag_normalizes_case() {
        assert_eq!(
            ProcessCreationFlag::from("create_no_window".to_string()),
            ProcessCreationFlag::NoWindow
        );
        assert_eq!(
            ProcessCreationFlag::from("garbage".to_string()),
            ProcessCreationFlag::Inherit
        );
    }

    #[test]
    fn test_job_deserializes_from_partial_payload() {
        let job: Job = serde_json::from_str(
            r#"{"id":"j1","name":"Backup","cron":"0 * * * *","command":"backup.exe"}"#,
        )
        .unwrap();
        assert_eq!(job.id, "j1");
        assert_eq!(job.concurrency_policy, ConcurrencyPolicy::Skip);
        assert!(job.args.is_empty());
        assert!(!job.enabled);
    }

    #[test]
    fn test_job_serializes_camel_case() {
        let job = Job {
            id: "j1".into(),
            work_dir: "C:\\tasks".into(),
            max_consecutive_failures: 3,
            ..Job::default()
        };
        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["workDir"], "C:\\tasks");
        assert_eq!(value["maxConsecutiveFailures"], 3);
        assert_eq!(value["flagProcessCreation"], "");
    }
}
