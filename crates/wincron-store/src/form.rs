//! The edit form and its dirty-tracking snapshot.

use serde::{Deserialize, Serialize};

use wincron_protocols::{ConcurrencyPolicy, Job, PreviewRunRequest, ProcessCreationFlag};

/// Schedule expression preloaded into a fresh form.
const DEFAULT_CRON: &str = "*/1 * * * *";
/// Fallback for a non-positive failure threshold.
const DEFAULT_MAX_CONSECUTIVE_FAILURES: u32 = 3;

/// The single mutable working copy of a job's fields.
///
/// Exists for exactly one job at a time; an empty `id` means the form
/// describes a new, unsaved job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobForm {
    pub id: String,
    pub name: String,
    pub folder: String,
    pub cron: String,
    pub command: String,
    /// Editable argument slots; empty slots are UI affordances and are
    /// stripped from the save payload.
    pub args: Vec<String>,
    pub work_dir: String,
    pub flag_process_creation: ProcessCreationFlag,
    pub timeout: u32,
    pub concurrency_policy: ConcurrencyPolicy,
    pub enabled: bool,
    pub max_consecutive_failures: u32,
}

impl Default for JobForm {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            folder: String::new(),
            cron: DEFAULT_CRON.to_string(),
            command: String::new(),
            args: vec![String::new()],
            work_dir: String::new(),
            flag_process_creation: ProcessCreationFlag::Inherit,
            timeout: 0,
            concurrency_policy: ConcurrencyPolicy::Skip,
            enabled: true,
            max_consecutive_failures: DEFAULT_MAX_CONSECUTIVE_FAILURES,
        }
    }
}

impl JobForm {
    /// Populate the form from a job, coercing out-of-range values.
    pub fn from_job(job: &Job) -> Self {
        Self {
            id: job.id.clone(),
            name: job.name.clone(),
            folder: job.folder.clone(),
            cron: if job.cron.is_empty() {
                DEFAULT_CRON.to_string()
            } else {
                job.cron.clone()
            },
            command: job.command.clone(),
            args: if job.args.is_empty() {
                vec![String::new()]
            } else {
                job.args.clone()
            },
            work_dir: job.work_dir.clone(),
            flag_process_creation: job.flag_process_creation,
            timeout: job.timeout,
            concurrency_policy: job.concurrency_policy,
            enabled: job.enabled,
            max_consecutive_failures: if job.max_consecutive_failures > 0 {
                job.max_consecutive_failures
            } else {
                DEFAULT_MAX_CONSECUTIVE_FAILURES
            },
        }
    }

    /// Build the save payload. Empty argument slots are stripped and the
    /// folder is trimmed.
    pub fn to_job(&self) -> Job {
        Job {
            id: self.id.clone(),
            name: self.name.clone(),
            folder: self.folder.trim().to_string(),
            cron: self.cron.clone(),
            command: self.command.clone(),
            args: self.stripped_args(),
            work_dir: self.work_dir.clone(),
            flag_process_creation: self.flag_process_creation,
            timeout: self.timeout,
            concurrency_policy: self.concurrency_policy,
            enabled: self.enabled,
            max_consecutive_failures: if self.max_consecutive_failures > 0 {
                self.max_consecutive_failures
            } else {
                DEFAULT_MAX_CONSECUTIVE_FAILURES
            },
            ..Job::default()
        }
    }

    /// Build a preview-run request from the current fields.
    pub fn preview_request(&self) -> PreviewRunRequest {
        PreviewRunRequest {
            command: self.command.clone(),
            args: self.stripped_args(),
            work_dir: self.work_dir.clone(),
            flag_process_creation: self.flag_process_creation,
            timeout: self.timeout,
            job_id: self.id.clone(),
            job_name: self.name.clone(),
        }
    }

    /// Normalized, order-stable snapshot used for dirty tracking.
    ///
    /// Dirtiness is defined as this snapshot differing from the baseline
    /// taken when the form was last loaded or saved; empty argument slots,
    /// folder whitespace, and out-of-range numbers do not count as edits.
    pub fn snapshot(&self) -> String {
        serde_json::to_string(&self.to_job()).unwrap_or_default()
    }

    fn stripped_args(&self) -> Vec<String> {
        self.args.iter().filter(|s| !s.is_empty()).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_form_is_a_new_job() {
        let form = JobForm::default();
        assert!(form.id.is_empty());
        assert_eq!(form.cron, DEFAULT_CRON);
        assert!(form.enabled);
        assert_eq!(form.max_consecutive_failures, 3);
    }

    #[test]
    fn test_to_job_strips_empty_args() {
        let form = JobForm {
            args: vec!["".into(), "x".into(), "".into()],
            ..JobForm::default()
        };
        assert_eq!(form.to_job().args, vec!["x".to_string()]);
    }

    #[test]
    fn test_snapshot_ignores_empty_arg_slots() {
        let mut form = JobForm::default();
        let baseline = form.snapshot();
        form.args.push(String::new());
        assert_eq!(form.snapshot(), baseline);
        form.args.push("real".into());
        assert_ne!(form.snapshot(), baseline);
    }

    #[test]
    fn test_snapshot_ignores_folder_whitespace() {
        let mut form = JobForm {
            folder: "Ops".into(),
            ..JobForm::default()
        };
        let baseline = form.snapshot();
        form.folder = "  Ops  ".into();
        assert_eq!(form.snapshot(), baseline);
    }

    #[test]
    fn test_from_job_coerces_failure_threshold() {
        let job = Job {
            max_consecutive_failures: 0,
            ..Job::default()
        };
        assert_eq!(JobForm::from_job(&job).max_consecutive_failures, 3);
    }

    #[test]
    fn test_from_job_keeps_existing_args() {
        let job = Job {
            args: vec!["a".into(), "b".into()],
            ..Job::default()
        };
        assert_eq!(JobForm::from_job(&job).args, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_snapshot_is_order_stable() {
        let form = JobForm {
            name: "Backup".into(),
            command: "backup.exe".into(),
            ..JobForm::default()
        };
        assert_eq!(form.snapshot(), form.clone().snapshot());
    }
}
