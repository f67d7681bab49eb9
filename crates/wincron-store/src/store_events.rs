//! Reconciliation of pushed execution events.

use wincron_protocols::JobLogEntry;

use crate::notify::NotificationKind;
use crate::store::CronStore;

impl CronStore {
    /// Merge one `jobExecuted` push event into store state.
    ///
    /// The list refresh runs before the conditional form sync so the sync
    /// sees up-to-date data; the form is only re-synced while clean, so
    /// unsaved edits are never overwritten regardless of which job the
    /// event concerns.
    pub(crate) async fn handle_job_executed(&self, entry: JobLogEntry) {
        let name = if entry.job_name.is_empty() {
            entry.job_id.clone()
        } else {
            entry.job_name.clone()
        };
        let (message, kind) = if entry.succeeded() {
            (
                self.localize("toast.run_ok", &[("name", &name)]),
                NotificationKind::Success,
            )
        } else {
            (
                self.localize(
                    "toast.run_failed",
                    &[("name", &name), ("code", &entry.exit_code.to_string())],
                ),
                NotificationKind::Danger,
            )
        };
        self.toast(message, kind);

        self.refresh_jobs().await;

        let (selected, dirty) = {
            let state = self.state.lock();
            (state.selected_job_id.clone(), state.is_dirty())
        };
        if selected.is_empty() {
            return;
        }

        if !dirty {
            let job = {
                let state = self.state.lock();
                state.jobs.iter().find(|job| job.id == selected).cloned()
            };
            if let Some(job) = job {
                self.load_job_to_form(&job).await;
            }
        }

        if entry.job_id == selected {
            self.load_logs(&selected).await;
        }
    }
}
