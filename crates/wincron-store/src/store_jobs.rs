//! Job list, editor form, and execution operations.

use wincron_protocols::Job;

use crate::error::StoreError;
use crate::form::JobForm;
use crate::notify::NotificationKind;
use crate::signal::UiSignal;
use crate::store::CronStore;

impl CronStore {
    /// Fetch the full job list. Jobs inside their undo window are filtered
    /// out so a pending delete never reappears from a concurrent refresh.
    /// On failure the list is cleared and the error surfaced.
    pub async fn refresh_jobs(&self) {
        match self.cron.list_jobs().await {
            Ok(jobs) => {
                let mut state = self.state.lock();
                let retained: Vec<Job> = jobs
                    .into_iter()
                    .filter(|job| !state.pending_deletes.contains_key(&job.id))
                    .collect();
                state.jobs = retained;
            }
            Err(e) => {
                let error = StoreError::from(e);
                self.state.lock().jobs.clear();
                self.report_failure(&error);
            }
        }
    }

    /// Load a job into the edit form, flushing any pending draft write
    /// first and resetting the dirty baseline. Returns `false` when the
    /// flush failed to persist.
    pub async fn load_job_to_form(&self, job: &Job) -> bool {
        let flushed = self.flush_draft_write().await;
        let mut state = self.state.lock();
        state.selected_job_id = job.id.clone();
        state.form = JobForm::from_job(job);
        state.baseline = state.form.snapshot();
        flushed
    }

    /// Reset the form to a new, unsaved job. Flushes any pending draft
    /// write, then clears the persisted draft. Returns `false` when either
    /// storage operation failed.
    pub async fn reset_form(&self) -> bool {
        let flushed = self.flush_draft_write().await;
        {
            let mut state = self.state.lock();
            state.selected_job_id.clear();
            state.form = JobForm::default();
            state.baseline = state.form.snapshot();
        }
        let cleared = self.clear_draft().await;
        flushed && cleared
    }

    /// Save the form through the upsert operation, then re-sync the list,
    /// the form, and its logs from the saved entity. Emits a save pulse
    /// distinct from the toast slot.
    pub async fn save_job(&self) {
        self.set_error("");
        self.toast_key("toast.saving", NotificationKind::Info);
        match self.save_job_inner().await {
            Ok(()) => {
                self.toast_key("toast.saved", NotificationKind::Success);
                self.send_signal(UiSignal::SavePulse { success: true });
            }
            Err(e) => {
                self.report_failure(&e);
                self.send_signal(UiSignal::SavePulse { success: false });
            }
        }
    }

    async fn save_job_inner(&self) -> Result<(), StoreError> {
        let payload = self.state.lock().form.to_job();
        let saved = self
            .cron
            .upsert_job(&payload)
            .await?
            .filter(|job| !job.id.is_empty())
            .ok_or(StoreError::SaveFailed)?;

        self.refresh_jobs().await;
        self.clear_draft().await;
        self.load_job_to_form(&saved).await;
        self.load_logs(&saved.id).await;
        Ok(())
    }

    /// Flip a job's enabled flag and re-sync it.
    pub async fn toggle_job(&self, job: &Job) {
        self.set_error("");
        match self.toggle_job_inner(job).await {
            Ok(()) => {}
            Err(e) => self.set_error(&e.to_string()),
        }
    }

    async fn toggle_job_inner(&self, job: &Job) -> Result<(), StoreError> {
        let updated = self
            .cron
            .set_job_enabled(&job.id, !job.enabled)
            .await?
            .filter(|j| !j.id.is_empty())
            .ok_or(StoreError::UpdateFailed)?;

        self.refresh_jobs().await;
        let selected = self.state.lock().selected_job_id == updated.id;
        if selected {
            self.load_job_to_form(&updated).await;
        }
        Ok(())
    }

    /// Move a job into a folder; the name is trimmed before the call.
    pub async fn set_job_folder(&self, id: &str, folder: &str) {
        self.set_error("");
        match self.set_job_folder_inner(id, folder.trim()).await {
            Ok(()) => {}
            Err(e) => self.set_error(&e.to_string()),
        }
    }

    async fn set_job_folder_inner(&self, id: &str, folder: &str) -> Result<(), StoreError> {
        let updated = self
            .cron
            .set_job_folder(id, folder)
            .await?
            .filter(|j| !j.id.is_empty())
            .ok_or(StoreError::UpdateFailed)?;

        self.refresh_jobs().await;
        let selected = self.state.lock().selected_job_id == updated.id;
        if selected {
            self.load_job_to_form(&updated).await;
        }
        Ok(())
    }

    /// Execute a job immediately. The resulting entry is appended to the
    /// log view when that job is selected or nothing is.
    pub async fn run_now(&self, job_id: &str) {
        self.set_error("");
        match self.cron.run_now(job_id).await {
            Ok(Some(entry)) => {
                let mut state = self.state.lock();
                if state.selected_job_id.is_empty() || state.selected_job_id == job_id {
                    state.logs.push(entry);
                }
            }
            Ok(None) => self.report_failure(&StoreError::RunFailed),
            Err(e) => self.report_failure(&e.into()),
        }
    }

    /// Execute the form's command once without saving it.
    pub async fn run_preview_from_form(&self) {
        self.set_error("");
        let request = self.state.lock().form.preview_request();
        match self.cron.run_preview(&request).await {
            Ok(Some(entry)) => self.state.lock().logs.push(entry),
            Ok(None) => self.report_failure(&StoreError::PreviewFailed),
            Err(e) => self.report_failure(&e.into()),
        }
    }

    /// Load the recent executions of a job into the log view.
    pub async fn load_logs(&self, job_id: &str) {
        match self.cron.list_logs(job_id, self.config.log_fetch_limit).await {
            Ok(entries) => self.state.lock().logs = entries,
            Err(e) => {
                let error = StoreError::from(e);
                self.state.lock().logs.clear();
                self.report_failure(&error);
            }
        }
    }

    /// Clear all execution logs.
    pub async fn clear_logs(&self) -> Result<(), StoreError> {
        self.set_error("");
        self.toast_key("toast.clearing", NotificationKind::Info);
        match self.cron.clear_logs().await {
            Ok(()) => {
                self.state.lock().logs.clear();
                self.toast_key("toast.cleared", NotificationKind::Success);
                Ok(())
            }
            Err(e) => {
                let error = StoreError::from(e);
                self.report_failure(&error);
                Err(error)
            }
        }
    }

    /// Wipe all jobs and logs, then reset the local view.
    pub async fn reset_all(&self) -> Result<(), StoreError> {
        self.set_error("");
        self.toast_key("toast.clearing", NotificationKind::Info);
        match self.cron.reset_all().await {
            Ok(()) => {
                self.reset_form().await;
                self.state.lock().logs.clear();
                self.refresh_jobs().await;
                self.toast_key("toast.cleared", NotificationKind::Success);
                Ok(())
            }
            Err(e) => {
                let error = StoreError::from(e);
                self.report_failure(&error);
                Err(error)
            }
        }
    }

    /// Ask the service when a schedule expression would next fire.
    pub async fn preview_next_run(&self, cron_expr: &str) -> Result<String, StoreError> {
        Ok(self.cron.preview_next_run(cron_expr).await?)
    }
}
