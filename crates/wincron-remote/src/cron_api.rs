//! Typed API over the cron service.

use serde_json::{Value, json};

use wincron_protocols::{Job, JobLogEntry, PreviewRunRequest};

use crate::adapter::RemoteAdapter;
use crate::bridge::CRON_SERVICE;
use crate::error::RemoteError;
use crate::normalize::{decode_item, decode_items, normalize_bool, normalize_string};

/// Job CRUD, execution, and the global switch.
#[derive(Clone)]
pub struct CronApi {
    adapter: RemoteAdapter,
}

impl CronApi {
    pub fn new(adapter: RemoteAdapter) -> Self {
        Self { adapter }
    }

    async fn invoke(&self, method: &str, args: Vec<Value>) -> Result<Value, RemoteError> {
        self.adapter.invoke(CRON_SERVICE, method, args).await
    }

    /// Fetch the full job list. Malformed elements are dropped.
    pub async fn list_jobs(&self) -> Result<Vec<Job>, RemoteError> {
        let raw = self.invoke("ListJobs", Vec::new()).await?;
        Ok(decode_items(raw))
    }

    /// Create or update a job. `None` means the response carried no entity.
    pub async fn upsert_job(&self, job: &Job) -> Result<Option<Job>, RemoteError> {
        let payload =
            serde_json::to_value(job).map_err(|e| RemoteError::Payload(e.to_string()))?;
        let raw = self.invoke("UpsertJob", vec![payload]).await?;
        Ok(decode_item(raw))
    }

    pub async fn delete_job(&self, id: &str) -> Result<(), RemoteError> {
        self.invoke("DeleteJob", vec![json!(id)]).await?;
        Ok(())
    }

    pub async fn set_job_enabled(
        &self,
        id: &str,
        enabled: bool,
    ) -> Result<Option<Job>, RemoteError> {
        let raw = self
            .invoke("SetJobEnabled", vec![json!(id), json!(enabled)])
            .await?;
        Ok(decode_item(raw))
    }

    pub async fn set_job_folder(
        &self,
        id: &str,
        folder: &str,
    ) -> Result<Option<Job>, RemoteError> {
        let raw = self
            .invoke("SetJobFolder", vec![json!(id), json!(folder)])
            .await?;
        Ok(decode_item(raw))
    }

    /// Execute a job immediately and wait for its log entry.
    pub async fn run_now(&self, id: &str) -> Result<Option<JobLogEntry>, RemoteError> {
        let raw = self
            .adapter
            .invoke_with_timeout(
                CRON_SERVICE,
                "RunNow",
                self.adapter.config().run_timeout,
                vec![json!(id)],
            )
            .await?;
        Ok(decode_item(raw))
    }

    /// Execute the given command once without saving it as a job.
    pub async fn run_preview(
        &self,
        request: &PreviewRunRequest,
    ) -> Result<Option<JobLogEntry>, RemoteError> {
        let payload =
            serde_json::to_value(request).map_err(|e| RemoteError::Payload(e.to_string()))?;
        let raw = self
            .adapter
            .invoke_with_timeout(
                CRON_SERVICE,
                "RunPreview",
                self.adapter.config().run_timeout,
                vec![payload],
            )
            .await?;
        Ok(decode_item(raw))
    }

    /// List the most recent executions of a job, newest last.
    pub async fn list_logs(
        &self,
        job_id: &str,
        limit: u32,
    ) -> Result<Vec<JobLogEntry>, RemoteError> {
        let raw = self
            .invoke("ListLogs", vec![json!(job_id), json!(limit)])
            .await?;
        Ok(decode_items(raw))
    }

    pub async fn clear_logs(&self) -> Result<(), RemoteError> {
        self.invoke("ClearLogs", Vec::new()).await?;
        Ok(())
    }

    /// Wipe all jobs and logs.
    pub async fn reset_all(&self) -> Result<(), RemoteError> {
        self.invoke("ResetAll", Vec::new()).await?;
        Ok(())
    }

    pub async fn get_global_enabled(&self) -> Result<bool, RemoteError> {
        let raw = self.invoke("GetGlobalEnabled", Vec::new()).await?;
        Ok(normalize_bool(raw))
    }

    pub async fn set_global_enabled(&self, enabled: bool) -> Result<(), RemoteError> {
        self.invoke("SetGlobalEnabled", vec![json!(enabled)]).await?;
        Ok(())
    }

    /// Ask the service when a schedule expression would next fire.
    pub async fn preview_next_run(&self, cron: &str) -> Result<String, RemoteError> {
        let raw = self.invoke("PreviewNextRun", vec![json!(cron)]).await?;
        Ok(normalize_string(raw))
    }
}
