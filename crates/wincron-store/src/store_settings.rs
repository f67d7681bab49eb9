//! Settings, the global switch, and config import/export.

use wincron_protocols::{CloseBehavior, ExportOptions, ImportStrategy};

use crate::error::StoreError;
use crate::notify::NotificationKind;
use crate::store::CronStore;

impl CronStore {
    /// Load the settings blob into the local cache.
    pub async fn load_settings(&self) {
        match self.settings_api.get_settings().await {
            Ok(settings) => self.state.lock().settings = settings,
            Err(e) => self.report_failure(&e.into()),
        }
    }

    pub async fn set_close_behavior(&self, behavior: CloseBehavior) -> Result<(), StoreError> {
        match self.settings_api.set_close_behavior(behavior).await {
            Ok(()) => {
                self.state.lock().settings.close_behavior = behavior;
                self.toast_key("toast.saved", NotificationKind::Success);
                Ok(())
            }
            Err(e) => {
                let error = StoreError::from(e);
                self.report_failure(&error);
                Err(error)
            }
        }
    }

    pub async fn set_silent_start(&self, enabled: bool) -> Result<(), StoreError> {
        match self.settings_api.set_silent_start(enabled).await {
            Ok(()) => {
                self.state.lock().settings.silent_start = enabled;
                self.toast_key("toast.saved", NotificationKind::Success);
                Ok(())
            }
            Err(e) => {
                let error = StoreError::from(e);
                self.report_failure(&error);
                Err(error)
            }
        }
    }

    pub async fn set_auto_start(&self, enabled: bool) -> Result<(), StoreError> {
        match self.settings_api.set_auto_start(enabled).await {
            Ok(()) => {
                self.state.lock().settings.auto_start = enabled;
                self.toast_key("toast.saved", NotificationKind::Success);
                Ok(())
            }
            Err(e) => {
                let error = StoreError::from(e);
                self.report_failure(&error);
                Err(error)
            }
        }
    }

    pub async fn set_lightweight_mode(&self, enabled: bool) -> Result<(), StoreError> {
        match self.settings_api.set_lightweight_mode(enabled).await {
            Ok(()) => {
                self.state.lock().settings.lightweight_mode = enabled;
                self.toast_key("toast.saved", NotificationKind::Success);
                Ok(())
            }
            Err(e) => {
                let error = StoreError::from(e);
                self.report_failure(&error);
                Err(error)
            }
        }
    }

    /// Open the data directory in the host's file manager.
    pub async fn open_data_dir(&self) -> Result<String, StoreError> {
        self.set_error("");
        match self.settings_api.open_data_dir().await {
            Ok(dir) => {
                let message = if dir.is_empty() {
                    self.localize("toast.opened_data_dir", &[])
                } else {
                    self.localize("toast.opened_data_dir_with_path", &[("dir", &dir)])
                };
                self.toast(message, NotificationKind::Success);
                Ok(dir)
            }
            Err(e) => {
                let error = StoreError::from(e);
                self.report_failure(&error);
                Err(error)
            }
        }
    }

    /// Load the master switch state.
    pub async fn load_global_enabled(&self) {
        match self.cron.get_global_enabled().await {
            Ok(enabled) => self.state.lock().global_enabled = enabled,
            Err(e) => self.report_failure(&e.into()),
        }
    }

    /// Flip the master switch.
    pub async fn set_global_enabled(&self, enabled: bool) -> Result<(), StoreError> {
        match self.cron.set_global_enabled(enabled).await {
            Ok(()) => {
                self.state.lock().global_enabled = enabled;
                let key = if enabled { "global.enabled" } else { "global.disabled" };
                self.toast_key(key, NotificationKind::Success);
                Ok(())
            }
            Err(e) => {
                let error = StoreError::from(e);
                self.report_failure(&error);
                Err(error)
            }
        }
    }

    /// Export the config document to `path`. An empty path means the host
    /// dialog was cancelled.
    pub async fn export_config(
        &self,
        path: &str,
        options: ExportOptions,
    ) -> Result<String, StoreError> {
        self.set_error("");
        if path.trim().is_empty() {
            self.toast_key("toast.export_cancelled", NotificationKind::Info);
            return Ok(String::new());
        }

        self.toast_key("toast.exporting", NotificationKind::Info);
        match self.config_api.export_to_file(path, options).await {
            Ok(written) => {
                let message = if written.is_empty() {
                    self.localize("toast.exported", &[])
                } else {
                    self.localize("toast.exported_with_path", &[("path", &written)])
                };
                self.toast(message, NotificationKind::Success);
                Ok(written)
            }
            Err(e) => {
                let error = StoreError::from(e);
                self.report_failure(&error);
                Err(error)
            }
        }
    }

    /// Names of existing jobs that conflict with the import document.
    pub async fn check_import_conflicts(&self, text: &str) -> Result<Vec<String>, StoreError> {
        Ok(self.config_api.check_import_conflicts(text).await?)
    }

    /// Import a config document, then re-sync everything the document can
    /// have touched: jobs, the global switch, and settings.
    pub async fn import_config(
        &self,
        text: &str,
        strategy: ImportStrategy,
    ) -> Result<(), StoreError> {
        self.set_error("");
        self.toast_key("toast.importing", NotificationKind::Info);
        match self.config_api.import(text, strategy).await {
            Ok(()) => {
                self.reset_form().await;
                self.state.lock().logs.clear();
                self.refresh_jobs().await;
                self.load_global_enabled().await;
                self.load_settings().await;
                self.toast_key("toast.imported", NotificationKind::Success);
                Ok(())
            }
            Err(e) => {
                let error = StoreError::from(e);
                self.report_failure(&error);
                Err(error)
            }
        }
    }
}
