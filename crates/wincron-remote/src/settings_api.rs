//! Typed API over the settings service.

use serde_json::{Value, json};

use wincron_protocols::{AppSettings, CloseBehavior};

use crate::adapter::RemoteAdapter;
use crate::bridge::SETTINGS_SERVICE;
use crate::error::RemoteError;
use crate::normalize::{normalize_settings, normalize_string};

/// Application settings get/set.
#[derive(Clone)]
pub struct SettingsApi {
    adapter: RemoteAdapter,
}

impl SettingsApi {
    pub fn new(adapter: RemoteAdapter) -> Self {
        Self { adapter }
    }

    async fn invoke(&self, method: &str, args: Vec<Value>) -> Result<Value, RemoteError> {
        self.adapter.invoke(SETTINGS_SERVICE, method, args).await
    }

    /// Fetch the settings blob; unexpected shapes collapse to defaults.
    pub async fn get_settings(&self) -> Result<AppSettings, RemoteError> {
        let raw = self.invoke("GetSettings", Vec::new()).await?;
        let value = normalize_settings(raw);
        Ok(serde_json::from_value(value).unwrap_or_default())
    }

    pub async fn set_close_behavior(&self, behavior: CloseBehavior) -> Result<(), RemoteError> {
        self.invoke("SetCloseBehavior", vec![json!(behavior.as_str())])
            .await?;
        Ok(())
    }

    pub async fn set_silent_start(&self, enabled: bool) -> Result<(), RemoteError> {
        self.invoke("SetSilentStart", vec![json!(enabled)]).await?;
        Ok(())
    }

    pub async fn set_auto_start(&self, enabled: bool) -> Result<(), RemoteError> {
        self.invoke("SetAutoStart", vec![json!(enabled)]).await?;
        Ok(())
    }

    pub async fn set_lightweight_mode(&self, enabled: bool) -> Result<(), RemoteError> {
        self.invoke("SetLightweightMode", vec![json!(enabled)])
            .await?;
        Ok(())
    }

    /// Open the data directory in the host's file manager; returns its path.
    pub async fn open_data_dir(&self) -> Result<String, RemoteError> {
        let raw = self.invoke("OpenDataDir", Vec::new()).await?;
        Ok(normalize_string(raw))
    }
}
