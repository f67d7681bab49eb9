//! Typed API over the config import/export service.

use serde_json::{Value, json};

use wincron_protocols::{ExportOptions, ImportStrategy};

use crate::adapter::RemoteAdapter;
use crate::bridge::CONFIG_SERVICE;
use crate::error::RemoteError;
use crate::normalize::{normalize_string, normalize_string_array};

/// Config document export/import.
#[derive(Clone)]
pub struct ConfigApi {
    adapter: RemoteAdapter,
}

impl ConfigApi {
    pub fn new(adapter: RemoteAdapter) -> Self {
        Self { adapter }
    }

    async fn invoke(&self, method: &str, args: Vec<Value>) -> Result<Value, RemoteError> {
        self.adapter.invoke(CONFIG_SERVICE, method, args).await
    }

    /// Write the config document to `path`; returns the written path.
    pub async fn export_to_file(
        &self,
        path: &str,
        options: ExportOptions,
    ) -> Result<String, RemoteError> {
        let raw = self
            .invoke(
                "ExportYAMLToFile",
                vec![
                    json!(path),
                    json!(options.export_settings),
                    json!(options.only_enabled),
                ],
            )
            .await?;
        Ok(normalize_string(raw))
    }

    /// Names of existing jobs that would conflict with `text` on import.
    pub async fn check_import_conflicts(&self, text: &str) -> Result<Vec<String>, RemoteError> {
        let raw = self
            .invoke("CheckImportYAMLConflicts", vec![json!(text)])
            .await?;
        Ok(normalize_string_array(raw))
    }

    /// Import a config document with the given conflict strategy.
    pub async fn import(&self, text: &str, strategy: ImportStrategy) -> Result<(), RemoteError> {
        self.invoke("ImportYAML", vec![json!(text), json!(strategy.as_str())])
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::RemoteBridge;
    use crate::config::RemoteConfig;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct RecordingBridge {
        calls: Mutex<Vec<(String, Vec<Value>)>>,
        response: Value,
    }

    #[async_trait]
    impl RemoteBridge for RecordingBridge {
        async fn call(
            &self,
            _service: &str,
            method: &str,
            args: Vec<Value>,
        ) -> Result<Value, RemoteError> {
            self.calls.lock().push((method.to_string(), args));
            Ok(self.response.clone())
        }
    }

    #[tokio::test]
    async fn test_export_passes_flags_positionally() {
        let bridge = Arc::new(RecordingBridge {
            calls: Mutex::new(Vec::new()),
            response: json!("C:\\out.yml"),
        });
        let api = ConfigApi::new(RemoteAdapter::new(bridge.clone(), RemoteConfig::default()));

        let options = ExportOptions {
            export_settings: true,
            only_enabled: false,
        };
        let path = api.export_to_file("C:\\out.yml", options).await.unwrap();
        assert_eq!(path, "C:\\out.yml");

        let calls = bridge.calls.lock();
        assert_eq!(
            calls[0].1,
            vec![json!("C:\\out.yml"), json!(true), json!(false)]
        );
    }

    #[tokio::test]
    async fn test_import_sends_strategy_string() {
        let bridge = Arc::new(RecordingBridge {
            calls: Mutex::new(Vec::new()),
            response: Value::Null,
        });
        let api = ConfigApi::new(RemoteAdapter::new(bridge.clone(), RemoteConfig::default()));

        api.import("jobs: []", ImportStrategy::Overwrite).await.unwrap();
        let calls = bridge.calls.lock();
        assert_eq!(calls[0].1[1], json!("overwrite"));
    }
}
