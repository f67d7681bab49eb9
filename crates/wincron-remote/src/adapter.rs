//! Remote call adapter with per-call timeouts.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::bridge::RemoteBridge;
use crate::config::RemoteConfig;
use crate::error::RemoteError;

/// Wraps a [`RemoteBridge`] with timeout enforcement.
///
/// There is no cancellation primitive in the remote contract: a timeout
/// only abandons the waiting, the in-flight call is left to complete or
/// fail on its own.
#[derive(Clone)]
pub struct RemoteAdapter {
    bridge: Arc<dyn RemoteBridge>,
    config: RemoteConfig,
}

impl RemoteAdapter {
    /// Create an adapter over the given bridge.
    pub fn new(bridge: Arc<dyn RemoteBridge>, config: RemoteConfig) -> Self {
        Self { bridge, config }
    }

    /// The configured timeouts.
    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    /// Invoke with the default call timeout.
    pub async fn invoke(
        &self,
        service: &str,
        method: &str,
        args: Vec<Value>,
    ) -> Result<Value, RemoteError> {
        self.invoke_with_timeout(service, method, self.config.call_timeout, args)
            .await
    }

    /// Invoke with an explicit timeout. A zero timeout waits indefinitely.
    pub async fn invoke_with_timeout(
        &self,
        service: &str,
        method: &str,
        timeout: Duration,
        args: Vec<Value>,
    ) -> Result<Value, RemoteError> {
        let bridge = Arc::clone(&self.bridge);
        let owned_service = service.to_string();
        let owned_method = method.to_string();
        // Spawned so the call keeps running when the timeout wins the race.
        let call = tokio::spawn(async move {
            bridge.call(&owned_service, &owned_method, args).await
        });

        if timeout.is_zero() {
            return match call.await {
                Ok(result) => result,
                Err(e) => Err(RemoteError::Call {
                    service: service.to_string(),
                    method: method.to_string(),
                    message: e.to_string(),
                }),
            };
        }

        match tokio::time::timeout(timeout, call).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(RemoteError::Call {
                service: service.to_string(),
                method: method.to_string(),
                message: e.to_string(),
            }),
            Err(_) => {
                debug!(
                    "{}.{} timed out after {}ms",
                    service,
                    method,
                    timeout.as_millis()
                );
                Err(RemoteError::Timeout(timeout.as_millis() as u64))
            }
        }
    }
}
