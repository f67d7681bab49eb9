//! Cancellable one-shot deferred tasks.
//!
//! Grace periods and debounces are the only true cancellation points in
//! the store: a [`Deferred`] runs its action after a delay unless cancelled
//! first, and the handle is what the store keeps in its per-id maps.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Handle to a scheduled one-shot action.
pub struct Deferred {
    cancelled: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl Deferred {
    /// Run `action` after `delay` unless [`cancel`](Self::cancel)led first.
    pub fn spawn<F, Fut>(delay: Duration, action: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if !flag.load(Ordering::SeqCst) {
                action().await;
            }
        });
        Self { cancelled, handle }
    }

    /// Cancel the scheduled action. A no-op once the action has started.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.handle.abort();
    }

    /// Whether the action was cancelled before firing.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_deferred_fires_after_delay() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();
        let _deferred = Deferred::spawn(Duration::from_millis(10), move || async move {
            flag.store(true, Ordering::SeqCst);
        });

        assert!(!fired.load(Ordering::SeqCst));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(fired.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_cancel_prevents_firing() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();
        let deferred = Deferred::spawn(Duration::from_millis(10), move || async move {
            flag.store(true, Ordering::SeqCst);
        });

        deferred.cancel();
        assert!(deferred.is_cancelled());
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!fired.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_dropping_handle_does_not_cancel() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();
        let deferred = Deferred::spawn(Duration::from_millis(10), move || async move {
            flag.store(true, Ordering::SeqCst);
        });

        drop(deferred);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(fired.load(Ordering::SeqCst));
    }
}
