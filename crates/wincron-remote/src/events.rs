//! Push-event subscription seam.

use tokio::sync::broadcast;

use wincron_protocols::JobLogEntry;

/// Capacity of the job-executed broadcast channel.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Server-pushed events consumed by the store.
///
/// Subscription is explicit: the store subscribes at construction and the
/// subscription ends when the receiver is dropped at teardown.
pub trait EventSource: Send + Sync {
    /// Subscribe to `jobExecuted` notifications.
    fn job_executed(&self) -> broadcast::Receiver<JobLogEntry>;
}

/// Broadcast-backed [`EventSource`] for hosts that receive push events from
/// their runtime and fan them into the core.
pub struct EventHub {
    job_executed: broadcast::Sender<JobLogEntry>,
}

impl EventHub {
    pub fn new() -> Self {
        let (job_executed, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { job_executed }
    }

    /// Publish one `jobExecuted` event. Events published while nobody is
    /// subscribed are dropped.
    pub fn publish_job_executed(&self, entry: JobLogEntry) {
        let _ = self.job_executed.send(entry);
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for EventHub {
    fn job_executed(&self) -> broadcast::Receiver<JobLogEntry> {
        self.job_executed.subscribe()
    }
}
