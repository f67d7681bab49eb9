//! Single-slot notification channel.
//!
//! The UI has one visible toast slot, so at most one notification is live
//! at a time. Showing a new one while one is live first fires the live
//! one's dismiss callback, then installs the replacement. Dismissal fires
//! the dismiss callback unless it happened through the action path.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

/// Callback attached to a notification's action or dismissal.
pub type NotifyCallback = Box<dyn FnOnce() + Send + 'static>;

/// Severity styling of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Danger,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Danger => "danger",
        }
    }
}

/// UI-visible view of the live notification.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    /// Label of the optional action button.
    pub action_label: Option<String>,
}

/// Optional attachments for [`NotificationChannel::show_with`].
#[derive(Default)]
pub struct NotifyOptions {
    pub action_label: Option<String>,
    pub on_action: Option<NotifyCallback>,
    pub on_dismiss: Option<NotifyCallback>,
    /// Expiry override; `Duration::ZERO` keeps the notification up until
    /// it is dismissed or replaced. `None` uses the channel default.
    pub duration: Option<Duration>,
}

struct Live {
    view: Notification,
    on_action: Option<NotifyCallback>,
    on_dismiss: Option<NotifyCallback>,
}

struct Slot {
    live: Option<Live>,
    /// Bumped on every slot change; stale expiry timers check it and bail.
    generation: u64,
}

/// Arbitration for the single toast slot.
#[derive(Clone)]
pub struct NotificationChannel {
    slot: Arc<Mutex<Slot>>,
    default_duration: Duration,
}

impl NotificationChannel {
    pub fn new(default_duration: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot {
                live: None,
                generation: 0,
            })),
            default_duration,
        }
    }

    /// Show a plain notification with the default expiry.
    pub fn show(&self, message: impl Into<String>, kind: NotificationKind) {
        self.show_with(message, kind, NotifyOptions::default());
    }

    /// Show a notification, displacing any live one.
    pub fn show_with(
        &self,
        message: impl Into<String>,
        kind: NotificationKind,
        options: NotifyOptions,
    ) {
        let duration = options.duration.unwrap_or(self.default_duration);

        let displaced = {
            let mut slot = self.slot.lock();
            slot.generation += 1;
            slot.live.take().and_then(|live| live.on_dismiss)
        };
        if let Some(callback) = displaced {
            callback();
        }

        let generation = {
            let mut slot = self.slot.lock();
            slot.generation += 1;
            slot.live = Some(Live {
                view: Notification {
                    message: message.into(),
                    kind,
                    action_label: options.action_label,
                },
                on_action: options.on_action,
                on_dismiss: options.on_dismiss,
            });
            slot.generation
        };

        if !duration.is_zero() {
            let channel = self.clone();
            tokio::spawn(async move {
                tokio::time::sleep(duration).await;
                channel.expire(generation);
            });
        }
    }

    /// Dismiss the live notification, firing its dismiss callback.
    pub fn dismiss(&self) {
        let callback = {
            let mut slot = self.slot.lock();
            slot.generation += 1;
            slot.live.take().and_then(|live| live.on_dismiss)
        };
        if let Some(callback) = callback {
            callback();
        }
    }

    /// Fire the live notification's action instead of its dismiss callback,
    /// then clear the slot.
    pub fn trigger_action(&self) {
        let callback = {
            let mut slot = self.slot.lock();
            slot.generation += 1;
            slot.live.take().and_then(|live| live.on_action)
        };
        if let Some(callback) = callback {
            callback();
        }
    }

    /// The live notification, if any.
    pub fn current(&self) -> Option<Notification> {
        self.slot.lock().live.as_ref().map(|live| live.view.clone())
    }

    /// Clear the slot without firing callbacks. Used at store teardown.
    pub(crate) fn shutdown(&self) {
        let mut slot = self.slot.lock();
        slot.generation += 1;
        slot.live = None;
    }

    /// Natural expiry: dismiss only if the slot still holds `generation`.
    fn expire(&self, generation: u64) {
        let stale = {
            let slot = self.slot.lock();
            slot.generation != generation || slot.live.is_none()
        };
        if !stale {
            self.dismiss();
        }
    }
}
