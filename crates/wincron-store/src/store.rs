//! The job entity store.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::debug;

use wincron_protocols::{AppSettings, Job, JobLogEntry, Localizer};
use wincron_remote::{ConfigApi, CronApi, EventSource, RemoteAdapter, SettingsApi};

use crate::config::StoreConfig;
use crate::deferred::Deferred;
use crate::error::StoreError;
use crate::form::JobForm;
use crate::notify::{NotificationChannel, NotificationKind};
use crate::signal::UiSignal;

/// Capacity of the UI signal channel.
const SIGNAL_CHANNEL_CAPACITY: usize = 16;

/// A delete that has been applied optimistically but not yet committed.
pub(crate) struct PendingDelete {
    pub(crate) timer: Deferred,
    /// Whether the job was loaded in the editor when the delete was
    /// requested; undo restores the form and logs if so.
    pub(crate) was_selected: bool,
}

/// Mutable store state. Only ever locked for synchronous sections; no
/// lock is held across an await, so between suspension points the form
/// and job list are never observable in a torn state.
pub(crate) struct StoreState {
    pub(crate) jobs: Vec<Job>,
    pub(crate) selected_job_id: String,
    pub(crate) logs: Vec<JobLogEntry>,
    pub(crate) form: JobForm,
    /// Snapshot taken when the form was last loaded or saved; dirtiness is
    /// the current snapshot differing from it.
    pub(crate) baseline: String,
    pub(crate) last_error: String,
    pub(crate) settings: AppSettings,
    pub(crate) global_enabled: bool,
    pub(crate) pending_deletes: HashMap<String, PendingDelete>,
    pub(crate) draft_timer: Option<Deferred>,
}

impl StoreState {
    fn new() -> Self {
        let form = JobForm::default();
        let baseline = form.snapshot();
        Self {
            jobs: Vec::new(),
            selected_job_id: String::new(),
            logs: Vec::new(),
            form,
            baseline,
            last_error: String::new(),
            settings: AppSettings::default(),
            global_enabled: true,
            pending_deletes: HashMap::new(),
            draft_timer: None,
        }
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.form.snapshot() != self.baseline
    }

    /// Clear the editor without touching the persisted draft.
    pub(crate) fn clear_editor(&mut self) {
        self.selected_job_id.clear();
        self.form = JobForm::default();
        self.baseline = self.form.snapshot();
        self.logs.clear();
        if let Some(timer) = self.draft_timer.take() {
            timer.cancel();
        }
    }
}

/// The canonical in-memory state of the scheduled-job UI.
///
/// Owns the job list, the edit form, the execution log view, the pending
/// delete timers, and the notification slot; everything else reaches these
/// only through store methods.
pub struct CronStore {
    pub(crate) me: Weak<CronStore>,
    pub(crate) config: StoreConfig,
    pub(crate) cron: CronApi,
    pub(crate) settings_api: SettingsApi,
    pub(crate) config_api: ConfigApi,
    pub(crate) drafts: Arc<dyn crate::draft::DraftStorage>,
    events: Arc<dyn EventSource>,
    localizer: Arc<dyn Localizer>,
    notifications: NotificationChannel,
    signals: broadcast::Sender<UiSignal>,
    pub(crate) state: Mutex<StoreState>,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl CronStore {
    /// Construct a store over its injected collaborators.
    pub fn new(
        adapter: RemoteAdapter,
        drafts: Arc<dyn crate::draft::DraftStorage>,
        events: Arc<dyn EventSource>,
        localizer: Arc<dyn Localizer>,
        config: StoreConfig,
    ) -> Arc<Self> {
        let (signals, _) = broadcast::channel(SIGNAL_CHANNEL_CAPACITY);
        let notifications = NotificationChannel::new(config.toast_duration);
        Arc::new_cyclic(|me| Self {
            me: me.clone(),
            cron: CronApi::new(adapter.clone()),
            settings_api: SettingsApi::new(adapter.clone()),
            config_api: ConfigApi::new(adapter),
            drafts,
            events,
            localizer,
            notifications,
            signals,
            config,
            state: Mutex::new(StoreState::new()),
            listener: Mutex::new(None),
        })
    }

    /// One-time startup: load settings, the global switch, and the job
    /// list, offer draft recovery, and subscribe to push events.
    /// Subsequent calls are no-ops.
    pub async fn init(&self) {
        {
            let mut listener = self.listener.lock();
            if listener.is_some() {
                return;
            }
            *listener = Some(self.spawn_event_listener());
        }

        self.load_settings().await;
        self.load_global_enabled().await;
        self.refresh_jobs().await;
        self.offer_draft_recovery(false).await;
    }

    /// Tear down: end the push subscription and cancel every outstanding
    /// timer so nothing fires against a discarded store.
    pub fn dispose(&self) {
        if let Some(handle) = self.listener.lock().take() {
            handle.abort();
        }
        {
            let mut state = self.state.lock();
            for (_, pending) in state.pending_deletes.drain() {
                pending.timer.cancel();
            }
            if let Some(timer) = state.draft_timer.take() {
                timer.cancel();
            }
        }
        self.notifications.shutdown();
        debug!("store disposed");
    }

    fn spawn_event_listener(&self) -> JoinHandle<()> {
        let mut rx = self.events.job_executed();
        let me = self.me.clone();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(entry) => {
                        let Some(store) = me.upgrade() else { break };
                        store.handle_job_executed(entry).await;
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        debug!("job-executed listener lagged, skipped {}", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    /// Apply a mutation to the edit form and update dirty tracking: a
    /// dirty form (re)schedules the debounced draft save, a clean form
    /// cancels it.
    pub fn update_form<F: FnOnce(&mut JobForm)>(&self, mutate: F) {
        let now_dirty = {
            let mut state = self.state.lock();
            mutate(&mut state.form);
            state.is_dirty()
        };
        if now_dirty {
            self.schedule_draft_save();
        } else {
            self.cancel_draft_timer();
        }
    }

    // --- Snapshot accessors for the rendering layer ---

    pub fn jobs(&self) -> Vec<Job> {
        self.state.lock().jobs.clone()
    }

    pub fn logs(&self) -> Vec<JobLogEntry> {
        self.state.lock().logs.clone()
    }

    pub fn form(&self) -> JobForm {
        self.state.lock().form.clone()
    }

    pub fn selected_job_id(&self) -> String {
        self.state.lock().selected_job_id.clone()
    }

    pub fn last_error(&self) -> String {
        self.state.lock().last_error.clone()
    }

    pub fn settings(&self) -> AppSettings {
        self.state.lock().settings.clone()
    }

    pub fn global_enabled(&self) -> bool {
        self.state.lock().global_enabled
    }

    pub fn is_dirty(&self) -> bool {
        self.state.lock().is_dirty()
    }

    /// Whether `id` is inside its undo window.
    pub fn has_pending_delete(&self, id: &str) -> bool {
        self.state.lock().pending_deletes.contains_key(id)
    }

    /// The notification slot, for rendering and user-driven dismissal.
    pub fn notifications(&self) -> &NotificationChannel {
        &self.notifications
    }

    /// Subscribe to out-of-band UI signals.
    pub fn signals(&self) -> broadcast::Receiver<UiSignal> {
        self.signals.subscribe()
    }

    // --- Internal helpers shared by the operation modules ---

    pub(crate) fn localize(&self, key: &str, params: &[(&str, &str)]) -> String {
        self.localizer.render(key, params)
    }

    pub(crate) fn toast(&self, message: impl Into<String>, kind: NotificationKind) {
        self.notifications.show(message, kind);
    }

    pub(crate) fn toast_key(&self, key: &str, kind: NotificationKind) {
        self.toast(self.localize(key, &[]), kind);
    }

    pub(crate) fn notify(&self) -> &NotificationChannel {
        &self.notifications
    }

    pub(crate) fn set_error(&self, message: &str) {
        self.state.lock().last_error = message.to_string();
    }

    /// Record a failure on the transient error field and surface it with
    /// failure styling. Never fatal to the store.
    pub(crate) fn report_failure(&self, error: &StoreError) {
        let message = error.to_string();
        self.state.lock().last_error = message.clone();
        self.toast(message, NotificationKind::Danger);
    }

    pub(crate) fn send_signal(&self, signal: UiSignal) {
        let _ = self.signals.send(signal);
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
