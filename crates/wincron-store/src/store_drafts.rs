//! Draft autosave and recovery.

use std::time::Duration;

use tracing::{debug, warn};

use crate::deferred::Deferred;
use crate::draft::Draft;
use crate::notify::{NotificationKind, NotifyOptions};
use crate::signal::UiSignal;
use crate::store::CronStore;

impl CronStore {
    /// (Re)start the debounced draft save. Called whenever a form
    /// mutation leaves the form dirty.
    pub(crate) fn schedule_draft_save(&self) {
        let me = self.me.clone();
        let timer = Deferred::spawn(self.config.draft_debounce, move || async move {
            if let Some(store) = me.upgrade() {
                store.write_draft_now().await;
            }
        });
        let mut state = self.state.lock();
        if let Some(previous) = state.draft_timer.replace(timer) {
            previous.cancel();
        }
    }

    /// Cancel the debounced save. Called when a mutation leaves the form
    /// clean again.
    pub(crate) fn cancel_draft_timer(&self) {
        if let Some(timer) = self.state.lock().draft_timer.take() {
            timer.cancel();
        }
    }

    /// Persist the draft immediately. Clean forms are never written.
    /// Returns `false` when the write failed.
    pub(crate) async fn write_draft_now(&self) -> bool {
        let draft = {
            let state = self.state.lock();
            if !state.is_dirty() {
                return true;
            }
            Draft::new(state.form.clone(), state.baseline.clone())
        };
        match self.drafts.set(&self.config.draft_key, &draft.encode()).await {
            Ok(()) => true,
            Err(e) => {
                warn!("failed to persist draft: {}", e);
                false
            }
        }
    }

    /// Execute a pending debounced save now instead of waiting it out.
    /// Returns `false` when the flushed write failed.
    pub(crate) async fn flush_draft_write(&self) -> bool {
        let timer = self.state.lock().draft_timer.take();
        match timer {
            Some(timer) => {
                timer.cancel();
                self.write_draft_now().await
            }
            None => true,
        }
    }

    /// Drop the persisted draft and any pending save.
    /// Returns `false` when storage refused the removal.
    pub(crate) async fn clear_draft(&self) -> bool {
        self.cancel_draft_timer();
        match self.drafts.remove(&self.config.draft_key).await {
            Ok(()) => true,
            Err(e) => {
                warn!("failed to clear draft: {}", e);
                false
            }
        }
    }

    /// Offer to resume a persisted draft. Skipped when the live form is
    /// already dirty unless `force` is set. Malformed blobs are treated as
    /// absent and purged, never surfaced.
    pub(crate) async fn offer_draft_recovery(&self, force: bool) {
        let blob = match self.drafts.get(&self.config.draft_key).await {
            Ok(Some(blob)) => blob,
            Ok(None) => return,
            Err(e) => {
                warn!("failed to read draft: {}", e);
                return;
            }
        };

        let Some(draft) = Draft::parse(&blob) else {
            debug!("purging malformed draft");
            let _ = self.drafts.remove(&self.config.draft_key).await;
            return;
        };

        if !force && self.is_dirty() {
            return;
        }

        let me = self.me.clone();
        self.notify().show_with(
            self.localize("toast.draft_available", &[]),
            NotificationKind::Info,
            NotifyOptions {
                action_label: Some(self.localize("common.resume", &[])),
                on_action: Some(Box::new(move || {
                    if let Some(store) = me.upgrade() {
                        tokio::spawn(async move {
                            store.apply_draft(draft).await;
                        });
                    }
                })),
                // Stays up until acted on, dismissed, or displaced.
                duration: Some(Duration::ZERO),
                ..NotifyOptions::default()
            },
        );
    }

    /// Accepting recovery: repopulate the form, restore the original
    /// baseline so dirtiness reflects the original edit, surface the
    /// editor, and clear the blob.
    pub(crate) async fn apply_draft(&self, draft: Draft) {
        {
            let mut state = self.state.lock();
            state.selected_job_id = draft.form.id.clone();
            state.form = draft.form;
            state.baseline = draft.baseline;
            if let Some(timer) = state.draft_timer.take() {
                timer.cancel();
            }
        }
        self.send_signal(UiSignal::OpenEditor);
        if let Err(e) = self.drafts.remove(&self.config.draft_key).await {
            warn!("failed to clear recovered draft: {}", e);
        }
    }
}
