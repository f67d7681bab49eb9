//! Optimistic deletion with undo.
//!
//! Per-id state machine: `none -> pending -> {committed | restored}`.
//! The pending-delete map holds the grace-period timer handle, so "at most
//! one timer per id" is a map invariant rather than convention.

use tracing::debug;

use crate::deferred::Deferred;
use crate::error::StoreError;
use crate::notify::{NotificationKind, NotifyOptions};
use crate::store::{CronStore, PendingDelete};

impl CronStore {
    /// Optimistically delete a job: remove it from the visible list now,
    /// commit the remote delete when the grace period elapses, and offer
    /// undo in the meantime. A no-op when the id is already pending.
    pub async fn request_delete(&self, id: &str) {
        let display_name = {
            let mut state = self.state.lock();
            if state.pending_deletes.contains_key(id) {
                return;
            }

            let display_name = state
                .jobs
                .iter()
                .find(|job| job.id == id)
                .map(|job| {
                    if job.name.is_empty() {
                        job.id.clone()
                    } else {
                        job.name.clone()
                    }
                })
                .unwrap_or_else(|| id.to_string());

            state.jobs.retain(|job| job.id != id);
            let was_selected = state.selected_job_id == id;
            if was_selected {
                state.clear_editor();
            }

            let me = self.me.clone();
            let owned_id = id.to_string();
            let timer = Deferred::spawn(self.config.undo_grace, move || async move {
                if let Some(store) = me.upgrade() {
                    store.commit_delete(&owned_id).await;
                }
            });
            state
                .pending_deletes
                .insert(id.to_string(), PendingDelete { timer, was_selected });

            display_name
        };

        let me = self.me.clone();
        let undo_id = id.to_string();
        self.notify().show_with(
            self.localize("toast.deleted_with_name", &[("name", &display_name)]),
            NotificationKind::Info,
            NotifyOptions {
                action_label: Some(self.localize("common.undo", &[])),
                on_action: Some(Box::new(move || {
                    if let Some(store) = me.upgrade() {
                        tokio::spawn(async move {
                            store.undo_delete(&undo_id).await;
                        });
                    }
                })),
                // The undo offer lives exactly as long as the grace period.
                duration: Some(self.config.undo_grace),
                ..NotifyOptions::default()
            },
        );
    }

    /// Restore a pending delete. A no-op once the grace period elapsed and
    /// the marker is gone.
    pub async fn undo_delete(&self, id: &str) {
        let pending = self.state.lock().pending_deletes.remove(id);
        let Some(pending) = pending else {
            return;
        };
        pending.timer.cancel();
        debug!("delete of job {} undone", id);

        self.refresh_jobs().await;
        if pending.was_selected {
            let job = {
                let state = self.state.lock();
                state.jobs.iter().find(|job| job.id == id).cloned()
            };
            if let Some(job) = job {
                self.load_job_to_form(&job).await;
                self.load_logs(id).await;
            }
        }
    }

    /// Grace-period expiry: drop the marker and issue the remote delete
    /// exactly once. Errors are surfaced but the entity is not
    /// resurrected.
    pub(crate) async fn commit_delete(&self, id: &str) {
        let existed = self.state.lock().pending_deletes.remove(id).is_some();
        if !existed {
            return;
        }
        debug!("committing delete of job {}", id);

        if let Err(e) = self.cron.delete_job(id).await {
            self.report_failure(&StoreError::from(e));
        }
        self.refresh_jobs().await;
    }
}
