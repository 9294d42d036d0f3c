//! Asynchronous control layer for per-entry workflow transitions.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn, Instrument};

use crate::backend::Backend;
use crate::keys::ContentKey;
use crate::notify::{
    Notification, NotificationSink, TOAST_ENTRY_PUBLISHED, TOAST_ENTRY_UPDATED,
    TOAST_UNPUBLISHED_CHANGES_DELETED,
};
use crate::telemetry::{create_workflow_span, generate_correlation_id};

use super::board::{reduce_board, BoardAction, WorkflowBoard};
use super::entry::{reduce_entry, EntryAction, EntryWorkflowState};
use super::status::WorkflowStatus;

/// Owns every entry record and the board; all mutation flows through the
/// pure reducers.
///
/// Each record admits at most one in-flight backend call: the busy check
/// and the request transition happen under a single lock acquisition,
/// and an operation arriving while its record is busy is dropped, not
/// queued.
pub struct EntryOrchestrator<B> {
    backend: Arc<B>,
    sink: Arc<dyn NotificationSink>,
    entries: Mutex<HashMap<ContentKey, EntryWorkflowState>>,
    board: Mutex<WorkflowBoard>,
}

impl<B: Backend> EntryOrchestrator<B> {
    pub fn new(backend: Arc<B>, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            backend,
            sink,
            entries: Mutex::new(HashMap::new()),
            board: Mutex::new(WorkflowBoard::default()),
        }
    }

    /// Snapshot of one entry record. Entries the engine has no record of
    /// report the default (published/persisted) state.
    pub async fn entry_state(&self, key: &ContentKey) -> EntryWorkflowState {
        self.entries
            .lock()
            .await
            .get(key)
            .cloned()
            .unwrap_or_default()
    }

    /// Snapshot of the board record.
    pub async fn board(&self) -> WorkflowBoard {
        self.board.lock().await.clone()
    }

    /// Run the busy guard and dispatch the request transition if clear.
    async fn begin(&self, key: &ContentKey, request: EntryAction) -> bool {
        let mut entries = self.entries.lock().await;
        let state = entries.entry(key.clone()).or_default();
        if state.is_busy() {
            debug!(content_key = %key, ?request, "entry operation dropped by guard");
            return false;
        }
        *state = reduce_entry(state, &request);
        true
    }

    /// Apply a resolution transition. Records that come out identical to
    /// the default state have left the workflow and are pruned.
    async fn apply(&self, key: &ContentKey, action: EntryAction) {
        let mut entries = self.entries.lock().await;
        if let Some(state) = entries.get_mut(key) {
            *state = reduce_entry(state, &action);
            if *state == EntryWorkflowState::default() {
                entries.remove(key);
            }
        }
    }

    /// Move an entry to `new_status`. Equal endpoints are a no-op.
    pub async fn update_entry_status(
        &self,
        key: &ContentKey,
        old_status: Option<WorkflowStatus>,
        new_status: WorkflowStatus,
    ) {
        if old_status == Some(new_status) {
            return;
        }
        let correlation_id = generate_correlation_id();
        let span = create_workflow_span(
            "update_entry_status",
            Some(&key.to_string()),
            Some(&correlation_id),
        );
        async {
            if !self
                .begin(key, EntryAction::StatusChangeRequest { to: new_status })
                .await
            {
                return;
            }
            match self.backend.update_entry_status(key, new_status).await {
                Ok(()) => {
                    self.apply(key, EntryAction::StatusChangeSuccess { to: new_status })
                        .await;
                    self.sink.notify(Notification::success(TOAST_ENTRY_UPDATED));
                    info!(content_key = %key, status = %new_status, "entry status updated");
                }
                Err(error) => {
                    warn!(content_key = %key, %error, "entry status update failed");
                    self.apply(key, EntryAction::StatusChangeFailure { error })
                        .await;
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Publish an entry; on confirmation the record leaves the workflow.
    pub async fn publish_entry(&self, key: &ContentKey) {
        let correlation_id = generate_correlation_id();
        let span =
            create_workflow_span("publish_entry", Some(&key.to_string()), Some(&correlation_id));
        async {
            if !self.begin(key, EntryAction::PublishRequest).await {
                return;
            }
            match self.backend.publish_entry(key).await {
                Ok(()) => {
                    self.apply(key, EntryAction::PublishSuccess).await;
                    self.sink
                        .notify(Notification::success(TOAST_ENTRY_PUBLISHED));
                    info!(content_key = %key, "entry published");
                }
                Err(error) => {
                    warn!(content_key = %key, %error, "entry publish failed");
                    self.apply(key, EntryAction::PublishFailure { error }).await;
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Discard an entry's unpublished changes. A previously published
    /// entry is untouched; only the workflow branch and review request go
    /// away.
    pub async fn delete_unpublished_entry(&self, key: &ContentKey) {
        let correlation_id = generate_correlation_id();
        let span = create_workflow_span(
            "delete_unpublished_entry",
            Some(&key.to_string()),
            Some(&correlation_id),
        );
        async {
            if !self.begin(key, EntryAction::DeleteRequest).await {
                return;
            }
            match self.backend.delete_unpublished_entry(key).await {
                Ok(()) => {
                    self.apply(key, EntryAction::DeleteSuccess).await;
                    self.sink
                        .notify(Notification::success(TOAST_UNPUBLISHED_CHANGES_DELETED));
                    info!(content_key = %key, "unpublished changes discarded");
                }
                Err(error) => {
                    warn!(content_key = %key, %error, "unpublished changes delete failed");
                    self.apply(key, EntryAction::DeleteFailure { error }).await;
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Fetch the workflow board and seed per-entry records from the
    /// backend-confirmed snapshot. Records mid-operation are left alone.
    pub async fn load_unpublished_entries(&self) {
        {
            let mut board = self.board.lock().await;
            if board.is_fetching {
                debug!("board load dropped by guard");
                return;
            }
            *board = reduce_board(&board, &BoardAction::LoadRequest);
        }
        match self.backend.unpublished_entries().await {
            Ok(entries) => {
                {
                    let mut records = self.entries.lock().await;
                    for entry in &entries {
                        let record = records.entry(entry.key.clone()).or_default();
                        if !record.is_busy() {
                            record.status = Some(entry.status);
                        }
                    }
                }
                info!(count = entries.len(), "workflow board loaded");
                let mut board = self.board.lock().await;
                *board = reduce_board(&board, &BoardAction::LoadSuccess { entries });
            }
            Err(error) => {
                warn!(%error, "workflow board load failed");
                let mut board = self.board.lock().await;
                *board = reduce_board(&board, &BoardAction::LoadFailure { error });
            }
        }
    }
}
