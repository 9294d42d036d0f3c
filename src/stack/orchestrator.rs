//! Guarded asynchronous sequences over the stack record.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::backend::Backend;
use crate::notify::{
    Notification, NotificationSink, TOAST_STACK_CLOSED, TOAST_STACK_PUBLISHED, TOAST_STACK_UPDATED,
};

use super::{reduce, StackAction, StackState, StackSummary};

/// Owns the stack record; all mutation flows through [`reduce`].
///
/// At most one backend call tied to the stack is in flight at a time.
/// The guard check and the request transition happen under a single lock
/// acquisition; the lock is released across the backend await and
/// reacquired to apply the resolution. An operation arriving while a
/// call is in flight is dropped, not queued - callers re-issue once the
/// in-flight operation resolves if they need a fresher read.
pub struct StackOrchestrator<B> {
    backend: Arc<B>,
    sink: Arc<dyn NotificationSink>,
    stack_enabled: bool,
    state: Mutex<StackState>,
}

impl<B: Backend> StackOrchestrator<B> {
    pub fn new(backend: Arc<B>, sink: Arc<dyn NotificationSink>, stack_enabled: bool) -> Self {
        Self {
            backend,
            sink,
            stack_enabled,
            state: Mutex::new(StackState::default()),
        }
    }

    /// Snapshot of the current record.
    pub async fn state(&self) -> StackState {
        self.state.lock().await.clone()
    }

    /// Run the guard and dispatch the request transition if clear.
    /// Returns false when the operation must be dropped.
    async fn begin(&self, request: StackAction) -> bool {
        let mut state = self.state.lock().await;
        if state.is_fetching || !self.stack_enabled {
            debug!(
                ?request,
                is_fetching = state.is_fetching,
                stack_enabled = self.stack_enabled,
                "stack operation dropped by guard"
            );
            return false;
        }
        *state = reduce(&state, &request);
        true
    }

    async fn apply(&self, action: StackAction) {
        let mut state = self.state.lock().await;
        *state = reduce(&state, &action);
    }

    /// Fetch the batch status from the backend.
    pub async fn check_stack_status(&self) {
        if !self.begin(StackAction::StatusRequest).await {
            return;
        }
        match self.backend.stack_status().await {
            Ok(status) => {
                debug!(status = ?status.status, "stack status fetched");
                self.apply(StackAction::StatusSuccess { status }).await;
            }
            Err(error) => {
                warn!(%error, "stack status fetch failed");
                self.apply(StackAction::StatusFailure { error }).await;
            }
        }
    }

    /// Move the batch to `new_status`, then immediately re-fetch. Equal
    /// endpoints are a no-op.
    pub async fn update_stack_status(&self, old_status: &str, new_status: &str) {
        if old_status == new_status {
            return;
        }
        if !self.begin(StackAction::StatusRequest).await {
            return;
        }
        let result = match self.backend.update_stack_status(new_status).await {
            Ok(()) => self.backend.stack_status().await,
            Err(error) => Err(error),
        };
        match result {
            Ok(status) => {
                self.apply(StackAction::StatusSuccess { status }).await;
                self.sink.notify(Notification::success(TOAST_STACK_UPDATED));
                info!(new_status, "stack status updated");
            }
            Err(error) => {
                warn!(%error, new_status, "stack status update failed");
                self.apply(StackAction::StatusFailure { error }).await;
            }
        }
    }

    /// Publish the pending batch as one unit.
    pub async fn publish_stack(&self) {
        if !self.begin(StackAction::PublishRequest).await {
            return;
        }
        match self.backend.publish_stack().await {
            Ok(()) => {
                self.apply(StackAction::StatusSuccess {
                    status: StackSummary::default(),
                })
                .await;
                self.apply(StackAction::PublishSuccess).await;
                self.sink
                    .notify(Notification::success(TOAST_STACK_PUBLISHED));
                info!("stack published");
            }
            Err(error) => {
                warn!(%error, "stack publish failed");
                self.apply(StackAction::PublishFailure { error }).await;
            }
        }
    }

    /// Discard the pending batch without publishing.
    pub async fn close_stack(&self) {
        if !self.begin(StackAction::CloseRequest).await {
            return;
        }
        match self.backend.close_stack().await {
            Ok(()) => {
                self.apply(StackAction::StatusSuccess {
                    status: StackSummary::default(),
                })
                .await;
                self.apply(StackAction::CloseSuccess).await;
                self.sink.notify(Notification::success(TOAST_STACK_CLOSED));
                info!("stack closed");
            }
            Err(error) => {
                warn!(%error, "stack close failed");
                self.apply(StackAction::CloseFailure { error }).await;
            }
        }
    }
}
