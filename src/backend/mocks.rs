// Mock backend for testing - records calls, replays scripted responses.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::keys::ContentKey;
use crate::stack::StackSummary;
use crate::workflow::{UnpublishedEntry, WorkflowStatus};

use super::{Backend, BackendError};

/// Every capability call the backend received, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    StackStatus,
    UpdateStackStatus { new_status: String },
    PublishStack,
    CloseStack,
    UpdateEntryStatus { key: ContentKey, status: WorkflowStatus },
    PublishEntry { key: ContentKey },
    DeleteUnpublishedEntry { key: ContentKey },
    UnpublishedEntries,
}

/// In-memory backend that records every call and replays scripted
/// responses. An unscripted call succeeds with a default value.
///
/// The gate lets a test hold calls in flight: every call records itself,
/// then waits for the gate before resolving, so guard behavior under
/// overlapping operations can be exercised deterministically.
#[derive(Default)]
pub struct ScriptedBackend {
    calls: Mutex<Vec<BackendCall>>,
    stack_status: Mutex<VecDeque<Result<StackSummary, BackendError>>>,
    update_stack_status: Mutex<VecDeque<Result<(), BackendError>>>,
    publish_stack: Mutex<VecDeque<Result<(), BackendError>>>,
    close_stack: Mutex<VecDeque<Result<(), BackendError>>>,
    update_entry_status: Mutex<VecDeque<Result<(), BackendError>>>,
    publish_entry: Mutex<VecDeque<Result<(), BackendError>>>,
    delete_unpublished_entry: Mutex<VecDeque<Result<(), BackendError>>>,
    unpublished_entries: Mutex<VecDeque<Result<Vec<UnpublishedEntry>, BackendError>>>,
    gate: tokio::sync::Mutex<()>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    /// Hold the gate: calls record themselves but do not resolve until
    /// the returned guard is dropped.
    pub async fn hold(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.gate.lock().await
    }

    pub fn script_stack_status(&self, response: Result<StackSummary, BackendError>) {
        self.stack_status.lock().expect("script lock").push_back(response);
    }

    pub fn script_update_stack_status(&self, response: Result<(), BackendError>) {
        self.update_stack_status
            .lock()
            .expect("script lock")
            .push_back(response);
    }

    pub fn script_publish_stack(&self, response: Result<(), BackendError>) {
        self.publish_stack.lock().expect("script lock").push_back(response);
    }

    pub fn script_close_stack(&self, response: Result<(), BackendError>) {
        self.close_stack.lock().expect("script lock").push_back(response);
    }

    pub fn script_update_entry_status(&self, response: Result<(), BackendError>) {
        self.update_entry_status
            .lock()
            .expect("script lock")
            .push_back(response);
    }

    pub fn script_publish_entry(&self, response: Result<(), BackendError>) {
        self.publish_entry.lock().expect("script lock").push_back(response);
    }

    pub fn script_delete_unpublished_entry(&self, response: Result<(), BackendError>) {
        self.delete_unpublished_entry
            .lock()
            .expect("script lock")
            .push_back(response);
    }

    pub fn script_unpublished_entries(
        &self,
        response: Result<Vec<UnpublishedEntry>, BackendError>,
    ) {
        self.unpublished_entries
            .lock()
            .expect("script lock")
            .push_back(response);
    }

    fn record(&self, call: BackendCall) {
        self.calls.lock().expect("calls lock").push(call);
    }

    async fn pass_gate(&self) {
        drop(self.gate.lock().await);
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn stack_status(&self) -> Result<StackSummary, BackendError> {
        self.record(BackendCall::StackStatus);
        self.pass_gate().await;
        self.stack_status
            .lock()
            .expect("script lock")
            .pop_front()
            .unwrap_or_else(|| Ok(StackSummary::default()))
    }

    async fn update_stack_status(&self, new_status: &str) -> Result<(), BackendError> {
        self.record(BackendCall::UpdateStackStatus {
            new_status: new_status.to_string(),
        });
        self.pass_gate().await;
        self.update_stack_status
            .lock()
            .expect("script lock")
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn publish_stack(&self) -> Result<(), BackendError> {
        self.record(BackendCall::PublishStack);
        self.pass_gate().await;
        self.publish_stack
            .lock()
            .expect("script lock")
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn close_stack(&self) -> Result<(), BackendError> {
        self.record(BackendCall::CloseStack);
        self.pass_gate().await;
        self.close_stack
            .lock()
            .expect("script lock")
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn update_entry_status(
        &self,
        key: &ContentKey,
        status: WorkflowStatus,
    ) -> Result<(), BackendError> {
        self.record(BackendCall::UpdateEntryStatus {
            key: key.clone(),
            status,
        });
        self.pass_gate().await;
        self.update_entry_status
            .lock()
            .expect("script lock")
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn publish_entry(&self, key: &ContentKey) -> Result<(), BackendError> {
        self.record(BackendCall::PublishEntry { key: key.clone() });
        self.pass_gate().await;
        self.publish_entry
            .lock()
            .expect("script lock")
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn delete_unpublished_entry(&self, key: &ContentKey) -> Result<(), BackendError> {
        self.record(BackendCall::DeleteUnpublishedEntry { key: key.clone() });
        self.pass_gate().await;
        self.delete_unpublished_entry
            .lock()
            .expect("script lock")
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn unpublished_entries(&self) -> Result<Vec<UnpublishedEntry>, BackendError> {
        self.record(BackendCall::UnpublishedEntries);
        self.pass_gate().await;
        self.unpublished_entries
            .lock()
            .expect("script lock")
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
