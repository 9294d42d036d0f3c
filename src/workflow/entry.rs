//! Per-entry workflow record and its action triads.
//!
//! The status is never committed optimistically: the request transition
//! only raises the matching transient flag, and the status moves when
//! the backend confirms.

use crate::backend::BackendError;

use super::status::WorkflowStatus;

/// Engine-side record for one unpublished entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryWorkflowState {
    /// `None` means published (workflow collections) or simply persisted
    /// (non-workflow collections).
    pub status: Option<WorkflowStatus>,
    pub is_updating_status: bool,
    pub is_publishing: bool,
    pub is_deleting: bool,
    pub error: Option<BackendError>,
}

impl EntryWorkflowState {
    /// A backend call for this entry is in flight.
    pub fn is_busy(&self) -> bool {
        self.is_updating_status || self.is_publishing || self.is_deleting
    }
}

/// Request/success/failure triad per entry operation.
///
/// The request carries the target status for observability of the action
/// stream; the reducer does not apply it until the success arrives.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryAction {
    StatusChangeRequest { to: WorkflowStatus },
    StatusChangeSuccess { to: WorkflowStatus },
    StatusChangeFailure { error: BackendError },
    PublishRequest,
    PublishSuccess,
    PublishFailure { error: BackendError },
    DeleteRequest,
    DeleteSuccess,
    DeleteFailure { error: BackendError },
}

/// Pure reducer over an entry record.
pub fn reduce_entry(state: &EntryWorkflowState, action: &EntryAction) -> EntryWorkflowState {
    let mut next = state.clone();
    match action {
        EntryAction::StatusChangeRequest { .. } => {
            next.is_updating_status = true;
        }
        EntryAction::StatusChangeSuccess { to } => {
            next.is_updating_status = false;
            next.status = Some(*to);
            next.error = None;
        }
        EntryAction::StatusChangeFailure { error } => {
            next.is_updating_status = false;
            next.error = Some(error.clone());
        }
        EntryAction::PublishRequest => {
            next.is_publishing = true;
        }
        EntryAction::PublishSuccess => {
            next.is_publishing = false;
            next.status = None;
            next.error = None;
        }
        EntryAction::PublishFailure { error } => {
            next.is_publishing = false;
            next.error = Some(error.clone());
        }
        EntryAction::DeleteRequest => {
            next.is_deleting = true;
        }
        EntryAction::DeleteSuccess => {
            next = EntryWorkflowState::default();
        }
        EntryAction::DeleteFailure { error } => {
            next.is_deleting = false;
            next.error = Some(error.clone());
        }
    }
    next
}
