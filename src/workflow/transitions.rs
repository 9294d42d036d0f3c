//! Guard layer evaluated before a transition is dispatched.
//!
//! The embedding UI disables controls based on these predicates; the
//! orchestrator does not re-validate. A capability violation that slips
//! through comes back as a backend failure via the normal failure branch.

use super::status::WorkflowStatus;

/// What the current collection and authoring mode allow for an entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryCapabilities {
    /// Collection-level publish grant.
    pub publish: bool,
    /// Collection-level delete grant.
    pub delete: bool,
    /// Open authoring: external contributors without direct publish
    /// rights.
    pub open_authoring: bool,
}

impl EntryCapabilities {
    /// Statuses an editor may move an entry to.
    ///
    /// Open authoring has no ready state: contributors cannot mark an
    /// entry for publication.
    pub fn available_statuses(&self) -> &'static [WorkflowStatus] {
        if self.open_authoring {
            &[WorkflowStatus::Draft, WorkflowStatus::PendingReview]
        } else {
            &[
                WorkflowStatus::Draft,
                WorkflowStatus::PendingReview,
                WorkflowStatus::PendingPublish,
            ]
        }
    }

    /// Whether a status change from `from` to `to` may be dispatched.
    ///
    /// Movement is free among the selectable statuses. `Stale` is set by
    /// the backend when a review branch falls behind; it is never a
    /// user-selected target. Equal endpoints are a no-op, not a
    /// transition.
    pub fn can_transition(&self, from: Option<WorkflowStatus>, to: WorkflowStatus) -> bool {
        if from == Some(to) {
            return false;
        }
        self.available_statuses().contains(&to)
    }

    pub fn can_publish(&self) -> bool {
        self.publish && !self.open_authoring
    }

    pub fn can_delete(&self) -> bool {
        self.delete
    }
}
