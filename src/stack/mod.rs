//! Batch-publish ("stack") state: one pending batch of entries published
//! or discarded as a unit, mirrored from the backend.
//!
//! All mutation flows through the request/success/failure action triad
//! applied by the pure [`reduce`] function, so every transition is
//! observable and replayable.

pub mod orchestrator;

pub use orchestrator::StackOrchestrator;

use serde::{Deserialize, Serialize};

use crate::backend::BackendError;

/// Backend-reported batch status snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Engine-side stack record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StackState {
    /// Mutual-exclusion flag: a backend call tied to the stack is in
    /// flight. Set on request, cleared on every resolution path.
    pub is_fetching: bool,
    /// A status fetch has succeeded since startup; stack controls may be
    /// offered. Reverts to false when a fetch fails.
    pub can_stack: bool,
    pub status: StackSummary,
    pub error: Option<BackendError>,
}

/// Request/success/failure triad per stack operation.
#[derive(Debug, Clone, PartialEq)]
pub enum StackAction {
    StatusRequest,
    StatusSuccess { status: StackSummary },
    StatusFailure { error: BackendError },
    PublishRequest,
    PublishSuccess,
    PublishFailure { error: BackendError },
    CloseRequest,
    CloseSuccess,
    CloseFailure { error: BackendError },
}

/// Pure reducer over the stack record. The incoming state is never
/// mutated; the returned value is a fresh copy with the transition
/// applied.
pub fn reduce(state: &StackState, action: &StackAction) -> StackState {
    let mut next = state.clone();
    match action {
        StackAction::StatusRequest => {
            next.is_fetching = true;
        }
        StackAction::StatusSuccess { status } => {
            next.is_fetching = false;
            next.can_stack = true;
            next.status = status.clone();
            next.error = None;
        }
        StackAction::StatusFailure { error } => {
            next.is_fetching = false;
            next.can_stack = false;
            next.error = Some(error.clone());
        }
        StackAction::PublishRequest | StackAction::CloseRequest => {
            next.is_fetching = true;
        }
        StackAction::PublishSuccess | StackAction::CloseSuccess => {
            next.is_fetching = false;
        }
        StackAction::PublishFailure { error } | StackAction::CloseFailure { error } => {
            next.is_fetching = false;
            next.error = Some(error.clone());
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetched() -> StackState {
        reduce(
            &reduce(&StackState::default(), &StackAction::StatusRequest),
            &StackAction::StatusSuccess {
                status: StackSummary {
                    status: Some("DRAFT".to_string()),
                    updated_at: Some("2024-01-01".to_string()),
                },
            },
        )
    }

    #[test]
    fn status_request_sets_fetching_only() {
        let next = reduce(&StackState::default(), &StackAction::StatusRequest);
        assert!(next.is_fetching);
        assert!(!next.can_stack);
        assert_eq!(next.status, StackSummary::default());
    }

    #[test]
    fn status_success_stores_summary_and_enables_stacking() {
        let state = fetched();
        assert!(!state.is_fetching);
        assert!(state.can_stack);
        assert_eq!(state.status.status.as_deref(), Some("DRAFT"));
        assert_eq!(state.status.updated_at.as_deref(), Some("2024-01-01"));
        assert!(state.error.is_none());
    }

    #[test]
    fn status_failure_disables_stacking_and_keeps_summary() {
        let before = fetched();
        let next = reduce(
            &reduce(&before, &StackAction::StatusRequest),
            &StackAction::StatusFailure {
                error: BackendError::Network("connection reset".to_string()),
            },
        );
        assert!(!next.is_fetching);
        assert!(!next.can_stack);
        assert_eq!(next.status, before.status);
        assert_eq!(
            next.error,
            Some(BackendError::Network("connection reset".to_string()))
        );
    }

    #[test]
    fn status_success_clears_a_previous_error() {
        let failed = reduce(
            &StackState::default(),
            &StackAction::StatusFailure {
                error: BackendError::Api("500".to_string()),
            },
        );
        let next = reduce(
            &failed,
            &StackAction::StatusSuccess {
                status: StackSummary::default(),
            },
        );
        assert!(next.error.is_none());
    }

    #[test]
    fn publish_and_close_only_toggle_fetching_on_success() {
        let before = fetched();
        for (request, success) in [
            (StackAction::PublishRequest, StackAction::PublishSuccess),
            (StackAction::CloseRequest, StackAction::CloseSuccess),
        ] {
            let pending = reduce(&before, &request);
            assert!(pending.is_fetching);
            assert!(pending.can_stack);
            let done = reduce(&pending, &success);
            assert!(!done.is_fetching);
            assert!(done.can_stack);
            assert_eq!(done.status, before.status);
        }
    }

    #[test]
    fn publish_failure_retains_error_and_summary() {
        let before = fetched();
        let next = reduce(
            &reduce(&before, &StackAction::PublishRequest),
            &StackAction::PublishFailure {
                error: BackendError::PermissionDenied("no publish rights".to_string()),
            },
        );
        assert!(!next.is_fetching);
        assert_eq!(next.status, before.status);
        assert!(next.can_stack);
        assert_eq!(
            next.error,
            Some(BackendError::PermissionDenied("no publish rights".to_string()))
        );
    }

    #[test]
    fn reducer_never_mutates_its_input() {
        let before = fetched();
        let snapshot = before.clone();
        let _ = reduce(&before, &StackAction::PublishRequest);
        assert_eq!(before, snapshot);
    }

    #[test]
    fn summary_wire_form_is_camel_case() {
        let summary: StackSummary =
            serde_json::from_str(r#"{"status":"DRAFT","updatedAt":"2024-01-01"}"#).unwrap();
        assert_eq!(summary.status.as_deref(), Some("DRAFT"));
        assert_eq!(summary.updated_at.as_deref(), Some("2024-01-01"));
        assert_eq!(
            serde_json::to_string(&summary).unwrap(),
            r#"{"status":"DRAFT","updatedAt":"2024-01-01"}"#
        );
    }
}
