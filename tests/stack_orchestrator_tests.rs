// Scenario tests for the stack orchestrator: guard behavior, the
// request/success/failure triads, and notification emission.

use std::sync::Arc;

use tokio::sync::mpsc;

use copydesk::backend::mocks::{BackendCall, ScriptedBackend};
use copydesk::backend::BackendError;
use copydesk::notify::{
    Notification, TOAST_STACK_CLOSED, TOAST_STACK_PUBLISHED, TOAST_STACK_UPDATED,
};
use copydesk::stack::{StackOrchestrator, StackSummary};

fn harness() -> (
    Arc<ScriptedBackend>,
    Arc<StackOrchestrator<ScriptedBackend>>,
    mpsc::UnboundedReceiver<Notification>,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let backend = Arc::new(ScriptedBackend::new());
    let orchestrator = Arc::new(StackOrchestrator::new(backend.clone(), Arc::new(tx), true));
    (backend, orchestrator, rx)
}

fn draft_summary() -> StackSummary {
    StackSummary {
        status: Some("DRAFT".to_string()),
        updated_at: Some("2024-01-01".to_string()),
    }
}

#[tokio::test]
async fn initial_status_fetch_enables_stacking() {
    let (backend, orchestrator, _rx) = harness();
    backend.script_stack_status(Ok(draft_summary()));

    orchestrator.check_stack_status().await;

    let state = orchestrator.state().await;
    assert!(!state.is_fetching);
    assert!(state.can_stack);
    assert_eq!(state.status, draft_summary());
    assert!(state.error.is_none());
    assert_eq!(backend.calls(), vec![BackendCall::StackStatus]);
}

#[tokio::test]
async fn status_fetch_failure_disables_stacking_and_stores_error() {
    let (backend, orchestrator, mut rx) = harness();
    backend.script_stack_status(Err(BackendError::Network("offline".to_string())));

    orchestrator.check_stack_status().await;

    let state = orchestrator.state().await;
    assert!(!state.is_fetching);
    assert!(!state.can_stack);
    assert_eq!(state.error, Some(BackendError::Network("offline".to_string())));
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn stacking_disabled_drops_every_operation() {
    let (tx, mut rx) = mpsc::unbounded_channel::<Notification>();
    let backend = Arc::new(ScriptedBackend::new());
    let orchestrator = StackOrchestrator::new(backend.clone(), Arc::new(tx), false);

    orchestrator.check_stack_status().await;
    orchestrator.update_stack_status("DRAFT", "PENDING_REVIEW").await;
    orchestrator.publish_stack().await;
    orchestrator.close_stack().await;

    assert!(backend.calls().is_empty());
    assert_eq!(orchestrator.state().await, Default::default());
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn concurrent_status_checks_issue_exactly_one_backend_call() {
    let (backend, orchestrator, _rx) = harness();
    backend.script_stack_status(Ok(draft_summary()));

    let gate = backend.hold().await;
    let first = tokio::spawn({
        let orchestrator = orchestrator.clone();
        async move { orchestrator.check_stack_status().await }
    });

    // Wait for the first call to reach the backend and block on the gate.
    while backend.calls().is_empty() {
        tokio::task::yield_now().await;
    }
    assert!(orchestrator.state().await.is_fetching);

    // The second dispatch is dropped entirely, not queued.
    orchestrator.check_stack_status().await;
    assert_eq!(backend.calls(), vec![BackendCall::StackStatus]);

    drop(gate);
    first.await.unwrap();

    let state = orchestrator.state().await;
    assert!(!state.is_fetching);
    assert!(state.can_stack);
    assert_eq!(backend.calls(), vec![BackendCall::StackStatus]);
}

#[tokio::test]
async fn publish_while_fetching_is_dropped_with_state_unchanged() {
    let (backend, orchestrator, mut rx) = harness();

    let gate = backend.hold().await;
    let fetch = tokio::spawn({
        let orchestrator = orchestrator.clone();
        async move { orchestrator.check_stack_status().await }
    });
    while backend.calls().is_empty() {
        tokio::task::yield_now().await;
    }
    let before = orchestrator.state().await;

    orchestrator.publish_stack().await;

    assert_eq!(orchestrator.state().await, before);
    assert_eq!(backend.calls(), vec![BackendCall::StackStatus]);
    assert!(rx.try_recv().is_err());

    drop(gate);
    fetch.await.unwrap();
}

#[tokio::test]
async fn update_status_calls_backend_then_refetches_and_notifies() {
    let (backend, orchestrator, mut rx) = harness();
    backend.script_stack_status(Ok(draft_summary()));
    orchestrator.check_stack_status().await;

    backend.script_stack_status(Ok(StackSummary {
        status: Some("PENDING_REVIEW".to_string()),
        updated_at: Some("2024-01-02".to_string()),
    }));
    orchestrator.update_stack_status("DRAFT", "PENDING_REVIEW").await;

    assert_eq!(
        backend.calls(),
        vec![
            BackendCall::StackStatus,
            BackendCall::UpdateStackStatus {
                new_status: "PENDING_REVIEW".to_string()
            },
            BackendCall::StackStatus,
        ]
    );
    let state = orchestrator.state().await;
    assert_eq!(state.status.status.as_deref(), Some("PENDING_REVIEW"));
    assert!(state.can_stack);

    let notification = rx.try_recv().unwrap();
    assert_eq!(notification.message_key, TOAST_STACK_UPDATED);
    assert_eq!(notification.dismiss_after_ms, 4000);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn update_status_to_same_value_dispatches_nothing() {
    let (backend, orchestrator, mut rx) = harness();

    orchestrator.update_stack_status("DRAFT", "DRAFT").await;

    assert!(backend.calls().is_empty());
    assert_eq!(orchestrator.state().await, Default::default());
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn failed_update_keeps_status_sets_error_and_stays_silent() {
    let (backend, orchestrator, mut rx) = harness();
    backend.script_stack_status(Ok(draft_summary()));
    orchestrator.check_stack_status().await;

    backend.script_update_stack_status(Err(BackendError::Api("422".to_string())));
    orchestrator.update_stack_status("DRAFT", "PENDING_REVIEW").await;

    // The failed update never triggers the re-fetch.
    assert_eq!(
        backend.calls(),
        vec![
            BackendCall::StackStatus,
            BackendCall::UpdateStackStatus {
                new_status: "PENDING_REVIEW".to_string()
            },
        ]
    );
    let state = orchestrator.state().await;
    assert!(!state.is_fetching);
    assert_eq!(state.status, draft_summary());
    assert_eq!(state.error, Some(BackendError::Api("422".to_string())));
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn publish_resets_status_and_notifies_once() {
    let (backend, orchestrator, mut rx) = harness();
    backend.script_stack_status(Ok(draft_summary()));
    orchestrator.check_stack_status().await;

    orchestrator.publish_stack().await;

    let state = orchestrator.state().await;
    assert!(!state.is_fetching);
    assert_eq!(state.status, StackSummary::default());
    assert_eq!(rx.try_recv().unwrap().message_key, TOAST_STACK_PUBLISHED);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn publish_failure_preserves_status_and_stays_silent() {
    let (backend, orchestrator, mut rx) = harness();
    backend.script_stack_status(Ok(draft_summary()));
    orchestrator.check_stack_status().await;

    backend.script_publish_stack(Err(BackendError::PermissionDenied(
        "no publish rights".to_string(),
    )));
    orchestrator.publish_stack().await;

    let state = orchestrator.state().await;
    assert!(!state.is_fetching);
    assert_eq!(state.status, draft_summary());
    assert_eq!(
        state.error,
        Some(BackendError::PermissionDenied("no publish rights".to_string()))
    );
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn close_resets_status_and_emits_stack_closed_exactly_once() {
    let (backend, orchestrator, mut rx) = harness();
    backend.script_stack_status(Ok(draft_summary()));
    orchestrator.check_stack_status().await;

    orchestrator.close_stack().await;

    let state = orchestrator.state().await;
    assert!(!state.is_fetching);
    assert_eq!(state.status, StackSummary::default());
    assert_eq!(rx.try_recv().unwrap().message_key, TOAST_STACK_CLOSED);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn next_successful_fetch_clears_a_stored_error() {
    let (backend, orchestrator, _rx) = harness();
    backend.script_stack_status(Err(BackendError::Network("offline".to_string())));
    orchestrator.check_stack_status().await;
    assert!(orchestrator.state().await.error.is_some());

    backend.script_stack_status(Ok(draft_summary()));
    orchestrator.check_stack_status().await;

    let state = orchestrator.state().await;
    assert!(state.error.is_none());
    assert!(state.can_stack);
}
