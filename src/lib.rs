// Copydesk Library - Git-Backed Editorial Workflow Engine
// This exposes the core components for embedding and integration

pub mod backend;
pub mod config;
pub mod keys;
pub mod notify;
pub mod stack;
pub mod telemetry;
pub mod workflow;

// Re-export key types for easy access
pub use backend::{Backend, BackendError};
pub use config::{config, init_config, CopydeskConfig};
pub use keys::{ContentKey, KeyCodec, KeyError, RefSuffix, CMS_BRANCH_PREFIX, DEFAULT_LABEL_PREFIX};
pub use notify::{Notification, NotificationKind, NotificationSink};
pub use stack::{StackAction, StackOrchestrator, StackState, StackSummary};
pub use telemetry::{
    create_workflow_span, generate_correlation_id, init_telemetry, shutdown_telemetry,
};
pub use workflow::{
    EntryAction, EntryCapabilities, EntryOrchestrator, EntryWorkflowState, UnpublishedEntry,
    WorkflowBoard, WorkflowStatus,
};
