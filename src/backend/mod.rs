//! Abstract backend capability consumed by the orchestrators.
//!
//! Concrete git-hosting clients implement this trait. The engine issues
//! each call once, awaits resolution, and maps the outcome to exactly one
//! state transition; retries, if any, belong to the implementation.

pub mod errors;
pub mod mocks;

pub use errors::BackendError;

use async_trait::async_trait;

use crate::keys::ContentKey;
use crate::stack::StackSummary;
use crate::workflow::{UnpublishedEntry, WorkflowStatus};

#[async_trait]
pub trait Backend: Send + Sync {
    /// Current status of the pending batch.
    async fn stack_status(&self) -> Result<StackSummary, BackendError>;

    /// Move the pending batch to `new_status` (backend-defined text).
    async fn update_stack_status(&self, new_status: &str) -> Result<(), BackendError>;

    /// Publish the pending batch as one unit.
    async fn publish_stack(&self) -> Result<(), BackendError>;

    /// Discard the pending batch without publishing.
    async fn close_stack(&self) -> Result<(), BackendError>;

    /// Relabel an entry's review request to `status`.
    async fn update_entry_status(
        &self,
        key: &ContentKey,
        status: WorkflowStatus,
    ) -> Result<(), BackendError>;

    /// Publish an unpublished entry (merge its workflow branch).
    async fn publish_entry(&self, key: &ContentKey) -> Result<(), BackendError>;

    /// Discard an entry's unpublished changes: delete its workflow branch
    /// and close its review request. A previously published entry is left
    /// in place.
    async fn delete_unpublished_entry(&self, key: &ContentKey) -> Result<(), BackendError>;

    /// All entries currently in the workflow.
    async fn unpublished_entries(&self) -> Result<Vec<UnpublishedEntry>, BackendError>;
}
