use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Workflow position of an unpublished entry.
///
/// Absence of a status means the entry is published (for workflow
/// collections) or simply persisted (for collections without a review
/// workflow).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowStatus {
    /// Being drafted, not yet offered for review.
    Draft,
    /// Submitted for editorial review.
    PendingReview,
    /// Approved and waiting for publication.
    PendingPublish,
    /// The review branch has fallen behind its base and needs attention.
    Stale,
}

impl WorkflowStatus {
    pub const ALL: [WorkflowStatus; 4] = [
        WorkflowStatus::Draft,
        WorkflowStatus::PendingReview,
        WorkflowStatus::PendingPublish,
        WorkflowStatus::Stale,
    ];

    /// Wire form, as carried in review labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStatus::Draft => "DRAFT",
            WorkflowStatus::PendingReview => "PENDING_REVIEW",
            WorkflowStatus::PendingPublish => "PENDING_PUBLISH",
            WorkflowStatus::Stale => "STALE",
        }
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown workflow status '{0}'")]
pub struct ParseStatusError(pub String);

impl FromStr for WorkflowStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(WorkflowStatus::Draft),
            "PENDING_REVIEW" => Ok(WorkflowStatus::PendingReview),
            "PENDING_PUBLISH" => Ok(WorkflowStatus::PendingPublish),
            "STALE" => Ok(WorkflowStatus::Stale),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}
