//! Grouped view of every entry currently in the workflow.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::BackendError;
use crate::keys::ContentKey;

use super::status::WorkflowStatus;

/// One line item on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnpublishedEntry {
    pub key: ContentKey,
    pub status: WorkflowStatus,
    /// True when the entry modifies an already-published entry; false for
    /// a brand-new one. Deleting a modification discards only the
    /// unpublished changes.
    #[serde(default)]
    pub is_modification: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Board record: unpublished entries grouped by status, column order
/// following the workflow (draft, in review, ready, stale).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowBoard {
    pub is_fetching: bool,
    pub entries: BTreeMap<WorkflowStatus, Vec<UnpublishedEntry>>,
    pub error: Option<BackendError>,
}

impl WorkflowBoard {
    pub fn entries_in(&self, status: WorkflowStatus) -> &[UnpublishedEntry] {
        self.entries.get(&status).map_or(&[], Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoardAction {
    LoadRequest,
    LoadSuccess { entries: Vec<UnpublishedEntry> },
    LoadFailure { error: BackendError },
}

/// Pure reducer over the board record.
pub fn reduce_board(state: &WorkflowBoard, action: &BoardAction) -> WorkflowBoard {
    let mut next = state.clone();
    match action {
        BoardAction::LoadRequest => {
            next.is_fetching = true;
        }
        BoardAction::LoadSuccess { entries } => {
            next.is_fetching = false;
            next.error = None;
            next.entries = group_by_status(entries);
        }
        BoardAction::LoadFailure { error } => {
            next.is_fetching = false;
            next.error = Some(error.clone());
        }
    }
    next
}

fn group_by_status(entries: &[UnpublishedEntry]) -> BTreeMap<WorkflowStatus, Vec<UnpublishedEntry>> {
    let mut grouped: BTreeMap<WorkflowStatus, Vec<UnpublishedEntry>> = BTreeMap::new();
    for entry in entries {
        grouped.entry(entry.status).or_default().push(entry.clone());
    }
    grouped
}
