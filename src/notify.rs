//! User-facing notification requests emitted on successful workflow
//! operations.
//!
//! Failures never use this channel; they surface through state snapshots
//! and logs. The message key is resolved against the embedding
//! application's message catalog.

pub const TOAST_STACK_UPDATED: &str = "ui.toast.stackUpdated";
pub const TOAST_STACK_PUBLISHED: &str = "ui.toast.stackPublished";
pub const TOAST_STACK_CLOSED: &str = "ui.toast.stackClosed";
pub const TOAST_ENTRY_UPDATED: &str = "ui.toast.entryUpdated";
pub const TOAST_ENTRY_PUBLISHED: &str = "ui.toast.entryPublished";
pub const TOAST_UNPUBLISHED_CHANGES_DELETED: &str = "ui.toast.onDeleteUnpublishedChanges";

/// Auto-dismiss hint attached to every success notification.
pub const DISMISS_AFTER_MS: u64 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message_key: String,
    pub kind: NotificationKind,
    pub dismiss_after_ms: u64,
}

impl Notification {
    pub fn success(message_key: impl Into<String>) -> Self {
        Self {
            message_key: message_key.into(),
            kind: NotificationKind::Success,
            dismiss_after_ms: DISMISS_AFTER_MS,
        }
    }
}

/// Seam between the engine and whatever renders toasts.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Channel-backed sink; drops the notification if the receiver is gone.
impl NotificationSink for tokio::sync::mpsc::UnboundedSender<Notification> {
    fn notify(&self, notification: Notification) {
        let _ = self.send(notification);
    }
}

/// Sink for headless embeddings: discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&self, _notification: Notification) {}
}
