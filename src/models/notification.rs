//! In-app notifications.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity used to style a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Info,
    Error,
    Warning,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NotificationKind::Success => "success",
            NotificationKind::Info => "info",
            NotificationKind::Error => "error",
            NotificationKind::Warning => "warning",
        };
        f.pad(label)
    }
}

/// A notification in a user's inbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    /// Recipient.
    pub user_id: String,
    pub title: String,
    pub desc: String,
    /// Display label, not a sortable timestamp.
    pub time: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub read: bool,
}
