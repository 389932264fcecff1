//! Notification dispatch: per-user inboxes over the global notification list.

use tracing::debug;

use crate::models::{Notification, NotificationKind, User, new_id};
use crate::state::AppState;

/// Time label given to every new notification.
pub const JUST_NOW: &str = "Just now";

/// Prepend a new unread notification for `user_id`.
pub fn add_notification(
    state: &mut AppState,
    user_id: &str,
    title: impl Into<String>,
    desc: impl Into<String>,
    kind: NotificationKind,
) -> Notification {
    let notification = Notification {
        id: new_id(),
        user_id: user_id.to_string(),
        title: title.into(),
        desc: desc.into(),
        time: JUST_NOW.to_string(),
        kind,
        read: false,
    };
    debug!("Notify {user_id}: {}", notification.title);
    state.notifications.insert(0, notification.clone());
    notification
}

/// Tell every admin and HR manager about a new request, then confirm
/// receipt to the submitter.
pub fn notify_management(state: &mut AppState, submitter: &User, title: &str, desc: &str) -> Vec<Notification> {
    let manager_ids: Vec<String> = state.managers().map(|m| m.id.clone()).collect();

    let mut sent: Vec<Notification> = manager_ids
        .iter()
        .map(|id| add_notification(state, id, title, desc, NotificationKind::Info))
        .collect();

    sent.push(add_notification(
        state,
        &submitter.id,
        "Request Submitted",
        "Your application has been successfully sent to HR.",
        NotificationKind::Success,
    ));
    sent
}

/// A user's inbox, newest first.
pub fn notifications_for<'a>(state: &'a AppState, user_id: &str) -> Vec<&'a Notification> {
    state.notifications.iter().filter(|n| n.user_id == user_id).collect()
}

pub fn unread_count(state: &AppState, user_id: &str) -> usize {
    state
        .notifications
        .iter()
        .filter(|n| n.user_id == user_id && !n.read)
        .count()
}

/// Mark every notification of `user_id` as read; returns how many changed.
pub fn mark_all_read(state: &mut AppState, user_id: &str) -> usize {
    let mut changed = 0;
    for notification in state.notifications.iter_mut().filter(|n| n.user_id == user_id) {
        if !notification.read {
            notification.read = true;
            changed += 1;
        }
    }
    changed
}
