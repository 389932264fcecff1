//! Request lifecycle: submission, review decisions, and HR assignment.
//!
//! Each operation mutates one request collection and then appends the
//! matching notifications. There is no transaction across the two; the
//! caller persists them in that order.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::calendar::format_date;
use crate::models::{
    EncashmentDraft, EncashmentRequest, LeaveDraft, LeaveRequest, LeaveStatus, NotificationKind, User, new_id,
};
use crate::notify::{add_notification, notify_management};
use crate::state::AppState;

/// File a pending leave request for `user` and notify management.
pub fn submit_leave_request(state: &mut AppState, user: &User, draft: LeaveDraft, today: NaiveDate) -> LeaveRequest {
    let request = LeaveRequest {
        id: new_id(),
        user_id: user.id.clone(),
        full_name: user.full_name.clone(),
        category: draft.category,
        start_date: draft.start_date,
        end_date: draft.end_date,
        reason: draft.reason,
        status: LeaveStatus::Pending,
        applied_date: format_date(today),
        supporting_doc: draft.supporting_doc,
    };
    state.leave_requests.insert(0, request.clone());
    info!("Leave request {} submitted by {} ({})", request.id, user.full_name, request.category);

    notify_management(
        state,
        user,
        "New Leave Request",
        &format!("{} applied for {}.", user.full_name, request.category),
    );
    request
}

/// File a pending encashment request for `user` and notify management.
pub fn submit_encashment_request(
    state: &mut AppState,
    user: &User,
    draft: EncashmentDraft,
    today: NaiveDate,
) -> EncashmentRequest {
    let request = EncashmentRequest {
        id: new_id(),
        user_id: user.id.clone(),
        full_name: user.full_name.clone(),
        days_to_sell: draft.days_to_sell,
        reason: draft.reason,
        status: LeaveStatus::Pending,
        applied_date: format_date(today),
        supporting_doc: draft.supporting_doc,
    };
    state.encashments.insert(0, request.clone());
    info!(
        "Encashment request {} submitted by {} ({} days)",
        request.id, user.full_name, request.days_to_sell
    );

    notify_management(
        state,
        user,
        "New Encashment Request",
        &format!("{} requested to sell {} leave days.", user.full_name, request.days_to_sell),
    );
    request
}

/// Record a review decision on a leave request and tell its owner.
///
/// Returns `None` (and changes nothing) when the id is unknown. Terminal
/// requests may be decided again.
pub fn set_leave_status(state: &mut AppState, request_id: &str, status: LeaveStatus) -> Option<LeaveRequest> {
    let request = state.leave_requests.iter_mut().find(|r| r.id == request_id)?;
    if request.status.is_terminal() {
        warn!("Leave request {request_id} re-decided: {} -> {status}", request.status);
    }
    request.status = status;
    let updated = request.clone();
    info!("Leave request {request_id} is now {status}");

    add_notification(
        state,
        &updated.user_id,
        format!("Leave {status}"),
        format!(
            "Your {} request has been {}.",
            updated.category,
            status.label().to_lowercase()
        ),
        status.decision_kind(),
    );
    Some(updated)
}

/// Record a review decision on an encashment request and tell its owner.
pub fn set_encashment_status(
    state: &mut AppState,
    request_id: &str,
    status: LeaveStatus,
) -> Option<EncashmentRequest> {
    let request = state.encashments.iter_mut().find(|r| r.id == request_id)?;
    if request.status.is_terminal() {
        warn!("Encashment request {request_id} re-decided: {} -> {status}", request.status);
    }
    request.status = status;
    let updated = request.clone();
    info!("Encashment request {request_id} is now {status}");

    add_notification(
        state,
        &updated.user_id,
        format!("Encashment {status}"),
        format!(
            "Your request to sell {} days has been {}.",
            updated.days_to_sell,
            status.label().to_lowercase()
        ),
        status.decision_kind(),
    );
    Some(updated)
}

/// HR books leave on an employee's behalf; it starts out approved.
pub fn assign_leave_directly(
    state: &mut AppState,
    assigned_by: &User,
    employee: &User,
    draft: LeaveDraft,
    today: NaiveDate,
) -> LeaveRequest {
    let request = LeaveRequest {
        id: new_id(),
        user_id: employee.id.clone(),
        full_name: employee.full_name.clone(),
        category: draft.category,
        start_date: draft.start_date,
        end_date: draft.end_date,
        reason: draft.reason,
        status: LeaveStatus::Approved,
        applied_date: format_date(today),
        supporting_doc: draft.supporting_doc,
    };
    state.leave_requests.insert(0, request.clone());
    info!(
        "{} assigned {} to {} ({} to {})",
        assigned_by.full_name, request.category, employee.full_name, request.start_date, request.end_date
    );

    add_notification(
        state,
        &employee.id,
        "Leave Assigned",
        format!(
            "HR has assigned you {} from {} to {}.",
            request.category, request.start_date, request.end_date
        ),
        NotificationKind::Info,
    );
    request
}
