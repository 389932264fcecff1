//! End-to-end flows through the persisted leave desk.

use chrono::NaiveDate;
use smart_leave::config::AppConfig;
use smart_leave::models::{
    EncashmentDraft, LeaveCategory, LeaveDraft, LeaveStatus, NotificationKind, Role, UpdateDepartment,
};
use smart_leave::state::AppState;
use smart_leave::storage::{JsonFileStore, KeyValueStore, keys};
use smart_leave::{AppError, LeaveDesk};
use tempfile::TempDir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

fn open(dir: &TempDir) -> LeaveDesk<JsonFileStore> {
    let store = JsonFileStore::open(dir.path()).unwrap();
    LeaveDesk::open(store, AppConfig::default(), today()).unwrap()
}

fn one_day(date: &str) -> LeaveDraft {
    LeaveDraft {
        category: LeaveCategory::Annual,
        start_date: date.to_string(),
        end_date: date.to_string(),
        reason: "Family wedding".to_string(),
        supporting_doc: None,
    }
}

#[test]
fn test_login_matches_exactly_the_stored_pairs() {
    let dir = TempDir::new().unwrap();
    let mut desk = open(&dir);

    let users = desk.state().users.clone();
    for user in users.iter().filter(|u| u.password.is_some()) {
        let logged_in = desk.login(&user.email, user.password.as_deref().unwrap()).unwrap();
        assert_eq!(&logged_in, user);
        desk.logout().unwrap();
    }

    let err = desk.login("john@company.com", "password1234").unwrap_err();
    assert!(matches!(err, AppError::InvalidCredentials));
    assert_eq!(err.to_string(), "Invalid email or password. Please try again.");
    assert!(desk.current_user().is_none());
}

#[test]
fn test_session_survives_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let mut desk = open(&dir);
        desk.login("jane@company.com", "password123").unwrap();
    }
    let desk = open(&dir);
    assert_eq!(desk.current_user().map(|u| u.role), Some(Role::HrManager));
}

#[test]
fn test_submission_fans_out_to_management_and_submitter() {
    let dir = TempDir::new().unwrap();
    let mut desk = open(&dir);
    desk.login("john@company.com", "password123").unwrap();

    let before_requests = desk.state().leave_requests.len();
    let before_notifications = desk.state().notifications.len();
    let managers = desk.state().managers().count();

    let request = desk.submit_leave(one_day("2026-07-01")).unwrap();
    assert_eq!(request.status, LeaveStatus::Pending);
    assert_eq!(desk.state().leave_requests.len(), before_requests + 1);
    assert_eq!(desk.state().notifications.len(), before_notifications + managers + 1);
    assert_eq!(desk.unread_count(), 1);

    let inbox = desk.notifications().unwrap();
    assert_eq!(inbox[0].title, "Request Submitted");
    assert_eq!(inbox[0].kind, NotificationKind::Success);
}

#[test]
fn test_approval_reduces_balance_by_inclusive_days() {
    let dir = TempDir::new().unwrap();
    let mut desk = open(&dir);

    desk.login("john@company.com", "password123").unwrap();
    let baseline = desk.employee_stats().unwrap().remaining_days;
    let request = desk.submit_leave(one_day("2026-07-01")).unwrap();
    desk.logout().unwrap();

    desk.login("admin@company.com", "password123").unwrap();
    desk.set_leave_status(&request.id, LeaveStatus::Approved).unwrap().unwrap();
    desk.logout().unwrap();

    desk.login("john@company.com", "password123").unwrap();
    let stats = desk.employee_stats().unwrap();
    assert_eq!(stats.remaining_days, baseline - 1);
    assert_eq!(stats.monthly_trend[6].count, 1);
}

#[test]
fn test_approved_reversed_range_adds_back_to_balance() {
    let dir = TempDir::new().unwrap();
    let mut desk = open(&dir);

    desk.login("john@company.com", "password123").unwrap();
    let baseline = desk.employee_stats().unwrap().remaining_days;
    let mut draft = one_day("2026-07-05");
    draft.end_date = "2026-07-01".to_string();
    let request = desk.submit_leave(draft).unwrap();
    desk.logout().unwrap();

    desk.login("admin@company.com", "password123").unwrap();
    desk.set_leave_status(&request.id, LeaveStatus::Approved).unwrap().unwrap();
    desk.logout().unwrap();

    desk.login("john@company.com", "password123").unwrap();
    assert_eq!(desk.employee_stats().unwrap().remaining_days, baseline + 3);
}

#[test]
fn test_terminal_request_can_be_redecided() {
    let dir = TempDir::new().unwrap();
    let mut desk = open(&dir);
    desk.login("jane@company.com", "password123").unwrap();

    desk.set_leave_status("req2", LeaveStatus::Approved).unwrap().unwrap();
    let second = desk.set_leave_status("req2", LeaveStatus::Rejected).unwrap().unwrap();
    assert_eq!(second.status, LeaveStatus::Rejected);

    let johns: Vec<_> = desk
        .state()
        .notifications
        .iter()
        .filter(|n| n.user_id == "1")
        .map(|n| n.title.as_str())
        .collect();
    assert_eq!(johns, ["Leave Rejected", "Leave Approved"]);
}

#[test]
fn test_mark_all_read_leaves_other_inboxes_alone() {
    let dir = TempDir::new().unwrap();
    let mut desk = open(&dir);
    desk.login("john@company.com", "password123").unwrap();
    desk.submit_leave(one_day("2026-11-02")).unwrap();
    desk.submit_encashment(EncashmentDraft {
        days_to_sell: 2,
        reason: "School fees".to_string(),
        supporting_doc: None,
    })
    .unwrap();

    assert_eq!(desk.unread_count(), 2);
    assert_eq!(desk.mark_all_read().unwrap(), 2);
    assert_eq!(desk.unread_count(), 0);

    let jane_unread = desk
        .state()
        .notifications
        .iter()
        .filter(|n| n.user_id == "2" && !n.read)
        .count();
    assert_eq!(jane_unread, 2);
}

#[test]
fn test_reload_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    let mut desk = open(&dir);
    desk.login("john@company.com", "password123").unwrap();
    desk.submit_leave(one_day("2026-11-02")).unwrap();
    desk.toggle_theme().unwrap();

    let saved: Vec<Option<String>> = [keys::REQUESTS, keys::NOTIFICATIONS, keys::CURRENT_USER, keys::THEME]
        .iter()
        .map(|key| desk.store().get(key).unwrap())
        .collect();

    let reopened = open(&dir);
    assert_eq!(reopened.state(), desk.state());

    let mut copy = smart_leave::storage::MemoryStore::new();
    reopened.state().persist_all(&mut copy).unwrap();
    let rewritten: Vec<Option<String>> = [keys::REQUESTS, keys::NOTIFICATIONS, keys::CURRENT_USER, keys::THEME]
        .iter()
        .map(|key| copy.get(key).unwrap())
        .collect();
    assert_eq!(saved, rewritten);
}

#[test]
fn test_seed_dates_stay_fixed_after_first_run() {
    let dir = TempDir::new().unwrap();
    let first = open(&dir).state().leave_requests.clone();

    let store = JsonFileStore::open(dir.path()).unwrap();
    let later = today() + chrono::Days::new(5);
    let desk = LeaveDesk::open(store, AppConfig::default(), later).unwrap();
    assert_eq!(desk.state().leave_requests, first);
}

#[test]
fn test_member_count_ignores_stored_members_field() {
    let dir = TempDir::new().unwrap();
    let mut desk = open(&dir);
    desk.login("admin@company.com", "password123").unwrap();

    let engineering = desk
        .departments()
        .unwrap()
        .iter()
        .find(|d| d.name == "Engineering")
        .cloned()
        .unwrap();
    desk.update_department(
        &engineering.id,
        UpdateDepartment {
            head: Some("John Doe".to_string()),
            ..Default::default()
        },
    )
    .unwrap()
    .unwrap();

    assert_eq!(engineering.members, 0);
    assert_eq!(desk.member_count("Engineering"), 2);
}

#[test]
fn test_employee_cannot_review() {
    let dir = TempDir::new().unwrap();
    let mut desk = open(&dir);
    desk.login("john@company.com", "password123").unwrap();

    let result = desk.set_leave_status("req3", LeaveStatus::Approved);
    assert!(matches!(result, Err(AppError::Unauthorized(_))));
    assert_eq!(AppState::load(desk.store(), today()).unwrap().leave_requests[2].status, LeaveStatus::Pending);
}
