//! Demo dataset used when the store holds no saved collections.

use chrono::{Datelike, NaiveDate};

use crate::calendar::format_date;
use crate::models::{Department, DepartmentStatus, LeaveCategory, LeaveRequest, LeaveStatus, Role, User};

const DEMO_PASSWORD: &str = "password123";

/// Seeded users; the first three can log in.
pub fn users() -> Vec<User> {
    let user = |id: &str, name: &str, email: &str, dept: &str, role: Role, phone: &str, login: bool| User {
        id: id.to_string(),
        full_name: name.to_string(),
        email: email.to_string(),
        department: dept.to_string(),
        role,
        phone_number: Some(phone.to_string()),
        password: login.then(|| DEMO_PASSWORD.to_string()),
    };

    vec![
        user("1", "John Doe", "john@company.com", "Engineering", Role::Employee, "+250 788 123 456", true),
        user("2", "Jane Smith", "jane@company.com", "Human Resources", Role::HrManager, "+250 788 000 111", true),
        user("3", "Admin User", "admin@company.com", "Administration", Role::Admin, "+250 788 999 888", true),
        user("4", "Alice Uwase", "alice@company.com", "Marketing", Role::Employee, "+250 788 222 333", false),
        user("5", "Bob Kagame", "bob@company.com", "Engineering", Role::Employee, "+250 788 444 555", false),
        user("6", "Clarisse Mutesi", "clarisse@company.com", "Finance", Role::Employee, "+250 788 666 777", false),
    ]
}

/// Seeded departments, all active.
pub fn departments() -> Vec<Department> {
    [
        ("1", "Engineering", "Bob Kagame"),
        ("2", "Marketing", "Alice Uwase"),
        ("3", "Finance", "Clarisse Mutesi"),
        ("4", "Human Resources", "Jane Smith"),
        ("5", "Sales", "David Rukundo"),
        ("6", "Administration", "Admin User"),
    ]
    .into_iter()
    .map(|(id, name, head)| Department {
        id: id.to_string(),
        name: name.to_string(),
        head: head.to_string(),
        members: 0,
        status: DepartmentStatus::Active,
    })
    .collect()
}

/// Seeded leave requests, dated relative to `today`.
pub fn leave_requests(today: NaiveDate) -> Vec<LeaveRequest> {
    let today_str = format_date(today);
    let first_of_month = format_date(today.with_day(1).unwrap_or(today));

    let request = |id: &str,
                   user_id: &str,
                   name: &str,
                   category: LeaveCategory,
                   reason: &str,
                   status: LeaveStatus,
                   applied: &str| LeaveRequest {
        id: id.to_string(),
        user_id: user_id.to_string(),
        full_name: name.to_string(),
        category,
        start_date: today_str.clone(),
        end_date: today_str.clone(),
        reason: reason.to_string(),
        status,
        applied_date: applied.to_string(),
        supporting_doc: None,
    };

    vec![
        request(
            "req1",
            "1",
            "John Doe",
            LeaveCategory::Annual,
            "Family vacation",
            LeaveStatus::Approved,
            &first_of_month,
        ),
        request(
            "req2",
            "1",
            "John Doe",
            LeaveCategory::Sick,
            "Flu symptoms",
            LeaveStatus::Pending,
            &today_str,
        ),
        request(
            "req3",
            "4",
            "Alice Uwase",
            LeaveCategory::Emergency,
            "Home emergency",
            LeaveStatus::Pending,
            &today_str,
        ),
    ]
}
