//! Dashboard statistics derived from the collections on every read.
//!
//! All functions are total: records with unparseable dates simply drop
//! out of date-based tallies and count as zero days.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

use crate::calendar::{MONTH_NAMES, in_month_of, inclusive_day_count, parse_date, upcoming_holidays};
use crate::config::PolicyConfig;
use crate::models::{EncashmentRequest, Holiday, LeaveCategory, LeaveRequest, LeaveStatus};
use crate::state::AppState;

/// Label for requests whose owner is no longer in the directory.
pub const UNKNOWN_DEPARTMENT: &str = "Unknown";

/// Requests awaiting review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingCounts {
    pub leaves: usize,
    pub encashments: usize,
}

impl PendingCounts {
    pub fn total(&self) -> usize {
        self.leaves + self.encashments
    }

    /// Whether the "attention required" banner should show.
    pub fn needs_attention(&self) -> bool {
        self.total() > 0
    }
}

/// Leave requests filed by members of one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentTally {
    pub name: String,
    pub count: usize,
}

/// Organization-wide management overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_employees: usize,
    pub total_departments: usize,
    pub monthly_leaves: usize,
    pub active_leaves: usize,
    pub pending: PendingCounts,
    pub department_tallies: Vec<DepartmentTally>,
}

/// Requests in one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: LeaveCategory,
    pub count: usize,
}

/// Approved leaves starting in one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    pub month: &'static str,
    pub count: usize,
}

/// Personal overview for one employee.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub remaining_days: i64,
    pub categories: Vec<CategoryCount>,
    pub monthly_trend: Vec<MonthCount>,
    pub upcoming_holidays: Vec<Holiday>,
}

pub fn pending_counts(leaves: &[LeaveRequest], encashments: &[EncashmentRequest]) -> PendingCounts {
    PendingCounts {
        leaves: leaves.iter().filter(|l| l.status == LeaveStatus::Pending).count(),
        encashments: encashments.iter().filter(|e| e.status == LeaveStatus::Pending).count(),
    }
}

/// Leave requests applied for in the month of `today`.
pub fn monthly_count(leaves: &[LeaveRequest], today: NaiveDate) -> usize {
    leaves.iter().filter(|l| in_month_of(&l.applied_date, today)).count()
}

/// Leave requests per department, every department listed even at zero.
///
/// Requests are attributed through the owner's current department.
/// Sorted by count, descending; ties keep directory order.
pub fn department_tallies(state: &AppState) -> Vec<DepartmentTally> {
    let user_departments: HashMap<&str, &str> = state
        .users
        .iter()
        .map(|u| (u.id.as_str(), u.department.as_str()))
        .collect();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for leave in &state.leave_requests {
        let department = user_departments
            .get(leave.user_id.as_str())
            .copied()
            .unwrap_or(UNKNOWN_DEPARTMENT);
        *counts.entry(department).or_default() += 1;
    }

    let mut tallies: Vec<DepartmentTally> = state
        .departments
        .iter()
        .map(|d| DepartmentTally {
            name: d.name.clone(),
            count: counts.get(d.name.as_str()).copied().unwrap_or(0),
        })
        .collect();
    tallies.sort_by(|a, b| b.count.cmp(&a.count));
    tallies
}

/// Approved leaves held by current members of a department.
pub fn department_approved_leaves(state: &AppState, department: &str) -> usize {
    state
        .leave_requests
        .iter()
        .filter(|l| l.status == LeaveStatus::Approved)
        .filter(|l| state.find_user(&l.user_id).is_some_and(|u| u.department == department))
        .count()
}

pub fn admin_stats(state: &AppState, today: NaiveDate) -> AdminStats {
    AdminStats {
        total_employees: state.users.len(),
        total_departments: state.departments.len(),
        monthly_leaves: monthly_count(&state.leave_requests, today),
        active_leaves: state
            .leave_requests
            .iter()
            .filter(|l| l.status == LeaveStatus::Approved)
            .count(),
        pending: pending_counts(&state.leave_requests, &state.encashments),
        department_tallies: department_tallies(state),
    }
}

/// Allowance minus every approved day taken, floored at zero.
pub fn remaining_days<'a>(own_leaves: impl IntoIterator<Item = &'a LeaveRequest>, allowance: i64) -> i64 {
    let taken: i64 = own_leaves
        .into_iter()
        .filter(|l| l.status == LeaveStatus::Approved)
        .map(|l| inclusive_day_count(&l.start_date, &l.end_date))
        .sum();
    (allowance - taken).max(0)
}

/// Request count per category in fixed category order, zeros omitted.
pub fn category_distribution(own_leaves: &[&LeaveRequest]) -> Vec<CategoryCount> {
    LeaveCategory::ALL
        .iter()
        .map(|&category| CategoryCount {
            category,
            count: own_leaves.iter().filter(|l| l.category == category).count(),
        })
        .filter(|c| c.count > 0)
        .collect()
}

/// Approved leaves by start month, January through the month of `today`.
pub fn monthly_trend(own_leaves: &[&LeaveRequest], today: NaiveDate) -> Vec<MonthCount> {
    let mut counts = [0usize; 12];
    for leave in own_leaves.iter().filter(|l| l.status == LeaveStatus::Approved) {
        match parse_date(&leave.start_date) {
            Some(start) if start.year() == today.year() => counts[start.month0() as usize] += 1,
            _ => {}
        }
    }

    MONTH_NAMES
        .iter()
        .zip(counts)
        .take(today.month() as usize)
        .map(|(&month, count)| MonthCount { month, count })
        .collect()
}

pub fn employee_stats(state: &AppState, user_id: &str, policy: &PolicyConfig, today: NaiveDate) -> EmployeeStats {
    let own: Vec<&LeaveRequest> = state.leave_requests.iter().filter(|l| l.user_id == user_id).collect();
    let with_status = |status: LeaveStatus| own.iter().filter(|l| l.status == status).count();

    EmployeeStats {
        total: own.len(),
        pending: with_status(LeaveStatus::Pending),
        approved: with_status(LeaveStatus::Approved),
        rejected: with_status(LeaveStatus::Rejected),
        remaining_days: remaining_days(own.iter().copied(), policy.annual_allowance_days),
        categories: category_distribution(&own),
        monthly_trend: monthly_trend(&own, today),
        upcoming_holidays: upcoming_holidays(today, Some(policy.upcoming_holiday_limit)),
    }
}
