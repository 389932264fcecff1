//! Leave requests, their categories, and the shared request status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::NotificationKind;

/// Kind of leave being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaveCategory {
    #[serde(rename = "Sick Leave")]
    Sick,
    #[serde(rename = "Annual Leave")]
    Annual,
    #[serde(rename = "Maternity Leave")]
    Maternity,
    #[serde(rename = "Paternity Leave")]
    Paternity,
    #[serde(rename = "Unpaid Leave")]
    Unpaid,
    #[serde(rename = "Emergency Leave")]
    Emergency,
}

impl LeaveCategory {
    /// Every category in picker order.
    pub const ALL: [LeaveCategory; 6] = [
        LeaveCategory::Sick,
        LeaveCategory::Annual,
        LeaveCategory::Maternity,
        LeaveCategory::Paternity,
        LeaveCategory::Unpaid,
        LeaveCategory::Emergency,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LeaveCategory::Sick => "Sick Leave",
            LeaveCategory::Annual => "Annual Leave",
            LeaveCategory::Maternity => "Maternity Leave",
            LeaveCategory::Paternity => "Paternity Leave",
            LeaveCategory::Unpaid => "Unpaid Leave",
            LeaveCategory::Emergency => "Emergency Leave",
        }
    }
}

impl fmt::Display for LeaveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for LeaveCategory {
    type Err = String;

    /// Accepts either the short name (`annual`) or the full label (`Annual Leave`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let short = normalized.strip_suffix(" leave").unwrap_or(&normalized);
        match short {
            "sick" => Ok(LeaveCategory::Sick),
            "annual" => Ok(LeaveCategory::Annual),
            "maternity" => Ok(LeaveCategory::Maternity),
            "paternity" => Ok(LeaveCategory::Paternity),
            "unpaid" => Ok(LeaveCategory::Unpaid),
            "emergency" => Ok(LeaveCategory::Emergency),
            _ => Err(format!("Invalid leave category: {s}")),
        }
    }
}

/// Review status shared by leave and encashment requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub const ALL: [LeaveStatus; 3] = [LeaveStatus::Pending, LeaveStatus::Approved, LeaveStatus::Rejected];

    pub fn label(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "Pending",
            LeaveStatus::Approved => "Approved",
            LeaveStatus::Rejected => "Rejected",
        }
    }

    /// Approved and Rejected are terminal; nothing enforces it.
    pub fn is_terminal(&self) -> bool {
        match self {
            LeaveStatus::Pending => false,
            LeaveStatus::Approved | LeaveStatus::Rejected => true,
        }
    }

    /// Notification kind used when a reviewer moves a request into this status.
    pub fn decision_kind(&self) -> NotificationKind {
        match self {
            LeaveStatus::Approved => NotificationKind::Success,
            LeaveStatus::Rejected => NotificationKind::Error,
            LeaveStatus::Pending => NotificationKind::Info,
        }
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for LeaveStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(LeaveStatus::Pending),
            "approved" => Ok(LeaveStatus::Approved),
            "rejected" => Ok(LeaveStatus::Rejected),
            _ => Err(format!("Invalid status: {s}")),
        }
    }
}

/// A request for time off.
///
/// Dates are kept in their stored `YYYY-MM-DD` text form and parsed on
/// read, so a malformed value degrades to zero days instead of failing
/// the whole collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub id: String,
    pub user_id: String,
    /// Display name at time of submission; never re-joined against users.
    pub full_name: String,
    pub category: LeaveCategory,
    pub start_date: String,
    /// Inclusive.
    pub end_date: String,
    pub reason: String,
    pub status: LeaveStatus,
    pub applied_date: String,
    /// File name only; the file itself is not stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supporting_doc: Option<String>,
}

/// Form data for a new leave request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveDraft {
    pub category: LeaveCategory,
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
    pub supporting_doc: Option<String>,
}
