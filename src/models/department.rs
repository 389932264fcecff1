//! Departments and the DTOs for create and update operations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a department is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DepartmentStatus {
    #[default]
    Active,
    Inactive,
}

impl fmt::Display for DepartmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepartmentStatus::Active => f.pad("Active"),
            DepartmentStatus::Inactive => f.pad("Inactive"),
        }
    }
}

impl FromStr for DepartmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(DepartmentStatus::Active),
            "inactive" => Ok(DepartmentStatus::Inactive),
            _ => Err(format!("Invalid department status: {s}")),
        }
    }
}

/// A department record.
///
/// `members` is carried for storage compatibility only; the live head
/// count is always derived from users (see `directory::member_count`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: String,
    pub name: String,
    /// Free-text name of the department head.
    pub head: String,
    pub members: u32,
    pub status: DepartmentStatus,
}

/// DTO for creating a department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDepartment {
    pub name: String,
    pub head: String,
    pub status: DepartmentStatus,
}

/// DTO for updating a department.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDepartment {
    pub name: Option<String>,
    pub head: Option<String>,
    pub status: Option<DepartmentStatus>,
}
