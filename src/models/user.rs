//! User accounts and the DTOs that create or edit them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Access role of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Employee,
    Admin,
    #[serde(rename = "HR Manager")]
    HrManager,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Employee, Role::Admin, Role::HrManager];

    /// Display label, identical to the persisted form.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Employee => "Employee",
            Role::Admin => "Admin",
            Role::HrManager => "HR Manager",
        }
    }

    /// Admins and HR managers review requests and administer the directory.
    pub fn is_manager(&self) -> bool {
        match self {
            Role::Admin | Role::HrManager => true,
            Role::Employee => false,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', '-'], " ").as_str() {
            "employee" => Ok(Role::Employee),
            "admin" => Ok(Role::Admin),
            "hr manager" | "hr" => Ok(Role::HrManager),
            _ => Err(format!("Invalid role: {s}")),
        }
    }
}

/// A registered user.
///
/// `department` is a department name, not an enforced reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Plaintext; users without one cannot log in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl User {
    /// Case-insensitive email comparison.
    pub fn has_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }
}

/// Self-service registration form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUser {
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub role: Role,
    pub phone_number: Option<String>,
    pub password: String,
    pub confirm_password: String,
}

/// DTO for creating a user from the employee directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub role: Role,
    pub phone_number: Option<String>,
}

/// DTO for updating a user from the employee directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub role: Option<Role>,
    pub phone_number: Option<Option<String>>,
}

/// Changes a user may make to their own profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<Option<String>>,
    pub department: Option<String>,
}
