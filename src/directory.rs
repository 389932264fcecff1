//! Employee directory and department administration.

use tracing::info;

use crate::error::{AppError, Result};
use crate::models::{CreateDepartment, CreateUser, Department, UpdateDepartment, UpdateUser, User, new_id};
use crate::state::AppState;

/// Reject empty or whitespace-only required fields.
pub fn require(label: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{label} is required")));
    }
    Ok(())
}

/// Check if an email is already used by another user (case-insensitive).
pub fn email_exists(state: &AppState, email: &str, exclude_id: Option<&str>) -> bool {
    state
        .users
        .iter()
        .any(|u| u.has_email(email) && Some(u.id.as_str()) != exclude_id)
}

pub(crate) fn ensure_email_available(state: &AppState, email: &str, exclude_id: Option<&str>) -> Result<()> {
    if email_exists(state, email, exclude_id) {
        return Err(AppError::validation(format!("Email {} is already registered", email.trim())));
    }
    Ok(())
}

/// Add a user from the directory; no password, so they cannot log in yet.
pub fn create_user(state: &mut AppState, data: CreateUser) -> Result<User> {
    require("Full name", &data.full_name)?;
    require("Email", &data.email)?;
    ensure_email_available(state, &data.email, None)?;

    let user = User {
        id: new_id(),
        full_name: data.full_name.trim().to_string(),
        email: data.email.trim().to_lowercase(),
        department: data.department,
        role: data.role,
        phone_number: data.phone_number.filter(|p| !p.trim().is_empty()),
        password: None,
    };
    state.users.insert(0, user.clone());
    info!("Created user {} ({})", user.email, user.role);
    Ok(user)
}

/// Update an existing user. `Ok(None)` when the id is unknown.
pub fn update_user(state: &mut AppState, id: &str, data: UpdateUser) -> Result<Option<User>> {
    if let Some(email) = &data.email {
        require("Email", email)?;
        ensure_email_available(state, email, Some(id))?;
    }
    if let Some(full_name) = &data.full_name {
        require("Full name", full_name)?;
    }

    let Some(user) = state.users.iter_mut().find(|u| u.id == id) else {
        return Ok(None);
    };

    if let Some(full_name) = data.full_name {
        user.full_name = full_name;
    }
    if let Some(email) = data.email {
        user.email = email;
    }
    if let Some(department) = data.department {
        user.department = department;
    }
    if let Some(role) = data.role {
        user.role = role;
    }
    if let Some(phone_number) = data.phone_number {
        user.phone_number = phone_number;
    }

    info!("Updated user {id}");
    Ok(Some(user.clone()))
}

/// Remove a user. Their requests and notifications are kept.
pub fn delete_user(state: &mut AppState, id: &str) -> bool {
    let before = state.users.len();
    state.users.retain(|u| u.id != id);
    let removed = state.users.len() < before;
    if removed {
        info!("Deleted user {id}");
    }
    removed
}

/// Check if department name exists (advisory; duplicates are allowed).
pub fn department_name_exists(state: &AppState, name: &str, exclude_id: Option<&str>) -> bool {
    state
        .departments
        .iter()
        .any(|d| d.name == name && Some(d.id.as_str()) != exclude_id)
}

pub fn find_department<'a>(state: &'a AppState, id: &str) -> Option<&'a Department> {
    state.departments.iter().find(|d| d.id == id)
}

/// Create a new department.
pub fn create_department(state: &mut AppState, data: CreateDepartment) -> Result<Department> {
    require("Department name", &data.name)?;

    let department = Department {
        id: new_id(),
        name: data.name.trim().to_string(),
        head: data.head,
        members: 0,
        status: data.status,
    };
    state.departments.insert(0, department.clone());
    info!("Created department {}", department.name);
    Ok(department)
}

/// Update an existing department. `Ok(None)` when the id is unknown.
pub fn update_department(state: &mut AppState, id: &str, data: UpdateDepartment) -> Result<Option<Department>> {
    if let Some(name) = &data.name {
        require("Department name", name)?;
    }

    let Some(department) = state.departments.iter_mut().find(|d| d.id == id) else {
        return Ok(None);
    };

    if let Some(name) = data.name {
        department.name = name;
    }
    if let Some(head) = data.head {
        department.head = head;
    }
    if let Some(status) = data.status {
        department.status = status;
    }

    info!("Updated department {id}");
    Ok(Some(department.clone()))
}

/// Delete a department by id. Users keep their department name.
pub fn delete_department(state: &mut AppState, id: &str) -> bool {
    let before = state.departments.len();
    state.departments.retain(|d| d.id != id);
    let removed = state.departments.len() < before;
    if removed {
        info!("Deleted department {id}");
    }
    removed
}

/// Live head count: users whose department field equals `name`.
///
/// The stored `Department::members` value is ignored.
pub fn member_count(state: &AppState, name: &str) -> usize {
    state.users.iter().filter(|u| u.department == name).count()
}

/// Users assigned to the department, in directory order.
pub fn roster<'a>(state: &'a AppState, name: &str) -> Vec<&'a User> {
    state.users.iter().filter(|u| u.department == name).collect()
}
