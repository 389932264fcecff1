//! Session login, self-registration, and profile edits.

use tracing::{info, warn};

use crate::directory::{ensure_email_available, require};
use crate::error::{AppError, Result};
use crate::models::{ProfileUpdate, RegisterUser, User, new_id};
use crate::state::AppState;

/// Log in with an email (any case) and the exact stored password.
pub fn login(state: &mut AppState, email: &str, password: &str) -> Result<User> {
    let user = state
        .users
        .iter()
        .find(|u| u.has_email(email) && u.password.as_deref() == Some(password))
        .cloned();

    match user {
        Some(user) => {
            info!("Login: {} ({})", user.email, user.role);
            state.current_user = Some(user.clone());
            Ok(user)
        }
        None => {
            warn!("Failed login attempt for {email}");
            Err(AppError::InvalidCredentials)
        }
    }
}

/// End the session; returns the user who was logged in.
pub fn logout(state: &mut AppState) -> Option<User> {
    let user = state.current_user.take();
    if let Some(user) = &user {
        info!("Logout: {}", user.email);
    }
    user
}

/// Create an account that can log in. Appended to the directory.
pub fn register(state: &mut AppState, form: RegisterUser, min_password_len: usize) -> Result<User> {
    require("Full name", &form.full_name)?;
    require("Email", &form.email)?;
    if form.password != form.confirm_password {
        return Err(AppError::validation("Passwords do not match"));
    }
    if form.password.chars().count() < min_password_len {
        return Err(AppError::validation(format!(
            "Password must be at least {min_password_len} characters"
        )));
    }
    ensure_email_available(state, &form.email, None)?;

    let user = User {
        id: new_id(),
        full_name: form.full_name.trim().to_string(),
        email: form.email.trim().to_string(),
        department: form.department,
        role: form.role,
        phone_number: form.phone_number.filter(|p| !p.trim().is_empty()),
        password: Some(form.password),
    };
    state.users.push(user.clone());
    info!("Registered {} as {}", user.email, user.role);
    Ok(user)
}

/// Apply profile changes to the session user and its directory record.
pub fn update_profile(state: &mut AppState, changes: ProfileUpdate) -> Result<User> {
    let mut user = state
        .current_user
        .clone()
        .ok_or_else(|| AppError::unauthorized("Not logged in"))?;

    if let Some(full_name) = changes.full_name {
        require("Full name", &full_name)?;
        user.full_name = full_name;
    }
    if let Some(email) = changes.email {
        require("Email", &email)?;
        ensure_email_available(state, &email, Some(&user.id))?;
        user.email = email;
    }
    if let Some(phone_number) = changes.phone_number {
        user.phone_number = phone_number;
    }
    if let Some(department) = changes.department {
        user.department = department;
    }

    if let Some(existing) = state.users.iter_mut().find(|u| u.id == user.id) {
        *existing = user.clone();
    }
    state.current_user = Some(user.clone());
    info!("Profile updated for {}", user.id);
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use chrono::NaiveDate;

    fn state() -> AppState {
        AppState::seeded(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap())
    }

    fn registration(email: &str, password: &str, confirm: &str) -> RegisterUser {
        RegisterUser {
            full_name: "Eric Niyonzima".to_string(),
            email: email.to_string(),
            department: "Sales".to_string(),
            role: Role::Employee,
            phone_number: None,
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_login_every_seeded_credential() {
        let mut state = state();
        let with_passwords: Vec<User> = state.users.iter().filter(|u| u.password.is_some()).cloned().collect();
        for user in with_passwords {
            let password = user.password.clone().unwrap();
            let logged_in = login(&mut state, &user.email, &password).unwrap();
            assert_eq!(logged_in, user);
            assert_eq!(state.current_user.as_ref(), Some(&user));
        }
    }

    #[test]
    fn test_login_email_is_case_insensitive() {
        let mut state = state();
        let user = login(&mut state, "JOHN@company.com", "password123").unwrap();
        assert_eq!(user.id, "1");
    }

    #[test]
    fn test_login_failures_leave_session_unset() {
        let mut state = state();
        assert!(matches!(
            login(&mut state, "john@company.com", "wrong"),
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            login(&mut state, "nobody@company.com", "password123"),
            Err(AppError::InvalidCredentials)
        ));
        // Users without a password can never log in.
        assert!(login(&mut state, "alice@company.com", "").is_err());
        assert!(state.current_user.is_none());
    }

    #[test]
    fn test_logout() {
        let mut state = state();
        login(&mut state, "jane@company.com", "password123").unwrap();
        assert_eq!(logout(&mut state).map(|u| u.id), Some("2".to_string()));
        assert!(state.current_user.is_none());
        assert!(logout(&mut state).is_none());
    }

    #[test]
    fn test_register_then_login() {
        let mut state = state();
        let user = register(&mut state, registration("eric@company.com", "secret1", "secret1"), 6).unwrap();
        assert_eq!(state.users.last(), Some(&user));
        assert_eq!(login(&mut state, "eric@company.com", "secret1").unwrap().id, user.id);
    }

    #[test]
    fn test_register_validation() {
        let mut state = state();
        let mismatch = register(&mut state, registration("eric@company.com", "secret1", "secret2"), 6);
        assert!(matches!(mismatch, Err(AppError::Validation(msg)) if msg == "Passwords do not match"));

        let short = register(&mut state, registration("eric@company.com", "abc", "abc"), 6);
        assert!(matches!(short, Err(AppError::Validation(_))));

        let taken = register(&mut state, registration("John@Company.com", "secret1", "secret1"), 6);
        assert!(matches!(taken, Err(AppError::Validation(_))));
        assert_eq!(state.users.len(), 6);
    }

    #[test]
    fn test_update_profile_syncs_directory() {
        let mut state = state();
        assert!(update_profile(&mut state, ProfileUpdate::default()).is_err());

        login(&mut state, "john@company.com", "password123").unwrap();
        let updated = update_profile(
            &mut state,
            ProfileUpdate {
                full_name: Some("Johnny Doe".to_string()),
                phone_number: Some(None),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(updated.full_name, "Johnny Doe");
        assert_eq!(updated.phone_number, None);
        assert_eq!(state.find_user("1"), Some(&updated));
        assert_eq!(state.current_user.as_ref(), Some(&updated));
        assert_eq!(updated.password.as_deref(), Some("password123"));
    }
}
