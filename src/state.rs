//! In-memory application state and its mapping onto the key-value store.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{Department, EncashmentRequest, LeaveRequest, Notification, User};
use crate::seed;
use crate::storage::{KeyValueStore, keys, load_json, save_json};

/// Light/dark display preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Stored form: the raw string `dark` or `light`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Anything other than `dark` reads as light.
    pub fn from_stored(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(format!("Invalid theme: {s}")),
        }
    }
}

/// One persisted record of the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Users,
    Departments,
    LeaveRequests,
    Encashments,
    Notifications,
    CurrentUser,
    Theme,
}

impl Collection {
    pub const ALL: [Collection; 7] = [
        Collection::Users,
        Collection::Departments,
        Collection::LeaveRequests,
        Collection::Encashments,
        Collection::Notifications,
        Collection::CurrentUser,
        Collection::Theme,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Collection::Users => keys::USERS,
            Collection::Departments => keys::DEPARTMENTS,
            Collection::LeaveRequests => keys::REQUESTS,
            Collection::Encashments => keys::ENCASHMENTS,
            Collection::Notifications => keys::NOTIFICATIONS,
            Collection::CurrentUser => keys::CURRENT_USER,
            Collection::Theme => keys::THEME,
        }
    }
}

/// Every entity collection plus the session user and theme.
///
/// Collections are ordered newest-first where records are prepended;
/// that order is a display convention, not an invariant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub users: Vec<User>,
    pub departments: Vec<Department>,
    pub leave_requests: Vec<LeaveRequest>,
    pub encashments: Vec<EncashmentRequest>,
    pub notifications: Vec<Notification>,
    pub current_user: Option<User>,
    pub theme: Theme,
}

impl AppState {
    /// Demo dataset with no session.
    pub fn seeded(today: NaiveDate) -> Self {
        Self {
            users: seed::users(),
            departments: seed::departments(),
            leave_requests: seed::leave_requests(today),
            ..Default::default()
        }
    }

    /// Load every collection, falling back to the seed (or empty) per missing key.
    pub fn load(store: &impl KeyValueStore, today: NaiveDate) -> Result<Self> {
        let state = Self {
            users: load_json(store, keys::USERS)?.unwrap_or_else(seed::users),
            departments: load_json(store, keys::DEPARTMENTS)?.unwrap_or_else(seed::departments),
            leave_requests: load_json(store, keys::REQUESTS)?.unwrap_or_else(|| seed::leave_requests(today)),
            encashments: load_json(store, keys::ENCASHMENTS)?.unwrap_or_default(),
            notifications: load_json(store, keys::NOTIFICATIONS)?.unwrap_or_default(),
            current_user: load_json(store, keys::CURRENT_USER)?,
            theme: Theme::from_stored(store.get(keys::THEME)?.as_deref()),
        };

        info!(
            "State loaded: {} users, {} departments, {} leave requests, {} encashments, {} notifications",
            state.users.len(),
            state.departments.len(),
            state.leave_requests.len(),
            state.encashments.len(),
            state.notifications.len()
        );

        Ok(state)
    }

    /// Whether any seeded collection has never been written to `store`.
    pub fn seed_pending(store: &impl KeyValueStore) -> Result<bool> {
        for key in [keys::USERS, keys::DEPARTMENTS, keys::REQUESTS] {
            if store.get(key)?.is_none() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Write the given collections, in order.
    pub fn persist(&self, store: &mut impl KeyValueStore, collections: &[Collection]) -> Result<()> {
        for collection in collections {
            self.save_collection(store, *collection)?;
        }
        Ok(())
    }

    /// Write every collection.
    pub fn persist_all(&self, store: &mut impl KeyValueStore) -> Result<()> {
        self.persist(store, &Collection::ALL)
    }

    fn save_collection(&self, store: &mut impl KeyValueStore, collection: Collection) -> Result<()> {
        debug!("Persisting {:?}", collection);
        match collection {
            Collection::Users => save_json(store, keys::USERS, &self.users),
            Collection::Departments => save_json(store, keys::DEPARTMENTS, &self.departments),
            Collection::LeaveRequests => save_json(store, keys::REQUESTS, &self.leave_requests),
            Collection::Encashments => save_json(store, keys::ENCASHMENTS, &self.encashments),
            Collection::Notifications => save_json(store, keys::NOTIFICATIONS, &self.notifications),
            Collection::CurrentUser => match &self.current_user {
                Some(user) => save_json(store, keys::CURRENT_USER, user),
                None => store.remove(keys::CURRENT_USER),
            },
            Collection::Theme => store.set(keys::THEME, self.theme.as_str()),
        }
    }

    pub fn find_user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Admins and HR managers, in directory order.
    pub fn managers(&self) -> impl Iterator<Item = &User> {
        self.users.iter().filter(|u| u.role.is_manager())
    }
}
