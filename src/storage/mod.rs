//! Key-value persistence port and its adapters.
//!
//! Every entity collection is one record under a fixed key, stored as a
//! JSON document. A missing key means "never saved" and callers fall back
//! to their defaults.

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::Result;

/// Fixed record keys.
pub mod keys {
    pub const USERS: &str = "smart_leave_users";
    pub const DEPARTMENTS: &str = "smart_leave_departments";
    pub const REQUESTS: &str = "smart_leave_requests";
    pub const ENCASHMENTS: &str = "smart_leave_encashments";
    pub const NOTIFICATIONS: &str = "smart_leave_notifications";
    pub const CURRENT_USER: &str = "smart_leave_user";
    pub const THEME: &str = "theme";
}

/// String-valued key-value store, the desktop stand-in for browser local storage.
pub trait KeyValueStore {
    /// Read a record; `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a record, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete a record. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Load and decode a JSON record.
pub fn load_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encode and write a JSON record.
pub fn save_json<T: Serialize + ?Sized>(store: &mut impl KeyValueStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    debug!("Saving {key} ({} bytes)", raw.len());
    store.set(key, &raw)
}
