//! Data models for users, departments, requests, notifications, and holidays.

pub mod department;
pub mod encashment;
pub mod holiday;
pub mod leave;
pub mod notification;
pub mod user;

pub use department::{CreateDepartment, Department, DepartmentStatus, UpdateDepartment};
pub use encashment::{EncashmentDraft, EncashmentRequest};
pub use holiday::{HOLIDAYS, Holiday};
pub use leave::{LeaveCategory, LeaveDraft, LeaveRequest, LeaveStatus};
pub use notification::{Notification, NotificationKind};
pub use user::{CreateUser, ProfileUpdate, RegisterUser, Role, UpdateUser, User};

use rand::Rng;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

/// Generate a fresh record id (9 lowercase base-36 characters).
pub fn new_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LEN)
        .map(|_| char::from(ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())]))
        .collect()
}
