// lib/src/storage_engine/keys.rs
//! Well-known storage keys shared by the portal pages.

pub const IS_LOGGED_IN: &str = "isLoggedIn";
pub const IS_DOCTOR: &str = "isDoctor";
pub const IS_ADMIN: &str = "isAdmin";
pub const USER_EMAIL: &str = "userEmail";
pub const USER_NAME: &str = "userName";
pub const APPOINTMENTS: &str = "appointments";
pub const DOCTOR_PROFILE: &str = "doctorProfile";
pub const USER_PROFILE: &str = "userProfile";
pub const LANGUAGE: &str = "language";
pub const ACCOUNT_DEACTIVATED: &str = "accountDeactivated";
pub const ACCOUNT_DELETED: &str = "accountDeleted";
pub const DEACTIVATION_REASON: &str = "deactivationReason";
pub const DELETION_REASON: &str = "deletionReason";

pub const CHAT_PREFIX: &str = "chat:";

pub const SESSION_KEYS: [&str; 5] = [IS_LOGGED_IN, IS_DOCTOR, IS_ADMIN, USER_EMAIL, USER_NAME];

pub fn chat_key(contact: &str) -> String {
    format!("{}{}", CHAT_PREFIX, contact)
}

pub const TRUE: &str = "true";
