//! User Data

use crate::domain::users::records::{UserRole, UserUuid};

/// New User Data
#[derive(Debug, Clone)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub role: UserRole,
}

/// Profile Update Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: String,
    pub phone: String,
}
