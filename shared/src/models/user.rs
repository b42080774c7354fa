//! User Model

use super::role::Role;
use serde::{Deserialize, Serialize};

/// User account
///
/// `password` is compared in plaintext on login. It is never exposed through
/// [`UserProfile`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Unique, compared case-insensitively
    pub email: String,
    pub role: Role,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

/// User as shown in listings (without password)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub image_ref: Option<String>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            image_ref: user.image_ref.clone(),
        }
    }
}

/// Create user payload (registration or admin action)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub password: String,
    pub image_ref: Option<String>,
}

/// Admin edit payload
///
/// `password` only replaces the stored one when present and non-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub password: Option<String>,
}

/// Self-service profile edit payload (email is immutable here)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: String,
    /// Only replaces the stored password when non-empty
    pub password: Option<String>,
    /// Must repeat `password` when one is given
    pub confirm_password: Option<String>,
    /// File extension of a newly chosen picture; the engine synthesizes the reference
    pub image_extension: Option<String>,
}
