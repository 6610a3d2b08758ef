//! Auth API DTOs shared between the core and the backend client

use crate::models::UserRole;
use serde::{Deserialize, Serialize};

/// Login request (`POST /auth/login`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Register staff account (`POST /admin/register`)
///
/// The backend defaults an empty role to `staff`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

/// Register response (`{message, id, username, email}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
}
