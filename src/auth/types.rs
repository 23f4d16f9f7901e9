//! Authentication request and response types

use crate::core::models::{User, UserProfile};
use serde::{Deserialize, Serialize};

use super::rbac::Permission;

/// Self-registration form
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Issued bearer token
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Always "Bearer"
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: u64,
    pub user: User,
}

/// The authenticated account with its effective permissions
#[derive(Debug, Clone, Serialize)]
pub struct AccountInfo {
    pub user: User,
    pub profile: Option<UserProfile>,
    pub permissions: Vec<Permission>,
}
