//! Utility modules
//!
//! - **auth**: password hashing
//! - **error**: error type and HTTP mapping
//! - **validation**: account input validation

pub mod auth;
pub mod error;
pub mod validation;

use uuid::Uuid;

/// Generate a unique request ID
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}
