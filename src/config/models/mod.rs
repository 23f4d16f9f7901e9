//! Configuration data models

#![allow(missing_docs)]

pub mod app;
pub mod auth;
pub mod server;
pub mod storage;

pub use app::*;
pub use auth::*;
pub use server::*;
pub use storage::*;

// Serde defaults, shared by the section structs and their `Default` impls

pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub fn default_port() -> u16 {
    8000
}

/// Client request timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

pub fn default_max_body_size() -> usize {
    128 * 1024 * 1024 // six attachments plus form fields
}

pub fn default_max_connections() -> u32 {
    10
}

pub fn default_connection_timeout() -> u64 {
    5
}

pub fn default_database_url() -> String {
    "sqlite://data/quality.db?mode=rwc".to_string()
}

pub fn default_media_root() -> String {
    "./media".to_string()
}

pub fn default_max_upload_size() -> usize {
    20 * 1024 * 1024
}

pub fn default_jwt_expiration() -> u64 {
    3600 * 8 // one shift
}

pub fn default_cors_methods() -> Vec<String> {
    vec![
        "GET".to_string(),
        "POST".to_string(),
        "PUT".to_string(),
        "DELETE".to_string(),
        "OPTIONS".to_string(),
    ]
}

pub fn default_cors_headers() -> Vec<String> {
    vec!["authorization".to_string(), "content-type".to_string()]
}

pub fn default_cors_max_age() -> u32 {
    3600
}

pub fn default_true() -> bool {
    true
}
