//! Error types for the quality records service

use thiserror::Error;

pub type Result<T> = std::result::Result<T, QualityError>;

/// Every failure the service can report
///
/// Variants wrapping a library error convert with `?`; the rest carry a
/// message that is shown to the client unless the status is 500.
#[derive(Error, Debug)]
pub enum QualityError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrong credentials or an account that is not approved
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Missing or unusable bearer token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but the group does not grant the action
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A form or upload failed a field rule; the message starts with the field
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed request that never reached field validation
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate lot id, project name or username, or a project that still has batches
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Media root could not be read or written
    #[error("File storage error: {0}")]
    FileStorage(String),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Password hashing failed
    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}
