//! File storage implementation
//!
//! Uploaded documents live under a media root on the local file system and
//! are addressed by forward-slash relative paths.

mod local;

// Re-export public types
pub use local::LocalStorage;
