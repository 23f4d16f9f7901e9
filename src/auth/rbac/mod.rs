//! Role-Based Access Control (RBAC) system
//!
//! Permissions come from group membership. Staff accounts manage users and
//! superusers hold every permission.

mod permissions;
mod system;
mod types;

// Re-export public types and structs
pub use system::RbacSystem;
pub use types::{Permission, Role};
