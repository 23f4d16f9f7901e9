/// Audit log entity module
pub mod audit_log_entry;
/// Batch entity module
pub mod batch;
/// Project entity module
pub mod project;
/// User entity module
pub mod user;
/// User group membership entity module
pub mod user_group;
/// User profile entity module
pub mod user_profile;

pub use audit_log_entry::Entity as AuditLogEntry;
pub use batch::Entity as Batch;
pub use project::Entity as Project;
pub use user::Entity as User;
pub use user_group::Entity as UserGroup;
pub use user_profile::Entity as UserProfile;
