// Module declarations
mod types;
mod connection;
mod user_ops;
mod project_ops;
mod batch_ops;
mod audit_ops;

// Re-export public types
pub use types::{BatchRecord, DatabaseBackendType, ProjectRecord, SeaOrmDatabase};
