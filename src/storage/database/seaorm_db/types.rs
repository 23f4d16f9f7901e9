use crate::core::models::DocumentSet;
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// SeaORM-based database implementation
#[derive(Debug)]
pub struct SeaOrmDatabase {
    pub(super) db: DatabaseConnection,
    /// Backend type indicator
    pub(super) backend_type: DatabaseBackendType,
}

/// Database backend type indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackendType {
    PostgreSQL,
    SQLite,
}

/// Validated project fields ready to be written
#[derive(Debug, Clone)]
pub struct ProjectRecord {
    pub name: String,
    pub client: Option<String>,
    pub target_pieces: u32,
    pub active: bool,
}

/// Full state of a batch row ready to be written
#[derive(Debug, Clone)]
pub struct BatchRecord {
    pub project_id: i32,
    pub lot_id: String,
    pub date: NaiveDate,
    pub part_count: u32,
    pub documents: DocumentSet,
}
