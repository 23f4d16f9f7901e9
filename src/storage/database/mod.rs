//! Relational storage for projects, batches, accounts and the audit log
//!
//! Entities and migrations describe the schema; `seaorm_db` holds the
//! queries, split by aggregate.

pub mod entities;
pub mod migration;
pub mod seaorm_db;

pub use seaorm_db::SeaOrmDatabase as Database;
pub use seaorm_db::{BatchRecord, DatabaseBackendType, ProjectRecord};
