//! Storage layer
//!
//! Quality records live in the database; uploaded compliance documents live
//! under the media root and are referenced from batches by relative path.

pub mod database;
pub mod files;

use crate::config::StorageConfig;
use crate::utils::error::Result;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Database and media store, shared by every service
#[derive(Debug, Clone)]
pub struct StorageLayer {
    pub database: Arc<database::Database>,
    pub files: Arc<files::LocalStorage>,
}

impl StorageLayer {
    /// Connect to the database and open (creating if needed) the media root
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        let database = Arc::new(database::Database::new(&config.database).await?);
        let files = Arc::new(files::LocalStorage::new(&config.files.media_root).await?);

        info!(
            "Storage ready: {:?} database, media at {}",
            database.backend_type(),
            config.files.media_root
        );
        Ok(Self { database, files })
    }

    /// Bring the schema up to date
    pub async fn migrate(&self) -> Result<()> {
        self.database.migrate().await
    }

    /// Probe both backends; failures are logged, not returned
    pub async fn health_check(&self) -> StorageHealthStatus {
        let database = match self.database.health_check().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Database unreachable: {}", e);
                false
            }
        };
        let files = match self.files.health_check().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Media root not writable: {}", e);
                false
            }
        };

        StorageHealthStatus {
            database,
            files,
            overall: database && files,
        }
    }

    pub fn db(&self) -> &database::Database {
        &self.database
    }

    pub fn files(&self) -> &files::LocalStorage {
        &self.files
    }
}

/// Result of [`StorageLayer::health_check`]
#[derive(Debug, Clone, Serialize)]
pub struct StorageHealthStatus {
    pub database: bool,
    /// Media root is writable
    pub files: bool,
    pub overall: bool,
}
