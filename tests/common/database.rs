//! Test storage utilities
//!
//! Each test gets an isolated in-memory SQLite database and its own
//! temporary media root.

use batch_quality::config::{
    AppConfig, AuthConfig, Config, DatabaseConfig, FileStorageConfig, StorageConfig,
};
use batch_quality::server::AppState;
use batch_quality::storage::StorageLayer;
use batch_quality::storage::database::Database;
use std::sync::Arc;
use tempfile::TempDir;

pub const TEST_JWT_SECRET: &str = "Test-Secret-That-Is-At-Least-32-Characters-Long";

/// Storage wrapper providing isolated instances
pub struct TestDatabase {
    storage: Arc<StorageLayer>,
    config: Config,
    media: TempDir,
}

impl TestDatabase {
    /// Create a migrated in-memory database with a temporary media root
    pub async fn new() -> Self {
        let media = TempDir::new().expect("Failed to create media root");
        let config = test_config(&media);

        let storage = StorageLayer::new(config.storage())
            .await
            .expect("Failed to create in-memory test storage");

        storage
            .migrate()
            .await
            .expect("Failed to run database migrations");

        Self {
            storage: Arc::new(storage),
            config,
            media,
        }
    }

    /// Get reference to the underlying database
    pub fn db(&self) -> &Database {
        self.storage.db()
    }

    /// Get Arc to the storage layer
    pub fn storage(&self) -> Arc<StorageLayer> {
        Arc::clone(&self.storage)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Directory uploaded files are written under
    pub fn media_root(&self) -> &std::path::Path {
        self.media.path()
    }

    /// Application state sharing this database
    pub fn app_state(&self) -> AppState {
        AppState::new(self.config.clone(), (*self.storage).clone())
    }
}

/// Configuration pointing at in-memory SQLite and the given media root
pub fn test_config(media: &TempDir) -> Config {
    Config {
        app: AppConfig {
            storage: StorageConfig {
                database: DatabaseConfig {
                    url: "sqlite::memory:".to_string(),
                    // In-memory DB only supports 1 connection
                    max_connections: 1,
                    connection_timeout: 5,
                },
                files: FileStorageConfig {
                    media_root: media.path().to_string_lossy().to_string(),
                    max_upload_size: 1024 * 1024,
                },
            },
            auth: AuthConfig {
                jwt_secret: TEST_JWT_SECRET.to_string(),
                ..AuthConfig::default()
            },
            ..AppConfig::default()
        },
    }
}
