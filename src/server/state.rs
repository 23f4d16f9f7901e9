//! Application state shared across HTTP handlers

use crate::auth::AuthSystem;
use crate::config::Config;
use crate::services::{BatchService, ProjectService};
use crate::storage::StorageLayer;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc so cloning per worker is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Authentication system
    pub auth: Arc<AuthSystem>,
    /// Storage layer
    pub storage: Arc<StorageLayer>,
    /// Project operations
    pub projects: Arc<ProjectService>,
    /// Batch operations
    pub batches: Arc<BatchService>,
}

impl AppState {
    /// Wire the services on top of an initialized storage layer
    pub fn new(config: Config, storage: StorageLayer) -> Self {
        let storage = Arc::new(storage);
        let auth = AuthSystem::new(config.auth(), Arc::clone(&storage));
        let projects = ProjectService::new(Arc::clone(&storage));
        let batches = BatchService::new(
            Arc::clone(&storage),
            config.storage().files.max_upload_size,
        );

        Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            storage,
            projects: Arc::new(projects),
            batches: Arc::new(batches),
        }
    }

    /// Get service configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
