//! Server builder and run_server function
//!
//! This module provides the ServerBuilder for programmatic configuration
//! and the run_server function used by the binary.

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{QualityError, Result};
use std::path::Path;
use tracing::{info, warn};

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| QualityError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config).await
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Load the configuration file and serve until shutdown
///
/// A missing file falls back to defaults. A file that exists but fails to
/// parse or validate is an error.
pub async fn run_server(config_path: &Path, host: Option<String>, port: Option<u16>) -> Result<()> {
    info!("Starting batch quality service");

    let mut config = if config_path.exists() {
        info!("Loading configuration file: {}", config_path.display());
        Config::from_file(config_path).await?
    } else {
        warn!(
            "Configuration file {} not found, using defaults",
            config_path.display()
        );
        Config::default()
    };

    config.app.server = config.app.server.with_overrides(host, port);
    config.validate()?;

    let server = ServerBuilder::new().with_config(config.clone()).build().await?;
    info!(
        "Server starting at: http://{}:{}",
        config.server().host,
        config.server().port
    );
    info!("API endpoints:");
    info!("   GET  /health");
    info!("   POST /auth/register, /auth/login");
    info!("   GET  /projects, /projects/{{id}}/batches");
    info!("   GET  /batches/{{id}}/audit, /batches/{{id}}/archive");
    info!("   GET  /users/pending, /users/active");

    server.start().await
}
