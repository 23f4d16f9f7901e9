//! The YAML document root

use super::*;
use crate::config::Validate;
use crate::utils::error::{QualityError, Result};
use serde::{Deserialize, Serialize};

/// Everything the service reads from its config file
///
/// Every section may be omitted; the defaults run a local SQLite instance
/// with media under `./media`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    /// Database and media root
    #[serde(default)]
    pub storage: StorageConfig,
    /// Token signing and the bootstrap administrator
    #[serde(default)]
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Validate server, storage and auth sections in that order, then
    /// the limits that span sections
    pub fn validate_sections(&self) -> Result<()> {
        self.server.validate_section("Server")?;
        self.storage.validate_section("Storage")?;
        self.auth.validate_section("Auth")?;

        if self.storage.files.max_upload_size > self.server.max_body_size {
            return Err(QualityError::Config(format!(
                "Max upload size {} exceeds server max body size {}",
                self.storage.files.max_upload_size, self.server.max_body_size
            )));
        }
        Ok(())
    }
}
