//! Configuration validation
//!
//! Each YAML section checks itself; `Config::validate` walks them in order
//! and reports the first failure with the section name attached.

mod auth_validators;
mod server_validators;
mod storage_validators;

use crate::utils::error::QualityError;

/// A configuration section that can reject its own values
pub trait Validate {
    fn validate(&self) -> Result<(), String>;

    /// Validate and label the failure with `section`
    fn validate_section(&self, section: &str) -> crate::utils::error::Result<()> {
        self.validate()
            .map_err(|e| QualityError::Config(format!("{} config error: {}", section, e)))
    }
}
