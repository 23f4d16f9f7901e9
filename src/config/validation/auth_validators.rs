//! Authentication configuration validators

use super::Validate;
use crate::config::models::*;
use crate::utils::validation::AccountValidator;
use tracing::debug;

impl Validate for AuthConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating auth configuration");

        if self.jwt_secret.len() < 32 {
            return Err("JWT secret must be at least 32 characters long".to_string());
        }

        if self.jwt_secret == "your-secret-key" || self.jwt_secret == "change-me" {
            return Err("JWT secret must not use default values".to_string());
        }

        if self.jwt_expiration < 300 {
            return Err("JWT expiration should be at least 5 minutes (300 seconds)".to_string());
        }

        if self.jwt_expiration > 86400 * 30 {
            return Err("JWT expiration should not exceed 30 days".to_string());
        }

        if let Some(admin) = &self.bootstrap_admin {
            admin.validate()?;
        }

        Ok(())
    }
}

impl Validate for BootstrapAdminConfig {
    fn validate(&self) -> Result<(), String> {
        AccountValidator::validate_username(&self.username).map_err(|e| e.to_string())?;
        AccountValidator::validate_password(&self.password).map_err(|e| e.to_string())?;
        if let Some(email) = &self.email {
            AccountValidator::validate_email(email).map_err(|e| e.to_string())?;
        }
        Ok(())
    }
}
