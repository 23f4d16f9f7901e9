//! Validation of account input

use crate::utils::error::{QualityError, Result};
use regex::Regex;

/// Account input validation
pub struct AccountValidator;

impl AccountValidator {
    /// Validate a username: letters, digits and `@ . + - _`, up to 150 characters
    pub fn validate_username(username: &str) -> Result<()> {
        if username.trim().is_empty() {
            return Err(QualityError::validation("Username cannot be empty"));
        }

        if username.chars().count() > 150 {
            return Err(QualityError::validation(
                "Username cannot exceed 150 characters",
            ));
        }

        let username_regex = Regex::new(r"^[\w.@+-]+$")
            .map_err(|e| QualityError::internal(format!("Regex error: {}", e)))?;

        if !username_regex.is_match(username) {
            return Err(QualityError::validation(
                "Username can only contain letters, digits and @ . + - _",
            ));
        }

        Ok(())
    }

    /// Validate password length
    pub fn validate_password(password: &str) -> Result<()> {
        if password.chars().count() < 8 {
            return Err(QualityError::validation(
                "Password must be at least 8 characters",
            ));
        }

        if password.len() > 128 {
            return Err(QualityError::validation(
                "Password cannot exceed 128 characters",
            ));
        }

        if password.chars().all(|c| c.is_ascii_digit()) {
            return Err(QualityError::validation(
                "Password cannot be entirely numeric",
            ));
        }

        Ok(())
    }

    /// Validate an email address
    pub fn validate_email(email: &str) -> Result<()> {
        let email_regex = Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .map_err(|e| QualityError::internal(format!("Regex error: {}", e)))?;

        if !email_regex.is_match(email) {
            return Err(QualityError::validation(format!(
                "Invalid email address: {}",
                email
            )));
        }

        Ok(())
    }
}
