//! Error handling for the quality records service
//!
//! This module defines the error type shared by every layer and its HTTP mapping.

#![allow(missing_docs)]

mod helpers;
mod response;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{QualityError, Result};
