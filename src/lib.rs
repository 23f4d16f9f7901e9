//! # batch-quality
//!
//! Quality records for manufacturing batches ("lotes").
//!
//! - **Projects** carry a target piece count; progress is derived from the
//!   part counts of their batches.
//! - **Batches** hold six compliance documents. Every upload or replacement
//!   is written to an audit trail in the same transaction as the batch.
//! - **Accounts** self-register as pending and are approved by an
//!   administrator into the readers or editors group.
//! - **Exports** bundle a batch's documents into a ZIP, reporting files that
//!   could not be read instead of failing.
//!
//! ## Running the server
//!
//! ```rust,no_run
//! use batch_quality::{Config, server::ServerBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/quality.yaml").await?;
//!     let server = ServerBuilder::new().with_config(config).build().await?;
//!     server.start().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod core;
pub mod server;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::models::RequestContext;
pub use utils::error::{QualityError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
