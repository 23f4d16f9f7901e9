//! Common test utilities for batch-quality
//!
//! # Usage
//!
//! ```rust
//! use crate::common::{TestDatabase, fixtures};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let db = TestDatabase::new().await;
//!     let admin = fixtures::admin(&db).await;
//!     // ...
//! }
//! ```

#![allow(dead_code)]

pub mod database;
pub mod fixtures;

pub use database::TestDatabase;
