//! Services module
//!
//! Business operations that combine domain rules with storage: projects
//! with their progress, and batches with uploads, audit and export.

pub mod batches;
pub mod projects;

pub use batches::{BatchDetail, BatchForm, BatchService, UploadedFile};
pub use projects::ProjectService;
