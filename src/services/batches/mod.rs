//! Batch management
//!
//! Creating and editing batches from multipart forms, with upload
//! validation, target capacity checks, file storage and audit.

mod archive;
mod service;
mod types;

pub use service::BatchService;
pub use types::{BatchDetail, BatchForm, UploadedFile};
