//! Batch service types

use crate::core::documents::DocumentKind;
use crate::core::models::{AuditEntry, BatchView};
use chrono::NaiveDate;
use serde::Serialize;

/// A file received for one document field
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub field: DocumentKind,
    /// Client supplied filename
    pub filename: String,
    pub content: Vec<u8>,
}

/// Submitted batch form
///
/// On update, fields left as `None` keep their stored values.
#[derive(Debug, Clone, Default)]
pub struct BatchForm {
    pub lot_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub part_count: Option<i64>,
    pub uploads: Vec<UploadedFile>,
    /// Attachments to detach
    pub cleared: Vec<DocumentKind>,
}

/// Batch with its audit trail
#[derive(Debug, Clone, Serialize)]
pub struct BatchDetail {
    #[serde(flatten)]
    pub batch: BatchView,
    pub audit: Vec<AuditEntry>,
}
