//! Batches and their compliance documents

use crate::core::documents::DocumentKind;
use crate::utils::error::{QualityError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of a lot identifier
pub const MAX_LOT_ID_LEN: usize = 20;

/// Stored paths of the six document attachments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSet {
    pub spectrometric_analysis: Option<String>,
    pub geometric_tolerance: Option<String>,
    pub hardness_test: Option<String>,
    pub tension_test: Option<String>,
    pub photographic_evidence: Option<String>,
    pub original_drawing: Option<String>,
}

impl DocumentSet {
    /// Stored path for a field, ignoring empty values
    pub fn get(&self, kind: DocumentKind) -> Option<&str> {
        let slot = match kind {
            DocumentKind::SpectrometricAnalysis => &self.spectrometric_analysis,
            DocumentKind::GeometricTolerance => &self.geometric_tolerance,
            DocumentKind::HardnessTest => &self.hardness_test,
            DocumentKind::TensionTest => &self.tension_test,
            DocumentKind::PhotographicEvidence => &self.photographic_evidence,
            DocumentKind::OriginalDrawing => &self.original_drawing,
        };
        slot.as_deref().filter(|path| !path.is_empty())
    }

    pub fn set(&mut self, kind: DocumentKind, path: Option<String>) {
        let slot = match kind {
            DocumentKind::SpectrometricAnalysis => &mut self.spectrometric_analysis,
            DocumentKind::GeometricTolerance => &mut self.geometric_tolerance,
            DocumentKind::HardnessTest => &mut self.hardness_test,
            DocumentKind::TensionTest => &mut self.tension_test,
            DocumentKind::PhotographicEvidence => &mut self.photographic_evidence,
            DocumentKind::OriginalDrawing => &mut self.original_drawing,
        };
        *slot = path.filter(|p| !p.is_empty());
    }

    pub fn present(&self) -> Vec<DocumentKind> {
        DocumentKind::ALL
            .into_iter()
            .filter(|kind| self.get(*kind).is_some())
            .collect()
    }

    pub fn missing(&self) -> Vec<DocumentKind> {
        DocumentKind::ALL
            .into_iter()
            .filter(|kind| self.get(*kind).is_none())
            .collect()
    }

    /// All six attachments are non-empty
    pub fn is_complete(&self) -> bool {
        DocumentKind::ALL.iter().all(|kind| self.get(*kind).is_some())
    }
}

/// A production lot of one project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    pub id: i32,
    pub project_id: i32,
    /// Human readable lot identifier, unique across all batches
    pub lot_id: String,
    pub date: NaiveDate,
    pub part_count: u32,
    pub documents: DocumentSet,
    /// Last user who saved the batch
    pub uploaded_by: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Batch {
    pub fn is_complete(&self) -> bool {
        self.documents.is_complete()
    }

    /// Download name of the batch archive
    pub fn archive_name(&self) -> String {
        archive_name(&self.lot_id)
    }
}

/// Lot id left-padded with zeros to five characters, plus `.zip`
pub fn archive_name(lot_id: &str) -> String {
    format!("{:0>5}.zip", lot_id)
}

/// Check a lot identifier before it is used in storage paths
pub fn validate_lot_id(lot_id: &str) -> Result<()> {
    if lot_id.is_empty() {
        return Err(QualityError::validation("lot_id: this field is required"));
    }
    if lot_id.chars().count() > MAX_LOT_ID_LEN {
        return Err(QualityError::validation(format!(
            "lot_id: must be at most {} characters",
            MAX_LOT_ID_LEN
        )));
    }
    if !lot_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        || lot_id.starts_with('.')
    {
        return Err(QualityError::validation(
            "lot_id: only letters, digits, '-', '_' and '.' are allowed",
        ));
    }
    Ok(())
}

/// Listing filter
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchFilter {
    /// Restrict to one project
    pub project_id: Option<i32>,
    /// Substring match on the lot id
    pub search: Option<String>,
}

/// Batch as returned by list and detail endpoints
#[derive(Debug, Clone, Serialize)]
pub struct BatchView {
    #[serde(flatten)]
    pub batch: Batch,
    pub complete: bool,
    pub present_documents: Vec<DocumentKind>,
    pub missing_documents: Vec<DocumentKind>,
}

impl From<Batch> for BatchView {
    fn from(batch: Batch) -> Self {
        Self {
            complete: batch.is_complete(),
            present_documents: batch.documents.present(),
            missing_documents: batch.documents.missing(),
            batch,
        }
    }
}
