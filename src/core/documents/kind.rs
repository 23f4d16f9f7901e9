//! Document field definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the six compliance documents attached to a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    SpectrometricAnalysis,
    GeometricTolerance,
    HardnessTest,
    TensionTest,
    PhotographicEvidence,
    OriginalDrawing,
}

const PDF: &str = "application/pdf";
const XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const XLS: &str = "application/vnd.ms-excel";
const CSV: &str = "text/csv";
const PNG: &str = "image/png";
const JPEG: &str = "image/jpeg";
const DXF: &str = "image/vnd.dxf";
const X_DXF: &str = "application/x-dxf";
const DWG: &str = "image/vnd.dwg";
const ACAD: &str = "application/acad";

impl DocumentKind {
    /// Every document field, in form order
    pub const ALL: [DocumentKind; 6] = [
        DocumentKind::SpectrometricAnalysis,
        DocumentKind::GeometricTolerance,
        DocumentKind::HardnessTest,
        DocumentKind::TensionTest,
        DocumentKind::PhotographicEvidence,
        DocumentKind::OriginalDrawing,
    ];

    /// Field name used in forms, columns and audit rows
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::SpectrometricAnalysis => "spectrometric_analysis",
            DocumentKind::GeometricTolerance => "geometric_tolerance",
            DocumentKind::HardnessTest => "hardness_test",
            DocumentKind::TensionTest => "tension_test",
            DocumentKind::PhotographicEvidence => "photographic_evidence",
            DocumentKind::OriginalDrawing => "original_drawing",
        }
    }

    /// Human readable title used in validation messages
    pub fn title(&self) -> &'static str {
        match self {
            DocumentKind::SpectrometricAnalysis => "Spectrometric Analysis",
            DocumentKind::GeometricTolerance => "Geometric Tolerance",
            DocumentKind::HardnessTest => "Hardness Test",
            DocumentKind::TensionTest => "Tension Test",
            DocumentKind::PhotographicEvidence => "Photographic Evidence",
            DocumentKind::OriginalDrawing => "Original Drawing",
        }
    }

    /// Accepted extensions, lowercase with leading dot
    pub fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            DocumentKind::SpectrometricAnalysis => &[".pdf", ".xlsx", ".xls", ".csv", ".png"],
            DocumentKind::GeometricTolerance | DocumentKind::OriginalDrawing => {
                &[".pdf", ".dxf", ".dwg", ".png"]
            }
            DocumentKind::HardnessTest | DocumentKind::TensionTest => {
                &[".pdf", ".xlsx", ".xls", ".csv", ".jpg", ".jpeg", ".png"]
            }
            DocumentKind::PhotographicEvidence => &[".jpg", ".jpeg", ".png", ".pdf"],
        }
    }

    /// Accepted MIME types, as guessed from the filename
    pub fn allowed_mime_types(&self) -> &'static [&'static str] {
        match self {
            DocumentKind::SpectrometricAnalysis => &[PDF, XLSX, XLS, CSV, PNG],
            DocumentKind::GeometricTolerance | DocumentKind::OriginalDrawing => {
                &[PDF, DXF, X_DXF, DWG, ACAD, PNG]
            }
            DocumentKind::HardnessTest | DocumentKind::TensionTest => {
                &[PDF, XLSX, XLS, CSV, JPEG, PNG]
            }
            DocumentKind::PhotographicEvidence => &[JPEG, PNG, PDF],
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown document field: {}", s))
    }
}
