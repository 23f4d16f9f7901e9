//! File audit log entries

use crate::core::documents::DocumentKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// What happened to a document field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditAction {
    /// First file stored in an empty field
    Upload,
    /// A different file replaced the stored one
    Replace,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Upload => "UPLOAD",
            AuditAction::Replace => "REPLACE",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UPLOAD" => Ok(AuditAction::Upload),
            "REPLACE" => Ok(AuditAction::Replace),
            _ => Err(format!("Unknown audit action: {}", s)),
        }
    }
}

/// Persisted audit row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: i32,
    pub batch_id: i32,
    pub field: DocumentKind,
    pub action: AuditAction,
    /// Acting user, cleared if the account is deleted
    pub user_id: Option<Uuid>,
    pub detail: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
