//! Projects and their progress summary

use crate::core::progress::Progress;
use serde::{Deserialize, Serialize};

/// A client engagement with a target piece count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i32,
    pub name: String,
    pub client: Option<String>,
    pub target_pieces: u32,
    pub active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Fields accepted when creating or editing a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInput {
    pub name: String,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub target_pieces: i64,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Listing filter
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFilter {
    /// Only active or only inactive projects
    pub active: Option<bool>,
    /// Case-insensitive match on name or client
    pub search: Option<String>,
}

/// Project together with its derived progress
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    #[serde(flatten)]
    pub project: Project,
    pub progress: Progress,
}

impl ProjectSummary {
    pub fn new(project: Project, produced: u64) -> Self {
        let progress = Progress::compute(project.target_pieces as u64, produced);
        Self { project, progress }
    }
}
