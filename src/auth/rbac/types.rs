//! RBAC type definitions

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A single grantable capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewProject,
    AddProject,
    ViewBatch,
    AddBatch,
    ChangeBatch,
    ViewAudit,
    DownloadArchive,
    ManageUsers,
}

impl Permission {
    pub const ALL: [Permission; 8] = [
        Permission::ViewProject,
        Permission::AddProject,
        Permission::ViewBatch,
        Permission::AddBatch,
        Permission::ChangeBatch,
        Permission::ViewAudit,
        Permission::DownloadArchive,
        Permission::ManageUsers,
    ];

    /// Permission codename
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewProject => "view_project",
            Permission::AddProject => "add_project",
            Permission::ViewBatch => "view_batch",
            Permission::AddBatch => "add_batch",
            Permission::ChangeBatch => "change_batch",
            Permission::ViewAudit => "view_audit",
            Permission::DownloadArchive => "download_archive",
            Permission::ManageUsers => "manage_users",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role definition
#[derive(Debug, Clone)]
pub struct Role {
    /// Role name
    pub name: String,
    /// Role description
    pub description: String,
    /// Permissions granted by this role
    pub permissions: HashSet<Permission>,
}
