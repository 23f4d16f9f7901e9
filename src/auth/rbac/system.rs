//! RBAC system core functionality

use crate::core::models::Group;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

use super::types::{Permission, Role};

const READER_PERMISSIONS: [Permission; 4] = [
    Permission::ViewProject,
    Permission::ViewBatch,
    Permission::DownloadArchive,
    Permission::ViewAudit,
];

const EDITOR_PERMISSIONS: [Permission; 3] = [
    Permission::AddProject,
    Permission::AddBatch,
    Permission::ChangeBatch,
];

/// RBAC system for managing group roles and permissions
#[derive(Debug, Clone)]
pub struct RbacSystem {
    /// Role definitions per group
    pub(super) roles: HashMap<Group, Role>,
}

impl Default for RbacSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl RbacSystem {
    /// Create a new RBAC system with the built-in group roles
    pub fn new() -> Self {
        info!("Initializing RBAC system");

        let mut rbac = Self {
            roles: HashMap::new(),
        };
        rbac.initialize_default_roles();

        info!("RBAC system initialized successfully");
        rbac
    }

    fn initialize_default_roles(&mut self) {
        debug!("Initializing default roles");

        let readers: HashSet<Permission> = READER_PERMISSIONS.into_iter().collect();
        let mut editors = readers.clone();
        editors.extend(EDITOR_PERMISSIONS);

        self.roles.insert(
            Group::Readers,
            Role {
                name: Group::Readers.to_string(),
                description: "Read-only access to projects, batches and audit".to_string(),
                permissions: readers,
            },
        );
        self.roles.insert(
            Group::Editors,
            Role {
                name: Group::Editors.to_string(),
                description: "Reader access plus creating and changing records".to_string(),
                permissions: editors,
            },
        );
    }

    /// Role granted by a group
    pub fn role(&self, group: Group) -> Option<&Role> {
        self.roles.get(&group)
    }
}
