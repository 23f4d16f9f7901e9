//! Permission checking methods

use crate::core::models::User;
use crate::utils::error::{QualityError, Result};
use std::collections::HashSet;

use super::system::RbacSystem;
use super::types::Permission;

impl RbacSystem {
    /// Get all permissions for a user
    pub fn get_user_permissions(&self, user: &User) -> HashSet<Permission> {
        if !user.is_active {
            return HashSet::new();
        }
        if user.is_superuser {
            return Permission::ALL.into_iter().collect();
        }

        let mut permissions: HashSet<Permission> = user
            .groups
            .iter()
            .filter_map(|group| self.roles.get(group))
            .flat_map(|role| role.permissions.iter().copied())
            .collect();

        if user.is_staff {
            permissions.insert(Permission::ManageUsers);
        }

        permissions
    }

    /// Check if user has a specific permission
    pub fn has_permission(&self, user: &User, permission: Permission) -> bool {
        self.get_user_permissions(user).contains(&permission)
    }

    /// Fail with `Forbidden` unless the user holds the permission
    pub fn require(&self, user: &User, permission: Permission) -> Result<()> {
        if self.has_permission(user, permission) {
            Ok(())
        } else {
            Err(QualityError::forbidden(format!(
                "Permission denied: {} is required",
                permission
            )))
        }
    }
}
