//! User approval state machine
//!
//! Pending accounts are inactive with no group. An administrator either
//! approves them into exactly one group or deletes them. Active accounts can
//! be deleted too, except superusers and the acting administrator.

use crate::core::models::{Group, User};
use crate::utils::error::{QualityError, Result};
use serde::{Deserialize, Serialize};

/// Administrative action on an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalAction {
    ApproveReader,
    ApproveEditor,
    DeletePending,
    DeleteActive,
}

/// What storage has to apply for an allowed action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalOutcome {
    /// Activate, clear staff and set the group set to exactly this group
    Grant(Group),
    Delete,
}

/// Decide whether `actor` may apply `action` to `target`
pub fn plan(actor: &User, target: &User, action: ApprovalAction) -> Result<ApprovalOutcome> {
    if !actor.is_admin() {
        return Err(QualityError::forbidden(
            "Only administrators can manage user accounts",
        ));
    }

    match action {
        ApprovalAction::ApproveReader | ApprovalAction::ApproveEditor => {
            ensure_pending(target)?;
            let group = if action == ApprovalAction::ApproveReader {
                Group::Readers
            } else {
                Group::Editors
            };
            Ok(ApprovalOutcome::Grant(group))
        }
        ApprovalAction::DeletePending => {
            ensure_pending(target)?;
            Ok(ApprovalOutcome::Delete)
        }
        ApprovalAction::DeleteActive => {
            if !target.is_active {
                return Err(QualityError::conflict(format!(
                    "User {} is not active",
                    target.username
                )));
            }
            if target.id == actor.id {
                return Err(QualityError::forbidden("You cannot delete your own account"));
            }
            if target.is_superuser {
                return Err(QualityError::forbidden("Superusers cannot be deleted"));
            }
            Ok(ApprovalOutcome::Delete)
        }
    }
}

fn ensure_pending(target: &User) -> Result<()> {
    if target.is_active {
        return Err(QualityError::conflict(format!(
            "User {} is not pending approval",
            target.username
        )));
    }
    Ok(())
}
