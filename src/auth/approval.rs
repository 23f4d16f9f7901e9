//! Account approval actions

use crate::core::approval::{ApprovalAction, ApprovalOutcome, plan};
use crate::core::models::{RequestContext, User};
use crate::utils::error::{QualityError, Result};
use tracing::info;
use uuid::Uuid;

use super::AuthSystem;

impl AuthSystem {
    /// Accounts waiting for approval
    pub async fn list_pending_users(&self, context: &RequestContext) -> Result<Vec<User>> {
        self.require_admin(context)?;
        self.storage.db().list_pending_users().await
    }

    /// Approved accounts
    pub async fn list_active_users(&self, context: &RequestContext) -> Result<Vec<User>> {
        self.require_admin(context)?;
        self.storage.db().list_active_users().await
    }

    /// Apply an approval action on behalf of the acting administrator
    ///
    /// Returns the updated account for approvals and `None` for deletions.
    pub async fn apply_approval(
        &self,
        context: &RequestContext,
        target_id: Uuid,
        action: ApprovalAction,
    ) -> Result<Option<User>> {
        let actor = self.require_admin(context)?;

        let target = self
            .storage
            .db()
            .find_user_by_id(target_id)
            .await?
            .ok_or_else(|| QualityError::not_found(format!("User {} not found", target_id)))?;

        match plan(actor, &target, action)? {
            ApprovalOutcome::Grant(group) => {
                let user = self.storage.db().set_user_group(target.id, group).await?;
                info!(
                    "{} approved {} into {}",
                    actor.username, user.username, group
                );
                Ok(Some(user))
            }
            ApprovalOutcome::Delete => {
                self.storage.db().delete_user(target.id).await?;
                info!("{} deleted account {}", actor.username, target.username);
                Ok(None)
            }
        }
    }
}
