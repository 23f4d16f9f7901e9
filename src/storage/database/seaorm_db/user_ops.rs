use crate::core::models::{Group, User, UserProfile};
use crate::core::models::user::NewUser;
use crate::utils::error::{QualityError, Result};
use sea_orm::*;
use std::collections::HashMap;
use tracing::{debug, warn};
use uuid::Uuid;

use super::super::entities::{self, audit_log_entry, batch, user, user_group, user_profile};
use sea_orm::sea_query::Expr;
use super::types::SeaOrmDatabase;

fn parse_groups(rows: &[user_group::Model]) -> Vec<Group> {
    rows.iter()
        .filter_map(|row| match row.group_name.parse::<Group>() {
            Ok(group) => Some(group),
            Err(e) => {
                warn!("Ignoring membership of user {}: {}", row.user_id, e);
                None
            }
        })
        .collect()
}

impl SeaOrmDatabase {
    async fn groups_of(&self, user_id: Uuid) -> Result<Vec<Group>> {
        let rows = entities::UserGroup::find()
            .filter(user_group::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(QualityError::Database)?;

        Ok(parse_groups(&rows))
    }

    async fn with_groups(&self, models: Vec<user::Model>) -> Result<Vec<User>> {
        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let rows = entities::UserGroup::find()
            .filter(user_group::Column::UserId.is_in(ids))
            .all(&self.db)
            .await
            .map_err(QualityError::Database)?;

        let mut by_user: HashMap<Uuid, Vec<user_group::Model>> = HashMap::new();
        for row in rows {
            by_user.entry(row.user_id).or_default().push(row);
        }

        Ok(models
            .iter()
            .map(|m| {
                let groups = by_user.get(&m.id).map(|rows| parse_groups(rows)).unwrap_or_default();
                m.to_domain_user(groups)
            })
            .collect())
    }

    /// Find user by ID
    pub async fn find_user_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
        debug!("Finding user by ID: {}", user_id);

        let user_model = entities::User::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(QualityError::Database)?;

        match user_model {
            Some(model) => {
                let groups = self.groups_of(model.id).await?;
                Ok(Some(model.to_domain_user(groups)))
            }
            None => Ok(None),
        }
    }

    /// Find user by username
    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        debug!("Finding user by username: {}", username);

        let user_model = entities::User::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(QualityError::Database)?;

        match user_model {
            Some(model) => {
                let groups = self.groups_of(model.id).await?;
                Ok(Some(model.to_domain_user(groups)))
            }
            None => Ok(None),
        }
    }

    /// Create a user together with its profile
    pub async fn create_user(&self, new_user: NewUser) -> Result<User> {
        debug!("Creating user: {}", new_user.username);

        let txn = self.db.begin().await.map_err(QualityError::Database)?;
        let now = chrono::Utc::now();
        let user_id = Uuid::new_v4();

        let model = user::ActiveModel {
            id: Set(user_id),
            username: Set(new_user.username.clone()),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            first_name: Set(new_user.first_name),
            last_name: Set(new_user.last_name),
            is_active: Set(new_user.is_active),
            is_staff: Set(new_user.is_staff),
            is_superuser: Set(new_user.is_superuser),
            date_joined: Set(now.into()),
            last_login: Set(None),
        }
        .insert(&txn)
        .await
        .map_err(|e| {
            let err = QualityError::Database(e);
            if err.is_unique_violation() {
                QualityError::Conflict(format!("Username {} is already taken", new_user.username))
            } else {
                err
            }
        })?;

        user_profile::ActiveModel {
            user_id: Set(user_id),
            job_title: Set(new_user.job_title),
            phone: Set(new_user.phone),
            created_at: Set(now.into()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(QualityError::Database)?;

        txn.commit().await.map_err(QualityError::Database)?;

        Ok(model.to_domain_user(vec![]))
    }

    /// Users waiting for approval, oldest registration first
    pub async fn list_pending_users(&self) -> Result<Vec<User>> {
        debug!("Listing pending users");

        let models = entities::User::find()
            .filter(user::Column::IsActive.eq(false))
            .order_by_asc(user::Column::DateJoined)
            .order_by_asc(user::Column::Username)
            .all(&self.db)
            .await
            .map_err(QualityError::Database)?;

        self.with_groups(models).await
    }

    /// Active users by username
    pub async fn list_active_users(&self) -> Result<Vec<User>> {
        debug!("Listing active users");

        let models = entities::User::find()
            .filter(user::Column::IsActive.eq(true))
            .order_by_asc(user::Column::Username)
            .all(&self.db)
            .await
            .map_err(QualityError::Database)?;

        self.with_groups(models).await
    }

    /// Activate a user, clear staff and make `group` its only group
    pub async fn set_user_group(&self, user_id: Uuid, group: Group) -> Result<User> {
        debug!("Placing user {} in group {}", user_id, group);

        let txn = self.db.begin().await.map_err(QualityError::Database)?;

        let mut active_model: user::ActiveModel = entities::User::find_by_id(user_id)
            .one(&txn)
            .await
            .map_err(QualityError::Database)?
            .ok_or_else(|| QualityError::NotFound(format!("User {} not found", user_id)))?
            .into();

        active_model.is_active = Set(true);
        active_model.is_staff = Set(false);
        let model = active_model
            .update(&txn)
            .await
            .map_err(QualityError::Database)?;

        entities::UserGroup::delete_many()
            .filter(user_group::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .map_err(QualityError::Database)?;

        user_group::ActiveModel {
            user_id: Set(user_id),
            group_name: Set(group.as_str().to_string()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(QualityError::Database)?;

        txn.commit().await.map_err(QualityError::Database)?;

        Ok(model.to_domain_user(vec![group]))
    }

    /// Delete a user with its memberships and profile
    ///
    /// Batches and audit rows survive with their user reference cleared.
    pub async fn delete_user(&self, user_id: Uuid) -> Result<()> {
        debug!("Deleting user: {}", user_id);

        let txn = self.db.begin().await.map_err(QualityError::Database)?;

        entities::Batch::update_many()
            .col_expr(batch::Column::UploadedBy, Expr::value(Option::<Uuid>::None))
            .filter(batch::Column::UploadedBy.eq(user_id))
            .exec(&txn)
            .await
            .map_err(QualityError::Database)?;

        entities::AuditLogEntry::update_many()
            .col_expr(audit_log_entry::Column::UserId, Expr::value(Option::<Uuid>::None))
            .filter(audit_log_entry::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .map_err(QualityError::Database)?;

        entities::UserGroup::delete_many()
            .filter(user_group::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .map_err(QualityError::Database)?;

        entities::UserProfile::delete_many()
            .filter(user_profile::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .map_err(QualityError::Database)?;

        let result = entities::User::delete_by_id(user_id)
            .exec(&txn)
            .await
            .map_err(QualityError::Database)?;

        if result.rows_affected == 0 {
            return Err(QualityError::NotFound(format!("User {} not found", user_id)));
        }

        txn.commit().await.map_err(QualityError::Database)?;
        Ok(())
    }

    /// Record a successful login
    pub async fn update_last_login(&self, user_id: Uuid) -> Result<()> {
        debug!("Updating last login for user: {}", user_id);

        let mut active_model: user::ActiveModel = entities::User::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(QualityError::Database)?
            .ok_or_else(|| QualityError::NotFound(format!("User {} not found", user_id)))?
            .into();

        active_model.last_login = Set(Some(chrono::Utc::now().into()));
        active_model
            .update(&self.db)
            .await
            .map_err(QualityError::Database)?;

        Ok(())
    }

    /// Profile of a user
    pub async fn find_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>> {
        debug!("Finding profile for user: {}", user_id);

        let model = entities::UserProfile::find()
            .filter(user_profile::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(QualityError::Database)?;

        Ok(model.map(|m| m.to_domain_profile()))
    }
}
