use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::models::AuditEntry;
use crate::utils::error::QualityError;

/// Audit log database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "audit_log_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Audited batch
    pub batch_id: i32,

    /// Document field name
    pub field: String,

    /// `UPLOAD` or `REPLACE`
    pub action: String,

    /// Acting user, null once the account is deleted
    pub user_id: Option<Uuid>,

    /// Free-text detail
    #[sea_orm(column_type = "Text")]
    pub detail: String,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::batch::Entity",
        from = "Column::BatchId",
        to = "super::batch::Column::Id",
        on_delete = "Cascade"
    )]
    Batch,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    User,
}

impl Related<super::batch::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Batch.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert SeaORM model to domain audit entry
    pub fn to_domain_entry(&self) -> crate::utils::error::Result<AuditEntry> {
        Ok(AuditEntry {
            id: self.id,
            batch_id: self.batch_id,
            field: self.field.parse().map_err(QualityError::Internal)?,
            action: self.action.parse().map_err(QualityError::Internal)?,
            user_id: self.user_id,
            detail: self.detail.clone(),
            created_at: self.created_at.naive_utc().and_utc(),
        })
    }
}
