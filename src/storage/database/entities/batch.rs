use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::models::{Batch, DocumentSet};

/// Batch database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "batches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Owning project
    pub project_id: i32,

    /// Lot identifier (unique)
    #[sea_orm(unique)]
    pub lot_id: String,

    /// Production date
    pub batch_date: Date,

    /// Number of parts in the lot
    pub part_count: i32,

    // Stored paths relative to the media root
    pub spectrometric_analysis: Option<String>,
    pub geometric_tolerance: Option<String>,
    pub hardness_test: Option<String>,
    pub tension_test: Option<String>,
    pub photographic_evidence: Option<String>,
    pub original_drawing: Option<String>,

    /// Last user who saved the batch
    pub uploaded_by: Option<Uuid>,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

/// Batch entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id",
        on_delete = "Restrict"
    )]
    Project,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UploadedBy",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    Uploader,

    #[sea_orm(has_many = "super::audit_log_entry::Entity")]
    AuditLogEntries,
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::audit_log_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AuditLogEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Snapshot of the six attachment columns
    pub fn documents(&self) -> DocumentSet {
        DocumentSet {
            spectrometric_analysis: self.spectrometric_analysis.clone(),
            geometric_tolerance: self.geometric_tolerance.clone(),
            hardness_test: self.hardness_test.clone(),
            tension_test: self.tension_test.clone(),
            photographic_evidence: self.photographic_evidence.clone(),
            original_drawing: self.original_drawing.clone(),
        }
    }

    /// Convert SeaORM model to domain batch model
    pub fn to_domain_batch(&self) -> Batch {
        Batch {
            id: self.id,
            project_id: self.project_id,
            lot_id: self.lot_id.clone(),
            date: self.batch_date,
            part_count: self.part_count.max(0) as u32,
            documents: self.documents(),
            uploaded_by: self.uploaded_by,
            created_at: self.created_at.naive_utc().and_utc(),
            updated_at: self.updated_at.naive_utc().and_utc(),
        }
    }
}
