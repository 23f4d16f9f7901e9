use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::models::Project;

/// Project database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Project name
    pub name: String,

    /// Client name (optional)
    pub client: Option<String>,

    /// Target piece count
    pub target_pieces: i32,

    /// Whether the project is still running
    pub active: bool,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

/// Project entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Batches produced for this project
    #[sea_orm(has_many = "super::batch::Entity")]
    Batches,
}

impl Related<super::batch::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Batches.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert SeaORM model to domain project model
    pub fn to_domain_project(&self) -> Project {
        Project {
            id: self.id,
            name: self.name.clone(),
            client: self.client.clone(),
            target_pieces: self.target_pieces.max(0) as u32,
            active: self.active,
            created_at: self.created_at.naive_utc().and_utc(),
            updated_at: self.updated_at.naive_utc().and_utc(),
        }
    }
}
