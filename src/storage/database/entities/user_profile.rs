use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::models::UserProfile;

/// User profile database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "user_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Owning user (one-to-one)
    #[sea_orm(unique)]
    pub user_id: Uuid,

    /// Job title (optional)
    pub job_title: Option<String>,

    /// Phone number (optional)
    pub phone: Option<String>,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn to_domain_profile(&self) -> UserProfile {
        UserProfile {
            user_id: self.user_id,
            job_title: self.job_title.clone(),
            phone: self.phone.clone(),
            created_at: self.created_at.naive_utc().and_utc(),
        }
    }
}
