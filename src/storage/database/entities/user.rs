use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::models::{Group, User};

/// User database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// User ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Username (unique)
    #[sea_orm(unique)]
    pub username: String,

    /// Email address (optional)
    pub email: Option<String>,

    /// Argon2 password hash
    pub password_hash: String,

    pub first_name: String,

    pub last_name: String,

    /// Approved and allowed to log in
    pub is_active: bool,

    /// May manage other accounts
    pub is_staff: bool,

    /// Holds every permission
    pub is_superuser: bool,

    /// Registration timestamp
    pub date_joined: DateTimeWithTimeZone,

    /// Last login timestamp
    pub last_login: Option<DateTimeWithTimeZone>,
}

/// User entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Group memberships
    #[sea_orm(has_many = "super::user_group::Entity")]
    UserGroups,

    /// One-to-one profile
    #[sea_orm(has_one = "super::user_profile::Entity")]
    UserProfile,
}

impl Related<super::user_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserGroups.def()
    }
}

impl Related<super::user_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserProfile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert SeaORM model to domain user model
    pub fn to_domain_user(&self, mut groups: Vec<Group>) -> User {
        groups.sort();
        groups.dedup();

        User {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            password_hash: self.password_hash.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            is_active: self.is_active,
            is_staff: self.is_staff,
            is_superuser: self.is_superuser,
            groups,
            date_joined: self.date_joined.naive_utc().and_utc(),
            last_login: self.last_login.map(|dt| dt.naive_utc().and_utc()),
        }
    }
}
