//! User accounts, groups and profiles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Permission group a user can be approved into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    /// Read-only access
    Readers,
    /// Read and write access to projects and batches
    Editors,
}

impl Group {
    pub const ALL: [Group; 2] = [Group::Readers, Group::Editors];

    pub fn as_str(&self) -> &'static str {
        match self {
            Group::Readers => "readers",
            Group::Editors => "editors",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Group {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "readers" => Ok(Group::Readers),
            "editors" => Ok(Group::Editors),
            _ => Err(format!("Unknown group: {}", s)),
        }
    }
}

/// Where an account sits in the approval workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    /// Registered, waiting for an administrator
    Pending,
    /// Active in the readers group
    Reader,
    /// Active in the editors group
    Editor,
    /// Active without a workflow group (administrators)
    Active,
}

/// User account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    /// Group memberships, sorted
    pub groups: Vec<Group>,
    pub date_joined: chrono::DateTime<chrono::Utc>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
}

impl User {
    /// Staff and superusers may manage other accounts
    pub fn is_admin(&self) -> bool {
        self.is_staff || self.is_superuser
    }

    pub fn in_group(&self, group: Group) -> bool {
        self.groups.contains(&group)
    }

    /// Derived approval state
    pub fn status(&self) -> UserStatus {
        if !self.is_active {
            UserStatus::Pending
        } else if self.in_group(Group::Editors) {
            UserStatus::Editor
        } else if self.in_group(Group::Readers) {
            UserStatus::Reader
        } else {
            UserStatus::Active
        }
    }
}

/// Fields for a new account
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub job_title: Option<String>,
    pub phone: Option<String>,
}

/// Profile attached one-to-one to every account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: Uuid,
    pub job_title: Option<String>,
    pub phone: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
pub(crate) fn sample_user(username: &str) -> User {
    User {
        id: Uuid::new_v4(),
        username: username.to_string(),
        email: None,
        password_hash: String::new(),
        first_name: String::new(),
        last_name: String::new(),
        is_active: false,
        is_staff: false,
        is_superuser: false,
        groups: vec![],
        date_joined: chrono::Utc::now(),
        last_login: None,
    }
}
