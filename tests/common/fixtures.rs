//! Test fixtures and data factories
//!
//! All factories create real rows through the storage layer, not mocks.

use super::TestDatabase;
use batch_quality::core::documents::DocumentKind;
use batch_quality::core::models::project::ProjectInput;
use batch_quality::core::models::user::NewUser;
use batch_quality::core::models::{Group, RequestContext, User};
use batch_quality::services::UploadedFile;
use batch_quality::utils::auth::hash_password;

/// Password given to every fixture account
pub const PASSWORD: &str = "Quality-Pass-2025";

/// Account flags for [`create_user`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Flags {
    pub active: bool,
    pub staff: bool,
    pub superuser: bool,
}

pub async fn create_user(db: &TestDatabase, username: &str, flags: Flags) -> User {
    db.db()
        .create_user(NewUser {
            username: username.to_string(),
            email: Some(format!("{}@plant.example", username)),
            password_hash: hash_password(PASSWORD).expect("hash password"),
            first_name: "Test".to_string(),
            last_name: username.to_string(),
            is_active: flags.active,
            is_staff: flags.staff,
            is_superuser: flags.superuser,
            job_title: Some("Inspector".to_string()),
            phone: None,
        })
        .await
        .expect("create user")
}

/// Active superuser
pub async fn admin(db: &TestDatabase) -> User {
    create_user(
        db,
        "admin",
        Flags {
            active: true,
            staff: true,
            superuser: true,
        },
    )
    .await
}

/// Active staff member without superuser rights
pub async fn staff(db: &TestDatabase, username: &str) -> User {
    create_user(
        db,
        username,
        Flags {
            active: true,
            staff: true,
            superuser: false,
        },
    )
    .await
}

/// Self-registered account awaiting approval
pub async fn pending(db: &TestDatabase, username: &str) -> User {
    create_user(db, username, Flags::default()).await
}

/// Approved member of `group`
pub async fn member(db: &TestDatabase, username: &str, group: Group) -> User {
    let user = pending(db, username).await;
    db.db()
        .set_user_group(user.id, group)
        .await
        .expect("set user group")
}

pub async fn editor(db: &TestDatabase, username: &str) -> User {
    member(db, username, Group::Editors).await
}

pub async fn reader(db: &TestDatabase, username: &str) -> User {
    member(db, username, Group::Readers).await
}

/// Request context acting as `user`
pub fn context(user: &User) -> RequestContext {
    RequestContext::new().with_user(user.clone())
}

pub fn project_input(name: &str, target_pieces: i64) -> ProjectInput {
    ProjectInput {
        name: name.to_string(),
        client: Some("Acme Castings".to_string()),
        target_pieces,
        active: true,
    }
}

/// A small PDF upload for `field`
pub fn pdf(field: DocumentKind, filename: &str) -> UploadedFile {
    UploadedFile {
        field,
        filename: filename.to_string(),
        content: format!("%PDF-1.4 {}", filename).into_bytes(),
    }
}

/// A photo upload for the photographic evidence field
pub fn photo(filename: &str) -> UploadedFile {
    UploadedFile {
        field: DocumentKind::PhotographicEvidence,
        filename: filename.to_string(),
        content: vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a],
    }
}
