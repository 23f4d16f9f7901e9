//! Account registration and approval workflow tests

#[cfg(test)]
mod tests {
    use crate::common::{TestDatabase, fixtures};
    use batch_quality::QualityError;
    use batch_quality::auth::{AuthSystem, LoginRequest, Permission, RegisterRequest};
    use batch_quality::core::approval::ApprovalAction;
    use batch_quality::core::models::{Group, UserStatus};

    fn auth(db: &TestDatabase) -> AuthSystem {
        AuthSystem::new(db.config().auth(), db.storage())
    }

    fn registration(username: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            password: fixtures::PASSWORD.to_string(),
            email: Some(format!("{}@plant.example", username)),
            first_name: "Ana".to_string(),
            last_name: "Ruiz".to_string(),
            job_title: Some("Quality inspector".to_string()),
            phone: Some("555-0100".to_string()),
        }
    }

    fn login(username: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: fixtures::PASSWORD.to_string(),
        }
    }

    #[tokio::test]
    async fn test_registered_account_is_pending_and_cannot_log_in() {
        let db = TestDatabase::new().await;
        let auth = auth(&db);

        let user = auth.register(registration("ana")).await.unwrap();
        assert!(!user.is_active);
        assert!(user.groups.is_empty());
        assert_eq!(user.status(), UserStatus::Pending);

        let profile = db.db().find_profile(user.id).await.unwrap().unwrap();
        assert_eq!(profile.job_title.as_deref(), Some("Quality inspector"));

        let err = auth.login(&login("ana")).await.unwrap_err();
        assert!(matches!(err, QualityError::Auth(msg) if msg.contains("pending")));
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let db = TestDatabase::new().await;
        let auth = auth(&db);

        auth.register(registration("ana")).await.unwrap();
        let err = auth.register(registration("ana")).await.unwrap_err();
        assert!(matches!(err, QualityError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_approve_reader_activates_into_readers_only() {
        let db = TestDatabase::new().await;
        let auth = auth(&db);
        let admin = fixtures::admin(&db).await;
        let ctx = fixtures::context(&admin);

        let pending = auth.register(registration("ana")).await.unwrap();
        assert_eq!(auth.list_pending_users(&ctx).await.unwrap().len(), 1);

        let approved = auth
            .apply_approval(&ctx, pending.id, ApprovalAction::ApproveReader)
            .await
            .unwrap()
            .expect("approved user");

        assert!(approved.is_active);
        assert!(!approved.is_staff);
        assert_eq!(approved.groups, vec![Group::Readers]);
        assert!(auth.list_pending_users(&ctx).await.unwrap().is_empty());

        let permissions = auth.rbac().get_user_permissions(&approved);
        assert!(permissions.contains(&Permission::ViewBatch));
        assert!(!permissions.contains(&Permission::ChangeBatch));

        let response = auth.login(&login("ana")).await.unwrap();
        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.user.id, pending.id);
    }

    #[tokio::test]
    async fn test_approve_editor_grants_change_permissions() {
        let db = TestDatabase::new().await;
        let auth = auth(&db);
        let admin = fixtures::admin(&db).await;
        let ctx = fixtures::context(&admin);
        let pending = fixtures::pending(&db, "luis").await;

        let approved = auth
            .apply_approval(&ctx, pending.id, ApprovalAction::ApproveEditor)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(approved.groups, vec![Group::Editors]);

        let editor_ctx = fixtures::context(&approved);
        assert!(auth.authorize(&editor_ctx, Permission::ChangeBatch).is_ok());
        assert!(auth.authorize(&editor_ctx, Permission::AddProject).is_ok());
        assert!(matches!(
            auth.authorize(&editor_ctx, Permission::ManageUsers),
            Err(QualityError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_approving_an_active_user_is_conflict() {
        let db = TestDatabase::new().await;
        let auth = auth(&db);
        let admin = fixtures::admin(&db).await;
        let reader = fixtures::reader(&db, "rita").await;

        let err = auth
            .apply_approval(
                &fixtures::context(&admin),
                reader.id,
                ApprovalAction::ApproveEditor,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, QualityError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_non_admin_cannot_manage_accounts() {
        let db = TestDatabase::new().await;
        let auth = auth(&db);
        let editor = fixtures::editor(&db, "eddie").await;
        let pending = fixtures::pending(&db, "pat").await;
        let ctx = fixtures::context(&editor);

        assert!(matches!(
            auth.list_pending_users(&ctx).await,
            Err(QualityError::Forbidden(_))
        ));
        assert!(matches!(
            auth.apply_approval(&ctx, pending.id, ApprovalAction::ApproveReader)
                .await,
            Err(QualityError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_staff_member_can_approve() {
        let db = TestDatabase::new().await;
        let auth = auth(&db);
        let staff = fixtures::staff(&db, "sam").await;
        let pending = fixtures::pending(&db, "pat").await;

        let approved = auth
            .apply_approval(
                &fixtures::context(&staff),
                pending.id,
                ApprovalAction::ApproveReader,
            )
            .await
            .unwrap();
        assert!(approved.is_some());
    }

    #[tokio::test]
    async fn test_delete_pending_removes_account() {
        let db = TestDatabase::new().await;
        let auth = auth(&db);
        let admin = fixtures::admin(&db).await;
        let ctx = fixtures::context(&admin);
        let pending = auth.register(registration("gone")).await.unwrap();

        let result = auth
            .apply_approval(&ctx, pending.id, ApprovalAction::DeletePending)
            .await
            .unwrap();
        assert!(result.is_none());
        assert!(db.db().find_user_by_id(pending.id).await.unwrap().is_none());
        assert!(db.db().find_profile(pending.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_active_refuses_self_and_superusers() {
        let db = TestDatabase::new().await;
        let auth = auth(&db);
        let admin = fixtures::admin(&db).await;
        let staff = fixtures::staff(&db, "sam").await;
        let reader = fixtures::reader(&db, "rita").await;

        let staff_ctx = fixtures::context(&staff);

        let own = auth
            .apply_approval(&staff_ctx, staff.id, ApprovalAction::DeleteActive)
            .await;
        assert!(matches!(own, Err(QualityError::Forbidden(_))));

        let superuser = auth
            .apply_approval(&staff_ctx, admin.id, ApprovalAction::DeleteActive)
            .await;
        assert!(matches!(superuser, Err(QualityError::Forbidden(_))));

        let deleted = auth
            .apply_approval(&staff_ctx, reader.id, ApprovalAction::DeleteActive)
            .await
            .unwrap();
        assert!(deleted.is_none());

        let active = auth.list_active_users(&staff_ctx).await.unwrap();
        let names: Vec<&str> = active.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["admin", "sam"]);
    }

    #[tokio::test]
    async fn test_unknown_target_is_not_found() {
        let db = TestDatabase::new().await;
        let auth = auth(&db);
        let admin = fixtures::admin(&db).await;

        let result = auth
            .apply_approval(
                &fixtures::context(&admin),
                uuid::Uuid::new_v4(),
                ApprovalAction::ApproveReader,
            )
            .await;
        assert!(matches!(result, Err(QualityError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_token_resolves_to_active_user_only() {
        let db = TestDatabase::new().await;
        let auth = auth(&db);
        let admin = fixtures::admin(&db).await;
        let reader = fixtures::reader(&db, "rita").await;

        let token = auth.login(&login("rita")).await.unwrap().access_token;
        let ctx = auth
            .authenticate_token(&token, Default::default())
            .await
            .unwrap();
        assert_eq!(ctx.actor_id(), Some(reader.id));

        auth.apply_approval(
            &fixtures::context(&admin),
            reader.id,
            ApprovalAction::DeleteActive,
        )
        .await
        .unwrap();

        let result = auth.authenticate_token(&token, Default::default()).await;
        assert!(matches!(result, Err(QualityError::Unauthorized(_))));

        let garbage = auth.authenticate_token("not-a-token", Default::default()).await;
        assert!(matches!(garbage, Err(QualityError::Unauthorized(_))));
    }
}
