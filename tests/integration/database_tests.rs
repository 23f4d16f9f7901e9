//! Database integration tests
//!
//! Tests storage operations using a real in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::common::{TestDatabase, fixtures};
    use batch_quality::QualityError;
    use batch_quality::config::DatabaseConfig;
    use batch_quality::core::documents::DocumentKind;
    use batch_quality::core::models::{AuditAction, DocumentSet, Group};
    use batch_quality::storage::database::{BatchRecord, Database, ProjectRecord};
    use chrono::NaiveDate;

    fn project_record(name: &str) -> ProjectRecord {
        ProjectRecord {
            name: name.to_string(),
            client: None,
            target_pieces: 0,
            active: true,
        }
    }

    fn batch_record(project_id: i32, lot_id: &str, documents: DocumentSet) -> BatchRecord {
        BatchRecord {
            project_id,
            lot_id: lot_id.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            part_count: 5,
            documents,
        }
    }

    /// Test basic database connection, migration and health check
    #[tokio::test]
    async fn test_database_health_check() {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            connection_timeout: 5,
        };

        let db = Database::new(&config).await;
        assert!(db.is_ok(), "Failed to create database: {:?}", db.err());
        let db = db.unwrap();

        let migrate_result = db.migrate().await;
        assert!(
            migrate_result.is_ok(),
            "Migration failed: {:?}",
            migrate_result.err()
        );

        // Migrations are idempotent
        assert!(db.migrate().await.is_ok());

        let health = db.health_check().await;
        assert!(health.is_ok(), "Health check failed: {:?}", health.err());
    }

    #[tokio::test]
    async fn test_storage_layer_health() {
        let db = TestDatabase::new().await;
        let status = db.storage().health_check().await;
        assert!(status.database);
        assert!(status.files);
        assert!(status.overall);
    }

    #[tokio::test]
    async fn test_user_roundtrip_with_groups() {
        let db = TestDatabase::new().await;
        let pending = fixtures::pending(&db, "pending_user").await;

        let found = db.db().find_user_by_username("pending_user").await.unwrap();
        let found = found.expect("user should exist");
        assert_eq!(found.id, pending.id);
        assert!(!found.is_active);
        assert!(found.groups.is_empty());

        let updated = db
            .db()
            .set_user_group(pending.id, Group::Editors)
            .await
            .unwrap();
        assert!(updated.is_active);
        assert_eq!(updated.groups, vec![Group::Editors]);

        // Switching group replaces membership
        let switched = db
            .db()
            .set_user_group(pending.id, Group::Readers)
            .await
            .unwrap();
        assert_eq!(switched.groups, vec![Group::Readers]);

        db.db().update_last_login(pending.id).await.unwrap();
        let reloaded = db.db().find_user_by_id(pending.id).await.unwrap().unwrap();
        assert!(reloaded.last_login.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let db = TestDatabase::new().await;
        fixtures::pending(&db, "twin").await;

        let err = db
            .db()
            .create_user(batch_quality::core::models::user::NewUser {
                username: "twin".to_string(),
                email: None,
                password_hash: "x".to_string(),
                first_name: String::new(),
                last_name: String::new(),
                is_active: false,
                is_staff: false,
                is_superuser: false,
                job_title: None,
                phone: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, QualityError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_batch_insert_writes_audit_rows_in_same_call() {
        let db = TestDatabase::new().await;
        let editor = fixtures::editor(&db, "editor").await;
        let project = db.db().create_project(project_record("Rings")).await.unwrap();

        let mut documents = DocumentSet::default();
        documents.set(
            DocumentKind::GeometricTolerance,
            Some("lotes/2025/01/R-1_geo.pdf".to_string()),
        );

        let batch = db
            .db()
            .create_batch(batch_record(project.id, "R-1", documents), Some(editor.id))
            .await
            .unwrap();
        assert_eq!(batch.uploaded_by, Some(editor.id));

        let audit = db.db().list_audit_entries(batch.id).await.unwrap();
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].action, AuditAction::Upload);
        assert_eq!(audit[0].field, DocumentKind::GeometricTolerance);
        assert_eq!(audit[0].detail, "uploaded R-1_geo.pdf");
    }

    #[tokio::test]
    async fn test_duplicate_lot_rolls_back() {
        let db = TestDatabase::new().await;
        let project = db.db().create_project(project_record("Rings")).await.unwrap();

        db.db()
            .create_batch(
                batch_record(project.id, "R-1", DocumentSet::default()),
                None,
            )
            .await
            .unwrap();

        let mut documents = DocumentSet::default();
        documents.set(
            DocumentKind::HardnessTest,
            Some("lotes/2025/01/R-1_h.pdf".to_string()),
        );
        let err = db
            .db()
            .create_batch(batch_record(project.id, "R-1", documents), None)
            .await
            .unwrap_err();
        assert!(matches!(err, QualityError::Conflict(_)));

        let batches = db.db().list_batches(&Default::default()).await.unwrap();
        assert_eq!(batches.len(), 1);
        assert!(
            db.db()
                .list_audit_entries(batches[0].id)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_batch_writes_enforce_project_target() {
        let db = TestDatabase::new().await;
        let record = ProjectRecord {
            target_pieces: 8,
            ..project_record("Bolts")
        };
        let project = db.db().create_project(record).await.unwrap();

        let first = db
            .db()
            .create_batch(batch_record(project.id, "B-1", DocumentSet::default()), None)
            .await
            .unwrap();

        let result = db
            .db()
            .create_batch(batch_record(project.id, "B-2", DocumentSet::default()), None)
            .await;
        assert!(matches!(result, Err(QualityError::Validation(_))));
        assert!(db.db().find_batch_by_lot_id("B-2").await.unwrap().is_none());

        // The batch's own count is excluded on update
        let mut grown = batch_record(project.id, "B-1", DocumentSet::default());
        grown.part_count = 8;
        db.db().update_batch(first.id, grown, None).await.unwrap();

        let mut overrun = batch_record(project.id, "B-1", DocumentSet::default());
        overrun.part_count = 9;
        let result = db.db().update_batch(first.id, overrun, None).await;
        assert!(matches!(result, Err(QualityError::Validation(_))));
        assert_eq!(db.db().produced_pieces(project.id, None).await.unwrap(), 8);
    }

    #[tokio::test]
    async fn test_produced_pieces_excludes_batch() {
        let db = TestDatabase::new().await;
        let project = db.db().create_project(project_record("Pins")).await.unwrap();

        let first = db
            .db()
            .create_batch(batch_record(project.id, "P-1", DocumentSet::default()), None)
            .await
            .unwrap();
        db.db()
            .create_batch(batch_record(project.id, "P-2", DocumentSet::default()), None)
            .await
            .unwrap();

        assert_eq!(db.db().produced_pieces(project.id, None).await.unwrap(), 10);
        assert_eq!(
            db.db()
                .produced_pieces(project.id, Some(first.id))
                .await
                .unwrap(),
            5
        );

        let totals = db.db().produced_by_project().await.unwrap();
        assert_eq!(totals.get(&project.id), Some(&10));
    }

    #[tokio::test]
    async fn test_deleting_user_keeps_audit_rows() {
        let db = TestDatabase::new().await;
        let editor = fixtures::editor(&db, "leaver").await;
        let project = db.db().create_project(project_record("Caps")).await.unwrap();

        let mut documents = DocumentSet::default();
        documents.set(
            DocumentKind::TensionTest,
            Some("lotes/2025/01/C-1_t.pdf".to_string()),
        );
        let batch = db
            .db()
            .create_batch(batch_record(project.id, "C-1", documents), Some(editor.id))
            .await
            .unwrap();

        db.db().delete_user(editor.id).await.unwrap();

        let audit = db.db().list_audit_entries(batch.id).await.unwrap();
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].user_id, None);

        let batch = db.db().find_batch(batch.id).await.unwrap().unwrap();
        assert_eq!(batch.uploaded_by, None);
    }
}
