//! Batch upload and audit trail tests

#[cfg(test)]
mod tests {
    use crate::common::{TestDatabase, fixtures};
    use batch_quality::QualityError;
    use batch_quality::core::documents::DocumentKind;
    use batch_quality::core::models::{AuditAction, BatchFilter};
    use batch_quality::services::{BatchForm, BatchService, ProjectService};
    use chrono::NaiveDate;

    struct Setup {
        db: TestDatabase,
        batches: BatchService,
        project_id: i32,
    }

    async fn setup() -> Setup {
        let db = TestDatabase::new().await;
        let project = ProjectService::new(db.storage())
            .create(fixtures::project_input("Housings", 0))
            .await
            .unwrap();
        let batches = BatchService::new(db.storage(), 1024 * 1024);

        Setup {
            db,
            batches,
            project_id: project.project.id,
        }
    }

    fn march_14() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[tokio::test]
    async fn test_two_uploads_yield_two_upload_rows() {
        let s = setup().await;
        let editor = fixtures::editor(&s.db, "editor").await;
        let ctx = fixtures::context(&editor);

        let form = BatchForm {
            lot_id: Some("H-001".to_string()),
            date: Some(march_14()),
            part_count: Some(12),
            uploads: vec![
                fixtures::pdf(DocumentKind::SpectrometricAnalysis, "spectro.pdf"),
                fixtures::pdf(DocumentKind::HardnessTest, "hardness.pdf"),
            ],
            cleared: vec![],
        };
        let batch = s.batches.create(&ctx, s.project_id, form).await.unwrap();

        assert!(!batch.complete);
        assert_eq!(batch.present_documents.len(), 2);
        assert_eq!(batch.missing_documents.len(), 4);
        assert_eq!(batch.batch.uploaded_by, Some(editor.id));

        let stored = batch
            .batch
            .documents
            .get(DocumentKind::SpectrometricAnalysis)
            .unwrap();
        assert_eq!(stored, "lotes/2025/03/H-001_spectro.pdf");
        assert!(s.db.media_root().join(stored).exists());

        let audit = s.batches.audit(batch.batch.id).await.unwrap();
        assert_eq!(audit.len(), 2);
        assert!(audit.iter().all(|e| e.action == AuditAction::Upload));
        assert!(audit.iter().all(|e| e.user_id == Some(editor.id)));

        let mut fields: Vec<DocumentKind> = audit.iter().map(|e| e.field).collect();
        fields.sort();
        assert_eq!(
            fields,
            vec![DocumentKind::SpectrometricAnalysis, DocumentKind::HardnessTest]
        );
    }

    #[tokio::test]
    async fn test_very_long_filename_is_shortened_not_rejected() {
        let s = setup().await;
        let editor = fixtures::editor(&s.db, "editor").await;
        let ctx = fixtures::context(&editor);

        let long_name = format!("{}.pdf", "a".repeat(250));
        let form = BatchForm {
            lot_id: Some("H-LONG".to_string()),
            date: Some(march_14()),
            uploads: vec![fixtures::pdf(DocumentKind::HardnessTest, &long_name)],
            ..BatchForm::default()
        };
        let batch = s.batches.create(&ctx, s.project_id, form).await.unwrap();

        let stored = batch
            .batch
            .documents
            .get(DocumentKind::HardnessTest)
            .unwrap();
        assert!(stored.len() < 255);
        assert!(stored.starts_with("lotes/2025/03/H-LONG_aaa"));
        assert!(stored.ends_with(".pdf"));
        assert!(s.db.media_root().join(stored).exists());
    }

    #[tokio::test]
    async fn test_replacing_a_file_records_old_and_new_names() {
        let s = setup().await;
        let editor = fixtures::editor(&s.db, "editor").await;
        let ctx = fixtures::context(&editor);

        let batch = s
            .batches
            .create(
                &ctx,
                s.project_id,
                BatchForm {
                    lot_id: Some("H-002".to_string()),
                    date: Some(march_14()),
                    uploads: vec![fixtures::pdf(DocumentKind::TensionTest, "tension_v1.pdf")],
                    ..BatchForm::default()
                },
            )
            .await
            .unwrap();

        let update = BatchForm {
            uploads: vec![fixtures::pdf(DocumentKind::TensionTest, "tension_v2.pdf")],
            ..BatchForm::default()
        };
        s.batches
            .update(&ctx, batch.batch.id, update)
            .await
            .unwrap();

        let audit = s.batches.audit(batch.batch.id).await.unwrap();
        assert_eq!(audit.len(), 2);

        let replace = audit
            .iter()
            .find(|e| e.action == AuditAction::Replace)
            .expect("replace row");
        assert_eq!(replace.field, DocumentKind::TensionTest);
        assert!(replace.detail.contains("H-002_tension_v1.pdf"));
        assert!(replace.detail.contains("H-002_tension_v2.pdf"));
    }

    #[tokio::test]
    async fn test_attaching_last_missing_field_completes_batch() {
        let s = setup().await;
        let editor = fixtures::editor(&s.db, "editor").await;
        let ctx = fixtures::context(&editor);

        let batch = s
            .batches
            .create(
                &ctx,
                s.project_id,
                BatchForm {
                    lot_id: Some("H-003".to_string()),
                    uploads: vec![
                        fixtures::pdf(DocumentKind::SpectrometricAnalysis, "a.pdf"),
                        fixtures::pdf(DocumentKind::GeometricTolerance, "b.pdf"),
                        fixtures::pdf(DocumentKind::HardnessTest, "c.pdf"),
                        fixtures::pdf(DocumentKind::TensionTest, "d.pdf"),
                        fixtures::photo("e.png"),
                    ],
                    ..BatchForm::default()
                },
            )
            .await
            .unwrap();
        assert!(!batch.complete);
        assert_eq!(
            batch.missing_documents,
            vec![DocumentKind::OriginalDrawing]
        );

        let update = BatchForm {
            uploads: vec![fixtures::pdf(DocumentKind::OriginalDrawing, "f.pdf")],
            ..BatchForm::default()
        };
        let updated = s
            .batches
            .update(&ctx, batch.batch.id, update)
            .await
            .unwrap();
        assert!(updated.complete);
        assert!(updated.missing_documents.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_lot_id_is_conflict() {
        let s = setup().await;
        let editor = fixtures::editor(&s.db, "editor").await;
        let ctx = fixtures::context(&editor);

        let form = || BatchForm {
            lot_id: Some("DUP-1".to_string()),
            ..BatchForm::default()
        };
        s.batches.create(&ctx, s.project_id, form()).await.unwrap();

        let err = s
            .batches
            .create(&ctx, s.project_id, form())
            .await
            .unwrap_err();
        assert!(matches!(err, QualityError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_disallowed_extension_stores_nothing() {
        let s = setup().await;
        let editor = fixtures::editor(&s.db, "editor").await;
        let ctx = fixtures::context(&editor);

        let mut upload = fixtures::pdf(DocumentKind::OriginalDrawing, "drawing.exe");
        upload.content = b"MZ".to_vec();
        let form = BatchForm {
            lot_id: Some("BAD-1".to_string()),
            uploads: vec![upload],
            ..BatchForm::default()
        };

        let err = s
            .batches
            .create(&ctx, s.project_id, form)
            .await
            .unwrap_err();
        match err {
            QualityError::Validation(msg) => {
                assert!(msg.starts_with("Original Drawing"));
                assert!(msg.contains(".exe"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }

        assert!(!s.db.media_root().join("lotes").exists());
        assert!(
            s.db.db()
                .find_batch_by_lot_id("BAD-1")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_empty_upload_is_rejected() {
        let s = setup().await;
        let editor = fixtures::editor(&s.db, "editor").await;
        let ctx = fixtures::context(&editor);

        let mut upload = fixtures::pdf(DocumentKind::HardnessTest, "hardness.pdf");
        upload.content.clear();
        let form = BatchForm {
            lot_id: Some("EMPTY-1".to_string()),
            uploads: vec![upload],
            ..BatchForm::default()
        };

        assert!(matches!(
            s.batches.create(&ctx, s.project_id, form).await,
            Err(QualityError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_clearing_a_field_is_not_audited() {
        let s = setup().await;
        let editor = fixtures::editor(&s.db, "editor").await;
        let ctx = fixtures::context(&editor);

        let batch = s
            .batches
            .create(
                &ctx,
                s.project_id,
                BatchForm {
                    lot_id: Some("CLR-1".to_string()),
                    uploads: vec![fixtures::photo("photo.png")],
                    ..BatchForm::default()
                },
            )
            .await
            .unwrap();
        let stored = batch
            .batch
            .documents
            .get(DocumentKind::PhotographicEvidence)
            .unwrap()
            .to_string();

        let update = BatchForm {
            cleared: vec![DocumentKind::PhotographicEvidence],
            ..BatchForm::default()
        };
        let updated = s
            .batches
            .update(&ctx, batch.batch.id, update)
            .await
            .unwrap();

        assert!(updated.present_documents.is_empty());
        assert_eq!(s.batches.audit(batch.batch.id).await.unwrap().len(), 1);
        // The file stays on disk
        assert!(s.db.media_root().join(stored).exists());
    }

    #[tokio::test]
    async fn test_clear_and_upload_same_field_is_rejected() {
        let s = setup().await;
        let editor = fixtures::editor(&s.db, "editor").await;
        let ctx = fixtures::context(&editor);

        let batch = s
            .batches
            .create(
                &ctx,
                s.project_id,
                BatchForm {
                    lot_id: Some("CLR-2".to_string()),
                    ..BatchForm::default()
                },
            )
            .await
            .unwrap();

        let update = BatchForm {
            uploads: vec![fixtures::pdf(DocumentKind::HardnessTest, "h.pdf")],
            cleared: vec![DocumentKind::HardnessTest],
            ..BatchForm::default()
        };
        assert!(matches!(
            s.batches.update(&ctx, batch.batch.id, update).await,
            Err(QualityError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_same_filename_twice_gets_unique_path() {
        let s = setup().await;
        let editor = fixtures::editor(&s.db, "editor").await;
        let ctx = fixtures::context(&editor);

        let batch = s
            .batches
            .create(
                &ctx,
                s.project_id,
                BatchForm {
                    lot_id: Some("SAME-1".to_string()),
                    date: Some(march_14()),
                    uploads: vec![fixtures::pdf(DocumentKind::HardnessTest, "report.pdf")],
                    ..BatchForm::default()
                },
            )
            .await
            .unwrap();

        let update = BatchForm {
            uploads: vec![fixtures::pdf(DocumentKind::HardnessTest, "report.pdf")],
            ..BatchForm::default()
        };
        let updated = s
            .batches
            .update(&ctx, batch.batch.id, update)
            .await
            .unwrap();

        let first = batch.batch.documents.get(DocumentKind::HardnessTest).unwrap();
        let second = updated
            .batch
            .documents
            .get(DocumentKind::HardnessTest)
            .unwrap();
        assert_ne!(first, second);
        assert!(second.starts_with("lotes/2025/03/SAME-1_report_"));

        let audit = s.batches.audit(batch.batch.id).await.unwrap();
        assert_eq!(
            audit
                .iter()
                .filter(|e| e.action == AuditAction::Replace)
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn test_list_searches_lot_ids_within_project() {
        let s = setup().await;
        let editor = fixtures::editor(&s.db, "editor").await;
        let ctx = fixtures::context(&editor);

        for lot in ["AX-100", "AX-200", "BZ-300"] {
            s.batches
                .create(
                    &ctx,
                    s.project_id,
                    BatchForm {
                        lot_id: Some(lot.to_string()),
                        ..BatchForm::default()
                    },
                )
                .await
                .unwrap();
        }

        let found = s
            .batches
            .list(&BatchFilter {
                project_id: Some(s.project_id),
                search: Some("ax".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(found.len(), 2);

        let missing_project = s
            .batches
            .list(&BatchFilter {
                project_id: Some(9999),
                search: None,
            })
            .await;
        assert!(matches!(missing_project, Err(QualityError::NotFound(_))));
    }
}
