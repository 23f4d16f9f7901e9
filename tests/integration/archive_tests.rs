//! ZIP export tests

#[cfg(test)]
mod tests {
    use crate::common::{TestDatabase, fixtures};
    use batch_quality::QualityError;
    use batch_quality::core::documents::DocumentKind;
    use batch_quality::services::{BatchForm, BatchService, ProjectService};
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    async fn batch_with(
        db: &TestDatabase,
        lot_id: &str,
        uploads: Vec<batch_quality::services::UploadedFile>,
    ) -> (BatchService, i32) {
        let editor = fixtures::editor(db, "editor").await;
        let project = ProjectService::new(db.storage())
            .create(fixtures::project_input("Export", 0))
            .await
            .unwrap();
        let batches = BatchService::new(db.storage(), 1024 * 1024);

        let batch = batches
            .create(
                &fixtures::context(&editor),
                project.project.id,
                BatchForm {
                    lot_id: Some(lot_id.to_string()),
                    uploads,
                    ..BatchForm::default()
                },
            )
            .await
            .unwrap();

        (batches, batch.batch.id)
    }

    #[tokio::test]
    async fn test_batch_without_attachments_exports_empty_zip() {
        let db = TestDatabase::new().await;
        let (batches, batch_id) = batch_with(&db, "42", vec![]).await;

        let bundle = batches.archive(batch_id).await.unwrap();
        assert_eq!(bundle.file_name, "00042.zip");
        assert!(bundle.report.included.is_empty());
        assert_eq!(bundle.report.skipped.len(), 6);
        assert!(bundle.report.is_complete());

        let archive = ZipArchive::new(Cursor::new(bundle.bytes)).unwrap();
        assert_eq!(archive.len(), 0);
    }

    #[tokio::test]
    async fn test_export_contains_stored_files() {
        let db = TestDatabase::new().await;
        let (batches, batch_id) = batch_with(
            &db,
            "EXP-1",
            vec![
                fixtures::pdf(DocumentKind::HardnessTest, "hardness.pdf"),
                fixtures::photo("part.png"),
            ],
        )
        .await;

        let bundle = batches.archive(batch_id).await.unwrap();
        assert_eq!(bundle.file_name, "EXP-1.zip");
        assert_eq!(bundle.report.included.len(), 2);
        assert_eq!(bundle.report.skipped.len(), 4);

        let mut archive = ZipArchive::new(Cursor::new(bundle.bytes)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut content = String::new();
        archive
            .by_name("EXP-1_hardness.pdf")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "%PDF-1.4 hardness.pdf");
    }

    #[tokio::test]
    async fn test_missing_file_is_reported_and_others_still_exported() {
        let db = TestDatabase::new().await;
        let (batches, batch_id) = batch_with(
            &db,
            "EXP-2",
            vec![
                fixtures::pdf(DocumentKind::SpectrometricAnalysis, "spectro.pdf"),
                fixtures::pdf(DocumentKind::TensionTest, "tension.pdf"),
            ],
        )
        .await;

        let batch = db.db().find_batch(batch_id).await.unwrap().unwrap();
        let lost = batch
            .documents
            .get(DocumentKind::SpectrometricAnalysis)
            .unwrap()
            .to_string();
        std::fs::remove_file(db.media_root().join(&lost)).unwrap();

        let bundle = batches.archive(batch_id).await.unwrap();
        assert!(!bundle.report.is_complete());
        assert_eq!(bundle.report.failed.len(), 1);
        assert_eq!(
            bundle.report.failed[0].field,
            DocumentKind::SpectrometricAnalysis
        );
        assert_eq!(bundle.report.failed[0].path, lost);
        assert_eq!(bundle.report.included.len(), 1);
        assert_eq!(bundle.report.included[0].field, DocumentKind::TensionTest);

        let archive = ZipArchive::new(Cursor::new(bundle.bytes)).unwrap();
        assert_eq!(archive.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_batch_is_not_found() {
        let db = TestDatabase::new().await;
        let batches = BatchService::new(db.storage(), 1024);

        assert!(matches!(
            batches.archive(404).await,
            Err(QualityError::NotFound(_))
        ));
    }
}
