//! Project progress and capacity tests
//!
//! Progress is derived from the part counts of a project's batches, and a
//! non-zero target caps how many pieces batches can add up to.

#[cfg(test)]
mod tests {
    use crate::common::{TestDatabase, fixtures};
    use batch_quality::QualityError;
    use batch_quality::core::models::ProjectFilter;
    use batch_quality::services::{BatchForm, BatchService, ProjectService};

    fn services(db: &TestDatabase) -> (ProjectService, BatchService) {
        (
            ProjectService::new(db.storage()),
            BatchService::new(db.storage(), 1024 * 1024),
        )
    }

    fn form(lot_id: &str, part_count: i64) -> BatchForm {
        BatchForm {
            lot_id: Some(lot_id.to_string()),
            part_count: Some(part_count),
            ..BatchForm::default()
        }
    }

    #[tokio::test]
    async fn test_progress_sums_batch_part_counts() {
        let db = TestDatabase::new().await;
        let (projects, batches) = services(&db);
        let editor = fixtures::editor(&db, "editor").await;
        let ctx = fixtures::context(&editor);

        let project = projects
            .create(fixtures::project_input("Flanges", 200))
            .await
            .unwrap();
        assert_eq!(project.progress.percent, 0.0);

        let id = project.project.id;
        batches.create(&ctx, id, form("L-001", 50)).await.unwrap();
        batches.create(&ctx, id, form("L-002", 30)).await.unwrap();

        let summary = projects.get(id).await.unwrap();
        assert_eq!(summary.progress.produced, 80);
        assert_eq!(summary.progress.percent, 40.0);
        assert_eq!(summary.progress.remaining, 120);
    }

    #[tokio::test]
    async fn test_progress_rounds_to_two_decimals() {
        let db = TestDatabase::new().await;
        let (projects, batches) = services(&db);
        let editor = fixtures::editor(&db, "editor").await;
        let ctx = fixtures::context(&editor);

        let project = projects
            .create(fixtures::project_input("Valves", 3))
            .await
            .unwrap();
        batches
            .create(&ctx, project.project.id, form("V-1", 1))
            .await
            .unwrap();

        let summary = projects.get(project.project.id).await.unwrap();
        assert_eq!(summary.progress.percent, 33.33);
    }

    #[tokio::test]
    async fn test_zero_target_has_zero_progress_and_no_cap() {
        let db = TestDatabase::new().await;
        let (projects, batches) = services(&db);
        let editor = fixtures::editor(&db, "editor").await;
        let ctx = fixtures::context(&editor);

        let project = projects
            .create(fixtures::project_input("Open order", 0))
            .await
            .unwrap();
        batches
            .create(&ctx, project.project.id, form("OPEN-1", 10_000))
            .await
            .unwrap();

        let summary = projects.get(project.project.id).await.unwrap();
        assert_eq!(summary.progress.percent, 0.0);
        assert_eq!(summary.progress.produced, 10_000);
    }

    #[tokio::test]
    async fn test_batch_over_target_is_rejected() {
        let db = TestDatabase::new().await;
        let (projects, batches) = services(&db);
        let editor = fixtures::editor(&db, "editor").await;
        let ctx = fixtures::context(&editor);

        let project = projects
            .create(fixtures::project_input("Shafts", 100))
            .await
            .unwrap();
        let id = project.project.id;
        batches.create(&ctx, id, form("S-1", 80)).await.unwrap();

        let err = batches.create(&ctx, id, form("S-2", 30)).await.unwrap_err();
        match err {
            QualityError::Validation(msg) => {
                assert!(msg.starts_with("part_count"));
                assert!(msg.contains("20 remaining"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }

        // Exactly filling the target is fine
        batches.create(&ctx, id, form("S-2", 20)).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_excludes_own_part_count() {
        let db = TestDatabase::new().await;
        let (projects, batches) = services(&db);
        let editor = fixtures::editor(&db, "editor").await;
        let ctx = fixtures::context(&editor);

        let project = projects
            .create(fixtures::project_input("Gears", 100))
            .await
            .unwrap();
        let batch = batches
            .create(&ctx, project.project.id, form("G-1", 80))
            .await
            .unwrap();

        let update = BatchForm {
            part_count: Some(100),
            ..BatchForm::default()
        };
        let updated = batches.update(&ctx, batch.batch.id, update).await.unwrap();
        assert_eq!(updated.batch.part_count, 100);

        let too_many = BatchForm {
            part_count: Some(101),
            ..BatchForm::default()
        };
        assert!(matches!(
            batches.update(&ctx, batch.batch.id, too_many).await,
            Err(QualityError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_target_cannot_drop_below_produced() {
        let db = TestDatabase::new().await;
        let (projects, batches) = services(&db);
        let editor = fixtures::editor(&db, "editor").await;
        let ctx = fixtures::context(&editor);

        let project = projects
            .create(fixtures::project_input("Bushings", 100))
            .await
            .unwrap();
        let id = project.project.id;
        batches.create(&ctx, id, form("B-1", 60)).await.unwrap();

        let result = projects.update(id, fixtures::project_input("Bushings", 50)).await;
        assert!(matches!(result, Err(QualityError::Validation(_))));

        let updated = projects
            .update(id, fixtures::project_input("Bushings", 60))
            .await
            .unwrap();
        assert_eq!(updated.progress.percent, 100.0);
    }

    #[tokio::test]
    async fn test_delete_project_with_batches_is_conflict() {
        let db = TestDatabase::new().await;
        let (projects, batches) = services(&db);
        let editor = fixtures::editor(&db, "editor").await;
        let ctx = fixtures::context(&editor);

        let used = projects
            .create(fixtures::project_input("Used", 10))
            .await
            .unwrap();
        batches
            .create(&ctx, used.project.id, form("U-1", 1))
            .await
            .unwrap();
        assert!(matches!(
            projects.delete(used.project.id).await,
            Err(QualityError::Conflict(_))
        ));

        let empty = projects
            .create(fixtures::project_input("Empty", 10))
            .await
            .unwrap();
        projects.delete(empty.project.id).await.unwrap();
        assert!(matches!(
            projects.get(empty.project.id).await,
            Err(QualityError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_filters_by_search_and_active() {
        let db = TestDatabase::new().await;
        let (projects, _) = services(&db);

        projects
            .create(fixtures::project_input("Brake Discs", 10))
            .await
            .unwrap();
        let mut inactive = fixtures::project_input("Brake Pads", 10);
        inactive.active = false;
        projects.create(inactive).await.unwrap();
        projects
            .create(fixtures::project_input("Pistons", 10))
            .await
            .unwrap();

        let brakes = projects
            .list(&ProjectFilter {
                search: Some("brake".to_string()),
                ..ProjectFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(brakes.len(), 2);

        let active_brakes = projects
            .list(&ProjectFilter {
                active: Some(true),
                search: Some("BRAKE".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(active_brakes.len(), 1);
        assert_eq!(active_brakes[0].project.name, "Brake Discs");
    }

    #[tokio::test]
    async fn test_concurrent_batches_cannot_overrun_target() {
        let db = TestDatabase::new().await;
        let (projects, batches) = services(&db);
        let editor = fixtures::editor(&db, "editor").await;
        let ctx = fixtures::context(&editor);

        let project = projects
            .create(fixtures::project_input("Pistons", 10))
            .await
            .unwrap();
        let id = project.project.id;

        let (a, b) = tokio::join!(
            batches.create(&ctx, id, form("P-A", 8)),
            batches.create(&ctx, id, form("P-B", 8)),
        );

        let accepted = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
        assert_eq!(accepted, 1);
        for result in [a, b] {
            if let Err(err) = result {
                assert!(matches!(err, QualityError::Validation(_)), "got {:?}", err);
            }
        }

        let summary = projects.get(id).await.unwrap();
        assert_eq!(summary.progress.produced, 8);
    }
}
