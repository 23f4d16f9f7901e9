use crate::core::audit::{AuditDraft, diff_documents};
use crate::core::models::{Batch, BatchFilter, DocumentSet};
use crate::core::progress::check_capacity;
use crate::utils::error::{QualityError, Result};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, audit_log_entry, batch, project};
use super::project_ops::sum_part_counts;
use super::types::{BatchRecord, SeaOrmDatabase};

/// Turn a unique violation on the lot id into a conflict
fn lot_error(lot_id: &str) -> impl FnOnce(DbErr) -> QualityError + '_ {
    move |err| {
        let err = QualityError::Database(err);
        if err.is_unique_violation() {
            QualityError::Conflict(format!("Lot {} already exists", lot_id))
        } else {
            err
        }
    }
}

fn apply_documents(model: &mut batch::ActiveModel, documents: &DocumentSet) {
    model.spectrometric_analysis = Set(documents.spectrometric_analysis.clone());
    model.geometric_tolerance = Set(documents.geometric_tolerance.clone());
    model.hardness_test = Set(documents.hardness_test.clone());
    model.tension_test = Set(documents.tension_test.clone());
    model.photographic_evidence = Set(documents.photographic_evidence.clone());
    model.original_drawing = Set(documents.original_drawing.clone());
}

/// Write audit rows on the caller's connection or transaction
async fn insert_audit_rows<C: ConnectionTrait>(
    conn: &C,
    batch_id: i32,
    actor: Option<Uuid>,
    drafts: Vec<AuditDraft>,
) -> Result<usize> {
    let count = drafts.len();
    let now = chrono::Utc::now();

    for draft in drafts {
        audit_log_entry::ActiveModel {
            batch_id: Set(batch_id),
            field: Set(draft.field.as_str().to_string()),
            action: Set(draft.action.as_str().to_string()),
            user_id: Set(actor),
            detail: Set(draft.detail),
            created_at: Set(now.into()),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(QualityError::Database)?;
    }

    Ok(count)
}

/// Write-lock the project row for the rest of the transaction, then check
/// that `incoming` pieces still fit its target.
///
/// The no-op update takes a row lock on PostgreSQL and the database write
/// lock on SQLite, so concurrent batch writes for one project serialize here.
async fn reserve_capacity<C: ConnectionTrait>(
    conn: &C,
    project_id: i32,
    exclude_batch: Option<i32>,
    incoming: u64,
) -> Result<()> {
    let touched = entities::Project::update_many()
        .col_expr(
            project::Column::TargetPieces,
            Expr::col(project::Column::TargetPieces).into(),
        )
        .filter(project::Column::Id.eq(project_id))
        .exec(conn)
        .await
        .map_err(QualityError::Database)?;
    if touched.rows_affected == 0 {
        return Err(QualityError::NotFound(format!(
            "Project {} not found",
            project_id
        )));
    }

    let target = entities::Project::find_by_id(project_id)
        .one(conn)
        .await
        .map_err(QualityError::Database)?
        .map(|p| p.target_pieces.max(0) as u64)
        .unwrap_or(0);
    let produced = sum_part_counts(conn, project_id, exclude_batch).await?;

    check_capacity(target, produced, incoming)
}

impl SeaOrmDatabase {
    /// Insert a batch and its UPLOAD audit rows in one transaction
    ///
    /// The project target is enforced inside the same transaction.
    pub async fn create_batch(&self, record: BatchRecord, actor: Option<Uuid>) -> Result<Batch> {
        debug!("Creating batch: {}", record.lot_id);

        let txn = self.db.begin().await.map_err(QualityError::Database)?;
        reserve_capacity(&txn, record.project_id, None, record.part_count as u64).await?;

        let now = chrono::Utc::now();
        let mut active_model = batch::ActiveModel {
            project_id: Set(record.project_id),
            lot_id: Set(record.lot_id.clone()),
            batch_date: Set(record.date),
            part_count: Set(record.part_count as i32),
            uploaded_by: Set(actor),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };
        apply_documents(&mut active_model, &record.documents);

        let model = active_model
            .insert(&txn)
            .await
            .map_err(lot_error(&record.lot_id))?;

        let drafts = diff_documents(None, &model.documents());
        let logged = insert_audit_rows(&txn, model.id, actor, drafts).await?;

        txn.commit().await.map_err(QualityError::Database)?;
        debug!("Batch {} created with {} audit entries", model.id, logged);

        Ok(model.to_domain_batch())
    }

    /// Overwrite a batch and audit its changed attachments in one transaction
    pub async fn update_batch(
        &self,
        batch_id: i32,
        record: BatchRecord,
        actor: Option<Uuid>,
    ) -> Result<Batch> {
        debug!("Updating batch: {}", batch_id);

        let txn = self.db.begin().await.map_err(QualityError::Database)?;
        reserve_capacity(
            &txn,
            record.project_id,
            Some(batch_id),
            record.part_count as u64,
        )
        .await?;

        let existing = entities::Batch::find_by_id(batch_id)
            .one(&txn)
            .await
            .map_err(QualityError::Database)?
            .ok_or_else(|| QualityError::NotFound(format!("Batch {} not found", batch_id)))?;
        let before = existing.documents();

        let mut active_model: batch::ActiveModel = existing.into();
        active_model.project_id = Set(record.project_id);
        active_model.lot_id = Set(record.lot_id.clone());
        active_model.batch_date = Set(record.date);
        active_model.part_count = Set(record.part_count as i32);
        active_model.uploaded_by = Set(actor);
        active_model.updated_at = Set(chrono::Utc::now().into());
        apply_documents(&mut active_model, &record.documents);

        let model = active_model
            .update(&txn)
            .await
            .map_err(lot_error(&record.lot_id))?;

        let drafts = diff_documents(Some(&before), &model.documents());
        let logged = insert_audit_rows(&txn, model.id, actor, drafts).await?;

        txn.commit().await.map_err(QualityError::Database)?;
        debug!("Batch {} updated with {} audit entries", model.id, logged);

        Ok(model.to_domain_batch())
    }

    /// Find batch by ID
    pub async fn find_batch(&self, batch_id: i32) -> Result<Option<Batch>> {
        debug!("Finding batch by ID: {}", batch_id);

        let model = entities::Batch::find_by_id(batch_id)
            .one(&self.db)
            .await
            .map_err(QualityError::Database)?;

        Ok(model.map(|m| m.to_domain_batch()))
    }

    /// Find batch by lot identifier
    pub async fn find_batch_by_lot_id(&self, lot_id: &str) -> Result<Option<Batch>> {
        debug!("Finding batch by lot: {}", lot_id);

        let model = entities::Batch::find()
            .filter(batch::Column::LotId.eq(lot_id))
            .one(&self.db)
            .await
            .map_err(QualityError::Database)?;

        Ok(model.map(|m| m.to_domain_batch()))
    }

    /// List batches, most recent production date first
    pub async fn list_batches(&self, filter: &BatchFilter) -> Result<Vec<Batch>> {
        debug!("Listing batches: {:?}", filter);

        let mut query = entities::Batch::find();

        if let Some(project_id) = filter.project_id {
            query = query.filter(batch::Column::ProjectId.eq(project_id));
        }

        if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = format!("%{}%", search.to_lowercase());
            query = query
                .filter(Expr::expr(Func::lower(Expr::col(batch::Column::LotId))).like(&pattern));
        }

        let models = query
            .order_by_desc(batch::Column::BatchDate)
            .order_by_asc(batch::Column::LotId)
            .all(&self.db)
            .await
            .map_err(QualityError::Database)?;

        Ok(models.iter().map(|m| m.to_domain_batch()).collect())
    }
}
