//! Main batch service implementation

use super::types::{BatchDetail, BatchForm, UploadedFile};
use crate::core::documents::{DocumentKind, storage_path, validate_upload};
use crate::core::models::batch::validate_lot_id;
use crate::core::models::{AuditEntry, Batch, BatchFilter, BatchView, DocumentSet, RequestContext};
use crate::core::progress::check_capacity;
use crate::storage::StorageLayer;
use crate::storage::database::BatchRecord;
use crate::utils::error::{QualityError, Result};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

/// Batch operations
#[derive(Debug, Clone)]
pub struct BatchService {
    pub(super) storage: Arc<StorageLayer>,
    /// Largest accepted upload in bytes
    max_upload_size: usize,
}

impl BatchService {
    pub fn new(storage: Arc<StorageLayer>, max_upload_size: usize) -> Self {
        Self {
            storage,
            max_upload_size,
        }
    }

    /// Create a batch under a project
    pub async fn create(
        &self,
        context: &RequestContext,
        project_id: i32,
        form: BatchForm,
    ) -> Result<BatchView> {
        let project = self
            .storage
            .db()
            .find_project(project_id)
            .await?
            .ok_or_else(|| QualityError::not_found(format!("Project {} not found", project_id)))?;

        let lot_id = form
            .lot_id
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        validate_lot_id(&lot_id)?;
        let date = form.date.unwrap_or_else(|| chrono::Utc::now().date_naive());
        let part_count = parse_part_count(form.part_count.unwrap_or(0))?;

        if !form.cleared.is_empty() {
            return Err(QualityError::validation(
                "A new batch has no attachments to clear",
            ));
        }
        self.validate_uploads(&form.uploads, &[])?;

        let produced = self.storage.db().produced_pieces(project.id, None).await?;
        check_capacity(project.target_pieces as u64, produced, part_count as u64)?;
        self.ensure_lot_available(&lot_id, None).await?;

        let mut documents = DocumentSet::default();
        let stored = self
            .store_uploads(&lot_id, date, form.uploads, &mut documents)
            .await?;

        let record = BatchRecord {
            project_id: project.id,
            lot_id,
            date,
            part_count,
            documents,
        };

        match self.storage.db().create_batch(record, context.actor_id()).await {
            Ok(batch) => {
                info!("Created batch {} for project {}", batch.lot_id, project.id);
                Ok(batch.into())
            }
            Err(e) => {
                self.discard(&stored).await;
                Err(e)
            }
        }
    }

    /// Update a batch from a partial form
    pub async fn update(
        &self,
        context: &RequestContext,
        batch_id: i32,
        form: BatchForm,
    ) -> Result<BatchView> {
        let existing = self.find(batch_id).await?;
        let project = self
            .storage
            .db()
            .find_project(existing.project_id)
            .await?
            .ok_or_else(|| {
                QualityError::not_found(format!("Project {} not found", existing.project_id))
            })?;

        let lot_id = match form.lot_id.as_deref().map(str::trim) {
            Some(lot_id) if lot_id != existing.lot_id => {
                validate_lot_id(lot_id)?;
                self.ensure_lot_available(lot_id, Some(existing.id)).await?;
                lot_id.to_string()
            }
            _ => existing.lot_id.clone(),
        };
        let date = form.date.unwrap_or(existing.date);
        let part_count = match form.part_count {
            Some(count) => parse_part_count(count)?,
            None => existing.part_count,
        };

        self.validate_uploads(&form.uploads, &form.cleared)?;

        let produced = self
            .storage
            .db()
            .produced_pieces(project.id, Some(existing.id))
            .await?;
        check_capacity(project.target_pieces as u64, produced, part_count as u64)?;

        let mut documents = existing.documents.clone();
        for field in &form.cleared {
            documents.set(*field, None);
        }
        let stored = self
            .store_uploads(&lot_id, date, form.uploads, &mut documents)
            .await?;

        let record = BatchRecord {
            project_id: existing.project_id,
            lot_id,
            date,
            part_count,
            documents,
        };

        match self
            .storage
            .db()
            .update_batch(existing.id, record, context.actor_id())
            .await
        {
            Ok(batch) => {
                info!("Updated batch {}", batch.lot_id);
                Ok(batch.into())
            }
            Err(e) => {
                self.discard(&stored).await;
                Err(e)
            }
        }
    }

    pub async fn get(&self, batch_id: i32) -> Result<BatchDetail> {
        let batch = self.find(batch_id).await?;
        let audit = self.storage.db().list_audit_entries(batch.id).await?;

        Ok(BatchDetail {
            batch: batch.into(),
            audit,
        })
    }

    pub async fn list(&self, filter: &BatchFilter) -> Result<Vec<BatchView>> {
        if let Some(project_id) = filter.project_id {
            if self.storage.db().find_project(project_id).await?.is_none() {
                return Err(QualityError::not_found(format!(
                    "Project {} not found",
                    project_id
                )));
            }
        }

        let batches = self.storage.db().list_batches(filter).await?;
        Ok(batches.into_iter().map(BatchView::from).collect())
    }

    pub async fn audit(&self, batch_id: i32) -> Result<Vec<AuditEntry>> {
        let batch = self.find(batch_id).await?;
        self.storage.db().list_audit_entries(batch.id).await
    }

    pub(super) async fn find(&self, batch_id: i32) -> Result<Batch> {
        self.storage
            .db()
            .find_batch(batch_id)
            .await?
            .ok_or_else(|| QualityError::not_found(format!("Batch {} not found", batch_id)))
    }

    async fn ensure_lot_available(&self, lot_id: &str, current: Option<i32>) -> Result<()> {
        match self.storage.db().find_batch_by_lot_id(lot_id).await? {
            Some(other) if Some(other.id) != current => Err(QualityError::conflict(format!(
                "Lot {} already exists",
                lot_id
            ))),
            _ => Ok(()),
        }
    }

    fn validate_uploads(&self, uploads: &[UploadedFile], cleared: &[DocumentKind]) -> Result<()> {
        let mut seen = HashSet::new();

        for upload in uploads {
            if !seen.insert(upload.field) {
                return Err(QualityError::validation(format!(
                    "{}: only one file can be submitted",
                    upload.field.title()
                )));
            }
            if cleared.contains(&upload.field) {
                return Err(QualityError::validation(format!(
                    "{}: submit a file or clear the field, not both",
                    upload.field.title()
                )));
            }
            if upload.content.len() > self.max_upload_size {
                return Err(QualityError::validation(format!(
                    "{}: file is larger than {} bytes",
                    upload.field.title(),
                    self.max_upload_size
                )));
            }
            validate_upload(upload.field, &upload.filename, upload.content.len())?;
        }

        Ok(())
    }

    /// Write uploads to disk and point the document set at them
    ///
    /// Returns the stored paths so they can be discarded if persisting fails.
    async fn store_uploads(
        &self,
        lot_id: &str,
        date: NaiveDate,
        uploads: Vec<UploadedFile>,
        documents: &mut DocumentSet,
    ) -> Result<Vec<String>> {
        let mut stored = Vec::with_capacity(uploads.len());

        for upload in uploads {
            let relative = storage_path(lot_id, date, &upload.filename);
            match self.storage.files().store_unique(&relative, &upload.content).await {
                Ok(path) => {
                    documents.set(upload.field, Some(path.clone()));
                    stored.push(path);
                }
                Err(e) => {
                    self.discard(&stored).await;
                    return Err(e);
                }
            }
        }

        Ok(stored)
    }

    async fn discard(&self, paths: &[String]) {
        for path in paths {
            if let Err(e) = self.storage.files().delete(path).await {
                warn!("Failed to remove orphaned upload {}: {}", path, e);
            }
        }
    }
}

fn parse_part_count(value: i64) -> Result<u32> {
    u32::try_from(value)
        .ok()
        .filter(|count| *count <= i32::MAX as u32)
        .ok_or_else(|| QualityError::validation("part_count: must be a non-negative whole number"))
}
