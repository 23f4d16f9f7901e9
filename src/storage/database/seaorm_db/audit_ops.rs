use crate::core::models::AuditEntry;
use crate::utils::error::{QualityError, Result};
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, audit_log_entry};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Audit trail of a batch, newest first
    pub async fn list_audit_entries(&self, batch_id: i32) -> Result<Vec<AuditEntry>> {
        debug!("Listing audit entries for batch: {}", batch_id);

        let models = entities::AuditLogEntry::find()
            .filter(audit_log_entry::Column::BatchId.eq(batch_id))
            .order_by_desc(audit_log_entry::Column::CreatedAt)
            .order_by_desc(audit_log_entry::Column::Id)
            .all(&self.db)
            .await
            .map_err(QualityError::Database)?;

        models.iter().map(|m| m.to_domain_entry()).collect()
    }
}
