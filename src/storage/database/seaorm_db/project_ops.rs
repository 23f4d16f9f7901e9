use crate::core::models::{Project, ProjectFilter};
use crate::utils::error::{QualityError, Result};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::*;
use std::collections::HashMap;
use tracing::debug;

use super::super::entities::{self, batch, project};
use super::types::{ProjectRecord, SeaOrmDatabase};

/// Sum of part counts for a project on the given connection or transaction
pub(super) async fn sum_part_counts<C: ConnectionTrait>(
    conn: &C,
    project_id: i32,
    exclude_batch: Option<i32>,
) -> Result<u64> {
    let mut query = entities::Batch::find()
        .select_only()
        .column_as(batch::Column::PartCount.sum(), "total")
        .filter(batch::Column::ProjectId.eq(project_id));

    if let Some(batch_id) = exclude_batch {
        query = query.filter(batch::Column::Id.ne(batch_id));
    }

    let total = query
        .into_tuple::<Option<i64>>()
        .one(conn)
        .await
        .map_err(QualityError::Database)?
        .flatten()
        .unwrap_or(0);

    Ok(total.max(0) as u64)
}

impl SeaOrmDatabase {
    /// Insert a new project
    pub async fn create_project(&self, record: ProjectRecord) -> Result<Project> {
        debug!("Creating project: {}", record.name);

        let now = chrono::Utc::now();
        let model = project::ActiveModel {
            name: Set(record.name),
            client: Set(record.client),
            target_pieces: Set(record.target_pieces as i32),
            active: Set(record.active),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(QualityError::Database)?;

        Ok(model.to_domain_project())
    }

    /// Find project by ID
    pub async fn find_project(&self, project_id: i32) -> Result<Option<Project>> {
        debug!("Finding project by ID: {}", project_id);

        let model = entities::Project::find_by_id(project_id)
            .one(&self.db)
            .await
            .map_err(QualityError::Database)?;

        Ok(model.map(|m| m.to_domain_project()))
    }

    /// List projects, newest first
    pub async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>> {
        debug!("Listing projects: {:?}", filter);

        let mut query = entities::Project::find();

        if let Some(active) = filter.active {
            query = query.filter(project::Column::Active.eq(active));
        }

        if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = format!("%{}%", search.to_lowercase());
            query = query.filter(
                Condition::any()
                    .add(Expr::expr(Func::lower(Expr::col(project::Column::Name))).like(&pattern))
                    .add(Expr::expr(Func::lower(Expr::col(project::Column::Client))).like(&pattern)),
            );
        }

        let models = query
            .order_by_desc(project::Column::CreatedAt)
            .order_by_asc(project::Column::Name)
            .order_by_desc(project::Column::Id)
            .all(&self.db)
            .await
            .map_err(QualityError::Database)?;

        Ok(models.iter().map(|m| m.to_domain_project()).collect())
    }

    /// Replace the editable fields of a project
    pub async fn update_project(&self, project_id: i32, record: ProjectRecord) -> Result<Project> {
        debug!("Updating project: {}", project_id);

        let mut active_model: project::ActiveModel = entities::Project::find_by_id(project_id)
            .one(&self.db)
            .await
            .map_err(QualityError::Database)?
            .ok_or_else(|| QualityError::NotFound(format!("Project {} not found", project_id)))?
            .into();

        active_model.name = Set(record.name);
        active_model.client = Set(record.client);
        active_model.target_pieces = Set(record.target_pieces as i32);
        active_model.active = Set(record.active);
        active_model.updated_at = Set(chrono::Utc::now().into());

        let model = active_model
            .update(&self.db)
            .await
            .map_err(QualityError::Database)?;

        Ok(model.to_domain_project())
    }

    /// Delete a project that has no batches
    pub async fn delete_project(&self, project_id: i32) -> Result<()> {
        debug!("Deleting project: {}", project_id);

        let batches = entities::Batch::find()
            .filter(batch::Column::ProjectId.eq(project_id))
            .count(&self.db)
            .await
            .map_err(QualityError::Database)?;

        if batches > 0 {
            return Err(QualityError::Conflict(format!(
                "Project {} has {} batches and cannot be deleted",
                project_id, batches
            )));
        }

        let result = entities::Project::delete_by_id(project_id)
            .exec(&self.db)
            .await
            .map_err(QualityError::Database)?;

        if result.rows_affected == 0 {
            return Err(QualityError::NotFound(format!(
                "Project {} not found",
                project_id
            )));
        }

        Ok(())
    }

    /// Sum of part counts over a project's batches
    ///
    /// `exclude_batch` leaves one batch out, used when that batch is being
    /// edited.
    pub async fn produced_pieces(&self, project_id: i32, exclude_batch: Option<i32>) -> Result<u64> {
        debug!("Summing produced pieces for project: {}", project_id);
        sum_part_counts(&self.db, project_id, exclude_batch).await
    }

    /// Produced pieces for every project that has batches
    pub async fn produced_by_project(&self) -> Result<HashMap<i32, u64>> {
        debug!("Summing produced pieces per project");

        let rows = entities::Batch::find()
            .select_only()
            .column(batch::Column::ProjectId)
            .column_as(batch::Column::PartCount.sum(), "total")
            .group_by(batch::Column::ProjectId)
            .into_tuple::<(i32, Option<i64>)>()
            .all(&self.db)
            .await
            .map_err(QualityError::Database)?;

        Ok(rows
            .into_iter()
            .map(|(project_id, total)| (project_id, total.unwrap_or(0).max(0) as u64))
            .collect())
    }
}
