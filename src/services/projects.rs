//! Project management

use crate::core::models::project::ProjectInput;
use crate::core::models::{ProjectFilter, ProjectSummary};
use crate::storage::StorageLayer;
use crate::storage::database::ProjectRecord;
use crate::utils::error::{QualityError, Result};
use std::sync::Arc;
use tracing::info;

const MAX_NAME_LEN: usize = 200;

/// Project operations with progress attached
#[derive(Debug, Clone)]
pub struct ProjectService {
    storage: Arc<StorageLayer>,
}

impl ProjectService {
    pub fn new(storage: Arc<StorageLayer>) -> Self {
        Self { storage }
    }

    pub async fn create(&self, input: ProjectInput) -> Result<ProjectSummary> {
        let record = validate_input(input)?;
        let project = self.storage.db().create_project(record).await?;
        info!("Created project {} ({})", project.id, project.name);

        Ok(ProjectSummary::new(project, 0))
    }

    pub async fn get(&self, project_id: i32) -> Result<ProjectSummary> {
        let project = self
            .storage
            .db()
            .find_project(project_id)
            .await?
            .ok_or_else(|| QualityError::not_found(format!("Project {} not found", project_id)))?;

        let produced = self.storage.db().produced_pieces(project_id, None).await?;
        Ok(ProjectSummary::new(project, produced))
    }

    pub async fn list(&self, filter: &ProjectFilter) -> Result<Vec<ProjectSummary>> {
        let projects = self.storage.db().list_projects(filter).await?;
        let produced = self.storage.db().produced_by_project().await?;

        Ok(projects
            .into_iter()
            .map(|project| {
                let total = produced.get(&project.id).copied().unwrap_or(0);
                ProjectSummary::new(project, total)
            })
            .collect())
    }

    /// Replace the editable fields of a project
    ///
    /// A non-zero target may not drop below the pieces already produced.
    pub async fn update(&self, project_id: i32, input: ProjectInput) -> Result<ProjectSummary> {
        let record = validate_input(input)?;
        let produced = self.storage.db().produced_pieces(project_id, None).await?;

        if record.target_pieces > 0 && produced > record.target_pieces as u64 {
            return Err(QualityError::validation(format!(
                "target_pieces: {} pieces were already produced",
                produced
            )));
        }

        let project = self.storage.db().update_project(project_id, record).await?;
        info!("Updated project {}", project.id);

        Ok(ProjectSummary::new(project, produced))
    }

    pub async fn delete(&self, project_id: i32) -> Result<()> {
        self.storage.db().delete_project(project_id).await?;
        info!("Deleted project {}", project_id);
        Ok(())
    }
}

fn validate_input(input: ProjectInput) -> Result<ProjectRecord> {
    let name = input.name.trim().to_string();
    if name.is_empty() {
        return Err(QualityError::validation("name: this field is required"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(QualityError::validation(format!(
            "name: must be at most {} characters",
            MAX_NAME_LEN
        )));
    }

    let client = input
        .client
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());
    if client.as_ref().is_some_and(|c| c.chars().count() > MAX_NAME_LEN) {
        return Err(QualityError::validation(format!(
            "client: must be at most {} characters",
            MAX_NAME_LEN
        )));
    }

    let target_pieces = u32::try_from(input.target_pieces)
        .ok()
        .filter(|t| *t <= i32::MAX as u32)
        .ok_or_else(|| {
            QualityError::validation("target_pieces: must be a non-negative whole number")
        })?;

    Ok(ProjectRecord {
        name,
        client,
        target_pieces,
        active: input.active,
    })
}
