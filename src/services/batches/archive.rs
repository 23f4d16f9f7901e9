//! Batch archive export

use super::service::BatchService;
use crate::core::archive::{ArchiveBundle, ArchiveInput, build_archive};
use crate::core::documents::DocumentKind;
use crate::utils::error::Result;
use tracing::{info, warn};

impl BatchService {
    /// Zip the stored attachments of a batch
    ///
    /// Unreadable files do not abort the export; they are listed as failed
    /// in the bundle report.
    pub async fn archive(&self, batch_id: i32) -> Result<ArchiveBundle> {
        let batch = self.find(batch_id).await?;
        let mut inputs = Vec::with_capacity(DocumentKind::ALL.len());

        for kind in DocumentKind::ALL {
            let Some(path) = batch.documents.get(kind) else {
                inputs.push(ArchiveInput::Missing(kind));
                continue;
            };

            match self.storage.files().read(path).await {
                Ok(bytes) => inputs.push(ArchiveInput::Loaded {
                    kind,
                    path: path.to_string(),
                    bytes,
                }),
                Err(e) => {
                    warn!("Batch {}: cannot read {} ({}): {}", batch.lot_id, kind, path, e);
                    inputs.push(ArchiveInput::Failed {
                        kind,
                        path: path.to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        let bundle = build_archive(&batch.lot_id, inputs)?;
        info!(
            "Exported {} with {} files ({} skipped, {} failed)",
            bundle.file_name,
            bundle.report.included.len(),
            bundle.report.skipped.len(),
            bundle.report.failed.len()
        );
        Ok(bundle)
    }
}
