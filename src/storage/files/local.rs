//! Local file system storage implementation

use crate::core::documents::with_suffix;
use crate::utils::error::{QualityError, Result};
use rand::Rng;
use rand::distributions::Alphanumeric;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

const SUFFIX_LEN: usize = 7;
const MAX_NAME_ATTEMPTS: usize = 16;

/// Local file storage
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new local storage instance
    pub async fn new(base_path: impl AsRef<Path>) -> Result<Self> {
        let path = base_path.as_ref().to_path_buf();

        if !path.exists() {
            fs::create_dir_all(&path).await.map_err(|e| {
                QualityError::FileStorage(format!("Failed to create storage directory: {}", e))
            })?;
        }

        info!("Local file storage initialized at: {}", path.display());
        Ok(Self { base_path: path })
    }

    /// Media root
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Map a stored relative path onto the media root
    pub fn resolve(&self, relative: &str) -> Result<PathBuf> {
        let path = Path::new(relative);
        let safe = !relative.is_empty()
            && path
                .components()
                .all(|component| matches!(component, Component::Normal(_)));

        if !safe {
            return Err(QualityError::FileStorage(format!(
                "Invalid storage path: {}",
                relative
            )));
        }

        Ok(self.base_path.join(path))
    }

    /// Write a new file, never overwriting an existing one
    ///
    /// When `relative` is taken a random suffix is inserted before the
    /// extension. Returns the path actually used.
    pub async fn store_unique(&self, relative: &str, content: &[u8]) -> Result<String> {
        let mut candidate = relative.to_string();

        for _ in 0..MAX_NAME_ATTEMPTS {
            let file_path = self.resolve(&candidate)?;

            if let Some(parent) = file_path.parent() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    QualityError::FileStorage(format!("Failed to create directory: {}", e))
                })?;
            }

            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&file_path)
                .await
            {
                Ok(mut file) => {
                    file.write_all(content).await.map_err(|e| {
                        QualityError::FileStorage(format!("Failed to write file: {}", e))
                    })?;
                    file.flush().await.map_err(|e| {
                        QualityError::FileStorage(format!("Failed to write file: {}", e))
                    })?;

                    debug!("File stored: {} ({} bytes)", candidate, content.len());
                    return Ok(candidate);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    candidate = with_suffix(relative, &random_suffix());
                }
                Err(e) => {
                    return Err(QualityError::FileStorage(format!(
                        "Failed to create file: {}",
                        e
                    )));
                }
            }
        }

        Err(QualityError::FileStorage(format!(
            "Could not find a free name for {}",
            relative
        )))
    }

    /// Retrieve file content
    pub async fn read(&self, relative: &str) -> Result<Vec<u8>> {
        let file_path = self.resolve(relative)?;

        fs::read(&file_path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => QualityError::NotFound(format!("File not found: {}", relative)),
            _ => QualityError::FileStorage(format!("Failed to read file {}: {}", relative, e)),
        })
    }

    /// Delete a file, ignoring files that are already gone
    pub async fn delete(&self, relative: &str) -> Result<()> {
        let file_path = self.resolve(relative)?;

        match fs::remove_file(&file_path).await {
            Ok(()) => {
                debug!("File deleted: {}", relative);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(QualityError::FileStorage(format!(
                "Failed to delete file: {}",
                e
            ))),
        }
    }

    /// Check if file exists
    pub async fn exists(&self, relative: &str) -> Result<bool> {
        let file_path = self.resolve(relative)?;
        fs::try_exists(&file_path)
            .await
            .map_err(|e| QualityError::FileStorage(format!("Failed to stat file: {}", e)))
    }

    /// Health check
    pub async fn health_check(&self) -> Result<()> {
        let metadata = fs::metadata(&self.base_path).await.map_err(|e| {
            QualityError::FileStorage(format!("Storage directory not accessible: {}", e))
        })?;

        if !metadata.is_dir() {
            return Err(QualityError::FileStorage(format!(
                "Storage path is not a directory: {}",
                self.base_path.display()
            )));
        }

        Ok(())
    }
}

fn random_suffix() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect()
}
