//! Local Filesystem Storage Adapter - Implementation of StorageService.
//!
//! Stores media objects as flat files under one base directory. Stored paths
//! are object names relative to that directory.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::ports::{ByteStream, StorageError, StorageService};

/// Local filesystem storage for video media.
///
/// # Atomic Writes
///
/// Uses a write-to-temp-then-rename pattern:
/// 1. Stream content to `{name}.tmp`
/// 2. Sync to disk
/// 3. Rename to `{name}`
///
/// A crash mid-upload never leaves a truncated object under the final name.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    base_path: PathBuf,
}

impl LocalFileStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Resolves an object name, rejecting anything that could escape the base directory.
    fn object_path(&self, name: &str) -> Result<PathBuf, StorageError> {
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(StorageError::InvalidName(name.to_string()));
        }
        Ok(self.base_path.join(name))
    }
}

#[async_trait]
impl StorageService for LocalFileStorage {
    async fn upload(&self, name: &str, mut content: ByteStream) -> Result<String, StorageError> {
        let path = self.object_path(name)?;
        let temp_path = self.object_path(&format!("{}.tmp", name))?;
        fs::create_dir_all(&self.base_path).await?;

        let written = match write_then_rename(&mut content, &temp_path, &path).await {
            Ok(written) => written,
            Err(err) => {
                if let Err(cleanup) = fs::remove_file(&temp_path).await {
                    if cleanup.kind() != std::io::ErrorKind::NotFound {
                        warn!(name, error = %cleanup, "Could not remove partial upload");
                    }
                }
                return Err(err.into());
            }
        };

        debug!(name, bytes = written, "Stored media object");
        Ok(name.to_string())
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        let full_path = self.object_path(path)?;
        match fs::remove_file(&full_path).await {
            Ok(()) => {
                debug!(path, "Deleted media object");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }
}

async fn write_then_rename(
    content: &mut ByteStream,
    temp_path: &Path,
    path: &Path,
) -> std::io::Result<u64> {
    let mut file = fs::File::create(temp_path).await?;
    let written = tokio::io::copy(content, &mut file).await?;
    file.flush().await?;
    file.sync_all().await?;
    drop(file);

    fs::rename(temp_path, path).await?;
    Ok(written)
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
