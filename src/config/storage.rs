//! Media storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where uploaded media objects are written
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Base directory for the local file storage adapter
    #[serde(default = "default_base_path")]
    pub base_path: PathBuf,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE_BASE_PATH"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
        }
    }
}

fn default_base_path() -> PathBuf {
    PathBuf::from("./data/media")
}
