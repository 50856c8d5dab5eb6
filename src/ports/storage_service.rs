//! Storage Service Port - Binary object storage for video media.
//!
//! The domain only ever sees the stored path returned by `upload`; where and
//! how bytes are kept is the adapter's business.

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::AsyncRead;

/// Byte stream handed to `upload`.
pub type ByteStream = Box<dyn AsyncRead + Send + Unpin>;

/// Port for storing and removing media objects.
///
/// # Contract
///
/// Implementations must:
/// - Store the stream under `name`, overwriting any object with the same name
/// - Return a path that `delete` accepts
/// - Treat deleting a missing object as `NotFound`, never as success
///
/// # Usage
///
/// ```rust,ignore
/// let path = storage.upload("3f2a...-media.mp4", Box::new(file)).await?;
/// storage.delete(&path).await?;
/// ```
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Stores `content` under `name` and returns the stored path.
    async fn upload(&self, name: &str, content: ByteStream) -> Result<String, StorageError>;

    /// Removes the object at `path`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if nothing is stored there.
    async fn delete(&self, path: &str) -> Result<(), StorageError>;
}

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid object name: {0}")]
    InvalidName(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn StorageService) {}

    #[test]
    fn io_errors_convert() {
        let err: StorageError = std::io::Error::new(std::io::ErrorKind::Other, "disk full").into();
        assert!(err.to_string().contains("disk full"));
    }
}
