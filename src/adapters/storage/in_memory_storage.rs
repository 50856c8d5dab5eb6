//! In-Memory Storage Adapter
//!
//! Keeps uploaded objects in a map. Useful for tests and local runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tokio::sync::RwLock;

use crate::ports::{ByteStream, StorageError, StorageService};

/// In-memory object store
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    objects: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contains(&self, path: &str) -> bool {
        self.objects.read().await.contains_key(path)
    }

    pub async fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.objects.read().await.get(path).cloned()
    }

    /// Stored paths, sorted.
    pub async fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.objects.read().await.keys().cloned().collect();
        paths.sort();
        paths
    }

    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }
}

#[async_trait]
impl StorageService for InMemoryStorage {
    async fn upload(&self, name: &str, mut content: ByteStream) -> Result<String, StorageError> {
        if name.is_empty() {
            return Err(StorageError::InvalidName(name.to_string()));
        }
        let mut bytes = Vec::new();
        content.read_to_end(&mut bytes).await?;
        self.objects.write().await.insert(name.to_string(), bytes);
        Ok(name.to_string())
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        self.objects
            .write()
            .await
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upload_then_delete() {
        let storage = InMemoryStorage::new();

        let path = storage.upload("a.mp4", Box::new(&b"data"[..])).await.unwrap();
        assert_eq!(storage.get(&path).await.unwrap(), b"data");

        storage.delete(&path).await.unwrap();
        assert!(!storage.contains(&path).await);
        assert!(matches!(
            storage.delete(&path).await,
            Err(StorageError::NotFound(_))
        ));
    }
}
