//! DeleteVideoHandler - Removes a video, then its stored media.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::domain::foundation::{DomainError, VideoId};
use crate::ports::{StorageService, UnitOfWork, VideoRepository};

#[derive(Debug, Clone)]
pub struct DeleteVideoCommand {
    pub id: VideoId,
}

pub struct DeleteVideoHandler {
    repository: Arc<dyn VideoRepository>,
    storage: Arc<dyn StorageService>,
    unit_of_work: Arc<dyn UnitOfWork>,
}

impl DeleteVideoHandler {
    pub fn new(
        repository: Arc<dyn VideoRepository>,
        storage: Arc<dyn StorageService>,
        unit_of_work: Arc<dyn UnitOfWork>,
    ) -> Self {
        Self {
            repository,
            storage,
            unit_of_work,
        }
    }

    /// Deletes the video. Stored objects are removed only after the commit
    /// succeeds; a failed removal is logged and does not fail the call.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the video does not exist
    pub async fn handle(
        &self,
        cmd: DeleteVideoCommand,
        cancel: &CancellationToken,
    ) -> Result<(), DomainError> {
        let video = self.repository.get(cmd.id, cancel).await?;
        let paths = video.stored_paths();

        self.repository.delete(video, cancel).await?;
        self.unit_of_work.commit(cancel).await?;

        for path in paths {
            match self.storage.delete(&path).await {
                Ok(()) => debug!(video_id = %cmd.id, path = %path, "Removed video media"),
                Err(err) => warn!(
                    video_id = %cmd.id,
                    path = %path,
                    error = %err,
                    "Could not remove video media"
                ),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryStorage;
    use crate::application::handlers::test_support::{token, Harness};
    use crate::application::handlers::video::fixtures::attributes;
    use crate::domain::foundation::{AggregateRoot, SearchableRepository};
    use crate::domain::video::Video;

    #[tokio::test]
    async fn removes_video_and_its_media() {
        let h = Harness::new();
        let storage = Arc::new(InMemoryStorage::new());
        storage.upload("v-thumb.png", Box::new(&b"png"[..])).await.unwrap();

        let mut video = Video::new(attributes("Arrival"), [], [], []).unwrap();
        video.replace_thumb("v-thumb.png");
        // Never uploaded: removal fails and is only logged.
        video.update_trailer("v-trailer.mp4");
        let id = video.id();
        h.session.videos().insert(video, &token()).await.unwrap();
        h.unit_of_work.commit(&token()).await.unwrap();

        DeleteVideoHandler::new(h.session.videos(), storage.clone(), h.unit_of_work.clone())
            .handle(DeleteVideoCommand { id }, &token())
            .await
            .unwrap();

        assert_eq!(h.catalog.video_count().await, 0);
        assert_eq!(storage.object_count().await, 0);
    }

    #[tokio::test]
    async fn fails_when_video_not_found() {
        let h = Harness::new();
        let storage = Arc::new(InMemoryStorage::new());

        let result =
            DeleteVideoHandler::new(h.session.videos(), storage, h.unit_of_work.clone())
                .handle(DeleteVideoCommand { id: VideoId::new() }, &token())
                .await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}
