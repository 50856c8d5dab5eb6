//! GetVideoHandler - Query handler for a single video.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::VideoOutput;
use crate::domain::foundation::{DomainError, VideoId};
use crate::ports::VideoRepository;

#[derive(Debug, Clone)]
pub struct GetVideoQuery {
    pub id: VideoId,
}

pub struct GetVideoHandler {
    repository: Arc<dyn VideoRepository>,
}

impl GetVideoHandler {
    pub fn new(repository: Arc<dyn VideoRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: GetVideoQuery,
        cancel: &CancellationToken,
    ) -> Result<VideoOutput, DomainError> {
        let video = self.repository.get(query.id, cancel).await?;
        Ok(VideoOutput::from(&video))
    }
}
