//! ListVideosHandler - Paged video listing with category and genre names.

use std::collections::BTreeSet;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::{VideoOutput, VideoRelations};
use crate::domain::foundation::{DomainError, SearchInput, SearchOutput};
use crate::ports::VideoRepository;

pub struct ListVideosHandler {
    videos: Arc<dyn VideoRepository>,
    relations: VideoRelations,
}

impl ListVideosHandler {
    pub fn new(videos: Arc<dyn VideoRepository>, relations: VideoRelations) -> Self {
        Self { videos, relations }
    }

    pub async fn handle(
        &self,
        input: SearchInput,
        cancel: &CancellationToken,
    ) -> Result<SearchOutput<VideoOutput>, DomainError> {
        let page = self.videos.search(&input, cancel).await?;

        let categories: BTreeSet<_> = page
            .items
            .iter()
            .flat_map(|v| v.categories_id().iter().copied())
            .collect();
        let genres: BTreeSet<_> = page
            .items
            .iter()
            .flat_map(|v| v.genres_id().iter().copied())
            .collect();
        let names = self.relations.names(categories, genres, cancel).await?;

        Ok(page.map(|video| VideoOutput::from(&video).with_names(&names)))
    }
}
