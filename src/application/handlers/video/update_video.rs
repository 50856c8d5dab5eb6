//! UpdateVideoHandler - Command handler for video attribute and relation updates.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::{VideoOutput, VideoRelations};
use crate::domain::foundation::{CastMemberId, CategoryId, DomainError, GenreId, VideoId};
use crate::domain::video::VideoAttributes;
use crate::ports::{UnitOfWork, VideoRepository};

/// Command to update a video. A supplied id list replaces the current set;
/// `None` keeps it.
#[derive(Debug, Clone)]
pub struct UpdateVideoCommand {
    pub id: VideoId,
    pub attributes: VideoAttributes,
    pub published: Option<bool>,
    pub categories_id: Option<Vec<CategoryId>>,
    pub genres_id: Option<Vec<GenreId>>,
    pub cast_members_id: Option<Vec<CastMemberId>>,
}

pub struct UpdateVideoHandler {
    videos: Arc<dyn VideoRepository>,
    relations: VideoRelations,
    unit_of_work: Arc<dyn UnitOfWork>,
}

impl UpdateVideoHandler {
    pub fn new(
        videos: Arc<dyn VideoRepository>,
        relations: VideoRelations,
        unit_of_work: Arc<dyn UnitOfWork>,
    ) -> Self {
        Self {
            videos,
            relations,
            unit_of_work,
        }
    }

    /// # Errors
    ///
    /// - `NotFound` if the video does not exist
    /// - `RelatedAggregateNotFound` if a supplied id does not resolve; nothing changes
    /// - `ValidationFailed` if the attributes are invalid
    pub async fn handle(
        &self,
        cmd: UpdateVideoCommand,
        cancel: &CancellationToken,
    ) -> Result<VideoOutput, DomainError> {
        let mut video = self.videos.get(cmd.id, cancel).await?;

        self.relations
            .ensure(
                cmd.categories_id.as_deref().unwrap_or_default(),
                cmd.genres_id.as_deref().unwrap_or_default(),
                cmd.cast_members_id.as_deref().unwrap_or_default(),
                cancel,
            )
            .await?;

        video.update(cmd.attributes)?;
        if let Some(ids) = cmd.categories_id {
            video.sync_categories(ids);
        }
        if let Some(ids) = cmd.genres_id {
            video.sync_genres(ids);
        }
        if let Some(ids) = cmd.cast_members_id {
            video.sync_cast_members(ids);
        }
        match cmd.published {
            Some(true) => video.publish(),
            Some(false) => video.unpublish(),
            None => {}
        }

        let output = VideoOutput::from(&video);
        self.videos.update(video, cancel).await?;
        self.unit_of_work.commit(cancel).await?;

        Ok(output)
    }
}
