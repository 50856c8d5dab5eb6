//! CreateVideoHandler - Command handler for creating videos.
//!
//! Referenced categories, genres and cast members are checked first. Any
//! supplied media files are then uploaded and the video committed through the
//! upload coordinator, which removes the uploads again if anything fails.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::{VideoOutput, VideoRelations};
use crate::application::{MediaFile, MediaUploadCoordinator, Staging};
use crate::domain::foundation::{CastMemberId, CategoryId, DomainError, GenreId};
use crate::domain::video::{Video, VideoAttributes};

/// Command to create a video.
#[derive(Debug)]
pub struct CreateVideoCommand {
    pub attributes: VideoAttributes,
    pub published: bool,
    pub categories_id: Vec<CategoryId>,
    pub genres_id: Vec<GenreId>,
    pub cast_members_id: Vec<CastMemberId>,
    /// Optional uploads for any of the five slots.
    pub files: Vec<MediaFile>,
}

pub struct CreateVideoHandler {
    relations: VideoRelations,
    coordinator: Arc<MediaUploadCoordinator>,
}

impl CreateVideoHandler {
    pub fn new(relations: VideoRelations, coordinator: Arc<MediaUploadCoordinator>) -> Self {
        Self {
            relations,
            coordinator,
        }
    }

    /// # Errors
    ///
    /// - `RelatedAggregateNotFound` if a referenced id does not resolve
    /// - `ValidationFailed` if the attributes are invalid
    /// - `UpstreamFailure` if an upload, the encoder hand-off or persistence fails
    pub async fn handle(
        &self,
        cmd: CreateVideoCommand,
        cancel: &CancellationToken,
    ) -> Result<VideoOutput, DomainError> {
        self.relations
            .ensure(
                &cmd.categories_id,
                &cmd.genres_id,
                &cmd.cast_members_id,
                cancel,
            )
            .await?;

        let mut video = Video::new(
            cmd.attributes,
            cmd.categories_id,
            cmd.genres_id,
            cmd.cast_members_id,
        )?;
        if cmd.published {
            video.publish();
        }

        let committed = self
            .coordinator
            .upload_and_commit(video, cmd.files, Staging::Insert, cancel)
            .await?;
        Ok(VideoOutput::from(&committed))
    }
}
