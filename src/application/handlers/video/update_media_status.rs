//! UpdateMediaStatusHandler - Records the encoder's progress for a media slot.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::VideoOutput;
use crate::domain::foundation::{DomainError, ValidationError, VideoId};
use crate::domain::video::MediaSlot;
use crate::ports::{UnitOfWork, VideoRepository};

/// What the encoder reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodingOutcome {
    Processing,
    Completed { encoded_path: String },
    Failed,
}

#[derive(Debug, Clone)]
pub struct UpdateMediaStatusCommand {
    pub video_id: VideoId,
    pub slot: MediaSlot,
    pub outcome: EncodingOutcome,
}

impl UpdateMediaStatusCommand {
    /// Builds a command from the `{video_id}.{slot}` resource id carried by
    /// encoder messages.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the resource id is malformed
    pub fn from_resource_id(resource_id: &str, outcome: EncodingOutcome) -> Result<Self, DomainError> {
        let malformed = || {
            DomainError::validation(
                "Video",
                ValidationError::invalid_format(
                    "resource_id",
                    format!("expected '{{video_id}}.{{slot}}', got '{}'", resource_id),
                ),
            )
        };

        let (video_id, slot) = resource_id.split_once('.').ok_or_else(malformed)?;
        Ok(Self {
            video_id: video_id.parse().map_err(|_| malformed())?,
            slot: slot.parse().map_err(|_| malformed())?,
            outcome,
        })
    }
}

pub struct UpdateMediaStatusHandler {
    repository: Arc<dyn VideoRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
}

impl UpdateMediaStatusHandler {
    pub fn new(repository: Arc<dyn VideoRepository>, unit_of_work: Arc<dyn UnitOfWork>) -> Self {
        Self {
            repository,
            unit_of_work,
        }
    }

    /// # Errors
    ///
    /// - `NotFound` if the video does not exist
    /// - `ValidationFailed` if `slot` is an image slot or holds no file
    pub async fn handle(
        &self,
        cmd: UpdateMediaStatusCommand,
        cancel: &CancellationToken,
    ) -> Result<VideoOutput, DomainError> {
        let mut video = self.repository.get(cmd.video_id, cancel).await?;

        match cmd.outcome {
            EncodingOutcome::Processing => video.mark_sent_to_encode(cmd.slot)?,
            EncodingOutcome::Completed { encoded_path } => {
                video.complete_encoding(cmd.slot, encoded_path)?
            }
            EncodingOutcome::Failed => video.fail_encoding(cmd.slot)?,
        }

        let output = VideoOutput::from(&video);
        self.repository.update(video, cancel).await?;
        self.unit_of_work.commit(cancel).await?;

        Ok(output)
    }
}
