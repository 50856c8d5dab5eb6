//! UploadMediasHandler - Attaches a primary media file and/or trailer to an
//! existing video.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::VideoOutput;
use crate::application::{MediaFile, MediaUploadCoordinator, Staging};
use crate::domain::foundation::{DomainError, ValidationError, VideoId};
use crate::ports::VideoRepository;

#[derive(Debug)]
pub struct UploadMediasCommand {
    pub video_id: VideoId,
    /// Files for the media and trailer slots only.
    pub files: Vec<MediaFile>,
}

pub struct UploadMediasHandler {
    videos: Arc<dyn VideoRepository>,
    coordinator: Arc<MediaUploadCoordinator>,
}

impl UploadMediasHandler {
    pub fn new(videos: Arc<dyn VideoRepository>, coordinator: Arc<MediaUploadCoordinator>) -> Self {
        Self {
            videos,
            coordinator,
        }
    }

    /// # Errors
    ///
    /// - `ValidationFailed` if a file targets an image slot
    /// - `NotFound` if the video does not exist
    /// - `UpstreamFailure` if an upload, the encoder hand-off or persistence
    ///   fails; this call's uploads are removed again
    pub async fn handle(
        &self,
        cmd: UploadMediasCommand,
        cancel: &CancellationToken,
    ) -> Result<VideoOutput, DomainError> {
        if let Some(file) = cmd.files.iter().find(|f| !f.slot.is_audio_video()) {
            return Err(DomainError::validation(
                "Video",
                ValidationError::invalid_format(
                    "slot",
                    format!("'{}' is not an audio/video slot", file.slot),
                ),
            ));
        }

        let video = self.videos.get(cmd.video_id, cancel).await?;
        let committed = self
            .coordinator
            .upload_and_commit(video, cmd.files, Staging::Update, cancel)
            .await?;
        Ok(VideoOutput::from(&committed))
    }
}
