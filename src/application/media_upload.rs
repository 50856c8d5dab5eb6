//! MediaUploadCoordinator - Uploads video media, then commits, undoing uploads on failure.
//!
//! Objects are stored under `{video_id}-{slot}.{extension}`. If any upload or
//! the final commit fails, every object uploaded by this call is deleted
//! (best effort) and the original error is returned. Slots this call did not
//! touch are never compensated.

use std::collections::HashSet;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::domain::foundation::{
    ensure_not_cancelled, AggregateRoot, DomainError, ValidationError, VideoId,
};
use crate::domain::video::{MediaSlot, Video};
use crate::ports::{ByteStream, StorageService, UnitOfWork, VideoRepository};

/// One file to store in one slot.
pub struct MediaFile {
    pub slot: MediaSlot,
    /// File extension, with or without the leading dot.
    pub extension: String,
    pub content: ByteStream,
}

impl MediaFile {
    pub fn new(slot: MediaSlot, extension: impl Into<String>, content: ByteStream) -> Self {
        Self {
            slot,
            extension: extension.into(),
            content,
        }
    }
}

impl std::fmt::Debug for MediaFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaFile")
            .field("slot", &self.slot)
            .field("extension", &self.extension)
            .finish_non_exhaustive()
    }
}

/// How the video is staged once its uploads succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staging {
    Insert,
    Update,
}

/// Deterministic object name for `slot` of `video_id`.
pub fn object_name(video_id: VideoId, slot: MediaSlot, extension: &str) -> String {
    let extension = extension.trim().trim_start_matches('.');
    if extension.is_empty() {
        format!("{}-{}", video_id, slot)
    } else {
        format!("{}-{}.{}", video_id, slot, extension)
    }
}

fn ensure_distinct_slots(files: &[MediaFile]) -> Result<(), DomainError> {
    let mut seen = HashSet::new();
    for file in files {
        if !seen.insert(file.slot) {
            return Err(DomainError::validation(
                "Video",
                ValidationError::invalid_format(
                    "slot",
                    format!("'{}' supplied more than once", file.slot),
                ),
            ));
        }
    }
    Ok(())
}

pub struct MediaUploadCoordinator {
    storage: Arc<dyn StorageService>,
    repository: Arc<dyn VideoRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
}

impl MediaUploadCoordinator {
    pub fn new(
        storage: Arc<dyn StorageService>,
        repository: Arc<dyn VideoRepository>,
        unit_of_work: Arc<dyn UnitOfWork>,
    ) -> Self {
        Self {
            storage,
            repository,
            unit_of_work,
        }
    }

    /// Uploads `files` into `video`, stages it and commits.
    ///
    /// Returns the committed video (with an empty event buffer).
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if two files target the same slot; nothing is uploaded
    /// - `UpstreamFailure` if storage, an event handler or persistence fails
    /// - `Cancelled` if `cancel` fired before the commit began
    pub async fn upload_and_commit(
        &self,
        mut video: Video,
        files: Vec<MediaFile>,
        staging: Staging,
        cancel: &CancellationToken,
    ) -> Result<Video, DomainError> {
        ensure_distinct_slots(&files)?;
        // Same-name re-uploads overwrite these; the committed video still points at them.
        let committed_paths: HashSet<String> = files
            .iter()
            .filter_map(|file| video.slot_path(file.slot).map(str::to_string))
            .collect();
        let mut uploaded = Vec::with_capacity(files.len());

        match self
            .upload_then_commit(&mut video, files, staging, &mut uploaded, cancel)
            .await
        {
            Ok(committed) => Ok(committed),
            Err(err) => {
                self.compensate(video.id(), &uploaded, &committed_paths).await;
                Err(err)
            }
        }
    }

    async fn upload_then_commit(
        &self,
        video: &mut Video,
        files: Vec<MediaFile>,
        staging: Staging,
        uploaded: &mut Vec<String>,
        cancel: &CancellationToken,
    ) -> Result<Video, DomainError> {
        for file in files {
            ensure_not_cancelled(cancel)?;

            let name = object_name(video.id(), file.slot, &file.extension);
            let path = self
                .storage
                .upload(&name, file.content)
                .await
                .map_err(|err| DomainError::upstream("storage", err))?;

            debug!(video_id = %video.id(), slot = %file.slot, path = %path, "Media uploaded");
            uploaded.push(path.clone());
            video.attach(file.slot, path);
        }

        let mut committed = video.clone();
        committed.clear_events();

        match staging {
            Staging::Insert => self.repository.insert(video.clone(), cancel).await?,
            Staging::Update => self.repository.update(video.clone(), cancel).await?,
        }
        self.unit_of_work.commit(cancel).await?;

        Ok(committed)
    }

    async fn compensate(
        &self,
        video_id: VideoId,
        uploaded: &[String],
        committed_paths: &HashSet<String>,
    ) {
        for path in uploaded {
            if committed_paths.contains(path) {
                warn!(
                    video_id = %video_id,
                    path = %path,
                    "Kept overwritten upload still referenced by the stored video"
                );
                continue;
            }
            match self.storage.delete(path).await {
                Ok(()) => {
                    warn!(video_id = %video_id, path = %path, "Removed upload after failed operation")
                }
                Err(err) => warn!(
                    video_id = %video_id,
                    path = %path,
                    error = %err,
                    "Could not remove upload after failed operation"
                ),
            }
        }
    }
}
