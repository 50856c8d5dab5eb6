//! Video domain events.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, EventId, Timestamp, VideoId};

use super::MediaSlot;

/// Raised when a new video is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoCreated {
    pub event_id: EventId,
    pub video_id: VideoId,
    pub title: String,
    pub occurred_at: Timestamp,
}

impl VideoCreated {
    pub fn new(video_id: VideoId, title: impl Into<String>) -> Self {
        Self {
            event_id: EventId::new(),
            video_id,
            title: title.into(),
            occurred_at: Timestamp::now(),
        }
    }
}

domain_event!(
    VideoCreated,
    event_type = "video.created",
    aggregate_id = video_id,
    aggregate_type = "Video",
    occurred_at = occurred_at,
    event_id = event_id
);

/// Raised when a video's descriptive fields change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoUpdated {
    pub event_id: EventId,
    pub video_id: VideoId,
    pub title: String,
    pub occurred_at: Timestamp,
}

impl VideoUpdated {
    pub fn new(video_id: VideoId, title: impl Into<String>) -> Self {
        Self {
            event_id: EventId::new(),
            video_id,
            title: title.into(),
            occurred_at: Timestamp::now(),
        }
    }
}

domain_event!(
    VideoUpdated,
    event_type = "video.updated",
    aggregate_id = video_id,
    aggregate_type = "Video",
    occurred_at = occurred_at,
    event_id = event_id
);

/// Raised when a raw media or trailer file lands in storage and needs encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMediaUploaded {
    pub event_id: EventId,
    pub video_id: VideoId,
    pub slot: MediaSlot,
    pub file_path: String,
    pub occurred_at: Timestamp,
}

impl VideoMediaUploaded {
    pub fn new(video_id: VideoId, slot: MediaSlot, file_path: impl Into<String>) -> Self {
        Self {
            event_id: EventId::new(),
            video_id,
            slot,
            file_path: file_path.into(),
            occurred_at: Timestamp::now(),
        }
    }
}

domain_event!(
    VideoMediaUploaded,
    event_type = "video.media_uploaded",
    aggregate_id = video_id,
    aggregate_type = "Video",
    occurred_at = occurred_at,
    event_id = event_id
);
