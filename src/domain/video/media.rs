//! Media slots attached to a video.
//!
//! Image slots (thumb, thumb-half, banner) hold only a stored path. The two
//! audio/video slots (media, trailer) also track the encoder's progress.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// The five independently settable media slots of a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaSlot {
    Media,
    Trailer,
    Thumb,
    ThumbHalf,
    Banner,
}

impl MediaSlot {
    pub const ALL: [MediaSlot; 5] = [
        MediaSlot::Media,
        MediaSlot::Trailer,
        MediaSlot::Thumb,
        MediaSlot::ThumbHalf,
        MediaSlot::Banner,
    ];

    /// Name used in stored object names (`{video_id}-{slot}.{ext}`).
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaSlot::Media => "media",
            MediaSlot::Trailer => "trailer",
            MediaSlot::Thumb => "thumb",
            MediaSlot::ThumbHalf => "thumb_half",
            MediaSlot::Banner => "banner",
        }
    }

    /// True for slots that go through the encoder.
    pub fn is_audio_video(&self) -> bool {
        matches!(self, MediaSlot::Media | MediaSlot::Trailer)
    }
}

impl fmt::Display for MediaSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaSlot {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        MediaSlot::ALL
            .into_iter()
            .find(|slot| slot.as_str() == wanted)
            .ok_or_else(|| {
                ValidationError::invalid_format("slot", format!("unknown media slot '{}'", s))
            })
    }
}

/// Encoding progress of an audio/video slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Error,
}

impl MediaStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaStatus::Pending => "pending",
            MediaStatus::Processing => "processing",
            MediaStatus::Completed => "completed",
            MediaStatus::Error => "error",
        }
    }
}

impl fmt::Display for MediaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(MediaStatus::Pending),
            "processing" => Ok(MediaStatus::Processing),
            "completed" => Ok(MediaStatus::Completed),
            "error" => Ok(MediaStatus::Error),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown media status '{}'", other),
            )),
        }
    }
}

/// A stored image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMedia {
    pub path: String,
}

impl ImageMedia {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// A stored audio/video file plus its encoding state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioVideoMedia {
    pub raw_path: String,
    pub encoded_path: Option<String>,
    pub status: MediaStatus,
}

impl AudioVideoMedia {
    /// A freshly uploaded file, not yet seen by the encoder.
    pub fn pending(raw_path: impl Into<String>) -> Self {
        Self {
            raw_path: raw_path.into(),
            encoded_path: None,
            status: MediaStatus::Pending,
        }
    }

    pub fn processing(self) -> Self {
        Self {
            status: MediaStatus::Processing,
            ..self
        }
    }

    pub fn completed(self, encoded_path: impl Into<String>) -> Self {
        Self {
            encoded_path: Some(encoded_path.into()),
            status: MediaStatus::Completed,
            ..self
        }
    }

    pub fn failed(self) -> Self {
        Self {
            status: MediaStatus::Error,
            ..self
        }
    }
}
