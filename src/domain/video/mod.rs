//! Video domain module.
//!
//! # Events
//!
//! - `VideoCreated` - Raised when a new video is created
//! - `VideoUpdated` - Raised when descriptive fields change
//! - `VideoMediaUploaded` - Raised when a media or trailer file is attached

mod aggregate;
mod events;
mod media;
mod rating;

pub use aggregate::{Video, VideoAttributes, VideoState};
pub use events::{VideoCreated, VideoMediaUploaded, VideoUpdated};
pub use media::{AudioVideoMedia, ImageMedia, MediaSlot, MediaStatus};
pub use rating::Rating;
