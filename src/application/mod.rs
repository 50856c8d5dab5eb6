//! Application layer - Use-case handlers and the services they share.
//!
//! - `unit_of_work` - Commit protocol over a persistence session
//! - `related_ids` - Referential-integrity guard for cross-aggregate ids
//! - `media_upload` - Upload-then-commit with compensation
//! - `handlers` - One handler per catalog operation

pub mod handlers;
mod media_upload;
mod related_ids;
mod unit_of_work;

pub use media_upload::{object_name, MediaFile, MediaUploadCoordinator, Staging};
pub use related_ids::ensure_all_exist;
pub use unit_of_work::CommitCoordinator;
