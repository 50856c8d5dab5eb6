//! Video command and query handlers.

mod create_video;
mod delete_video;
mod get_video;
mod list_videos;
mod output;
mod relations;
mod update_media_status;
mod update_video;
mod upload_medias;

pub use create_video::{CreateVideoCommand, CreateVideoHandler};
pub use delete_video::{DeleteVideoCommand, DeleteVideoHandler};
pub use get_video::{GetVideoHandler, GetVideoQuery};
pub use list_videos::ListVideosHandler;
pub use output::VideoOutput;
pub use relations::{RelatedNames, VideoRelations};
pub use update_media_status::{
    EncodingOutcome, UpdateMediaStatusCommand, UpdateMediaStatusHandler,
};
pub use update_video::{UpdateVideoCommand, UpdateVideoHandler};
pub use upload_medias::{UploadMediasCommand, UploadMediasHandler};
