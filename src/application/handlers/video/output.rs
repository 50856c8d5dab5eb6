use serde::Serialize;

use super::relations::RelatedNames;
use crate::application::handlers::RelatedOutput;
use crate::domain::foundation::{
    AggregateRoot, CastMemberId, CategoryId, GenreId, Timestamp, VideoId,
};
use crate::domain::video::{AudioVideoMedia, ImageMedia, Rating, Video};

/// Video as returned by every video handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoOutput {
    pub id: VideoId,
    pub title: String,
    pub description: String,
    pub year_launched: i32,
    pub duration: i32,
    pub rating: Rating,
    pub opened: bool,
    pub published: bool,
    pub categories: Vec<RelatedOutput<CategoryId>>,
    pub genres: Vec<RelatedOutput<GenreId>>,
    pub cast_members_id: Vec<CastMemberId>,
    pub media: Option<AudioVideoMedia>,
    pub trailer: Option<AudioVideoMedia>,
    pub thumb: Option<ImageMedia>,
    pub thumb_half: Option<ImageMedia>,
    pub banner: Option<ImageMedia>,
    pub created_at: Timestamp,
}

impl VideoOutput {
    pub fn with_names(mut self, names: &RelatedNames) -> Self {
        for category in &mut self.categories {
            category.name = names.categories.get(&category.id).cloned();
        }
        for genre in &mut self.genres {
            genre.name = names.genres.get(&genre.id).cloned();
        }
        self
    }
}

impl From<&Video> for VideoOutput {
    fn from(video: &Video) -> Self {
        Self {
            id: video.id(),
            title: video.title().to_string(),
            description: video.description().to_string(),
            year_launched: video.year_launched(),
            duration: video.duration(),
            rating: video.rating(),
            opened: video.opened(),
            published: video.published(),
            categories: video
                .categories_id()
                .iter()
                .copied()
                .map(RelatedOutput::unnamed)
                .collect(),
            genres: video
                .genres_id()
                .iter()
                .copied()
                .map(RelatedOutput::unnamed)
                .collect(),
            cast_members_id: video.cast_members_id().iter().copied().collect(),
            media: video.media().cloned(),
            trailer: video.trailer().cloned(),
            thumb: video.thumb().cloned(),
            thumb_half: video.thumb_half().cloned(),
            banner: video.banner().cloned(),
            created_at: video.created_at(),
        }
    }
}
