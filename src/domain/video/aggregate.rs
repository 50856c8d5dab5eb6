//! Video aggregate.

use std::collections::BTreeSet;
use uuid::Uuid;

use crate::domain::foundation::{
    AggregateRoot, CastMemberId, CategoryId, DomainError, EventBuffer, GenreId, Notification,
    Searchable, Timestamp, ValidationError, VideoId,
};
use crate::domain::CatalogEvent;

use super::{
    AudioVideoMedia, ImageMedia, MediaSlot, Rating, VideoCreated, VideoMediaUploaded,
    VideoUpdated,
};

pub const TITLE_MAX_LENGTH: usize = 255;
pub const DESCRIPTION_MAX_LENGTH: usize = 4_000;

/// Descriptive fields supplied on create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoAttributes {
    pub title: String,
    pub description: String,
    pub year_launched: i32,
    pub duration: i32,
    pub rating: Rating,
    pub opened: bool,
}

/// Everything persisted for a video, used to reconstitute it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoState {
    pub attributes: VideoAttributes,
    pub published: bool,
    pub categories_id: BTreeSet<CategoryId>,
    pub genres_id: BTreeSet<GenreId>,
    pub cast_members_id: BTreeSet<CastMemberId>,
    pub media: Option<AudioVideoMedia>,
    pub trailer: Option<AudioVideoMedia>,
    pub thumb: Option<ImageMedia>,
    pub thumb_half: Option<ImageMedia>,
    pub banner: Option<ImageMedia>,
}

/// Video aggregate.
///
/// # Invariants
///
/// - `title` is non-blank and at most 255 characters
/// - `description` is non-blank and at most 4 000 characters
/// - a media slot is only set after its upload succeeded
#[derive(Debug, Clone, PartialEq)]
pub struct Video {
    id: VideoId,
    state: VideoState,
    created_at: Timestamp,
    events: EventBuffer<CatalogEvent>,
}

impl Video {
    /// Creates an unpublished video with empty media slots and raises `VideoCreated`.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` listing every violated rule
    pub fn new(
        attributes: VideoAttributes,
        categories_id: impl IntoIterator<Item = CategoryId>,
        genres_id: impl IntoIterator<Item = GenreId>,
        cast_members_id: impl IntoIterator<Item = CastMemberId>,
    ) -> Result<Self, DomainError> {
        Self::validate(&attributes)?;

        let mut video = Self {
            id: VideoId::new(),
            state: VideoState {
                attributes,
                published: false,
                categories_id: categories_id.into_iter().collect(),
                genres_id: genres_id.into_iter().collect(),
                cast_members_id: cast_members_id.into_iter().collect(),
                media: None,
                trailer: None,
                thumb: None,
                thumb_half: None,
                banner: None,
            },
            created_at: Timestamp::now(),
            events: EventBuffer::new(),
        };
        let event = VideoCreated::new(video.id, video.title().to_string());
        video.raise_event(event.into());
        Ok(video)
    }

    /// Reconstitute a video from persistence (no validation, no events).
    pub fn reconstitute(id: VideoId, state: VideoState, created_at: Timestamp) -> Self {
        Self {
            id,
            state,
            created_at,
            events: EventBuffer::new(),
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Accessors
    // ════════════════════════════════════════════════════════════════════════

    pub fn state(&self) -> &VideoState {
        &self.state
    }

    pub fn title(&self) -> &str {
        &self.state.attributes.title
    }

    pub fn description(&self) -> &str {
        &self.state.attributes.description
    }

    pub fn year_launched(&self) -> i32 {
        self.state.attributes.year_launched
    }

    pub fn duration(&self) -> i32 {
        self.state.attributes.duration
    }

    pub fn rating(&self) -> Rating {
        self.state.attributes.rating
    }

    pub fn opened(&self) -> bool {
        self.state.attributes.opened
    }

    pub fn published(&self) -> bool {
        self.state.published
    }

    pub fn categories_id(&self) -> &BTreeSet<CategoryId> {
        &self.state.categories_id
    }

    pub fn genres_id(&self) -> &BTreeSet<GenreId> {
        &self.state.genres_id
    }

    pub fn cast_members_id(&self) -> &BTreeSet<CastMemberId> {
        &self.state.cast_members_id
    }

    pub fn media(&self) -> Option<&AudioVideoMedia> {
        self.state.media.as_ref()
    }

    pub fn trailer(&self) -> Option<&AudioVideoMedia> {
        self.state.trailer.as_ref()
    }

    pub fn thumb(&self) -> Option<&ImageMedia> {
        self.state.thumb.as_ref()
    }

    pub fn thumb_half(&self) -> Option<&ImageMedia> {
        self.state.thumb_half.as_ref()
    }

    pub fn banner(&self) -> Option<&ImageMedia> {
        self.state.banner.as_ref()
    }

    /// Stored path held by `slot`, if any. For media and trailer this is the raw upload.
    pub fn slot_path(&self, slot: MediaSlot) -> Option<&str> {
        match slot {
            MediaSlot::Media => self.media().map(|m| m.raw_path.as_str()),
            MediaSlot::Trailer => self.trailer().map(|m| m.raw_path.as_str()),
            MediaSlot::Thumb => self.thumb().map(|m| m.path.as_str()),
            MediaSlot::ThumbHalf => self.thumb_half().map(|m| m.path.as_str()),
            MediaSlot::Banner => self.banner().map(|m| m.path.as_str()),
        }
    }

    /// Every stored path referenced by this video, including encoded outputs.
    pub fn stored_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = MediaSlot::ALL
            .into_iter()
            .filter_map(|slot| self.slot_path(slot).map(str::to_string))
            .collect();
        paths.extend(
            [self.media(), self.trailer()]
                .into_iter()
                .flatten()
                .filter_map(|m| m.encoded_path.clone()),
        );
        paths
    }

    // ════════════════════════════════════════════════════════════════════════
    // Mutations
    // ════════════════════════════════════════════════════════════════════════

    /// Replaces the descriptive fields.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the new attributes break an invariant; nothing changes
    pub fn update(&mut self, attributes: VideoAttributes) -> Result<(), DomainError> {
        Self::validate(&attributes)?;
        self.state.attributes = attributes;
        let event = VideoUpdated::new(self.id, self.title().to_string());
        self.raise_event(event.into());
        Ok(())
    }

    pub fn publish(&mut self) {
        self.state.published = true;
    }

    pub fn unpublish(&mut self) {
        self.state.published = false;
    }

    pub fn sync_categories(&mut self, ids: impl IntoIterator<Item = CategoryId>) {
        self.state.categories_id = ids.into_iter().collect();
    }

    pub fn sync_genres(&mut self, ids: impl IntoIterator<Item = GenreId>) {
        self.state.genres_id = ids.into_iter().collect();
    }

    pub fn sync_cast_members(&mut self, ids: impl IntoIterator<Item = CastMemberId>) {
        self.state.cast_members_id = ids.into_iter().collect();
    }

    /// Attaches a freshly uploaded primary media file and raises `VideoMediaUploaded`.
    pub fn update_media(&mut self, raw_path: impl Into<String>) {
        let media = AudioVideoMedia::pending(raw_path);
        let event = VideoMediaUploaded::new(self.id, MediaSlot::Media, media.raw_path.clone());
        self.state.media = Some(media);
        self.raise_event(event.into());
    }

    /// Attaches a freshly uploaded trailer and raises `VideoMediaUploaded`.
    pub fn update_trailer(&mut self, raw_path: impl Into<String>) {
        let trailer = AudioVideoMedia::pending(raw_path);
        let event = VideoMediaUploaded::new(self.id, MediaSlot::Trailer, trailer.raw_path.clone());
        self.state.trailer = Some(trailer);
        self.raise_event(event.into());
    }

    pub fn replace_thumb(&mut self, path: impl Into<String>) {
        self.state.thumb = Some(ImageMedia::new(path));
    }

    pub fn replace_thumb_half(&mut self, path: impl Into<String>) {
        self.state.thumb_half = Some(ImageMedia::new(path));
    }

    pub fn replace_banner(&mut self, path: impl Into<String>) {
        self.state.banner = Some(ImageMedia::new(path));
    }

    /// Stores `path` in `slot`, going through the slot-specific mutator.
    pub fn attach(&mut self, slot: MediaSlot, path: impl Into<String>) {
        match slot {
            MediaSlot::Media => self.update_media(path),
            MediaSlot::Trailer => self.update_trailer(path),
            MediaSlot::Thumb => self.replace_thumb(path),
            MediaSlot::ThumbHalf => self.replace_thumb_half(path),
            MediaSlot::Banner => self.replace_banner(path),
        }
    }

    /// Marks an audio/video slot as handed to the encoder.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if `slot` is an image slot or holds no file
    pub fn mark_sent_to_encode(&mut self, slot: MediaSlot) -> Result<(), DomainError> {
        self.transition(slot, AudioVideoMedia::processing)
    }

    /// Records a successful encode of `slot` with its output location.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if `slot` is an image slot or holds no file
    pub fn complete_encoding(
        &mut self,
        slot: MediaSlot,
        encoded_path: impl Into<String>,
    ) -> Result<(), DomainError> {
        let encoded_path = encoded_path.into();
        self.transition(slot, |media| media.completed(encoded_path))
    }

    /// Records a failed encode of `slot`.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if `slot` is an image slot or holds no file
    pub fn fail_encoding(&mut self, slot: MediaSlot) -> Result<(), DomainError> {
        self.transition(slot, AudioVideoMedia::failed)
    }

    fn transition(
        &mut self,
        slot: MediaSlot,
        next: impl FnOnce(AudioVideoMedia) -> AudioVideoMedia,
    ) -> Result<(), DomainError> {
        let target = match slot {
            MediaSlot::Media => &mut self.state.media,
            MediaSlot::Trailer => &mut self.state.trailer,
            other => {
                return Err(DomainError::validation(
                    "Video",
                    ValidationError::invalid_format(
                        "slot",
                        format!("'{}' is not an encodable slot", other),
                    ),
                ))
            }
        };
        let current = target.take().ok_or_else(|| {
            DomainError::validation(
                "Video",
                ValidationError::invalid_format(
                    "slot",
                    format!("no file uploaded for '{}'", slot),
                ),
            )
        })?;
        *target = Some(next(current));
        Ok(())
    }

    fn validate(attributes: &VideoAttributes) -> Result<(), DomainError> {
        let mut notification = Notification::new();
        notification.check_length("title", &attributes.title, 1, TITLE_MAX_LENGTH);
        notification.check_length(
            "description",
            &attributes.description,
            1,
            DESCRIPTION_MAX_LENGTH,
        );
        if attributes.year_launched <= 0 {
            notification.add(ValidationError::invalid_format(
                "year_launched",
                "must be a positive year",
            ));
        }
        if attributes.duration < 0 {
            notification.add(ValidationError::invalid_format(
                "duration",
                "cannot be negative",
            ));
        }
        notification.into_result("Video")
    }
}

impl AggregateRoot for Video {
    type Id = VideoId;
    type Event = CatalogEvent;

    fn id(&self) -> VideoId {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn events(&self) -> &EventBuffer<CatalogEvent> {
        &self.events
    }

    fn events_mut(&mut self) -> &mut EventBuffer<CatalogEvent> {
        &mut self.events
    }
}

impl Searchable for Video {
    const PRIMARY_TEXT_FIELD: &'static str = "title";

    fn primary_text(&self) -> &str {
        self.title()
    }

    fn sort_id(&self) -> Uuid {
        *self.id.as_uuid()
    }

    fn created_at_key(&self) -> Timestamp {
        self.created_at
    }
}
