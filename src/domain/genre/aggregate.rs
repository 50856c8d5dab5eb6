//! Genre aggregate.

use std::collections::BTreeSet;
use uuid::Uuid;

use crate::domain::foundation::{
    AggregateRoot, CategoryId, DomainError, EventBuffer, GenreId, Notification, Searchable,
    Timestamp,
};
use crate::domain::CatalogEvent;

use super::{GenreCreated, GenreUpdated};

pub const NAME_MAX_LENGTH: usize = 255;

/// Genre aggregate.
///
/// # Invariants
///
/// - `name` is non-blank and at most 255 characters
/// - `categories_id` holds each category id at most once
#[derive(Debug, Clone, PartialEq)]
pub struct Genre {
    id: GenreId,
    name: String,
    is_active: bool,
    categories_id: BTreeSet<CategoryId>,
    created_at: Timestamp,
    events: EventBuffer<CatalogEvent>,
}

impl Genre {
    /// Creates a genre and raises `GenreCreated`.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the name is blank or too long
    pub fn new(
        name: impl Into<String>,
        is_active: bool,
        categories_id: impl IntoIterator<Item = CategoryId>,
    ) -> Result<Self, DomainError> {
        let mut genre = Self {
            id: GenreId::new(),
            name: name.into(),
            is_active,
            categories_id: categories_id.into_iter().collect(),
            created_at: Timestamp::now(),
            events: EventBuffer::new(),
        };
        genre.validate()?;
        let event = GenreCreated::new(genre.id, genre.name.clone(), genre.category_list());
        genre.raise_event(event.into());
        Ok(genre)
    }

    /// Reconstitute a genre from persistence (no validation, no events).
    pub fn reconstitute(
        id: GenreId,
        name: String,
        is_active: bool,
        categories_id: impl IntoIterator<Item = CategoryId>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            is_active,
            categories_id: categories_id.into_iter().collect(),
            created_at,
            events: EventBuffer::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn categories_id(&self) -> &BTreeSet<CategoryId> {
        &self.categories_id
    }

    /// Renames the genre.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the new name is blank or too long; the genre
    ///   is left unchanged
    pub fn update(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        let name = name.into();
        let mut notification = Notification::new();
        notification.check_length("name", &name, 1, NAME_MAX_LENGTH);
        notification.into_result("Genre")?;

        self.name = name;
        self.raise_updated();
        Ok(())
    }

    pub fn activate(&mut self) {
        self.is_active = true;
        self.raise_updated();
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.raise_updated();
    }

    /// Adds a category reference. Adding an id already present is a no-op.
    pub fn add_category(&mut self, category_id: CategoryId) {
        if self.categories_id.insert(category_id) {
            self.raise_updated();
        }
    }

    pub fn remove_category(&mut self, category_id: CategoryId) {
        if self.categories_id.remove(&category_id) {
            self.raise_updated();
        }
    }

    /// Replaces the whole category set with `categories_id`.
    pub fn sync_categories(&mut self, categories_id: impl IntoIterator<Item = CategoryId>) {
        let next: BTreeSet<CategoryId> = categories_id.into_iter().collect();
        if next != self.categories_id {
            self.categories_id = next;
            self.raise_updated();
        }
    }

    fn category_list(&self) -> Vec<CategoryId> {
        self.categories_id.iter().copied().collect()
    }

    fn raise_updated(&mut self) {
        let event = GenreUpdated::new(
            self.id,
            self.name.clone(),
            self.is_active,
            self.category_list(),
        );
        self.raise_event(event.into());
    }

    fn validate(&self) -> Result<(), DomainError> {
        let mut notification = Notification::new();
        notification.check_length("name", &self.name, 1, NAME_MAX_LENGTH);
        notification.into_result("Genre")
    }
}

impl AggregateRoot for Genre {
    type Id = GenreId;
    type Event = CatalogEvent;

    fn id(&self) -> GenreId {
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

impl Searchable for Genre {
    const PRIMARY_TEXT_FIELD: &'static str = "name";

    fn primary_text(&self) -> &str {
        &self.name
    }

    fn sort_id(&self) -> Uuid {
        *self.id.as_uuid()
    }

    fn created_at_key(&self) -> Timestamp {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EventKind;

    #[test]
    fn duplicate_category_ids_collapse() {
        let category = CategoryId::new();
        let genre = Genre::new("Drama", true, [category, category]).unwrap();

        assert_eq!(genre.categories_id().len(), 1);
        assert_eq!(genre.pending_events()[0].kind(), EventKind::GenreCreated);
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = Genre::new("   ", true, []).unwrap_err();
        assert!(matches!(err, DomainError::ValidationFailed { .. }));
    }

    #[test]
    fn adding_existing_category_raises_nothing() {
        let category = CategoryId::new();
        let mut genre = Genre::new("Drama", true, [category]).unwrap();
        genre.clear_events();

        genre.add_category(category);

        assert!(genre.pending_events().is_empty());
    }

    #[test]
    fn sync_replaces_category_set() {
        let (a, b, c) = (CategoryId::new(), CategoryId::new(), CategoryId::new());
        let mut genre = Genre::new("Drama", true, [a, b]).unwrap();
        genre.clear_events();

        genre.sync_categories([b, c]);

        assert_eq!(genre.categories_id(), &BTreeSet::from([b, c]));
        assert_eq!(genre.pending_events().len(), 1);
        assert_eq!(genre.pending_events()[0].kind(), EventKind::GenreUpdated);
    }

    #[test]
    fn remove_category_drops_reference() {
        let a = CategoryId::new();
        let mut genre = Genre::new("Drama", true, [a]).unwrap();

        genre.remove_category(a);

        assert!(genre.categories_id().is_empty());
    }
}
