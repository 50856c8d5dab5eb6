//! Category aggregate.

use uuid::Uuid;

use crate::domain::foundation::{
    AggregateRoot, CategoryId, DomainError, EventBuffer, Notification, Searchable, Timestamp,
};
use crate::domain::CatalogEvent;

use super::{CategoryCreated, CategoryUpdated};

pub const NAME_MIN_LENGTH: usize = 3;
pub const NAME_MAX_LENGTH: usize = 255;
pub const DESCRIPTION_MAX_LENGTH: usize = 10_000;

/// Category aggregate - a classification videos and genres refer to by id.
///
/// # Invariants
///
/// - `name` is 3-255 characters
/// - `description` is at most 10 000 characters (may be empty)
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    id: CategoryId,
    name: String,
    description: String,
    is_active: bool,
    created_at: Timestamp,
    events: EventBuffer<CatalogEvent>,
}

impl Category {
    /// Creates a category and raises `CategoryCreated`.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` listing every violated rule
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        is_active: bool,
    ) -> Result<Self, DomainError> {
        let mut category = Self {
            id: CategoryId::new(),
            name: name.into(),
            description: description.into(),
            is_active,
            created_at: Timestamp::now(),
            events: EventBuffer::new(),
        };
        category.validate()?;
        category.raise_event(CategoryCreated::new(category.id, category.name.clone()).into());
        Ok(category)
    }

    /// Reconstitute a category from persistence (no validation, no events).
    pub fn reconstitute(
        id: CategoryId,
        name: String,
        description: String,
        is_active: bool,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            description,
            is_active,
            created_at,
            events: EventBuffer::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Changes the name and, when given, the description.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the resulting state breaks an invariant; the
    ///   category is left unchanged
    pub fn update(
        &mut self,
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<(), DomainError> {
        let mut candidate = self.clone();
        candidate.name = name.into();
        if let Some(description) = description {
            candidate.description = description;
        }
        candidate.validate()?;

        self.name = candidate.name;
        self.description = candidate.description;
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

    fn raise_updated(&mut self) {
        let event = CategoryUpdated::new(self.id, self.name.clone(), self.is_active);
        self.raise_event(event.into());
    }

    fn validate(&self) -> Result<(), DomainError> {
        let mut notification = Notification::new();
        notification.check_length("name", &self.name, NAME_MIN_LENGTH, NAME_MAX_LENGTH);
        notification.check_length("description", &self.description, 0, DESCRIPTION_MAX_LENGTH);
        notification.into_result("Category")
    }
}

impl AggregateRoot for Category {
    type Id = CategoryId;
    type Event = CatalogEvent;

    fn id(&self) -> CategoryId {
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

impl Searchable for Category {
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
