//! Genre domain events.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, CategoryId, EventId, GenreId, Timestamp};

/// Raised when a new genre is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreCreated {
    pub event_id: EventId,
    pub genre_id: GenreId,
    pub name: String,
    pub categories_id: Vec<CategoryId>,
    pub occurred_at: Timestamp,
}

impl GenreCreated {
    pub fn new(genre_id: GenreId, name: impl Into<String>, categories_id: Vec<CategoryId>) -> Self {
        Self {
            event_id: EventId::new(),
            genre_id,
            name: name.into(),
            categories_id,
            occurred_at: Timestamp::now(),
        }
    }
}

domain_event!(
    GenreCreated,
    event_type = "genre.created",
    aggregate_id = genre_id,
    aggregate_type = "Genre",
    occurred_at = occurred_at,
    event_id = event_id
);

/// Raised when a genre's name, activation or category set changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreUpdated {
    pub event_id: EventId,
    pub genre_id: GenreId,
    pub name: String,
    pub is_active: bool,
    pub categories_id: Vec<CategoryId>,
    pub occurred_at: Timestamp,
}

impl GenreUpdated {
    pub fn new(
        genre_id: GenreId,
        name: impl Into<String>,
        is_active: bool,
        categories_id: Vec<CategoryId>,
    ) -> Self {
        Self {
            event_id: EventId::new(),
            genre_id,
            name: name.into(),
            is_active,
            categories_id,
            occurred_at: Timestamp::now(),
        }
    }
}

domain_event!(
    GenreUpdated,
    event_type = "genre.updated",
    aggregate_id = genre_id,
    aggregate_type = "Genre",
    occurred_at = occurred_at,
    event_id = event_id
);
