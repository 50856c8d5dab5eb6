//! Category domain events.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, CategoryId, EventId, Timestamp};

/// Raised when a new category is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCreated {
    pub event_id: EventId,
    pub category_id: CategoryId,
    pub name: String,
    pub occurred_at: Timestamp,
}

impl CategoryCreated {
    pub fn new(category_id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            event_id: EventId::new(),
            category_id,
            name: name.into(),
            occurred_at: Timestamp::now(),
        }
    }
}

domain_event!(
    CategoryCreated,
    event_type = "category.created",
    aggregate_id = category_id,
    aggregate_type = "Category",
    occurred_at = occurred_at,
    event_id = event_id
);

/// Raised when a category's name, description or activation changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryUpdated {
    pub event_id: EventId,
    pub category_id: CategoryId,
    pub name: String,
    pub is_active: bool,
    pub occurred_at: Timestamp,
}

impl CategoryUpdated {
    pub fn new(category_id: CategoryId, name: impl Into<String>, is_active: bool) -> Self {
        Self {
            event_id: EventId::new(),
            category_id,
            name: name.into(),
            is_active,
            occurred_at: Timestamp::now(),
        }
    }
}

domain_event!(
    CategoryUpdated,
    event_type = "category.updated",
    aggregate_id = category_id,
    aggregate_type = "Category",
    occurred_at = occurred_at,
    event_id = event_id
);
