//! CastMember aggregate.

use uuid::Uuid;

use crate::domain::foundation::{
    AggregateRoot, CastMemberId, DomainError, EventBuffer, Notification, Searchable, Timestamp,
};
use crate::domain::CatalogEvent;

use super::{CastMemberCreated, CastMemberType, CastMemberUpdated};

pub const NAME_MAX_LENGTH: usize = 255;

/// A person credited on videos, either as director or actor.
#[derive(Debug, Clone, PartialEq)]
pub struct CastMember {
    id: CastMemberId,
    name: String,
    member_type: CastMemberType,
    created_at: Timestamp,
    events: EventBuffer<CatalogEvent>,
}

impl CastMember {
    /// Creates a cast member and raises `CastMemberCreated`.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the name is blank or longer than 255 characters
    pub fn new(
        name: impl Into<String>,
        member_type: CastMemberType,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        Self::validate_name(&name)?;

        let mut member = Self {
            id: CastMemberId::new(),
            name,
            member_type,
            created_at: Timestamp::now(),
            events: EventBuffer::new(),
        };
        let event = CastMemberCreated::new(member.id, member.name.clone(), member_type);
        member.raise_event(event.into());
        Ok(member)
    }

    /// Reconstitute a cast member from persistence (no validation, no events).
    pub fn reconstitute(
        id: CastMemberId,
        name: String,
        member_type: CastMemberType,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            member_type,
            created_at,
            events: EventBuffer::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn member_type(&self) -> CastMemberType {
        self.member_type
    }

    /// Changes name and type together.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the new name is invalid; nothing changes
    pub fn update(
        &mut self,
        name: impl Into<String>,
        member_type: CastMemberType,
    ) -> Result<(), DomainError> {
        let name = name.into();
        Self::validate_name(&name)?;

        self.name = name;
        self.member_type = member_type;
        let event = CastMemberUpdated::new(self.id, self.name.clone(), member_type);
        self.raise_event(event.into());
        Ok(())
    }

    fn validate_name(name: &str) -> Result<(), DomainError> {
        let mut notification = Notification::new();
        notification.check_length("name", name, 1, NAME_MAX_LENGTH);
        notification.into_result("CastMember")
    }
}

impl AggregateRoot for CastMember {
    type Id = CastMemberId;
    type Event = CatalogEvent;

    fn id(&self) -> CastMemberId {
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

impl Searchable for CastMember {
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
    fn create_then_update_raises_two_events_in_order() {
        let mut member = CastMember::new("Ana", CastMemberType::Actor).unwrap();
        member.update("Ana Maria", CastMemberType::Director).unwrap();

        let kinds: Vec<_> = member.pending_events().iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![EventKind::CastMemberCreated, EventKind::CastMemberUpdated]
        );
        assert_eq!(member.member_type(), CastMemberType::Director);
    }

    #[test]
    fn name_over_limit_is_rejected() {
        let result = CastMember::new("a".repeat(256), CastMemberType::Actor);
        assert!(matches!(result, Err(DomainError::ValidationFailed { .. })));
    }
}
