//! Cast member domain events.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, CastMemberId, EventId, Timestamp};

use super::CastMemberType;

/// Raised when a new cast member is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMemberCreated {
    pub event_id: EventId,
    pub cast_member_id: CastMemberId,
    pub name: String,
    pub member_type: CastMemberType,
    pub occurred_at: Timestamp,
}

impl CastMemberCreated {
    pub fn new(
        cast_member_id: CastMemberId,
        name: impl Into<String>,
        member_type: CastMemberType,
    ) -> Self {
        Self {
            event_id: EventId::new(),
            cast_member_id,
            name: name.into(),
            member_type,
            occurred_at: Timestamp::now(),
        }
    }
}

domain_event!(
    CastMemberCreated,
    event_type = "cast_member.created",
    aggregate_id = cast_member_id,
    aggregate_type = "CastMember",
    occurred_at = occurred_at,
    event_id = event_id
);

/// Raised when a cast member's name or type changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMemberUpdated {
    pub event_id: EventId,
    pub cast_member_id: CastMemberId,
    pub name: String,
    pub member_type: CastMemberType,
    pub occurred_at: Timestamp,
}

impl CastMemberUpdated {
    pub fn new(
        cast_member_id: CastMemberId,
        name: impl Into<String>,
        member_type: CastMemberType,
    ) -> Self {
        Self {
            event_id: EventId::new(),
            cast_member_id,
            name: name.into(),
            member_type,
            occurred_at: Timestamp::now(),
        }
    }
}

domain_event!(
    CastMemberUpdated,
    event_type = "cast_member.updated",
    aggregate_id = cast_member_id,
    aggregate_type = "CastMember",
    occurred_at = occurred_at,
    event_id = event_id
);
