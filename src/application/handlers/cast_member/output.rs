use serde::Serialize;

use crate::domain::cast_member::{CastMember, CastMemberType};
use crate::domain::foundation::{AggregateRoot, CastMemberId, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CastMemberOutput {
    pub id: CastMemberId,
    pub name: String,
    #[serde(rename = "type")]
    pub member_type: CastMemberType,
    pub created_at: Timestamp,
}

impl From<&CastMember> for CastMemberOutput {
    fn from(member: &CastMember) -> Self {
        Self {
            id: member.id(),
            name: member.name().to_string(),
            member_type: member.member_type(),
            created_at: member.created_at(),
        }
    }
}
