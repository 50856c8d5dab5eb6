//! Cast member domain module.

mod aggregate;
mod events;
mod member_type;

pub use aggregate::CastMember;
pub use events::{CastMemberCreated, CastMemberUpdated};
pub use member_type::CastMemberType;
