//! Cast member command and query handlers.

mod create_cast_member;
mod delete_cast_member;
mod get_cast_member;
mod list_cast_members;
mod output;
mod update_cast_member;

pub use create_cast_member::{CreateCastMemberCommand, CreateCastMemberHandler};
pub use delete_cast_member::{DeleteCastMemberCommand, DeleteCastMemberHandler};
pub use get_cast_member::{GetCastMemberHandler, GetCastMemberQuery};
pub use list_cast_members::ListCastMembersHandler;
pub use output::CastMemberOutput;
pub use update_cast_member::{UpdateCastMemberCommand, UpdateCastMemberHandler};
