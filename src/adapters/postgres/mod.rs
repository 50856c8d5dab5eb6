//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresSession` - Stages changes and writes them in one transaction
//! - `PostgresCategoryRepository`, `PostgresGenreRepository`,
//!   `PostgresCastMemberRepository`, `PostgresVideoRepository` - Read from
//!   the pool, stage writes on the session

mod cast_member_repository;
mod category_repository;
mod genre_repository;
mod session;
mod support;
mod video_repository;

pub use cast_member_repository::PostgresCastMemberRepository;
pub use category_repository::PostgresCategoryRepository;
pub use genre_repository::PostgresGenreRepository;
pub use session::PostgresSession;
pub use video_repository::PostgresVideoRepository;
