//! Per-aggregate repository ports.
//!
//! Each is the shared [`BatchRepository`] contract fixed to one aggregate
//! type. They exist as named traits so handlers can depend on
//! `Arc<dyn CategoryRepository>` rather than on the generic form.

use crate::domain::cast_member::CastMember;
use crate::domain::category::Category;
use crate::domain::foundation::{BatchRepository, CastMemberId, CategoryId, GenreId, VideoId};
use crate::domain::genre::Genre;
use crate::domain::video::Video;

pub trait CategoryRepository: BatchRepository<Category, CategoryId> {}

pub trait GenreRepository: BatchRepository<Genre, GenreId> {}

pub trait CastMemberRepository: BatchRepository<CastMember, CastMemberId> {}

pub trait VideoRepository: BatchRepository<Video, VideoId> {}
