//! The closed set of events raised by catalog aggregates.
//!
//! `CatalogEvent` wraps each payload struct; `EventKind` is its fieldless tag,
//! used as the dispatch key by the event publisher.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::cast_member::{CastMemberCreated, CastMemberUpdated};
use super::category::{CategoryCreated, CategoryUpdated};
use super::foundation::{DomainEvent, EventId, Timestamp};
use super::genre::{GenreCreated, GenreUpdated};
use super::video::{VideoCreated, VideoMediaUploaded, VideoUpdated};

macro_rules! catalog_events {
    ($($variant:ident),+ $(,)?) => {
        /// Any event a catalog aggregate can raise.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "kind", content = "payload")]
        pub enum CatalogEvent {
            $($variant($variant),)+
        }

        /// Fieldless tag of a [`CatalogEvent`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum EventKind {
            $($variant,)+
        }

        impl EventKind {
            pub const ALL: &'static [EventKind] = &[$(EventKind::$variant,)+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(EventKind::$variant => stringify!($variant),)+
                }
            }
        }

        impl CatalogEvent {
            pub fn kind(&self) -> EventKind {
                match self {
                    $(CatalogEvent::$variant(_) => EventKind::$variant,)+
                }
            }

            fn inner(&self) -> &dyn DomainEvent {
                match self {
                    $(CatalogEvent::$variant(event) => event,)+
                }
            }
        }

        $(
            impl From<$variant> for CatalogEvent {
                fn from(event: $variant) -> Self {
                    CatalogEvent::$variant(event)
                }
            }
        )+
    };
}

catalog_events!(
    CategoryCreated,
    CategoryUpdated,
    GenreCreated,
    GenreUpdated,
    CastMemberCreated,
    CastMemberUpdated,
    VideoCreated,
    VideoUpdated,
    VideoMediaUploaded,
);

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DomainEvent for CatalogEvent {
    fn event_type(&self) -> &'static str {
        self.inner().event_type()
    }

    fn aggregate_id(&self) -> String {
        self.inner().aggregate_id()
    }

    fn aggregate_type(&self) -> &'static str {
        self.inner().aggregate_type()
    }

    fn occurred_at(&self) -> Timestamp {
        self.inner().occurred_at()
    }

    fn event_id(&self) -> EventId {
        self.inner().event_id()
    }
}
