//! Aggregate root capability shared by every persisted catalog entity.

use super::{EventBuffer, Timestamp};

/// An entity with stable identity that records pending domain events.
///
/// Implementors embed an [`EventBuffer`] and expose it through `events` /
/// `events_mut`; the buffer operations themselves are provided here.
/// Raising an event never publishes it. Publication happens only when the
/// unit of work commits.
pub trait AggregateRoot {
    type Id: Copy + Eq + std::fmt::Debug + std::fmt::Display;
    type Event;

    /// Returns the identifier fixed at construction.
    fn id(&self) -> Self::Id;

    /// Returns the creation timestamp fixed at construction.
    fn created_at(&self) -> Timestamp;

    fn events(&self) -> &EventBuffer<Self::Event>;

    fn events_mut(&mut self) -> &mut EventBuffer<Self::Event>;

    /// Appends an event to the pending buffer.
    fn raise_event(&mut self, event: Self::Event) {
        self.events_mut().raise(event);
    }

    /// Read-only view of pending events, in insertion order.
    fn pending_events(&self) -> &[Self::Event] {
        self.events().as_slice()
    }

    fn clear_events(&mut self) {
        self.events_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        id: u32,
        created_at: Timestamp,
        events: EventBuffer<&'static str>,
    }

    impl AggregateRoot for Counter {
        type Id = u32;
        type Event = &'static str;

        fn id(&self) -> u32 {
            self.id
        }

        fn created_at(&self) -> Timestamp {
            self.created_at
        }

        fn events(&self) -> &EventBuffer<&'static str> {
            &self.events
        }

        fn events_mut(&mut self) -> &mut EventBuffer<&'static str> {
            &mut self.events
        }
    }

    #[test]
    fn raise_and_clear_round_trip_through_default_methods() {
        let mut counter = Counter {
            id: 7,
            created_at: Timestamp::now(),
            events: EventBuffer::new(),
        };

        counter.raise_event("incremented");
        counter.raise_event("incremented-again");
        assert_eq!(counter.pending_events(), &["incremented", "incremented-again"]);

        counter.clear_events();
        assert!(counter.pending_events().is_empty());
        assert_eq!(counter.id(), 7);
    }
}
