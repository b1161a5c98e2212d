//! One turn's worth of events.

use serde::{Deserialize, Serialize};

use super::event::Event;

/// Ordered events produced by one draw, chained effects included.
///
/// Appended to while the draw is performed, drained from the back when it
/// is undone.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawEvent {
    events: Vec<Event>,
}

impl DrawEvent {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events in application order.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Event> {
        self.events.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Check if any event in this draw buried a piece.
    #[must_use]
    pub fn has_casualties(&self) -> bool {
        self.events.iter().any(|e| e.destroyed().is_some())
    }
}
