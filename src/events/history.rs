//! Match history: the stack of performed draws.
//!
//! ## Lifecycle of a draw
//!
//! ```text
//! begin_draw ──► record(e) … record(e) ──► (kept)
//!                                      └─► pop_draw (undo in reverse)
//! ```
//!
//! Backed by `im::Vector`, so cloning the history for an operator copy
//! shares structure with the original.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::draw_event::DrawEvent;
use super::event::Event;

/// Stack of draws, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchHistory {
    draws: Vector<DrawEvent>,
}

impl MatchHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new, empty draw.
    pub fn begin_draw(&mut self) {
        self.draws.push_back(DrawEvent::new());
    }

    /// Append an event to the open draw.
    ///
    /// # Panics
    ///
    /// Panics if no draw has been opened.
    pub fn record(&mut self, event: Event) {
        self.draws
            .back_mut()
            .expect("Cannot record an event outside of a draw")
            .push(event);
    }

    /// Remove and return the most recent draw.
    ///
    /// # Panics
    ///
    /// Panics if the history is empty.
    pub fn pop_draw(&mut self) -> DrawEvent {
        self.draws
            .pop_back()
            .expect("Cannot undo: match history is empty")
    }

    /// The most recent draw.
    #[must_use]
    pub fn last(&self) -> Option<&DrawEvent> {
        self.draws.back()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&DrawEvent> {
        self.draws.get(index)
    }

    /// Number of draws.
    #[must_use]
    pub fn len(&self) -> usize {
        self.draws.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    /// Iterate oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &DrawEvent> {
        self.draws.iter()
    }

    /// Draws recorded at or after index `start`.
    pub fn draws_since(&self, start: usize) -> impl Iterator<Item = &DrawEvent> {
        self.draws.iter().skip(start)
    }
}
