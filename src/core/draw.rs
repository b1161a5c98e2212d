//! Move records.

use serde::{Deserialize, Serialize};

use super::Position;

/// A proposed or played move: the piece standing on `from` acts on `to`.
///
/// The effect that fires is whatever the piece's type maps to the relative
/// offset `to - from`, so a `Draw` alone does not say whether the move is a
/// step, a capture or something stranger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Draw {
    pub from: Position,
    pub to: Position,
}

impl Draw {
    /// Create a new draw.
    #[must_use]
    pub const fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }

    /// Relative offset `to - from`.
    #[must_use]
    pub fn offset(self) -> Position {
        self.to - self.from
    }
}

impl std::fmt::Display for Draw {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
