//! Piece identification.
//!
//! Every piece placed into a game gets a `PieceId` from that game's own
//! sequence (see `GameOperatorBuilder`). Ids are never reused within a game
//! and survive `GameOperator::copy`, so kings can be re-linked by id.

use serde::{Deserialize, Serialize};

/// Unique identifier for a piece within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u32);

impl PieceId {
    /// Create a new piece ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Piece({})", self.0)
    }
}
