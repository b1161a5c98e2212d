//! Cached legal destinations of a piece.

use serde::{Deserialize, Serialize};

use crate::core::Position;

/// A legal destination tagged with the symbol of the action it triggers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveTarget {
    pub pos: Position,
    pub symbol: char,
}

/// A piece's currently legal destinations.
///
/// Targets are in action-map order (offsets sorted by `x`, then `y`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSet {
    targets: Vec<MoveTarget>,
}

impl MoveSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pos: Position, symbol: char) {
        self.targets.push(MoveTarget { pos, symbol });
    }

    /// Check if `pos` is a legal destination.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.targets.iter().any(|t| t.pos == pos)
    }

    /// Symbol of the action triggered by moving to `pos`.
    #[must_use]
    pub fn symbol_at(&self, pos: Position) -> Option<char> {
        self.targets.iter().find(|t| t.pos == pos).map(|t| t.symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MoveTarget> {
        self.targets.iter()
    }

    /// Destinations only.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.targets.iter().map(|t| t.pos)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
