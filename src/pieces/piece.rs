//! Pieces: identity-bearing board entities.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{PieceId, PlayerId, Position};

use super::move_set::MoveSet;
use super::piece_type::PieceType;

/// A piece in a game.
///
/// Owner and type can change through conversion effects; the id and king
/// flag never do. `position` is `None` while the piece lies in the
/// graveyard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub owner: PlayerId,
    pub position: Option<Position>,
    pub piece_type: Arc<PieceType>,
    pub king: bool,
    /// Legal destinations as of the last recomputation.
    pub move_set: MoveSet,
}

impl Piece {
    /// Create an unplaced piece.
    #[must_use]
    pub fn new(id: PieceId, owner: PlayerId, piece_type: Arc<PieceType>, king: bool) -> Self {
        Self {
            id,
            owner,
            position: None,
            piece_type,
            king,
            move_set: MoveSet::new(),
        }
    }

    /// Check if the piece stands on the board.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.position.is_some()
    }

    /// Level of the piece's current type.
    #[must_use]
    pub fn level(&self) -> u32 {
        self.piece_type.level()
    }

    /// Check if `to` is in the cached move set.
    #[must_use]
    pub fn is_possible_move(&self, to: Position) -> bool {
        self.move_set.contains(to)
    }

    /// Check if `other` belongs to the opposing side.
    #[must_use]
    pub fn is_enemy_of(&self, other: &Piece) -> bool {
        self.owner != other.owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::presets;

    #[test]
    fn test_piece_basics() {
        let pawn = presets::pawn();
        let mut a = Piece::new(PieceId(1), PlayerId::ONE, Arc::clone(&pawn), false);
        let b = Piece::new(PieceId(2), PlayerId::TWO, pawn, true);

        assert!(!a.is_alive());
        a.position = Some(Position::new(2, 2));
        assert!(a.is_alive());

        assert!(a.is_enemy_of(&b));
        assert!(!a.is_enemy_of(&a));
        assert_eq!(a.level(), b.level());

        a.move_set.push(Position::new(2, 1), 'F');
        assert!(a.is_possible_move(Position::new(2, 1)));
        assert!(!a.is_possible_move(Position::new(2, 3)));
    }
}
