//! Step-by-step construction of a `GameOperator`.
//!
//! Piece ids are handed out from the builder's own sequence in placement
//! order, starting at 0. Placement problems do not abort the chain: the
//! first one is latched and returned by `build()`.
//!
//! ```
//! use proc_chess::core::{PlayerId, Position};
//! use proc_chess::pieces::presets;
//! use proc_chess::state::{BuildError, GameOperatorBuilder};
//!
//! let king = presets::king();
//! let err = GameOperatorBuilder::new(5, 5)
//!     .king(PlayerId::ONE, &king, Position::new(2, 4))
//!     .build()
//!     .unwrap_err();
//! assert_eq!(err, BuildError::MissingKing(PlayerId::TWO));
//! ```

use std::sync::Arc;

use im::OrdMap;
use tracing::debug;

use crate::board::Board;
use crate::core::{PieceId, PlayerId, PlayerMap, Position};
use crate::events::MatchHistory;
use crate::pieces::{Piece, PieceType};

use super::error::{BuildError, BuildResult};
use super::operator::GameOperator;

/// Builder for `GameOperator`.
#[derive(Clone, Debug)]
pub struct GameOperatorBuilder {
    board: Board,
    pieces: OrdMap<PieceId, Piece>,
    kings: PlayerMap<Option<PieceId>>,
    first_turn: PlayerId,
    next_id: u32,
    error: Option<BuildError>,
}

impl GameOperatorBuilder {
    /// Start an empty `width x height` board. `PlayerId::ONE` moves first
    /// unless `first_turn` says otherwise.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not positive.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            board: Board::new(width, height),
            pieces: OrdMap::new(),
            kings: PlayerMap::with_default(),
            first_turn: PlayerId::ONE,
            next_id: 0,
            error: None,
        }
    }

    /// Place a regular piece.
    #[must_use]
    pub fn piece(mut self, owner: PlayerId, piece_type: &Arc<PieceType>, pos: Position) -> Self {
        self.place(owner, piece_type, pos, false);
        self
    }

    /// Place a regular piece at the board mirror of `pos`.
    #[must_use]
    pub fn piece_mirrored(self, owner: PlayerId, piece_type: &Arc<PieceType>, pos: Position) -> Self {
        let mirrored = self.board.mirror(pos);
        self.piece(owner, piece_type, mirrored)
    }

    /// Place `owner`'s king.
    #[must_use]
    pub fn king(mut self, owner: PlayerId, piece_type: &Arc<PieceType>, pos: Position) -> Self {
        if self.kings[owner].is_some() {
            self.latch(BuildError::DuplicateKing(owner));
            return self;
        }
        if let Some(id) = self.place(owner, piece_type, pos, true) {
            self.kings[owner] = Some(id);
        }
        self
    }

    /// Place `owner`'s king at the board mirror of `pos`.
    #[must_use]
    pub fn king_mirrored(self, owner: PlayerId, piece_type: &Arc<PieceType>, pos: Position) -> Self {
        let mirrored = self.board.mirror(pos);
        self.king(owner, piece_type, mirrored)
    }

    /// Set the player to move first.
    #[must_use]
    pub fn first_turn(mut self, player: PlayerId) -> Self {
        self.first_turn = player;
        self
    }

    /// Finish construction and compute every piece's move set.
    ///
    /// # Errors
    ///
    /// Returns the first latched placement error, or `MissingKing` if a
    /// player has no king.
    pub fn build(self) -> BuildResult<GameOperator> {
        if let Some(error) = self.error {
            return Err(error);
        }
        for player in PlayerId::all() {
            if self.kings[player].is_none() {
                return Err(BuildError::MissingKing(player));
            }
        }

        debug!(
            width = self.board.width(),
            height = self.board.height(),
            pieces = self.pieces.len(),
            first_turn = %self.first_turn,
            "Built game operator"
        );

        let mut operator = GameOperator::from_parts(
            self.board,
            self.pieces,
            self.kings,
            self.first_turn,
            MatchHistory::new(),
        );
        operator.compute_possible_moves();
        Ok(operator)
    }

    fn place(
        &mut self,
        owner: PlayerId,
        piece_type: &Arc<PieceType>,
        pos: Position,
        king: bool,
    ) -> Option<PieceId> {
        if !self.board.is_onboard(pos) {
            self.latch(BuildError::OffBoard(pos));
            return None;
        }
        if !self.board.is_free(pos) {
            self.latch(BuildError::Occupied(pos));
            return None;
        }

        let id = PieceId::new(self.next_id);
        self.next_id += 1;

        let mut piece = Piece::new(id, owner, Arc::clone(piece_type), king);
        piece.position = Some(pos);
        self.board.place(id, pos);
        self.pieces.insert(id, piece);
        Some(id)
    }

    fn latch(&mut self, error: BuildError) {
        self.error.get_or_insert(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::presets;

    fn pos(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_build_assigns_sequential_ids() {
        let king = presets::king();
        let pawn = presets::pawn();
        let op = GameOperatorBuilder::new(5, 5)
            .king(PlayerId::ONE, &king, pos(2, 4))
            .piece(PlayerId::ONE, &pawn, pos(1, 3))
            .king(PlayerId::TWO, &king, pos(2, 0))
            .build()
            .unwrap();

        assert_eq!(op.piece_at(pos(2, 4)).map(|p| p.id), Some(PieceId(0)));
        assert_eq!(op.piece_at(pos(1, 3)).map(|p| p.id), Some(PieceId(1)));
        assert_eq!(op.king(PlayerId::TWO).map(|p| p.id), Some(PieceId(2)));
        assert!(op.king(PlayerId::ONE).is_some_and(|k| k.king));
        assert_eq!(op.players_turn(), PlayerId::ONE);
    }

    #[test]
    fn test_build_computes_move_sets() {
        let king = presets::king();
        let op = GameOperatorBuilder::new(5, 5)
            .king(PlayerId::ONE, &king, pos(0, 0))
            .king(PlayerId::TWO, &king, pos(4, 4))
            .build()
            .unwrap();

        let corner = op.piece_at(pos(0, 0)).unwrap();
        assert_eq!(corner.move_set.len(), 3);
    }

    #[test]
    fn test_missing_king() {
        let king = presets::king();
        let result = GameOperatorBuilder::new(5, 5)
            .king(PlayerId::TWO, &king, pos(2, 0))
            .build();
        assert_eq!(result.unwrap_err(), BuildError::MissingKing(PlayerId::ONE));
    }

    #[test]
    fn test_duplicate_king() {
        let king = presets::king();
        let result = GameOperatorBuilder::new(5, 5)
            .king(PlayerId::ONE, &king, pos(2, 4))
            .king(PlayerId::ONE, &king, pos(3, 4))
            .king(PlayerId::TWO, &king, pos(2, 0))
            .build();
        assert_eq!(result.unwrap_err(), BuildError::DuplicateKing(PlayerId::ONE));
    }

    #[test]
    fn test_first_placement_error_is_latched() {
        let king = presets::king();
        let pawn = presets::pawn();
        let result = GameOperatorBuilder::new(5, 5)
            .king(PlayerId::ONE, &king, pos(2, 4))
            .king(PlayerId::TWO, &king, pos(2, 0))
            .piece(PlayerId::ONE, &pawn, pos(7, 7))
            .piece(PlayerId::ONE, &pawn, pos(2, 4))
            .build();
        assert_eq!(result.unwrap_err(), BuildError::OffBoard(pos(7, 7)));

        let result = GameOperatorBuilder::new(5, 5)
            .king(PlayerId::ONE, &king, pos(2, 4))
            .king(PlayerId::TWO, &king, pos(2, 4))
            .build();
        assert_eq!(result.unwrap_err(), BuildError::Occupied(pos(2, 4)));
    }

    #[test]
    fn test_mirrored_placement() {
        let king = presets::king();
        let pawn = presets::pawn();
        let op = GameOperatorBuilder::new(6, 4)
            .king_mirrored(PlayerId::ONE, &king, pos(2, 0))
            .piece_mirrored(PlayerId::ONE, &pawn, pos(0, 1))
            .king(PlayerId::TWO, &king, pos(2, 0))
            .build()
            .unwrap();

        assert!(op.piece_at(pos(3, 3)).is_some_and(|p| p.king && p.owner == PlayerId::ONE));
        assert!(op.piece_at(pos(5, 2)).is_some_and(|p| !p.king));
    }
}
