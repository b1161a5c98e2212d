//! Board events: the only way board state changes.
//!
//! Every variant carries exactly what it needs to both apply and invert
//! itself:
//!
//! | Event | perform | undo |
//! |---|---|---|
//! | `Move` | relocate `from -> to`, nothing if `to` is taken | relocate `to -> from` if it moved |
//! | `Destroy` | lift piece, push to graveyard, king rule | pop graveyard tail, put back |
//! | `MoveAndDestroy` | bury target on `to`, king rule, relocate mover | relocate mover back, restore target |
//! | `Swap` | exchange two pieces | exchange back |
//! | `ChangeOwner` | flip owner | flip back |
//! | `ChangeType` | set `next` type | restore `previous` type |
//! | `Act` | nothing | nothing |
//!
//! **King rule**: when a removed piece is a king, the winner becomes the
//! opponent of the player whose king it was. Bringing a king back from the
//! graveyard does not touch the winner; `Game::undo` restores it from its
//! turn record.
//!
//! Events assume the board they are applied to is the board they were
//! derived from. A vanished piece is a programming error and panics.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{PieceId, Position};
use crate::pieces::PieceType;
use crate::state::GameOperator;

/// An invertible atomic board mutation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Move {
        piece: PieceId,
        from: Position,
        to: Position,
    },
    Destroy {
        piece: PieceId,
        pos: Position,
    },
    MoveAndDestroy {
        piece: PieceId,
        target: PieceId,
        from: Position,
        to: Position,
    },
    Swap {
        first: PieceId,
        second: PieceId,
        first_pos: Position,
        second_pos: Position,
    },
    ChangeOwner {
        piece: PieceId,
    },
    ChangeType {
        piece: PieceId,
        previous: Arc<PieceType>,
        next: Arc<PieceType>,
    },
    /// Marker for replay and animation: a forced act named `name` ran from
    /// `from` toward `to`.
    Act {
        name: String,
        from: Position,
        to: Position,
    },
}

impl Event {
    /// Apply this event.
    pub fn perform(&self, operator: &mut GameOperator) {
        trace!(event = ?self.kind_name(), "perform");
        match self {
            Event::Move { piece, from, to } => {
                if operator.is_free(*to) {
                    operator.relocate(*piece, *from, *to);
                }
            }

            Event::Destroy { piece, pos } => {
                operator.lift(*piece, *pos);
                operator.bury(*piece);
            }

            Event::MoveAndDestroy {
                piece,
                target,
                from,
                to,
            } => {
                operator.lift(*target, *to);
                operator.bury(*target);
                operator.relocate(*piece, *from, *to);
            }

            Event::Swap {
                first,
                second,
                first_pos,
                second_pos,
            } => {
                operator.lift(*first, *first_pos);
                operator.lift(*second, *second_pos);
                operator.put(*first, *second_pos);
                operator.put(*second, *first_pos);
            }

            Event::ChangeOwner { piece } => operator.flip_owner(*piece),

            Event::ChangeType { piece, next, .. } => operator.set_type(*piece, Arc::clone(next)),

            Event::Act { .. } => {}
        }
    }

    /// Invert this event. Must be applied to the state `perform` left.
    pub fn undo(&self, operator: &mut GameOperator) {
        trace!(event = ?self.kind_name(), "undo");
        match self {
            Event::Move { piece, from, to } => {
                if operator.piece_at(*to).is_some_and(|p| p.id == *piece) {
                    operator.relocate(*piece, *to, *from);
                }
            }

            Event::Destroy { piece, pos } => {
                operator.exhume(*piece);
                operator.put(*piece, *pos);
            }

            Event::MoveAndDestroy {
                piece,
                target,
                from,
                to,
            } => {
                operator.relocate(*piece, *to, *from);
                operator.exhume(*target);
                operator.put(*target, *to);
            }

            Event::Swap {
                first,
                second,
                first_pos,
                second_pos,
            } => {
                operator.lift(*first, *second_pos);
                operator.lift(*second, *first_pos);
                operator.put(*first, *first_pos);
                operator.put(*second, *second_pos);
            }

            Event::ChangeOwner { piece } => operator.flip_owner(*piece),

            Event::ChangeType { piece, previous, .. } => {
                operator.set_type(*piece, Arc::clone(previous));
            }

            Event::Act { .. } => {}
        }
    }

    /// Pieces this event sends to the graveyard.
    #[must_use]
    pub fn destroyed(&self) -> Option<PieceId> {
        match self {
            Event::Destroy { piece, .. } => Some(*piece),
            Event::MoveAndDestroy { target, .. } => Some(*target),
            _ => None,
        }
    }

    /// Variant name.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Event::Move { .. } => "move",
            Event::Destroy { .. } => "destroy",
            Event::MoveAndDestroy { .. } => "move_and_destroy",
            Event::Swap { .. } => "swap",
            Event::ChangeOwner { .. } => "change_owner",
            Event::ChangeType { .. } => "change_type",
            Event::Act { .. } => "act",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use crate::pieces::presets;
    use crate::state::GameOperatorBuilder;

    fn pos(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn setup() -> GameOperator {
        let king = presets::king();
        let pawn = presets::pawn();
        GameOperatorBuilder::new(6, 6)
            .king(PlayerId::ONE, &king, pos(0, 5))
            .king(PlayerId::TWO, &king, pos(5, 0))
            .piece(PlayerId::ONE, &pawn, pos(2, 3))
            .piece(PlayerId::TWO, &pawn, pos(2, 2))
            .piece(PlayerId::ONE, &pawn, pos(4, 4))
            .build()
            .unwrap()
    }

    fn id_at(op: &GameOperator, p: Position) -> PieceId {
        op.piece_at(p).map(|piece| piece.id).unwrap()
    }

    /// Perform then undo, asserting the operator returns to its prior state.
    fn assert_inverts(op: &mut GameOperator, event: Event) {
        let before = op.clone();
        event.perform(op);
        assert_ne!(*op, before, "{} should change the board", event.kind_name());
        event.undo(op);
        assert_eq!(*op, before, "{} undo should restore the board", event.kind_name());
    }

    #[test]
    fn test_move_inverts() {
        let mut op = setup();
        let piece = id_at(&op, pos(2, 3));
        assert_inverts(&mut op, Event::Move { piece, from: pos(2, 3), to: pos(3, 3) });
    }

    #[test]
    fn test_destroy_inverts() {
        let mut op = setup();
        let piece = id_at(&op, pos(2, 2));
        assert_inverts(&mut op, Event::Destroy { piece, pos: pos(2, 2) });
    }

    #[test]
    fn test_move_and_destroy_inverts() {
        let mut op = setup();
        let piece = id_at(&op, pos(2, 3));
        let target = id_at(&op, pos(2, 2));
        assert_inverts(
            &mut op,
            Event::MoveAndDestroy { piece, target, from: pos(2, 3), to: pos(2, 2) },
        );
    }

    #[test]
    fn test_swap_inverts() {
        let mut op = setup();
        let first = id_at(&op, pos(2, 3));
        let second = id_at(&op, pos(0, 5));
        assert_inverts(
            &mut op,
            Event::Swap { first, second, first_pos: pos(2, 3), second_pos: pos(0, 5) },
        );
    }

    #[test]
    fn test_change_owner_and_type_invert() {
        let mut op = setup();
        let piece = id_at(&op, pos(2, 2));
        assert_inverts(&mut op, Event::ChangeOwner { piece });

        let previous = Arc::clone(&op.piece(piece).unwrap().piece_type);
        assert_inverts(
            &mut op,
            Event::ChangeType { piece, previous, next: presets::knight() },
        );
    }

    #[test]
    fn test_destroying_king_sets_winner_and_undo_keeps_it() {
        let mut op = setup();
        let king = id_at(&op, pos(5, 0));

        let event = Event::Destroy { piece: king, pos: pos(5, 0) };
        event.perform(&mut op);
        assert_eq!(op.winner(), Some(PlayerId::ONE));

        event.undo(&mut op);
        assert!(op.piece_at(pos(5, 0)).is_some_and(|p| p.king));
        assert_eq!(op.graveyard_len(), 0);
        assert_eq!(op.winner(), Some(PlayerId::ONE));
    }

    #[test]
    fn test_converted_king_still_loses_for_its_side() {
        let mut op = setup();
        let king = id_at(&op, pos(5, 0));

        Event::ChangeOwner { piece: king }.perform(&mut op);
        assert_eq!(op.piece(king).map(|p| p.owner), Some(PlayerId::ONE));

        Event::Destroy { piece: king, pos: pos(5, 0) }.perform(&mut op);
        assert_eq!(op.winner(), Some(PlayerId::ONE));
    }

    #[test]
    fn test_destroying_non_king_leaves_winner() {
        let mut op = setup();
        let piece = id_at(&op, pos(4, 4));
        Event::Destroy { piece, pos: pos(4, 4) }.perform(&mut op);
        assert_eq!(op.winner(), None);
    }

    #[test]
    #[should_panic(expected = "not at")]
    fn test_destroy_vanished_piece_panics() {
        let mut op = setup();
        let piece = id_at(&op, pos(4, 4));
        Event::Destroy { piece, pos: pos(3, 3) }.perform(&mut op);
    }

    #[test]
    fn test_move_onto_occupied_is_skipped() {
        let mut op = setup();
        let before = op.clone();
        let piece = id_at(&op, pos(2, 3));
        let blocker = id_at(&op, pos(2, 2));

        let event = Event::Move { piece, from: pos(2, 3), to: pos(2, 2) };
        event.perform(&mut op);
        assert_eq!(op, before);

        event.undo(&mut op);
        assert_eq!(op.piece_at(pos(2, 3)).map(|p| p.id), Some(piece));
        assert_eq!(op.piece_at(pos(2, 2)).map(|p| p.id), Some(blocker));
        assert_eq!(op, before);
    }

    #[test]
    fn test_act_marker_is_noop() {
        let mut op = setup();
        let before = op.clone();
        let marker = Event::Act { name: "random_action".into(), from: pos(0, 0), to: pos(1, 1) };
        marker.perform(&mut op);
        assert_eq!(op, before);
        marker.undo(&mut op);
        assert_eq!(op, before);
        assert_eq!(marker.destroyed(), None);
    }
}
