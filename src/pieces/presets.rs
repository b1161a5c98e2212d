//! Hand-built piece types with classic chess-like shapes.
//!
//! Generated types are the norm; these exist for fixed setups, tests and
//! benchmarks. Each call returns a fresh `Arc`, but types with the same name
//! share a `PieceTypeId`, so they count as the same type.

use std::sync::Arc;

use crate::core::Position;
use crate::effects::StandardAction;

use super::piece_type::{PieceType, PieceTypeId};

/// Generator version tag of the preset types.
pub const PRESET_VERSION: &str = "preset";

const KING_DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

fn id(seed: u64, level: u32) -> PieceTypeId {
    PieceTypeId::new(seed, level, PRESET_VERSION)
}

/// One step in every direction, capturing.
#[must_use]
pub fn king() -> Arc<PieceType> {
    let mut piece_type = PieceType::new(id(1, 1), 'K');
    for (dx, dy) in KING_DIRECTIONS {
        piece_type = piece_type.with_action(Position::new(dx, dy), StandardAction::MoveOrAttack);
    }
    Arc::new(piece_type)
}

/// Steps forward onto free cells, captures diagonally forward.
#[must_use]
pub fn pawn() -> Arc<PieceType> {
    Arc::new(
        PieceType::new(id(2, 1), 'P')
            .with_action(Position::new(0, 1), StandardAction::MoveToFreePosition)
            .with_action(Position::new(-1, 1), StandardAction::MoveToEnemyPosition)
            .with_action(Position::new(1, 1), StandardAction::MoveToEnemyPosition),
    )
}

/// Slides orthogonally up to `range` cells. Each range is its own type.
#[must_use]
pub fn rook(range: i32) -> Arc<PieceType> {
    let mut piece_type = PieceType::new(id(300 + u64::from(range.unsigned_abs()), 3), 'R');
    for step in 1..=range {
        for (dx, dy) in [(0, -1), (-1, 0), (1, 0), (0, 1)] {
            piece_type = piece_type.with_action(
                Position::new(dx * step, dy * step),
                StandardAction::WalkAndMoveOrAttack,
            );
        }
    }
    Arc::new(piece_type)
}

/// Jumps in an L shape.
#[must_use]
pub fn knight() -> Arc<PieceType> {
    let mut piece_type = PieceType::new(id(4, 2), 'N');
    for (dx, dy) in [(1, 2), (2, 1), (-1, 2), (-2, 1), (1, -2), (2, -1), (-1, -2), (-2, -1)] {
        piece_type = piece_type.with_action(Position::new(dx, dy), StandardAction::MoveOrAttack);
    }
    Arc::new(piece_type)
}

/// Walks one step, or leaps two forward and explodes.
#[must_use]
pub fn bomber() -> Arc<PieceType> {
    let mut piece_type = PieceType::new(id(5, 2), 'B');
    for (dx, dy) in KING_DIRECTIONS {
        piece_type =
            piece_type.with_action(Position::new(dx, dy), StandardAction::MoveToFreePosition);
    }
    Arc::new(piece_type.with_action(Position::new(0, 2), StandardAction::ExplosionAttack))
}
