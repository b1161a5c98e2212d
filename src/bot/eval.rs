//! Scoring of single draws.
//!
//! A draw is scored from the searching bot's point of view, right after it
//! was played:
//!
//! - `±move_to_enemy` if the mover's destination is closer to (farther
//!   from) the bot's nearest enemy than its origin
//! - per piece the draw buried: `+beat` / `-lose` for regular pieces,
//!   `±king` for kings, depending on whose piece it was
//!
//! Capture values are flat per kind. A piece's level does not scale them.
//!
//! Deeper plies count less: `weight_of` divides by the square of
//! `max_depth - depth + 1`.

use crate::core::{Draw, PlayerId};
use crate::pieces::Piece;
use crate::state::GameOperator;

use super::config::EvalWeights;

/// Scale `value` for a node at `depth` (counting down to 0) of a search that
/// started at `max_depth`.
#[must_use]
pub fn weight_of(value: f64, depth: u32, max_depth: u32) -> f64 {
    let divisor = f64::from(max_depth.saturating_sub(depth) + 1);
    value / divisor / divisor
}

/// Score `draw`, just played on `operator`, for `player`.
///
/// `graveyard_before` is the graveyard length before the draw; everything
/// buried after it counts as removed by the draw.
#[must_use]
pub fn evaluate_draw(
    operator: &GameOperator,
    player: PlayerId,
    draw: Draw,
    graveyard_before: usize,
    weights: &EvalWeights,
) -> f64 {
    let enemy = player.opponent();
    let progress =
        operator.distance_to_enemy(enemy, draw.from) - operator.distance_to_enemy(enemy, draw.to);

    let mut sum = match progress.signum() {
        1 => weights.move_to_enemy,
        -1 => -weights.move_to_enemy,
        _ => 0.0,
    };
    for removed in operator.graveyard().skip(graveyard_before) {
        sum += removed_piece_value(removed, player, weights);
    }
    sum
}

fn removed_piece_value(piece: &Piece, player: PlayerId, weights: &EvalWeights) -> f64 {
    match (piece.king, piece.owner == player) {
        (true, true) => -weights.king,
        (true, false) => weights.king,
        (false, true) => -weights.lose,
        (false, false) => weights.beat,
    }
}
