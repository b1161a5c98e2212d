//! Act resolution.
//!
//! `ActResolver` is the single evaluation function for both act families. It
//! reads the live board, decides which events an act produces and hands them
//! to `GameOperator::perform_event`, which records and applies each one before
//! the next is decided. Later steps of a composite act therefore see the
//! effects of earlier ones.

use std::sync::Arc;

use tracing::trace;

use crate::core::{GameRng, PieceId, Position};
use crate::events::Event;
use crate::state::GameOperator;

use super::act::{ForceAct, ForceKind, PieceAct, PieceActKind, PosAct, PosActKind};
use super::catalog::StandardAction;

/// Evaluator for acts.
pub struct ActResolver;

impl ActResolver {
    /// Run a relational act, then its connector if `chain` is set.
    pub fn perform_piece_act(
        operator: &mut GameOperator,
        act: &PieceAct,
        from: Position,
        to: Position,
        chain: bool,
    ) {
        trace!(act = act.kind.name(), %from, %to, chain, "piece act");
        Self::resolve_piece_kind(operator, act.kind, from, to);
        if chain {
            if let Some(connector) = &act.connector {
                connector.perform_pair(operator, from, to);
            }
        }
    }

    /// Run a positional act, then its connector if `chain` is set.
    pub fn perform_pos_act(operator: &mut GameOperator, act: &PosAct, pos: Position, chain: bool) {
        trace!(act = act.kind.name(), %pos, chain, "pos act");
        match &act.kind {
            PosActKind::Destroy => Self::destroy_at(operator, pos),
            PosActKind::ExplosionAround => Self::explode_around(operator, pos),
            PosActKind::TeleportInverse => Self::teleport_inverse(operator, pos),
            PosActKind::Force(force) => Self::force(operator, force, pos),
        }
        if chain {
            if let Some(connector) = &act.connector {
                connector.perform_single(operator, pos);
            }
        }
    }

    fn resolve_piece_kind(operator: &mut GameOperator, kind: PieceActKind, from: Position, to: Position) {
        match kind {
            PieceActKind::Move => Self::move_piece(operator, from, to),
            PieceActKind::MoveOrAttack => Self::move_or_attack(operator, from, to),
            PieceActKind::RangeAttack => Self::destroy_at(operator, to),
            PieceActKind::Convert => {
                if let Some(target) = Self::enemy_target(operator, from, to) {
                    operator.perform_event(Event::ChangeOwner { piece: target });
                }
            }
            PieceActKind::SwapPositions => Self::swap(operator, from, to),
            PieceActKind::Rush => Self::rush(operator, from, to),
            PieceActKind::CrossAttack => Self::cross_attack(operator, from, to),
            PieceActKind::Explode => {
                Self::move_piece(operator, from, to);
                Self::explode_around(operator, to);
            }
            PieceActKind::ZombieAttack => Self::zombie(operator, from, to),
            PieceActKind::LegionAttack => Self::legion(operator, from, to),
            PieceActKind::TeleportPiece => Self::teleport_inverse(operator, to),
        }
    }

    // === Primitives ===

    /// Step onto a free on-board cell.
    fn move_piece(operator: &mut GameOperator, from: Position, to: Position) {
        if !operator.is_onboard(to) || !operator.is_free(to) {
            return;
        }
        if let Some(piece) = operator.piece_at(from).map(|p| p.id) {
            operator.perform_event(Event::Move { piece, from, to });
        }
    }

    /// Step onto an on-board cell, capturing its occupant.
    fn move_or_attack(operator: &mut GameOperator, from: Position, to: Position) {
        if from == to || !operator.is_onboard(to) {
            return;
        }
        let Some(piece) = operator.piece_at(from).map(|p| p.id) else {
            return;
        };
        match operator.piece_at(to).map(|p| p.id) {
            Some(target) => operator.perform_event(Event::MoveAndDestroy {
                piece,
                target,
                from,
                to,
            }),
            None => operator.perform_event(Event::Move { piece, from, to }),
        }
    }

    fn destroy_at(operator: &mut GameOperator, pos: Position) {
        if let Some(piece) = operator.piece_at(pos).map(|p| p.id) {
            operator.perform_event(Event::Destroy { piece, pos });
        }
    }

    fn explode_around(operator: &mut GameOperator, pos: Position) {
        for cell in pos.area() {
            Self::destroy_at(operator, cell);
        }
    }

    fn teleport_inverse(operator: &mut GameOperator, pos: Position) {
        if operator.piece_at(pos).is_none() {
            return;
        }
        let mirrored = operator.board().mirror(pos);
        Self::move_or_attack(operator, pos, mirrored);
    }

    /// The piece on `to` if it belongs to someone other than the piece on `from`.
    fn enemy_target(operator: &GameOperator, from: Position, to: Position) -> Option<PieceId> {
        let attacker = operator.piece_at(from)?;
        let target = operator.piece_at(to)?;
        (attacker.owner != target.owner).then_some(target.id)
    }

    // === Composite relational acts ===

    fn swap(operator: &mut GameOperator, from: Position, to: Position) {
        let (Some(first), Some(second)) = (operator.piece_at(from), operator.piece_at(to)) else {
            return;
        };
        if first.id == second.id || first.owner != second.owner {
            return;
        }
        let event = Event::Swap {
            first: first.id,
            second: second.id,
            first_pos: from,
            second_pos: to,
        };
        operator.perform_event(event);
    }

    fn rush(operator: &mut GameOperator, from: Position, to: Position) {
        if from == to {
            return;
        }
        Self::move_or_attack(operator, from, to);
        for cell in from.path_to(to) {
            Self::destroy_at(operator, cell);
        }
    }

    fn cross_attack(operator: &mut GameOperator, from: Position, to: Position) {
        let Some(owner) = operator.piece_at(from).map(|p| p.owner) else {
            return;
        };
        for cell in to.diagonals() {
            let victim = operator
                .piece_at(cell)
                .filter(|p| p.owner != owner)
                .map(|p| p.id);
            if let Some(piece) = victim {
                operator.perform_event(Event::Destroy { piece, pos: cell });
            }
        }
        Self::move_piece(operator, from, to);
    }

    fn zombie(operator: &mut GameOperator, from: Position, to: Position) {
        let Some(target) = Self::enemy_target(operator, from, to) else {
            return;
        };
        let Some(attacker_type) = operator.piece_at(from).map(|p| Arc::clone(&p.piece_type)) else {
            return;
        };
        let Some(previous) = operator.piece_at(to).map(|p| Arc::clone(&p.piece_type)) else {
            return;
        };
        operator.perform_event(Event::ChangeOwner { piece: target });
        operator.perform_event(Event::ChangeType {
            piece: target,
            previous,
            next: attacker_type,
        });
    }

    fn legion(operator: &mut GameOperator, from: Position, to: Position) {
        let Some(leader) = operator.piece_at(from) else {
            return;
        };
        let (leader_id, owner, type_id) = (leader.id, leader.owner, leader.piece_type.id().clone());
        let followers: Vec<PieceId> = operator
            .pieces_of(owner)
            .filter(|p| p.id != leader_id && *p.piece_type.id() == type_id)
            .map(|p| p.id)
            .collect();

        let displacement = to - from;
        Self::move_or_attack(operator, from, to);

        let follow = StandardAction::MoveOrAttack.action();
        for id in followers {
            let Some(pos) = operator.piece(id).and_then(|p| p.position) else {
                continue;
            };
            let target = pos + displacement;
            if operator.is_onboard(target) {
                follow.perform(operator, pos, target);
            }
        }
    }

    // === Force-gated acts ===

    fn force(operator: &mut GameOperator, force: &ForceAct, pos: Position) {
        if !operator.is_onboard(pos) || operator.is_free(pos) {
            return;
        }
        match force.kind {
            ForceKind::RangedAttackCross => {
                let ranged = PieceAct::new(PieceActKind::RangeAttack);
                for (dx, dy) in [(-2, 0), (0, -2), (2, 0), (0, 2)] {
                    Self::perform_forced(operator, force, &ranged, pos, pos.offset(dx, dy));
                }
            }
            _ => {
                let Some(target) = Self::choose_forced_target(operator, force.kind, pos) else {
                    return;
                };
                let Some((piece_type, owner)) = operator
                    .piece_at(pos)
                    .map(|p| (Arc::clone(&p.piece_type), p.owner))
                else {
                    return;
                };
                if let Some(action) = piece_type.action_for(owner, pos, target) {
                    Self::perform_forced(operator, force, &action.act, pos, target);
                }
            }
        }
    }

    /// Pick the destination a random-action act forces the piece on `pos` to.
    ///
    /// Candidates are the piece's legal moves on the live board. The choice is
    /// seeded from the board, so the same position always yields the same
    /// target.
    fn choose_forced_target(operator: &GameOperator, kind: ForceKind, pos: Position) -> Option<Position> {
        let piece = operator.piece_at(pos)?;
        let moves: Vec<Position> = piece
            .piece_type
            .compute_possible_moves(operator, pos)
            .positions()
            .collect();
        if moves.is_empty() {
            return None;
        }
        let mut rng = GameRng::for_board(pos, operator.piece_count());

        let candidates = match kind {
            ForceKind::RandomActionPreferAttack => {
                let attacks: Vec<Position> = moves
                    .iter()
                    .copied()
                    .filter(|&m| operator.piece_at(m).is_some_and(|t| t.owner != piece.owner))
                    .collect();
                if attacks.is_empty() {
                    moves
                } else {
                    attacks
                }
            }
            ForceKind::RandomActionPreferFlee => {
                let enemy = piece.owner.opponent();
                let distance = |m: Position| operator.distance_to_enemy(enemy, m);
                let best = moves.iter().map(|&m| distance(m)).max().unwrap_or(0);
                moves.into_iter().filter(|&m| distance(m) == best).collect()
            }
            ForceKind::RandomAction | ForceKind::RangedAttackCross => moves,
        };

        rng.choose(&candidates).copied()
    }

    /// Run `act` for the piece on `from`, re-wrapped with the force act's chain.
    fn perform_forced(
        operator: &mut GameOperator,
        force: &ForceAct,
        act: &PieceAct,
        from: Position,
        to: Position,
    ) {
        let Some(owner) = operator.piece_at(from).map(|p| p.owner) else {
            return;
        };
        if !force.force.permits(owner, operator.players_turn()) {
            return;
        }
        operator.perform_event(Event::Act {
            name: act.kind.name().to_string(),
            from,
            to,
        });
        let mut forced = act.unchained();
        forced.connector = force.chain.clone();
        forced.perform(operator, from, to);
    }
}
