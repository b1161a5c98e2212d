//! Batch actions: heuristic multi-piece turns.
//!
//! Instead of one draw, a batch action moves several of the player's pieces
//! at once, following a simple plan. All plans read the cached move sets and
//! the enemy's threat map (every cell an enemy piece can currently move to):
//!
//! | Kind | Plan |
//! |---|---|
//! | `Rush50` | half the pieces that can approach the enemy king do so |
//! | `SafeForward` | 30% of them do, onto unthreatened cells only |
//! | `Attack` | every piece takes its highest-level unthreatened capture |
//! | `Formation` | pieces move where they cover an uncovered friend |
//! | `Cover` | back-line pieces cover threatened front-line pieces |
//! | `Evade` | threatened pieces step onto unthreatened cells |
//! | `DefendKing` | pieces intercept threats near the own king, then close in |
//!
//! "Covering" a cell means the piece's action map, oriented for its owner,
//! reaches it from the piece's (new) cell; conditions are ignored.
//!
//! Every plan is passed through `filter_safe_draws`, which drops moves that
//! bury one of the mover's own pieces (for example through a chained
//! explosion).

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Draw, GameRng, PieceId, PlayerId, Position};
use crate::game::Game;
use crate::pieces::{Piece, PieceType};
use crate::state::GameOperator;

use super::config::BatchWeights;
use super::search::Bot;

/// Cells a player's pieces can currently move to.
pub type ThreatMap = FxHashSet<Position>;

/// Manhattan radius of the zone `DefendKing` watches around the own king.
const KING_ZONE_RADIUS: i32 = 3;

/// The seven batch plans.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatchActionKind {
    Rush50,
    SafeForward,
    Attack,
    Formation,
    Cover,
    Evade,
    DefendKing,
}

impl BatchActionKind {
    /// Every kind, in suggestion order.
    pub const ALL: [BatchActionKind; 7] = [
        BatchActionKind::Rush50,
        BatchActionKind::SafeForward,
        BatchActionKind::Attack,
        BatchActionKind::Formation,
        BatchActionKind::Cover,
        BatchActionKind::Evade,
        BatchActionKind::DefendKing,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            BatchActionKind::Rush50 => "Rush 50%",
            BatchActionKind::SafeForward => "Safe Forward",
            BatchActionKind::Attack => "Attack",
            BatchActionKind::Formation => "Formation",
            BatchActionKind::Cover => "Cover",
            BatchActionKind::Evade => "Evade Threats",
            BatchActionKind::DefendKing => "Defend King",
        }
    }
}

/// One suggested batch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchAction {
    pub kind: BatchActionKind,
    /// Moves to play, in order.
    pub moves: Vec<Draw>,
    /// Enemy cells worth highlighting (attack targets, threatening pieces).
    pub enemy_cells: Vec<Position>,
    /// Friendly cells the batch protects.
    pub protected_cells: Vec<Position>,
}

impl BatchAction {
    fn new(kind: BatchActionKind, moves: Vec<Draw>) -> Self {
        Self {
            kind,
            moves,
            enemy_cells: Vec::new(),
            protected_cells: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// Every cell `player`'s live pieces can currently move to.
#[must_use]
pub fn threat_map(operator: &GameOperator, player: PlayerId) -> ThreatMap {
    operator
        .pieces_of(player)
        .flat_map(|p| p.move_set.positions())
        .collect()
}

/// Drop moves that do not start on one of `player`'s pieces or that bury
/// one of `player`'s own pieces.
///
/// Each move is tried on `check` and undone again, so `check` ends in the
/// state it started in.
pub fn filter_safe_draws(check: &mut GameOperator, player: PlayerId, draws: Vec<Draw>) -> Vec<Draw> {
    draws
        .into_iter()
        .filter(|draw| {
            let Some(piece_type) = check
                .piece_at(draw.from)
                .filter(|p| p.owner == player)
                .map(|p| std::sync::Arc::clone(&p.piece_type))
            else {
                return false;
            };

            let before = check.graveyard_len();
            let winner = check.winner();
            check.begin_draw();
            piece_type.perform(check, draw.from, draw.to);
            let kills_own = check.graveyard().skip(before).any(|p| p.owner == player);
            check.undo_draw();
            check.set_winner(winner);
            !kills_own
        })
        .collect()
}

/// Compute all seven batch suggestions for `player`, safety-filtered, in
/// `BatchActionKind::ALL` order.
pub fn compute_batch_actions(
    operator: &GameOperator,
    player: PlayerId,
    rng: &mut GameRng,
) -> Vec<BatchAction> {
    let planner = Planner::new(operator, player);
    let raw = [
        planner.rush(rng, BatchActionKind::Rush50, 0.5, false),
        planner.rush(rng, BatchActionKind::SafeForward, 0.3, true),
        planner.attack(),
        planner.formation(),
        planner.cover(),
        planner.evade(),
        planner.defend_king(),
    ];

    let mut check = operator.copy();
    raw.into_iter()
        .map(|mut action| {
            action.moves = filter_safe_draws(&mut check, player, action.moves);
            action
        })
        .collect()
}

/// Play every non-empty suggestion for the side to move on a copy and return
/// the one leaving the best board, or `None` if every suggestion is empty.
#[must_use]
pub fn choose_best_batch_action(
    game: &Game,
    rng: &mut GameRng,
    weights: &BatchWeights,
) -> Option<BatchAction> {
    let player = game.players_turn();
    let mut best: Option<(BatchAction, f64)> = None;

    for action in compute_batch_actions(game.operator(), player, rng) {
        if action.is_empty() {
            continue;
        }
        let mut copy = game.copy();
        copy.play_batch(&action.moves);
        let score = evaluate_board(&copy, player, weights);
        debug!(kind = action.kind.label(), moves = action.moves.len(), score, "Scored batch action");

        if best.as_ref().map_or(true, |(_, s)| score > *s) {
            best = Some((action, score));
        }
    }
    best.map(|(action, _)| action)
}

/// Material, position and outcome of `game` from `player`'s point of view.
#[must_use]
pub fn evaluate_board(game: &Game, player: PlayerId, weights: &BatchWeights) -> f64 {
    let operator = game.operator();
    let enemy = player.opponent();
    let value = |p: &Piece| {
        if p.king {
            weights.king
        } else {
            f64::from(p.level()) * weights.piece_level
        }
    };

    let mut score: f64 = operator.pieces_of(player).map(value).sum();
    score -= operator.pieces_of(enemy).map(value).sum::<f64>();

    if let Some(king_pos) = operator.king(player).and_then(|k| k.position) {
        score += f64::from(operator.distance_to_enemy(enemy, king_pos)) * weights.distance;
    }
    for piece in operator.pieces_of(player).filter(|p| !p.king) {
        if let Some(pos) = piece.position {
            score -= f64::from(operator.distance_to_enemy(enemy, pos)) * weights.distance * 0.1;
        }
    }

    match game.winner() {
        Some(winner) if winner == player => score += weights.winner,
        Some(_) => score -= weights.winner,
        None => {}
    }
    score
}

impl Bot {
    /// Best batch action for the side to move, using a fork of the bot's
    /// RNG and its batch weights.
    pub fn choose_batch_action(&mut self, game: &Game) -> Option<BatchAction> {
        let mut rng = self.fork_rng();
        choose_best_batch_action(game, &mut rng, &self.config().batch_weights)
    }
}

/// Shared inputs of the individual plans.
struct Planner<'a> {
    operator: &'a GameOperator,
    player: PlayerId,
    enemy: PlayerId,
    enemy_threats: ThreatMap,
    /// Live own pieces with their cells, in id order.
    own: Vec<(&'a Piece, Position)>,
}

impl<'a> Planner<'a> {
    fn new(operator: &'a GameOperator, player: PlayerId) -> Self {
        let enemy = player.opponent();
        let own = operator
            .pieces_of(player)
            .filter_map(|p| Some((p, p.position?)))
            .collect();
        Self {
            operator,
            player,
            enemy,
            enemy_threats: threat_map(operator, enemy),
            own,
        }
    }

    fn threatened(&self, pos: Position) -> bool {
        self.enemy_threats.contains(&pos)
    }

    /// Cells the action map of `piece` reaches from `from`.
    fn reach<'p>(&self, piece: &'p Piece, from: Position) -> impl Iterator<Item = Position> + 'p {
        let owner = self.player;
        piece
            .piece_type
            .actions()
            .offsets()
            .map(move |offset| from + PieceType::orient(owner, offset))
    }

    /// Enemy pieces whose move sets reach any of `targets`, first seen first.
    fn threatening_enemies(&self, targets: &FxHashSet<Position>) -> Vec<Position> {
        self.operator
            .pieces_of(self.enemy)
            .filter(|p| p.move_set.positions().any(|m| targets.contains(&m)))
            .filter_map(|p| p.position)
            .collect()
    }

    /// `Rush50` and `SafeForward`: a `share` of the pieces with approaching
    /// moves each take one, chosen at random.
    fn rush(&self, rng: &mut GameRng, kind: BatchActionKind, share: f64, safe_only: bool) -> BatchAction {
        let Some(king_pos) = self.operator.king(self.enemy).and_then(|k| k.position) else {
            return BatchAction::new(kind, Vec::new());
        };

        let mut candidates: Vec<(Position, Vec<Position>)> = self
            .own
            .iter()
            .filter_map(|&(piece, from)| {
                let approaching: Vec<Position> = piece
                    .move_set
                    .positions()
                    .filter(|&m| m.manhattan(king_pos) < from.manhattan(king_pos))
                    .filter(|&m| !safe_only || !self.threatened(m))
                    .collect();
                (!approaching.is_empty()).then_some((from, approaching))
            })
            .collect();

        rng.shuffle(&mut candidates);
        let count = (candidates.len() as f64 * share).ceil() as usize;

        let moves = candidates
            .into_iter()
            .take(count)
            .map(|(from, targets)| {
                let to = targets[rng.gen_range_usize(0..targets.len())];
                Draw::new(from, to)
            })
            .collect();
        BatchAction::new(kind, moves)
    }

    fn attack(&self) -> BatchAction {
        let mut moves = Vec::new();
        for &(piece, from) in &self.own {
            let mut best: Option<(Position, u32)> = None;
            for m in piece.move_set.positions() {
                let Some(target) = self.operator.piece_at(m) else {
                    continue;
                };
                if target.owner != self.enemy || self.threatened(m) {
                    continue;
                }
                if best.map_or(true, |(_, level)| target.level() > level) {
                    best = Some((m, target.level()));
                }
            }
            if let Some((to, _)) = best {
                moves.push(Draw::new(from, to));
            }
        }

        let mut enemy_cells: Vec<Position> = Vec::new();
        for draw in &moves {
            if !enemy_cells.contains(&draw.to) {
                enemy_cells.push(draw.to);
            }
        }

        let mut action = BatchAction::new(BatchActionKind::Attack, moves);
        action.enemy_cells = enemy_cells;
        action
    }

    fn formation(&self) -> BatchAction {
        let mut coverage: FxHashMap<Position, usize> = FxHashMap::default();
        for (piece, _) in &self.own {
            for m in piece.move_set.positions() {
                *coverage.entry(m).or_default() += 1;
            }
        }
        let mut uncovered: FxHashSet<Position> = self
            .own
            .iter()
            .map(|&(_, pos)| pos)
            .filter(|pos| !coverage.contains_key(pos))
            .collect();

        let mut moves = Vec::new();
        for &(piece, from) in &self.own {
            if uncovered.is_empty() {
                break;
            }
            for m in piece.move_set.positions() {
                let covered: Vec<Position> =
                    self.reach(piece, m).filter(|r| uncovered.contains(r)).collect();
                if !covered.is_empty() {
                    moves.push(Draw::new(from, m));
                    for cell in covered {
                        uncovered.remove(&cell);
                    }
                    break;
                }
            }
        }
        BatchAction::new(BatchActionKind::Formation, moves)
    }

    fn cover(&self) -> BatchAction {
        let mut by_distance: Vec<(&Piece, Position, i32)> = self
            .own
            .iter()
            .map(|&(piece, pos)| (piece, pos, self.operator.distance_to_enemy(self.enemy, pos)))
            .collect();
        by_distance.sort_by_key(|&(_, _, dist)| dist);

        let frontline_count = ((by_distance.len() as f64 * 0.4).ceil() as usize).max(1);
        let frontline: Vec<(&Piece, Position)> = by_distance
            .iter()
            .take(frontline_count)
            .map(|&(piece, pos, _)| (piece, pos))
            .collect();

        let threatened_front: Vec<Position> = frontline
            .iter()
            .map(|&(_, pos)| pos)
            .filter(|&pos| self.threatened(pos))
            .collect();
        if threatened_front.is_empty() {
            return BatchAction::new(BatchActionKind::Cover, Vec::new());
        }

        let reachable_by_friend: FxHashSet<Position> = self
            .own
            .iter()
            .flat_map(|(piece, _)| piece.move_set.positions())
            .collect();
        let mut unprotected: Vec<Position> = threatened_front
            .iter()
            .copied()
            .filter(|pos| !reachable_by_friend.contains(pos))
            .collect();

        let frontline_ids: FxHashSet<PieceId> = frontline.iter().map(|(p, _)| p.id).collect();
        let backups: Vec<(&Piece, Position)> = self
            .own
            .iter()
            .copied()
            .filter(|(p, _)| !frontline_ids.contains(&p.id))
            .collect();

        let mut moves = Vec::new();
        let mut used: FxHashSet<PieceId> = FxHashSet::default();
        for target in unprotected.clone() {
            'backups: for &(backup, from) in &backups {
                if used.contains(&backup.id) {
                    continue;
                }
                for m in backup.move_set.positions() {
                    if self.reach(backup, m).any(|r| r == target) {
                        moves.push(Draw::new(from, m));
                        used.insert(backup.id);
                        unprotected.retain(|&p| p != target);
                        break 'backups;
                    }
                }
            }
        }

        let protected: Vec<Position> = threatened_front
            .into_iter()
            .filter(|pos| !unprotected.contains(pos))
            .collect();
        let targets: FxHashSet<Position> = protected.iter().copied().collect();

        let mut action = BatchAction::new(BatchActionKind::Cover, moves);
        action.enemy_cells = self.threatening_enemies(&targets);
        action.protected_cells = protected;
        action
    }

    fn evade(&self) -> BatchAction {
        let mut moves = Vec::new();
        let mut threatened: FxHashSet<Position> = FxHashSet::default();

        for &(piece, from) in &self.own {
            if !self.threatened(from) {
                continue;
            }
            threatened.insert(from);
            if let Some(to) = piece.move_set.positions().find(|&m| !self.threatened(m)) {
                moves.push(Draw::new(from, to));
            }
        }

        let mut action = BatchAction::new(BatchActionKind::Evade, moves);
        action.enemy_cells = self.threatening_enemies(&threatened);
        action
    }

    fn defend_king(&self) -> BatchAction {
        let Some((king_id, king_pos)) = self
            .operator
            .king(self.player)
            .and_then(|k| Some((k.id, k.position?)))
        else {
            return BatchAction::new(BatchActionKind::DefendKing, Vec::new());
        };

        let limit = ((self.own.len() as f64 * 0.2).ceil() as usize).max(8);

        let mut uncovered_threats: FxHashSet<Position> = FxHashSet::default();
        for dy in -KING_ZONE_RADIUS..=KING_ZONE_RADIUS {
            for dx in -KING_ZONE_RADIUS..=KING_ZONE_RADIUS {
                let cell = king_pos.offset(dx, dy);
                let in_zone = dx.abs() + dy.abs() <= KING_ZONE_RADIUS && (dx, dy) != (0, 0);
                if in_zone && self.operator.is_onboard(cell) && self.threatened(cell) {
                    uncovered_threats.insert(cell);
                }
            }
        }
        for &(piece, pos) in &self.own {
            for cell in self.reach(piece, pos) {
                uncovered_threats.remove(&cell);
            }
        }

        let mut moves: Vec<Draw> = Vec::new();
        let mut used: FxHashSet<PieceId> = FxHashSet::default();

        // Intercept: cover threatened cells near the king
        if !uncovered_threats.is_empty() {
            let mut intercepts: Vec<(PieceId, Draw, Vec<Position>, i32)> = Vec::new();
            for &(piece, from) in &self.own {
                if piece.id == king_id {
                    continue;
                }
                let mut best: Option<(Position, Vec<Position>)> = None;
                for m in piece.move_set.positions() {
                    let covered: Vec<Position> = self
                        .reach(piece, m)
                        .filter(|r| uncovered_threats.contains(r))
                        .collect();
                    if covered.len() > best.as_ref().map_or(0, |(_, c)| c.len()) {
                        best = Some((m, covered));
                    }
                }
                if let Some((to, covered)) = best {
                    intercepts.push((piece.id, Draw::new(from, to), covered, from.manhattan(king_pos)));
                }
            }
            intercepts.sort_by(|a, b| b.2.len().cmp(&a.2.len()).then(a.3.cmp(&b.3)));

            for (id, draw, covered, _) in intercepts {
                if moves.len() >= limit || uncovered_threats.is_empty() {
                    break;
                }
                let fresh: Vec<Position> = covered
                    .into_iter()
                    .filter(|c| uncovered_threats.contains(c))
                    .collect();
                if fresh.is_empty() {
                    continue;
                }
                moves.push(draw);
                used.insert(id);
                for cell in fresh {
                    uncovered_threats.remove(&cell);
                }
            }
        }

        // Reinforce: close in on the king, safe cells first
        let mut reinforcements: Vec<(Draw, i32, bool)> = Vec::new();
        for &(piece, from) in &self.own {
            if piece.id == king_id || used.contains(&piece.id) {
                continue;
            }
            let current = from.manhattan(king_pos);
            if current <= 1 {
                continue;
            }
            let mut best: Option<(Position, i32, bool)> = None;
            for m in piece.move_set.positions() {
                let distance = m.manhattan(king_pos);
                if distance >= current {
                    continue;
                }
                let safe = !self.threatened(m);
                let better = match best {
                    None => true,
                    Some((_, best_distance, best_safe)) => {
                        (safe && !best_safe) || (safe == best_safe && distance < best_distance)
                    }
                };
                if better {
                    best = Some((m, distance, safe));
                }
            }
            if let Some((to, distance, safe)) = best {
                reinforcements.push((Draw::new(from, to), distance, safe));
            }
        }
        reinforcements.sort_by(|a, b| b.2.cmp(&a.2).then(a.1.cmp(&b.1)));

        for (draw, _, _) in reinforcements {
            if moves.len() >= limit {
                break;
            }
            moves.push(draw);
        }

        BatchAction::new(BatchActionKind::DefendKing, moves)
    }
}
