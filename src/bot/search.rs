//! Depth-limited adversarial search.
//!
//! ## Algorithm
//!
//! For every root candidate (the mover's legal draws, closest-to-enemy
//! first) the bot plays it on a private copy of the game, scores it with
//! `evaluate_draw`, and recurses into the opponent's replies, alternating
//! between its own draws and the enemy's. A node's value is its own score
//! plus the average of its children's values. Every play is undone before
//! the next candidate, so the copy returns to the root position after each
//! candidate.
//!
//! Shortcuts:
//!
//! - a root draw scoring at least half a (weighted) king ends the search:
//!   it wins
//! - a reply at the next ply scoring at most minus half a king marks the
//!   line as lost
//! - a position where the side to move has no draws is a dead end, and dead
//!   ends at the root are never picked
//! - a draw that produces a winner is a leaf
//!
//! The final pick is random among the draws within `tolerance` of the best
//! score, using the bot's seeded RNG.

use std::time::Instant;

use tracing::{debug, warn};

use crate::core::{Draw, GameRng, PlayerId};
use crate::game::Game;
use crate::state::GameOperator;

use super::config::BotConfig;
use super::eval::{evaluate_draw, weight_of};
use super::stats::SearchStats;

/// Value of a root draw that wins outright.
pub const WIN: f64 = f64::MAX;

/// Value of a line in which the enemy takes the bot's king.
pub const LOSS: f64 = -f64::MAX / 2.0;

/// Value of a draw after which nothing can be played, or that could not be
/// played at all.
pub const DEAD_END: f64 = -f64::MAX / 4.0;

/// Anything that picks a draw for the side to move.
pub trait DrawPolicy {
    /// Pick a draw, or `None` to resign.
    fn choose_draw(&mut self, game: &Game) -> Option<Draw>;
}

/// Picks uniformly among legal draws.
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    rng: GameRng,
}

impl RandomPolicy {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl DrawPolicy for RandomPolicy {
    fn choose_draw(&mut self, game: &Game) -> Option<Draw> {
        let draws = game.legal_draws();
        self.rng.choose(&draws).copied()
    }
}

/// The searching bot.
#[derive(Clone, Debug)]
pub struct Bot {
    player: PlayerId,
    config: BotConfig,
    rng: GameRng,
    stats: SearchStats,
}

impl Bot {
    /// Create a bot that scores positions for `player`.
    ///
    /// # Panics
    ///
    /// Panics if the config has a zero depth or a tolerance outside `[0, 1]`.
    #[must_use]
    pub fn new(player: PlayerId, config: BotConfig) -> Self {
        assert!(config.depth > 0, "Search depth must be at least 1");
        assert!(
            (0.0..=1.0).contains(&config.tolerance),
            "Tolerance must be between 0 and 1, got {}",
            config.tolerance
        );
        let rng = GameRng::new(config.seed);
        Self {
            player,
            config,
            rng,
            stats: SearchStats::default(),
        }
    }

    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    #[must_use]
    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Statistics of the last search.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Independent RNG branch, so side computations leave the search
    /// sequence alone.
    pub(crate) fn fork_rng(&mut self) -> GameRng {
        self.rng.fork()
    }

    /// Pick a draw for the side to move, or `None` if it has none.
    ///
    /// Never mutates `game`; the search runs on a copy.
    pub fn choose_draw(&mut self, game: &Game) -> Option<Draw> {
        let start = Instant::now();
        self.stats.reset();

        let evaluated = self.evaluate_draws(game);
        let best = best_draws_with_tolerance(&evaluated, self.config.tolerance);
        let choice = self.rng.choose(&best).copied();

        self.stats.time_us = start.elapsed().as_micros() as u64;
        debug!(
            player = %self.player,
            candidates = self.stats.candidates,
            evaluated = self.stats.evaluated,
            nodes = self.stats.nodes,
            best_value = self.stats.best_value,
            choice = ?choice,
            "Bot chose draw"
        );
        choice
    }

    /// Score the root candidates.
    ///
    /// Returns the scored draws in candidate order. Dead ends are left out;
    /// if every candidate is one, a single random draw with score 0 is
    /// returned instead. Empty only when there is no legal draw.
    pub fn evaluate_draws(&mut self, game: &Game) -> Vec<(Draw, f64)> {
        let mut copy = game.copy();
        let draws = if game.winner().is_some() {
            Vec::new()
        } else {
            sorted_draws(copy.operator(), copy.players_turn())
        };
        self.stats.candidates = draws.len() as u32;

        let mut values = Vec::new();
        let mut best_value = DEAD_END;
        let mut counter = 0;
        let mut last_good = 0;

        for &draw in &draws {
            let value = self.emulate(&mut copy, draw, self.config.depth, true);
            if value > best_value {
                best_value = value;
                last_good = counter;
            }
            if value <= DEAD_END {
                counter += 1;
                continue;
            }
            values.push((draw, value));
            if value == WIN {
                break;
            }
            if counter > self.config.min_draws_checking
                && counter - last_good > self.config.min_draws_checking_history
            {
                break;
            }
            counter += 1;
        }

        if values.is_empty() {
            if let Some(&fallback) = self.rng.choose(&draws) {
                warn!(player = %self.player, draw = %fallback, "Every draw scored as a dead end, picking at random");
                values.push((fallback, 0.0));
            }
        }

        self.stats.evaluated = values.len() as u32;
        self.stats.best_value = best_value;
        values
    }

    /// Play `draw`, score it, recurse into the replies and undo.
    ///
    /// `own` tells whether `draw` is one of the bot's side's draws (replies
    /// are then the enemy's and the best of them is tracked as a maximum)
    /// or an enemy draw (tracked as a minimum).
    fn emulate(&mut self, game: &mut Game, draw: Draw, depth: u32, own: bool) -> f64 {
        let graveyard_before = game.operator().graveyard_len();
        if !game.play(draw.from, draw.to) {
            return DEAD_END;
        }
        self.stats.nodes += 1;

        let max_depth = self.config.depth;
        let king = self.config.weights.king;
        let mut sum = weight_of(
            evaluate_draw(
                game.operator(),
                self.player,
                draw,
                graveyard_before,
                &self.config.weights,
            ),
            depth,
            max_depth,
        );

        if depth == max_depth && sum >= weight_of(king, max_depth, max_depth) / 2.0 {
            game.undo();
            return WIN;
        }
        if depth + 1 == max_depth && sum <= -weight_of(king, depth, max_depth) / 2.0 {
            game.undo();
            return LOSS;
        }
        if depth == 0 || game.winner().is_some() {
            game.undo();
            return sum;
        }

        let replies = sorted_draws(game.operator(), game.players_turn());
        if replies.is_empty() {
            game.undo();
            return DEAD_END;
        }

        let mut best = if own { -1_000_000.0 } else { 1_000_000.0 };
        let mut counter = 1;
        let mut last_good = 0;
        let mut reply_sum = 0.0;

        for reply in replies {
            let value = self.emulate(game, reply, depth - 1, !own);
            reply_sum = saturate(reply_sum + value);
            let improved = if own { value > best } else { value < best };
            if improved {
                best = value;
                last_good = counter;
            }
            counter += 1;
            if counter > self.config.min_draws_checking_deep
                && counter - last_good > self.config.min_draws_checking_history_deep
            {
                break;
            }
        }

        sum = saturate(sum + reply_sum / counter as f64);
        game.undo();
        sum
    }
}

impl DrawPolicy for Bot {
    fn choose_draw(&mut self, game: &Game) -> Option<Draw> {
        Bot::choose_draw(self, game)
    }
}

/// `player`'s cached draws, stable-sorted by the destination's distance to
/// the nearest enemy piece.
#[must_use]
pub fn sorted_draws(operator: &GameOperator, player: PlayerId) -> Vec<Draw> {
    let enemy = player.opponent();
    let mut draws = operator.possible_draws(player);
    draws.sort_by_key(|d| operator.distance_to_enemy(enemy, d.to));
    draws
}

/// Draws whose value is at least `best - |best * tolerance|`.
#[must_use]
pub fn best_draws_with_tolerance(values: &[(Draw, f64)], tolerance: f64) -> Vec<Draw> {
    let best = values
        .iter()
        .map(|(_, v)| *v)
        .fold(f64::NEG_INFINITY, f64::max);
    let threshold = best - (best * tolerance).abs();
    values
        .iter()
        .filter(|(_, v)| *v >= threshold)
        .map(|(d, _)| *d)
        .collect()
}

/// Keep sums finite so averages of extreme values stay comparable.
fn saturate(value: f64) -> f64 {
    value.clamp(-f64::MAX, f64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Position;
    use crate::pieces::presets;
    use crate::state::GameOperatorBuilder;

    fn pos(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn draw(fx: i32, fy: i32, tx: i32, ty: i32) -> Draw {
        Draw::new(pos(fx, fy), pos(tx, ty))
    }

    #[test]
    fn test_tolerance_window() {
        let values = vec![
            (draw(0, 0, 0, 1), 100.0),
            (draw(0, 0, 1, 1), 85.0),
            (draw(0, 0, 1, 0), 79.0),
        ];
        assert_eq!(best_draws_with_tolerance(&values, 0.2).len(), 2);
        assert_eq!(best_draws_with_tolerance(&values, 0.0), vec![draw(0, 0, 0, 1)]);

        // Negative best widens downward too
        let negative = vec![(draw(0, 0, 0, 1), -10.0), (draw(0, 0, 1, 1), -11.0)];
        assert_eq!(best_draws_with_tolerance(&negative, 0.2).len(), 2);
        assert!(best_draws_with_tolerance(&[], 0.2).is_empty());
    }

    #[test]
    fn test_sorted_draws_closest_first() {
        let king = presets::king();
        let rook = presets::rook(3);
        let op = GameOperatorBuilder::new(7, 7)
            .king(PlayerId::ONE, &king, pos(0, 6))
            .king(PlayerId::TWO, &king, pos(6, 0))
            .piece(PlayerId::TWO, &rook, pos(3, 3))
            .build()
            .unwrap();

        let draws = sorted_draws(&op, PlayerId::TWO);
        let distances: Vec<_> = draws
            .iter()
            .map(|d| op.distance_to_enemy(PlayerId::ONE, d.to))
            .collect();
        let mut sorted = distances.clone();
        sorted.sort_unstable();
        assert_eq!(distances, sorted);
        assert_eq!(draws.len(), op.possible_draws(PlayerId::TWO).len());
    }

    #[test]
    fn test_bot_takes_hanging_king() {
        let king = presets::king();
        let pawn = presets::pawn();
        let operator = GameOperatorBuilder::new(6, 6)
            .king(PlayerId::ONE, &king, pos(2, 3))
            .king(PlayerId::TWO, &king, pos(3, 2))
            .piece(PlayerId::ONE, &pawn, pos(0, 5))
            .piece(PlayerId::TWO, &pawn, pos(5, 0))
            .build()
            .unwrap();
        let game = Game::new(operator);

        for depth in [1, 2] {
            let mut bot = Bot::new(PlayerId::ONE, BotConfig::default().with_depth(depth));
            assert_eq!(bot.choose_draw(&game), Some(draw(2, 3, 3, 2)));
            assert!(bot.stats().nodes > 0);
        }
    }

    #[test]
    fn test_search_leaves_game_untouched() {
        let king = presets::king();
        let pawn = presets::pawn();
        let operator = GameOperatorBuilder::new(6, 6)
            .king(PlayerId::ONE, &king, pos(2, 5))
            .king(PlayerId::TWO, &king, pos(3, 0))
            .piece(PlayerId::ONE, &pawn, pos(1, 4))
            .piece(PlayerId::ONE, &pawn, pos(3, 4))
            .piece(PlayerId::TWO, &pawn, pos(2, 1))
            .piece(PlayerId::TWO, &pawn, pos(4, 1))
            .build()
            .unwrap();
        let game = Game::new(operator);
        let before = game.clone();

        let mut bot = Bot::new(PlayerId::ONE, BotConfig::default());
        let choice = bot.choose_draw(&game);

        assert_eq!(game, before);
        assert!(choice.is_some_and(|d| game.legal_draws().contains(&d)));
    }

    #[test]
    fn test_random_policy_picks_legal_draw() {
        let king = presets::king();
        let operator = GameOperatorBuilder::new(4, 4)
            .king(PlayerId::ONE, &king, pos(0, 3))
            .king(PlayerId::TWO, &king, pos(3, 0))
            .build()
            .unwrap();
        let game = Game::new(operator);

        let mut policy = RandomPolicy::new(3);
        let choice = policy.choose_draw(&game);
        assert!(choice.is_some_and(|d| game.legal_draws().contains(&d)));
    }

    #[test]
    fn test_saturate() {
        assert_eq!(saturate(f64::INFINITY), f64::MAX);
        assert_eq!(saturate(f64::NEG_INFINITY), -f64::MAX);
        assert_eq!(saturate(1.5), 1.5);
    }
}
