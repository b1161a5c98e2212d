//! Computer opponents.
//!
//! ## Overview
//!
//! - `Bot`: depth-limited search over the side to move's draws, scoring
//!   captures by piece kind and progress toward the enemy, averaging over
//!   the opponent's replies
//! - `RandomPolicy`: uniform random legal draws, for baselines and tests
//! - batch actions: heuristic plans that move several pieces in one turn
//!
//! Both `Bot` and `RandomPolicy` implement `DrawPolicy`.
//!
//! ## Usage
//!
//! ```rust
//! use proc_chess::bot::{Bot, BotConfig};
//! use proc_chess::core::{PlayerId, Position};
//! use proc_chess::game::Game;
//! use proc_chess::pieces::presets;
//! use proc_chess::state::GameOperatorBuilder;
//!
//! let king = presets::king();
//! let operator = GameOperatorBuilder::new(6, 6)
//!     .king(PlayerId::ONE, &king, Position::new(2, 5))
//!     .king(PlayerId::TWO, &king, Position::new(3, 0))
//!     .build()
//!     .unwrap();
//! let mut game = Game::new(operator);
//!
//! let mut bot = Bot::new(PlayerId::ONE, BotConfig::default().with_depth(1));
//! if let Some(draw) = bot.choose_draw(&game) {
//!     assert!(game.play(draw.from, draw.to));
//! }
//! ```
//!
//! The search is synchronous and never touches the caller's game; callers
//! that need a time budget run it on their own thread.

pub mod batch;
pub mod config;
pub mod eval;
pub mod search;
pub mod stats;

pub use batch::{
    choose_best_batch_action, compute_batch_actions, evaluate_board, filter_safe_draws,
    threat_map, BatchAction, BatchActionKind, ThreatMap,
};
pub use config::{BatchWeights, BotConfig, EvalWeights};
pub use eval::{evaluate_draw, weight_of};
pub use search::{best_draws_with_tolerance, sorted_draws, Bot, DrawPolicy, RandomPolicy};
pub use stats::SearchStats;
