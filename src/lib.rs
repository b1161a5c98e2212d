//! # proc-chess
//!
//! Rule engine and adversarial search for chess-like games whose pieces are
//! generated rather than fixed.
//!
//! ## Design Principles
//!
//! 1. **Behavior Is Data**: a piece type is an offset-to-`Action` map. An
//!    action is a `Condition` plus an act, and acts can chain further acts
//!    onto the cells they touched. New piece kinds need no new code.
//!
//! 2. **Event Sourcing**: every board change is an invertible `Event`,
//!    recorded per draw. Undo inverts a draw's events newest first and
//!    restores the board exactly, winner included.
//!
//! 3. **Cheap Copies**: all game state lives in `im` persistent structures,
//!    so search works on private copies at O(1) cost.
//!
//! 4. **Deterministic**: every random choice is seeded. The same position
//!    and seed always give the same game.
//!
//! ## Modules
//!
//! - `core`: positions, players, piece ids, draws, RNG
//! - `board`: the occupancy grid
//! - `pieces`: pieces, piece types, move sets, preset types
//! - `effects`: conditions, acts, connectors, actions and their resolver
//! - `events`: events, per-draw event lists, match history
//! - `state`: the `GameOperator` and its builder
//! - `game`: turn taking, legality, batch play, undo
//! - `bot`: depth-limited search and batch-action suggestions

pub mod core;
pub mod board;
pub mod pieces;
pub mod effects;
pub mod events;
pub mod state;
pub mod game;
pub mod bot;

// Re-export commonly used types
pub use crate::core::{Draw, GameRng, PieceId, PlayerId, PlayerMap, Position};

pub use crate::board::Board;

pub use crate::pieces::{ActionMap, MoveSet, MoveTarget, Piece, PieceType, PieceTypeId};

pub use crate::effects::{
    ActResolver, Action, Condition, ConditionContext, ConditionEvaluator, Connector, ForceAct,
    ForceKind, ForceType, PieceAct, PieceActKind, PosAct, PosActKind, PosSet, StandardAction,
};

pub use crate::events::{DrawEvent, Event, MatchHistory};

pub use crate::state::{BuildError, BuildResult, GameOperator, GameOperatorBuilder};

pub use crate::game::Game;

pub use crate::bot::{
    BatchAction, BatchActionKind, BatchWeights, Bot, BotConfig, DrawPolicy, EvalWeights,
    RandomPolicy, SearchStats,
};
