//! Effect composition engine.
//!
//! Piece behavior is data: each offset in a piece type's action map holds an
//! `Action`, a `Condition` gating a relational `PieceAct`. Acts mutate the
//! board only by emitting events through the `GameOperator`, and may carry a
//! `Connector` chaining positional `PosAct`s onto the cells they touched.
//!
//! ## Key Types
//!
//! - `Condition`: composable board predicate
//! - `PieceAct` / `PosAct`: relational and positional acts
//! - `ForceAct`: positional act that makes another piece act, gated by `ForceType`
//! - `Connector` / `PosSet`: chained follow-on acts
//! - `Action`: condition + act + display symbol
//! - `StandardAction`: the built-in action catalog
//! - `ActResolver`: single evaluation function for acts

pub mod condition;
pub mod act;
pub mod connector;
pub mod action;
pub mod catalog;
pub mod resolver;

pub use condition::{Condition, ConditionContext, ConditionEvaluator};
pub use act::{ForceAct, ForceKind, ForceType, PieceAct, PieceActKind, PosAct, PosActKind};
pub use connector::{Connector, PosList, PosSet};
pub use action::Action;
pub use catalog::StandardAction;
pub use resolver::ActResolver;
