//! Game state: the `GameOperator` and how to build one.
//!
//! The operator owns everything that changes during play and is the only
//! entry point for changing it: draws go in through `perform_draw` or
//! `perform_batch` and come back out through `undo_draw`.

pub mod builder;
pub mod error;
pub mod operator;

pub use builder::GameOperatorBuilder;
pub use error::{BuildError, BuildResult};
pub use operator::{GameOperator, NO_ENEMY_DISTANCE};
