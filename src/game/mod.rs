//! The turn-taking layer over `GameOperator`.

pub mod game;

pub use game::Game;
