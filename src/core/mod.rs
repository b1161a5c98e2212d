//! Core engine types: positions, players, piece ids, draws and RNG.
//!
//! These are the leaf value types every other module builds on.

pub mod entity;
pub mod player;
pub mod position;
pub mod rng;
pub mod draw;

pub use entity::PieceId;
pub use player::{PlayerId, PlayerMap};
pub use position::Position;
pub use rng::GameRng;
pub use draw::Draw;
