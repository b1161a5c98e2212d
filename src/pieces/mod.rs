//! Pieces and piece types.
//!
//! A `Piece` is a mutable `(owner, position, type)` entity; a `PieceType` is
//! the immutable offset-to-action map it behaves by, shared through `Arc`.

pub mod move_set;
pub mod piece_type;
pub mod piece;
pub mod presets;

pub use move_set::{MoveSet, MoveTarget};
pub use piece_type::{ActionMap, PieceType, PieceTypeId};
pub use piece::Piece;
