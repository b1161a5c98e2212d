//! The board grid.
//!
//! A `Board` only tracks occupancy: which `PieceId` stands on which cell.
//! Piece data lives in the `GameOperator`, which keeps both sides in sync.

pub mod board;

pub use board::Board;
