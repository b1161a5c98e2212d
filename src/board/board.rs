//! Fixed-size occupancy grid.

use serde::{Deserialize, Serialize};

use crate::core::{PieceId, Position};

/// A `width x height` grid where each cell holds at most one piece.
///
/// Placement and removal are the only mutations. Both panic on misuse
/// (placing onto an occupied or off-board cell) because callers are
/// expected to have checked first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    width: i32,
    height: i32,
    cells: Vec<Option<PieceId>>,
}

impl Board {
    /// Create an empty board.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not positive.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "Board dimensions must be positive");
        Self {
            width,
            height,
            cells: vec![None; (width * height) as usize],
        }
    }

    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Check if a position lies on the board.
    #[must_use]
    pub const fn is_onboard(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.is_onboard(pos)
            .then(|| (pos.y * self.width + pos.x) as usize)
    }

    /// The piece on a cell, or `None` for empty and off-board cells.
    #[must_use]
    pub fn piece_at(&self, pos: Position) -> Option<PieceId> {
        self.index(pos).and_then(|i| self.cells[i])
    }

    /// Check if a cell holds no piece.
    ///
    /// Off-board cells count as free.
    #[must_use]
    pub fn is_free(&self, pos: Position) -> bool {
        self.piece_at(pos).is_none()
    }

    /// Point mirror through the board center: `(w-1-x, h-1-y)`.
    #[must_use]
    pub const fn mirror(&self, pos: Position) -> Position {
        Position::new(self.width - 1 - pos.x, self.height - 1 - pos.y)
    }

    /// Put a piece on an empty on-board cell.
    ///
    /// # Panics
    ///
    /// Panics if the cell is off the board or occupied.
    pub fn place(&mut self, piece: PieceId, pos: Position) {
        let index = self
            .index(pos)
            .unwrap_or_else(|| panic!("Cannot place {piece} off the board at {pos}"));
        if let Some(existing) = self.cells[index] {
            panic!("Cannot place {piece} at {pos}: occupied by {existing}");
        }
        self.cells[index] = Some(piece);
    }

    /// Clear a cell, returning the piece that stood there.
    pub fn remove(&mut self, pos: Position) -> Option<PieceId> {
        let index = self.index(pos)?;
        self.cells[index].take()
    }

    /// Iterate over occupied cells in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Position, PieceId)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.map(|id| (Position::new(i as i32 % width, i as i32 / width), id))
        })
    }

    /// Iterate over every on-board position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }
}
