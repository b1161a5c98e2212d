//! Grid coordinates and the geometry helpers used by line and area effects.
//!
//! Positions are plain values: `(x, y)` with `x` growing to the right and `y`
//! growing downward. Offsets in a piece type's action map are also expressed
//! as `Position`s relative to the piece.
//!
//! ## Neighborhood Order
//!
//! `neighbors()` always yields the 8 surrounding cells in the same order:
//! the row above left to right, then the left and right cells, then the row
//! below left to right. `area()` is the same walk with the center cell in the
//! middle; explosions destroy in that order, which shows up in the event log
//! and the graveyard.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Integer board coordinate or relative offset.
///
/// Ordering is by `x`, then `y`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// Offsets of the 8-neighborhood in enumeration order.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Offsets of the four diagonal neighbors.
const DIAGONAL_OFFSETS: [(i32, i32); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by `(dx, dy)`.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Negate the Y component.
    ///
    /// Used to mirror action-map offsets for the mirrored player.
    #[must_use]
    pub const fn invert_y(self) -> Self {
        Self::new(self.x, -self.y)
    }

    /// The 8 surrounding cells, in fixed enumeration order.
    ///
    /// Cells may lie off the board; callers filter.
    #[must_use]
    pub fn neighbors(self) -> [Position; 8] {
        NEIGHBOR_OFFSETS.map(|(dx, dy)| self.offset(dx, dy))
    }

    /// The 3x3 block centered here, row-major, center included.
    #[must_use]
    pub fn area(self) -> [Position; 9] {
        let mut cells = [self; 9];
        for (i, cell) in cells.iter_mut().enumerate() {
            *cell = self.offset(i as i32 % 3 - 1, i as i32 / 3 - 1);
        }
        cells
    }

    /// The 4 diagonal neighbors.
    #[must_use]
    pub fn diagonals(self) -> [Position; 4] {
        DIAGONAL_OFFSETS.map(|(dx, dy)| self.offset(dx, dy))
    }

    /// Manhattan (taxicab) distance.
    #[must_use]
    pub const fn manhattan(self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Chebyshev (king-move) distance.
    #[must_use]
    pub fn chebyshev(self, other: Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Cells strictly between `self` and `other`.
    ///
    /// Steps from `self` toward `other` by `delta / chebyshev` per axis
    /// (integer division, truncating toward zero), so straight and diagonal
    /// lines are exact and knight-like offsets walk along the dominant axis.
    /// Empty when the positions are equal or adjacent.
    pub fn path_to(self, other: Position) -> impl Iterator<Item = Position> {
        let length = self.chebyshev(other);
        let (step_x, step_y) = if length == 0 {
            (0, 0)
        } else {
            ((other.x - self.x) / length, (other.y - self.y) / length)
        };
        (1..length).map(move |i| self.offset(step_x * i, step_y * i))
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
