//! Construction errors.
//!
//! Only building a game can fail with an error value. Illegal moves are
//! plain `false` returns; broken invariants panic.

use thiserror::Error;

use crate::core::{PlayerId, Position};

/// Reasons a `GameOperatorBuilder` refuses to build.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A player has no king
    #[error("{0} has no king")]
    MissingKing(PlayerId),

    /// A player was given a second king
    #[error("{0} already has a king")]
    DuplicateKing(PlayerId),

    /// Placement outside the board
    #[error("Position {0} is off the board")]
    OffBoard(Position),

    /// Placement onto an occupied cell
    #[error("Position {0} is already occupied")]
    Occupied(Position),
}

/// Result type alias for game construction.
pub type BuildResult<T> = Result<T, BuildError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            BuildError::MissingKing(PlayerId::TWO).to_string(),
            "Player 2 has no king"
        );
        assert_eq!(
            BuildError::OffBoard(Position::new(-1, 4)).to_string(),
            "Position (-1, 4) is off the board"
        );
    }
}
