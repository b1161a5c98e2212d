//! Turn-level game wrapper.
//!
//! `GameOperator` knows how to perform and revert draws. `Game` adds the
//! rules of taking turns on top:
//!
//! - only the player to move may play, only legal moves, only while no
//!   winner exists
//! - the turn passes to the opponent after each play (unless it won)
//! - `undo` restores the mover, the turn counter and the winner exactly;
//!   the operator's own undo leaves the winner as it was

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Draw, PlayerId, Position};
use crate::events::DrawEvent;
use crate::state::GameOperator;

/// What `undo` needs to restore beyond the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct TurnRecord {
    mover: PlayerId,
    winner: Option<PlayerId>,
}

/// A game in progress.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    operator: GameOperator,
    turns: usize,
    records: Vector<TurnRecord>,
}

impl Game {
    /// Start a game from a built operator. The operator's player to move
    /// opens.
    #[must_use]
    pub fn new(operator: GameOperator) -> Self {
        Self {
            operator,
            turns: 0,
            records: Vector::new(),
        }
    }

    #[must_use]
    pub fn operator(&self) -> &GameOperator {
        &self.operator
    }

    #[must_use]
    pub fn players_turn(&self) -> PlayerId {
        self.operator.players_turn()
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.operator.winner()
    }

    /// Number of turns played.
    #[must_use]
    pub fn turns(&self) -> usize {
        self.turns
    }

    /// Check whether the player to move may play `from -> to` right now.
    #[must_use]
    pub fn is_legal(&self, from: Position, to: Position) -> bool {
        if self.operator.winner().is_some() {
            return false;
        }
        self.operator
            .piece_at(from)
            .filter(|p| p.owner == self.players_turn())
            .is_some_and(|p| p.piece_type.is_possible_move(&self.operator, from, to))
    }

    /// Play one move for the player to move.
    ///
    /// Returns false, changing nothing, if the game is over, `from` does not
    /// hold one of the mover's pieces, or the move is not legal on the
    /// current board.
    pub fn play(&mut self, from: Position, to: Position) -> bool {
        if !self.is_legal(from, to) {
            return false;
        }
        let record = self.record();
        if !self.operator.perform_draw(from, to) {
            return false;
        }
        self.end_turn(record);
        debug!(mover = %record.mover, %from, %to, turn = self.turns, winner = ?self.winner(), "Played");
        true
    }

    /// Play several of the mover's moves as one turn.
    ///
    /// Moves are checked one by one against the live board; illegal ones are
    /// skipped, and the batch stops once a winner exists. The turn passes to
    /// the opponent even if no move ran.
    ///
    /// Returns the number of moves that ran, or `None` if the game was
    /// already over.
    pub fn play_batch(&mut self, draws: &[Draw]) -> Option<usize> {
        if self.operator.winner().is_some() {
            return None;
        }
        let record = self.record();
        let performed = self.operator.perform_batch(record.mover, draws);

        self.records.push_back(record);
        self.turns += 1;
        self.operator.set_players_turn(record.mover.opponent());
        debug!(mover = %record.mover, performed, turn = self.turns, "Played batch");
        Some(performed)
    }

    /// The player to move gives up.
    ///
    /// Not recorded in the history; `undo` reverts the last played turn, not
    /// a surrender.
    pub fn surrender(&mut self) {
        let loser = self.players_turn();
        self.operator.set_winner(Some(loser.opponent()));
        debug!(%loser, "Surrendered");
    }

    /// Revert the last turn.
    ///
    /// # Panics
    ///
    /// Panics if no turn has been played.
    pub fn undo(&mut self) {
        let record = self
            .records
            .pop_back()
            .expect("Cannot undo: no turns played");
        self.operator.undo_draw();
        self.operator.set_players_turn(record.mover);
        self.operator.set_winner(record.winner);
        self.turns -= 1;
        debug!(turn = self.turns, "Undid turn");
    }

    /// Every move the player to move may make. Empty once there is a winner.
    #[must_use]
    pub fn legal_draws(&self) -> Vec<Draw> {
        if self.operator.winner().is_some() {
            return Vec::new();
        }
        self.operator.possible_draws(self.players_turn())
    }

    /// Events of the most recent turn, for replay and animation.
    #[must_use]
    pub fn last_draw_event(&self) -> Option<&DrawEvent> {
        self.operator.history().last()
    }

    /// Events of every turn from `turn` (0-based) on.
    pub fn draws_since(&self, turn: usize) -> impl Iterator<Item = &DrawEvent> {
        self.operator.history().draws_since(turn)
    }

    /// Independent copy for search.
    #[must_use]
    pub fn copy(&self) -> Self {
        Self {
            operator: self.operator.copy(),
            turns: self.turns,
            records: self.records.clone(),
        }
    }

    fn record(&self) -> TurnRecord {
        TurnRecord {
            mover: self.players_turn(),
            winner: self.operator.winner(),
        }
    }

    fn end_turn(&mut self, record: TurnRecord) {
        self.records.push_back(record);
        self.turns += 1;
        if self.operator.winner().is_none() {
            self.operator.set_players_turn(record.mover.opponent());
        }
    }
}
