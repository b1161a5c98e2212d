//! The game operator: aggregate root of a running game.
//!
//! ## Ownership
//!
//! - `board` maps cells to `PieceId`s.
//! - `pieces` is the arena: every piece ever placed, alive or buried, keyed
//!   by id. The board and the arena are kept in sync by the mutation
//!   primitives, which only `Event`s call.
//! - `kings` holds each side's king id, resolved against the arena on
//!   demand.
//! - `graveyard` lists buried piece ids, oldest first. Undo restores from
//!   the tail.
//!
//! All collections are `im` persistent structures, so `copy()` is O(1) and
//! mutating a copy never shows through to the original.
//!
//! ## Draw Protocol
//!
//! ```text
//! perform_draw(from, to)
//!   ├── history.begin_draw()
//!   ├── piece_type.perform(...)      // emits events via perform_event
//!   │     └── perform_event(e)       // apply e, append to the open draw
//!   └── compute_possible_moves()
//!
//! undo_draw()
//!   ├── history.pop_draw()
//!   ├── undo events newest first
//!   └── compute_possible_moves()
//! ```

use std::sync::Arc;

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Board;
use crate::core::{Draw, PieceId, PlayerId, PlayerMap, Position};
use crate::events::{DrawEvent, Event, MatchHistory};
use crate::pieces::{MoveSet, Piece, PieceType};

/// Distance reported when the enemy has no pieces left.
pub const NO_ENEMY_DISTANCE: i32 = 9000;

/// Board, pieces, kings, graveyard, turn and winner, plus the history that
/// makes every change reversible.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameOperator {
    board: Board,
    pieces: OrdMap<PieceId, Piece>,
    kings: PlayerMap<Option<PieceId>>,
    graveyard: Vector<PieceId>,
    winner: Option<PlayerId>,
    players_turn: PlayerId,
    history: MatchHistory,
}

impl GameOperator {
    pub(crate) fn from_parts(
        board: Board,
        pieces: OrdMap<PieceId, Piece>,
        kings: PlayerMap<Option<PieceId>>,
        players_turn: PlayerId,
        history: MatchHistory,
    ) -> Self {
        Self {
            board,
            pieces,
            kings,
            graveyard: Vector::new(),
            winner: None,
            players_turn,
            history,
        }
    }

    // === Board queries ===

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.board.width()
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.board.height()
    }

    #[must_use]
    pub fn is_onboard(&self, pos: Position) -> bool {
        self.board.is_onboard(pos)
    }

    /// Check if a cell is empty. Off-board cells count as free.
    #[must_use]
    pub fn is_free(&self, pos: Position) -> bool {
        self.board.is_free(pos)
    }

    // === Piece queries ===

    #[must_use]
    pub fn piece_at(&self, pos: Position) -> Option<&Piece> {
        self.board.piece_at(pos).and_then(|id| self.pieces.get(&id))
    }

    /// Look up a piece by id, alive or buried.
    #[must_use]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(&id)
    }

    /// Live pieces in id order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.values().filter(|p| p.is_alive())
    }

    /// Live pieces owned by `player`, in id order.
    pub fn pieces_of(&self, player: PlayerId) -> impl Iterator<Item = &Piece> {
        self.pieces().filter(move |p| p.owner == player)
    }

    /// Number of live pieces.
    #[must_use]
    pub fn piece_count(&self) -> usize {
        self.pieces().count()
    }

    /// `player`'s king, alive or buried.
    #[must_use]
    pub fn king(&self, player: PlayerId) -> Option<&Piece> {
        self.kings[player].and_then(|id| self.pieces.get(&id))
    }

    /// Buried pieces, oldest first.
    pub fn graveyard(&self) -> impl Iterator<Item = &Piece> {
        self.graveyard.iter().filter_map(|id| self.pieces.get(id))
    }

    #[must_use]
    pub fn graveyard_len(&self) -> usize {
        self.graveyard.len()
    }

    /// Sum of the levels of `player`'s live pieces.
    #[must_use]
    pub fn material(&self, player: PlayerId) -> u32 {
        self.pieces_of(player).map(Piece::level).sum()
    }

    /// Smallest Manhattan distance from `pos` to any live piece of `enemy`.
    #[must_use]
    pub fn distance_to_enemy(&self, enemy: PlayerId, pos: Position) -> i32 {
        self.pieces_of(enemy)
            .filter_map(|p| p.position)
            .map(|p| p.manhattan(pos))
            .min()
            .unwrap_or(NO_ENEMY_DISTANCE)
    }

    // === Turn and winner ===

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn set_winner(&mut self, winner: Option<PlayerId>) {
        self.winner = winner;
    }

    #[must_use]
    pub fn players_turn(&self) -> PlayerId {
        self.players_turn
    }

    pub fn set_players_turn(&mut self, player: PlayerId) {
        self.players_turn = player;
    }

    // === History ===

    #[must_use]
    pub fn history(&self) -> &MatchHistory {
        &self.history
    }

    /// Open a new draw in the history. Events performed from now on are
    /// recorded into it.
    pub fn begin_draw(&mut self) {
        self.history.begin_draw();
    }

    /// Apply an event and append it to the open draw.
    ///
    /// # Panics
    ///
    /// Panics if no draw is open, or if the event does not match the board.
    pub fn perform_event(&mut self, event: Event) {
        event.perform(self);
        self.history.record(event);
    }

    // === Draws ===

    /// Perform the action of the piece on `from` toward `to` as a new draw.
    ///
    /// The action's condition is checked against the live board. Returns
    /// false and leaves no trace when there is no piece, no action for the
    /// offset, or the condition fails. Does not check whose turn it is.
    pub fn perform_draw(&mut self, from: Position, to: Position) -> bool {
        self.run_draw(from, to, true)
    }

    /// Like `perform_draw`, but skip the action's chained effects.
    pub fn perform_draw_without_chain(&mut self, from: Position, to: Position) -> bool {
        self.run_draw(from, to, false)
    }

    fn run_draw(&mut self, from: Position, to: Position, chain: bool) -> bool {
        let Some(piece_type) = self.piece_at(from).map(|p| Arc::clone(&p.piece_type)) else {
            return false;
        };

        self.history.begin_draw();
        let fired = if chain {
            piece_type.perform(self, from, to)
        } else {
            piece_type.perform_without_chain(self, from, to)
        };
        if !fired {
            let draw = self.history.pop_draw();
            debug_assert!(draw.is_empty(), "Rejected draw recorded events");
            return false;
        }

        self.compute_possible_moves();
        debug!(
            %from,
            %to,
            chain,
            events = self.history.last().map_or(0, DrawEvent::len),
            "Performed draw"
        );
        true
    }

    /// Perform several of `player`'s moves as a single draw.
    ///
    /// Each move is checked against the live board right before it runs;
    /// moves from cells `player` does not own, or no longer legal, are
    /// skipped. Stops early once a winner exists. The draw is recorded even
    /// if nothing ran, so one `undo_draw` always reverts one batch.
    ///
    /// Returns how many moves ran.
    pub fn perform_batch(&mut self, player: PlayerId, draws: &[Draw]) -> usize {
        self.history.begin_draw();
        let mut performed = 0;
        for draw in draws {
            let Some(piece_type) = self
                .piece_at(draw.from)
                .filter(|p| p.owner == player)
                .map(|p| Arc::clone(&p.piece_type))
            else {
                continue;
            };
            if !piece_type.is_possible_move(self, draw.from, draw.to) {
                continue;
            }
            if piece_type.perform(self, draw.from, draw.to) {
                performed += 1;
            }
            if self.winner.is_some() {
                break;
            }
        }
        self.compute_possible_moves();
        debug!(%player, requested = draws.len(), performed, "Performed batch");
        performed
    }

    /// Revert the most recent draw, events newest first.
    ///
    /// # Panics
    ///
    /// Panics if the history is empty.
    pub fn undo_draw(&mut self) -> DrawEvent {
        let draw = self.history.pop_draw();
        for event in draw.events().iter().rev() {
            event.undo(self);
        }
        self.compute_possible_moves();
        debug!(events = draw.len(), "Undid draw");
        draw
    }

    // === Move enumeration ===

    /// Recompute the cached move set of every live piece.
    pub fn compute_possible_moves(&mut self) {
        let updates: Vec<(PieceId, MoveSet)> = self
            .pieces()
            .filter_map(|p| {
                let pos = p.position?;
                Some((p.id, p.piece_type.compute_possible_moves(self, pos)))
            })
            .collect();
        for (id, moves) in updates {
            if let Some(piece) = self.pieces.get_mut(&id) {
                piece.move_set = moves;
            }
        }
    }

    /// Every cached move of `player`'s live pieces, in piece id order.
    #[must_use]
    pub fn possible_draws(&self, player: PlayerId) -> Vec<Draw> {
        self.pieces_of(player)
            .filter_map(|p| Some((p.position?, &p.move_set)))
            .flat_map(|(from, moves)| moves.positions().map(move |to| Draw::new(from, to)))
            .collect()
    }

    /// Independent copy. Piece ids are preserved.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    // === Mutation primitives (called by events) ===

    /// Take `piece` off `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `piece` is not standing on `pos`.
    pub(crate) fn lift(&mut self, piece: PieceId, pos: Position) {
        match self.board.piece_at(pos) {
            Some(found) if found == piece => {}
            found => panic!("{piece} is not at {pos} (found {found:?})"),
        }
        self.board.remove(pos);
        self.piece_mut(piece).position = None;
    }

    /// Stand `piece` on `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is off the board or occupied.
    pub(crate) fn put(&mut self, piece: PieceId, pos: Position) {
        self.board.place(piece, pos);
        self.piece_mut(piece).position = Some(pos);
    }

    pub(crate) fn relocate(&mut self, piece: PieceId, from: Position, to: Position) {
        self.lift(piece, from);
        self.put(piece, to);
    }

    /// Append a lifted piece to the graveyard, applying the king rule.
    ///
    /// The losing side is the player whose king slot holds `piece`, even if
    /// the king has since changed owner.
    pub(crate) fn bury(&mut self, piece: PieceId) {
        self.graveyard.push_back(piece);
        if let Some(loser) = PlayerId::all().find(|p| self.kings[*p] == Some(piece)) {
            self.winner = Some(loser.opponent());
        }
    }

    /// Take `piece` back from the graveyard tail. The winner is left alone;
    /// restoring it is up to whoever recorded it.
    ///
    /// # Panics
    ///
    /// Panics if `piece` is not the most recently buried piece.
    pub(crate) fn exhume(&mut self, piece: PieceId) {
        match self.graveyard.pop_back() {
            Some(last) if last == piece => {}
            last => panic!("{piece} is not at the graveyard tail (found {last:?})"),
        }
    }

    pub(crate) fn flip_owner(&mut self, piece: PieceId) {
        let p = self.piece_mut(piece);
        p.owner = p.owner.opponent();
    }

    pub(crate) fn set_type(&mut self, piece: PieceId, piece_type: Arc<PieceType>) {
        self.piece_mut(piece).piece_type = piece_type;
    }

    fn piece_mut(&mut self, piece: PieceId) -> &mut Piece {
        self.pieces
            .get_mut(&piece)
            .unwrap_or_else(|| panic!("{piece} does not exist"))
    }
}
