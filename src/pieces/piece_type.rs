//! Piece types: immutable, shared behavior definitions.
//!
//! A `PieceType` maps relative offsets to `Action`s. It is built once (by a
//! generator or by hand), wrapped in an `Arc`, and shared by every piece of
//! that type. Nothing in the engine mutates it.
//!
//! ## Orientation
//!
//! Offsets are written from `PlayerId::TWO`'s point of view. Pieces owned by
//! `PieceType::MIRRORED_PLAYER` (`PlayerId::ONE`) read them with the Y axis
//! negated, so "forward" points toward the opponent for both sides.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, Position};
use crate::effects::Action;
use crate::state::GameOperator;

use super::move_set::MoveSet;

/// Stable identity of a generated piece type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceTypeId {
    /// Generator seed.
    pub seed: u64,
    /// Strength level; also drives material evaluation.
    pub level: u32,
    /// Generator version tag.
    pub generator_version: String,
}

impl PieceTypeId {
    #[must_use]
    pub fn new(seed: u64, level: u32, generator_version: impl Into<String>) -> Self {
        Self {
            seed,
            level,
            generator_version: generator_version.into(),
        }
    }
}

impl std::fmt::Display for PieceTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.generator_version, self.seed, self.level)
    }
}

/// Offset-to-action map, kept sorted by offset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<(Position, Action)>", into = "Vec<(Position, Action)>")]
pub struct ActionMap {
    entries: Vec<(Position, Action)>,
}

impl ActionMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `offset` to `action`, returning the action it replaced.
    pub fn insert(&mut self, offset: Position, action: Action) -> Option<Action> {
        match self.entries.binary_search_by_key(&offset, |(o, _)| *o) {
            Ok(i) => Some(std::mem::replace(&mut self.entries[i].1, action)),
            Err(i) => {
                self.entries.insert(i, (offset, action));
                None
            }
        }
    }

    #[must_use]
    pub fn get(&self, offset: Position) -> Option<&Action> {
        self.entries
            .binary_search_by_key(&offset, |(o, _)| *o)
            .ok()
            .map(|i| &self.entries[i].1)
    }

    /// Iterate in offset order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Action)> {
        self.entries.iter().map(|(o, a)| (*o, a))
    }

    /// Offsets in order.
    pub fn offsets(&self) -> impl Iterator<Item = Position> + '_ {
        self.entries.iter().map(|(o, _)| *o)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<(Position, Action)>> for ActionMap {
    fn from(entries: Vec<(Position, Action)>) -> Self {
        let mut map = Self::new();
        for (offset, action) in entries {
            map.insert(offset, action);
        }
        map
    }
}

impl From<ActionMap> for Vec<(Position, Action)> {
    fn from(map: ActionMap) -> Self {
        map.entries
    }
}

/// Immutable behavior definition shared by all pieces of one type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PieceType {
    id: PieceTypeId,
    symbol: char,
    actions: ActionMap,
}

impl PieceType {
    /// The player whose pieces read offsets with Y negated.
    pub const MIRRORED_PLAYER: PlayerId = PlayerId::ONE;

    /// Create a piece type with no actions.
    #[must_use]
    pub fn new(id: PieceTypeId, symbol: char) -> Self {
        Self {
            id,
            symbol,
            actions: ActionMap::new(),
        }
    }

    /// Builder: map `offset` to `action`.
    #[must_use]
    pub fn with_action(mut self, offset: Position, action: impl Into<Action>) -> Self {
        self.actions.insert(offset, action.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> &PieceTypeId {
        &self.id
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.id.level
    }

    #[must_use]
    pub fn symbol(&self) -> char {
        self.symbol
    }

    #[must_use]
    pub fn actions(&self) -> &ActionMap {
        &self.actions
    }

    /// Orient an action-map offset for a piece owned by `owner`.
    ///
    /// Self-inverse, so it also turns a board displacement back into an
    /// action-map key.
    #[must_use]
    pub fn orient(owner: PlayerId, offset: Position) -> Position {
        if owner == Self::MIRRORED_PLAYER {
            offset.invert_y()
        } else {
            offset
        }
    }

    /// The action a piece owned by `owner` on `from` triggers by targeting `to`.
    #[must_use]
    pub fn action_for(&self, owner: PlayerId, from: Position, to: Position) -> Option<&Action> {
        self.actions.get(Self::orient(owner, to - from))
    }

    /// Legal destinations for the piece standing on `pos`.
    ///
    /// Every offset is oriented for the piece's owner, kept if on the board
    /// and if its action's condition currently holds. Empty when `pos` holds
    /// no piece.
    #[must_use]
    pub fn compute_possible_moves(&self, operator: &GameOperator, pos: Position) -> MoveSet {
        let mut moves = MoveSet::new();
        let Some(owner) = operator.piece_at(pos).map(|p| p.owner) else {
            return moves;
        };
        for (offset, action) in self.actions.iter() {
            let target = pos + Self::orient(owner, offset);
            if operator.is_onboard(target) && action.check(operator, pos, target) {
                moves.push(target, action.symbol);
            }
        }
        moves
    }

    /// Check a single proposed move without computing the whole move set.
    #[must_use]
    pub fn is_possible_move(&self, operator: &GameOperator, from: Position, to: Position) -> bool {
        let Some(owner) = operator.piece_at(from).map(|p| p.owner) else {
            return false;
        };
        operator.is_onboard(to)
            && self
                .action_for(owner, from, to)
                .is_some_and(|action| action.check(operator, from, to))
    }

    /// Perform the action for `to - from`, chain included.
    ///
    /// Returns false if there is no piece on `from`, no action for the offset,
    /// the target is off the board or the condition fails.
    pub fn perform(&self, operator: &mut GameOperator, from: Position, to: Position) -> bool {
        match self.resolve(operator, from, to) {
            Some(action) => action.perform(operator, from, to),
            None => false,
        }
    }

    /// Perform the action for `to - from` without its chain.
    pub fn perform_without_chain(
        &self,
        operator: &mut GameOperator,
        from: Position,
        to: Position,
    ) -> bool {
        match self.resolve(operator, from, to) {
            Some(action) => action.perform_without_chain(operator, from, to),
            None => false,
        }
    }

    fn resolve(&self, operator: &GameOperator, from: Position, to: Position) -> Option<&Action> {
        if !operator.is_onboard(to) {
            return None;
        }
        let owner = operator.piece_at(from)?.owner;
        self.action_for(owner, from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::StandardAction;
    use crate::pieces::presets;
    use crate::state::GameOperatorBuilder;

    fn pos(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn forward_stepper() -> PieceType {
        PieceType::new(PieceTypeId::new(1, 2, "test"), 'P')
            .with_action(pos(0, 1), StandardAction::MoveToFreePosition)
            .with_action(pos(0, 2), StandardAction::WalkAndMoveOrAttack)
    }

    #[test]
    fn test_action_map_sorted_insert_and_replace() {
        let mut map = ActionMap::new();
        map.insert(pos(1, 0), StandardAction::MoveOrAttack.action());
        map.insert(pos(-1, 0), StandardAction::MoveOrAttack.action());
        map.insert(pos(0, 1), StandardAction::Swap.action());

        let offsets: Vec<_> = map.offsets().collect();
        assert_eq!(offsets, vec![pos(-1, 0), pos(0, 1), pos(1, 0)]);

        let replaced = map.insert(pos(0, 1), StandardAction::Rush.action());
        assert_eq!(replaced.map(|a| a.symbol), Some('S'));
        assert_eq!(map.get(pos(0, 1)).map(|a| a.symbol), Some('R'));
        assert_eq!(map.len(), 3);
        assert!(map.get(pos(5, 5)).is_none());
    }

    #[test]
    fn test_orientation() {
        assert_eq!(PieceType::orient(PlayerId::TWO, pos(1, 2)), pos(1, 2));
        assert_eq!(PieceType::orient(PlayerId::ONE, pos(1, 2)), pos(1, -2));
    }

    #[test]
    fn test_possible_moves_mirror_for_player_one() {
        let stepper = std::sync::Arc::new(forward_stepper());
        let op = GameOperatorBuilder::new(8, 8)
            .king(PlayerId::ONE, &presets::king(), pos(0, 7))
            .king(PlayerId::TWO, &presets::king(), pos(7, 0))
            .piece(PlayerId::ONE, &stepper, pos(3, 5))
            .piece(PlayerId::TWO, &stepper, pos(5, 2))
            .build()
            .unwrap();

        let one: Vec<_> = stepper.compute_possible_moves(&op, pos(3, 5)).positions().collect();
        assert_eq!(one, vec![pos(3, 4), pos(3, 3)]);

        let two: Vec<_> = stepper.compute_possible_moves(&op, pos(5, 2)).positions().collect();
        assert_eq!(two, vec![pos(5, 3), pos(5, 4)]);
    }

    #[test]
    fn test_is_possible_move_matches_move_set() {
        let stepper = std::sync::Arc::new(forward_stepper());
        let op = GameOperatorBuilder::new(6, 6)
            .king(PlayerId::ONE, &presets::king(), pos(0, 5))
            .king(PlayerId::TWO, &presets::king(), pos(5, 0))
            .piece(PlayerId::TWO, &stepper, pos(2, 3))
            .piece(PlayerId::ONE, &stepper, pos(2, 4))
            .build()
            .unwrap();

        // Blocked forward: neither the step nor the walk through (2,4) is legal
        let moves = stepper.compute_possible_moves(&op, pos(2, 3));
        assert!(moves.is_empty());
        for target in op.board().positions() {
            assert_eq!(
                moves.contains(target),
                stepper.is_possible_move(&op, pos(2, 3), target)
            );
        }

        // Off-board offsets are never legal
        assert!(!stepper.is_possible_move(&op, pos(2, 4), pos(2, 6)));
        // Empty origin
        assert!(!stepper.is_possible_move(&op, pos(4, 4), pos(4, 5)));
    }

    #[test]
    fn test_perform_reports_failure_without_events() {
        let stepper = std::sync::Arc::new(forward_stepper());
        let mut op = GameOperatorBuilder::new(6, 6)
            .king(PlayerId::ONE, &presets::king(), pos(0, 5))
            .king(PlayerId::TWO, &presets::king(), pos(5, 0))
            .piece(PlayerId::TWO, &stepper, pos(2, 2))
            .build()
            .unwrap();

        op.begin_draw();
        assert!(!stepper.perform(&mut op, pos(2, 2), pos(3, 3)));
        assert!(op.history().last().is_some_and(|d| d.is_empty()));

        assert!(stepper.perform(&mut op, pos(2, 2), pos(2, 3)));
        assert!(op.piece_at(pos(2, 3)).is_some());
    }

    #[test]
    fn test_piece_type_serialization() {
        let piece_type = forward_stepper();
        let json = serde_json::to_string(&piece_type).unwrap();
        let deserialized: PieceType = serde_json::from_str(&json).unwrap();
        assert_eq!(piece_type, deserialized);
    }
}
