//! Actions: a condition paired with the act it gates.

use serde::{Deserialize, Serialize};

use crate::core::Position;
use crate::state::GameOperator;

use super::act::PieceAct;
use super::condition::Condition;

/// `(Condition, Act, symbol)` mapped from an offset in a piece type's
/// action map.
///
/// The symbol is a display tag carried into move sets so a UI can show what
/// kind of effect a destination triggers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub condition: Condition,
    pub act: PieceAct,
    pub symbol: char,
}

impl Action {
    /// Create a new action.
    #[must_use]
    pub const fn new(condition: Condition, act: PieceAct, symbol: char) -> Self {
        Self {
            condition,
            act,
            symbol,
        }
    }

    /// Check the condition on the current board.
    #[must_use]
    pub fn check(&self, operator: &GameOperator, from: Position, to: Position) -> bool {
        self.condition.holds(operator, from, to)
    }

    /// Check the condition and, if it holds, run the act with its chain.
    ///
    /// Returns whether the condition held.
    pub fn perform(&self, operator: &mut GameOperator, from: Position, to: Position) -> bool {
        if !self.check(operator, from, to) {
            return false;
        }
        self.act.perform(operator, from, to);
        true
    }

    /// Check the condition and, if it holds, run the act without its chain.
    pub fn perform_without_chain(
        &self,
        operator: &mut GameOperator,
        from: Position,
        to: Position,
    ) -> bool {
        if !self.check(operator, from, to) {
            return false;
        }
        self.act.perform_without_chain(operator, from, to);
        true
    }
}
