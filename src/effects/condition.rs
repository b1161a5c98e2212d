//! Conditions gating whether an action fires.
//!
//! A condition is a predicate over `(operator, from, to)`. `from` is the
//! acting piece's cell, `to` the targeted cell. Primitives look at occupancy
//! and ownership; `All`, `Any` and `Not` compose them.

use serde::{Deserialize, Serialize};

use crate::core::Position;
use crate::state::GameOperator;

/// A board predicate.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    // === Occupancy ===

    /// `to` holds no piece.
    FreePosition,

    /// Both cells hold pieces with different owners.
    EnemyAtPosition,

    /// Both cells hold pieces with the same owner.
    FriendAtPosition,

    /// `from != to` and every cell strictly between them is free.
    ClearPath,

    /// `to` holds a piece that is not a king.
    IsNoKing,

    // === Combinators ===

    /// All conditions must hold.
    All(Vec<Condition>),

    /// At least one condition must hold.
    Any(Vec<Condition>),

    /// Condition must not hold.
    Not(Box<Condition>),

    // === Special ===

    /// Always holds.
    Always,
}

impl Condition {
    /// Create an AND condition.
    pub fn all(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self::All(conditions.into_iter().collect())
    }

    /// Create an OR condition.
    pub fn any(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self::Any(conditions.into_iter().collect())
    }

    /// Negate this condition.
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Add another condition with AND.
    pub fn and(self, other: Condition) -> Self {
        match self {
            Self::All(mut conditions) => {
                conditions.push(other);
                Self::All(conditions)
            }
            _ => Self::All(vec![self, other]),
        }
    }

    /// Add another condition with OR.
    pub fn or(self, other: Condition) -> Self {
        match self {
            Self::Any(mut conditions) => {
                conditions.push(other);
                Self::Any(conditions)
            }
            _ => Self::Any(vec![self, other]),
        }
    }

    /// Evaluate against the current board.
    #[must_use]
    pub fn holds(&self, operator: &GameOperator, from: Position, to: Position) -> bool {
        ConditionEvaluator::evaluate(self, &ConditionContext::new(operator, from, to))
    }
}

/// Context for evaluating conditions.
pub struct ConditionContext<'a> {
    /// Board being inspected.
    pub operator: &'a GameOperator,
    /// Acting cell.
    pub from: Position,
    /// Targeted cell.
    pub to: Position,
}

impl<'a> ConditionContext<'a> {
    /// Create a new context.
    pub fn new(operator: &'a GameOperator, from: Position, to: Position) -> Self {
        Self { operator, from, to }
    }
}

/// Evaluator for conditions.
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Check if a condition is satisfied.
    pub fn evaluate(condition: &Condition, ctx: &ConditionContext) -> bool {
        let op = ctx.operator;
        match condition {
            Condition::FreePosition => op.is_free(ctx.to),

            Condition::EnemyAtPosition => match (op.piece_at(ctx.from), op.piece_at(ctx.to)) {
                (Some(a), Some(b)) => a.owner != b.owner,
                _ => false,
            },

            Condition::FriendAtPosition => match (op.piece_at(ctx.from), op.piece_at(ctx.to)) {
                (Some(a), Some(b)) => a.owner == b.owner,
                _ => false,
            },

            Condition::ClearPath => {
                ctx.from != ctx.to && ctx.from.path_to(ctx.to).all(|cell| op.is_free(cell))
            }

            Condition::IsNoKing => op.piece_at(ctx.to).is_some_and(|p| !p.king),

            Condition::All(conditions) => conditions.iter().all(|c| Self::evaluate(c, ctx)),

            Condition::Any(conditions) => conditions.iter().any(|c| Self::evaluate(c, ctx)),

            Condition::Not(inner) => !Self::evaluate(inner, ctx),

            Condition::Always => true,
        }
    }
}
