//! Acts: the units of board mutation.
//!
//! Acts come in two shapes:
//!
//! - **Relational** (`PieceAct`): acts on an ordered `(from, to)` pair. Every
//!   `Action` carries one.
//! - **Positional** (`PosAct`): acts on a single cell. Connectors chain these
//!   onto the cells a preceding act touched.
//!
//! Either shape may own a `Connector`. `perform` runs the core mutation and
//! then the connector; `perform_without_chain` runs only the core mutation.
//! Chained acts are always run without their own chain, which bounds every
//! chain to one level unless a force-gated act explicitly re-wraps the act it
//! forces.
//!
//! Acts never fail. An act whose preconditions do not hold on the live board
//! (missing piece, off-board target) emits nothing.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, Position};
use crate::state::GameOperator;

use super::connector::Connector;
use super::resolver::ActResolver;

/// Core behavior of a relational act.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceActKind {
    /// Step onto a free cell.
    Move,
    /// Step onto the target cell, capturing whatever stands there.
    MoveOrAttack,
    /// Destroy whatever stands on the target cell without moving.
    RangeAttack,
    /// The enemy on the target cell changes sides.
    Convert,
    /// Exchange places with a friendly piece.
    SwapPositions,
    /// Move or attack, then destroy everything on the path.
    Rush,
    /// Destroy enemies diagonally adjacent to the target, then move there.
    CrossAttack,
    /// Move, then destroy the 3x3 area around the destination (mover included).
    Explode,
    /// The enemy on the target cell changes sides and becomes the attacker's type.
    ZombieAttack,
    /// Move or attack; every other own piece of the same type copies the displacement.
    LegionAttack,
    /// Teleport the piece on the target cell to its mirrored cell.
    TeleportPiece,
}

impl PieceActKind {
    /// Short name used in act-marker events and logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::MoveOrAttack => "move_or_attack",
            Self::RangeAttack => "range_attack",
            Self::Convert => "convert",
            Self::SwapPositions => "swap",
            Self::Rush => "rush",
            Self::CrossAttack => "cross_attack",
            Self::Explode => "explode",
            Self::ZombieAttack => "zombie",
            Self::LegionAttack => "legion",
            Self::TeleportPiece => "teleport_piece",
        }
    }
}

/// A relational act with its optional follow-on chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PieceAct {
    pub kind: PieceActKind,
    pub connector: Option<Box<Connector>>,
}

impl PieceAct {
    /// Create an act without a chain.
    #[must_use]
    pub const fn new(kind: PieceActKind) -> Self {
        Self {
            kind,
            connector: None,
        }
    }

    /// Attach a connector.
    #[must_use]
    pub fn with_connector(mut self, connector: Connector) -> Self {
        self.connector = Some(Box::new(connector));
        self
    }

    /// Copy of this act with its connector stripped.
    #[must_use]
    pub fn unchained(&self) -> Self {
        Self::new(self.kind)
    }

    /// Run the core mutation, then the connector.
    pub fn perform(&self, operator: &mut GameOperator, from: Position, to: Position) {
        ActResolver::perform_piece_act(operator, self, from, to, true);
    }

    /// Run only the core mutation.
    pub fn perform_without_chain(&self, operator: &mut GameOperator, from: Position, to: Position) {
        ActResolver::perform_piece_act(operator, self, from, to, false);
    }
}

/// Whose pieces a force-gated act may activate.
///
/// Judged against the operator's player-to-move, not the forcing piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ForceType {
    /// Only pieces of the player to move.
    OwnPiece,
    /// Only pieces of the player not to move.
    EnemyPiece,
    /// Any piece.
    #[default]
    AnyPiece,
}

impl ForceType {
    /// Check if a piece owned by `owner` may be forced while `to_move` moves.
    #[must_use]
    pub fn permits(self, owner: PlayerId, to_move: PlayerId) -> bool {
        match self {
            Self::OwnPiece => owner == to_move,
            Self::EnemyPiece => owner != to_move,
            Self::AnyPiece => true,
        }
    }
}

/// How a force-gated act picks the forced move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForceKind {
    /// Any legal move of the piece.
    RandomAction,
    /// A capture if the piece has one, otherwise any legal move.
    RandomActionPreferAttack,
    /// A move maximizing distance to the nearest enemy.
    RandomActionPreferFlee,
    /// Range attacks from the piece to the four cells two steps away orthogonally.
    RangedAttackCross,
}

/// A positional act that makes another piece act.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForceAct {
    pub kind: ForceKind,
    pub force: ForceType,
    /// Connector attached to the forced act before it runs.
    pub chain: Option<Box<Connector>>,
}

impl ForceAct {
    #[must_use]
    pub const fn new(kind: ForceKind, force: ForceType) -> Self {
        Self {
            kind,
            force,
            chain: None,
        }
    }

    /// Chain `connector` onto every act this one forces.
    #[must_use]
    pub fn with_chain(mut self, connector: Connector) -> Self {
        self.chain = Some(Box::new(connector));
        self
    }
}

/// Core behavior of a positional act.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PosActKind {
    /// Destroy the piece on the cell.
    Destroy,
    /// Destroy everything in the 3x3 area centered on the cell.
    ExplosionAround,
    /// Move-or-attack the piece on the cell to its board mirror.
    TeleportInverse,
    /// Activate the piece on the cell.
    Force(ForceAct),
}

impl PosActKind {
    /// Short name used in act-marker events and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Destroy => "destroy",
            Self::ExplosionAround => "explosion",
            Self::TeleportInverse => "teleport_inverse",
            Self::Force(force) => match force.kind {
                ForceKind::RandomAction => "random_action",
                ForceKind::RandomActionPreferAttack => "random_action_attack",
                ForceKind::RandomActionPreferFlee => "random_action_flee",
                ForceKind::RangedAttackCross => "ranged_attack_cross",
            },
        }
    }
}

/// A positional act with its optional follow-on chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PosAct {
    pub kind: PosActKind,
    pub connector: Option<Box<Connector>>,
}

impl PosAct {
    /// Create an act without a chain.
    #[must_use]
    pub const fn new(kind: PosActKind) -> Self {
        Self {
            kind,
            connector: None,
        }
    }

    /// Shorthand for a force-gated act.
    #[must_use]
    pub const fn force(force: ForceAct) -> Self {
        Self::new(PosActKind::Force(force))
    }

    /// Attach a connector.
    #[must_use]
    pub fn with_connector(mut self, connector: Connector) -> Self {
        self.connector = Some(Box::new(connector));
        self
    }

    /// Run the core mutation, then the connector.
    pub fn perform(&self, operator: &mut GameOperator, pos: Position) {
        ActResolver::perform_pos_act(operator, self, pos, true);
    }

    /// Run only the core mutation.
    pub fn perform_without_chain(&self, operator: &mut GameOperator, pos: Position) {
        ActResolver::perform_pos_act(operator, self, pos, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::connector::PosSet;

    #[test]
    fn test_force_type_permits() {
        let (one, two) = (PlayerId::ONE, PlayerId::TWO);

        assert!(ForceType::OwnPiece.permits(one, one));
        assert!(!ForceType::OwnPiece.permits(two, one));
        assert!(ForceType::EnemyPiece.permits(two, one));
        assert!(!ForceType::EnemyPiece.permits(one, one));
        assert!(ForceType::AnyPiece.permits(one, two));
    }

    #[test]
    fn test_unchained_strips_connector() {
        let act = PieceAct::new(PieceActKind::Move).with_connector(
            Connector::new().with(PosSet::ToPosAround, PosAct::new(PosActKind::Destroy)),
        );
        assert!(act.connector.is_some());

        let copy = act.unchained();
        assert_eq!(copy.kind, PieceActKind::Move);
        assert!(copy.connector.is_none());
        // Template untouched
        assert!(act.connector.is_some());
    }

    #[test]
    fn test_names() {
        assert_eq!(PieceActKind::Explode.name(), "explode");
        let force = PosActKind::Force(ForceAct::new(ForceKind::RandomAction, ForceType::AnyPiece));
        assert_eq!(force.name(), "random_action");
    }

    #[test]
    fn test_act_serialization() {
        let act = PosAct::force(
            ForceAct::new(ForceKind::RandomActionPreferAttack, ForceType::EnemyPiece).with_chain(
                Connector::new().with(PosSet::ToPos, PosAct::new(PosActKind::ExplosionAround)),
            ),
        );
        let json = serde_json::to_string(&act).unwrap();
        let deserialized: PosAct = serde_json::from_str(&json).unwrap();
        assert_eq!(act, deserialized);
    }
}
