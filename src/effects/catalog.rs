//! The standard action catalog.
//!
//! Piece generators build behavior from these twelve actions (plus their own
//! chain wiring). Each has a fixed one-letter symbol.
//!
//! | Symbol | Action | Condition | Act |
//! |---|---|---|---|
//! | F | move to free position | free | move |
//! | E | move to enemy position | enemy | move or attack |
//! | X | move or attack | not friend | move or attack |
//! | M | walk and move or attack | clear path, not friend | move or attack |
//! | S | swap | friend | swap |
//! | R | rush | not friend | rush |
//! | C | cross attack | free | cross attack |
//! | Y | explosion attack | free | explode |
//! | Z | zombie | enemy, not king | zombie |
//! | A | range attack | enemy, clear path | range attack |
//! | Q | convert | enemy, not king | convert |
//! | L | legion | not friend | legion |

use serde::{Deserialize, Serialize};

use super::act::{PieceAct, PieceActKind};
use super::action::Action;
use super::condition::Condition;

/// One of the catalog actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardAction {
    MoveToFreePosition,
    MoveToEnemyPosition,
    MoveOrAttack,
    WalkAndMoveOrAttack,
    Swap,
    Rush,
    CrossAttack,
    ExplosionAttack,
    Zombie,
    RangeAttack,
    Convert,
    Legion,
}

impl StandardAction {
    /// Every catalog action, in symbol-table order.
    pub const ALL: [StandardAction; 12] = [
        Self::MoveToFreePosition,
        Self::MoveToEnemyPosition,
        Self::MoveOrAttack,
        Self::WalkAndMoveOrAttack,
        Self::Swap,
        Self::Rush,
        Self::CrossAttack,
        Self::ExplosionAttack,
        Self::Zombie,
        Self::RangeAttack,
        Self::Convert,
        Self::Legion,
    ];

    /// Display symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::MoveToFreePosition => 'F',
            Self::MoveToEnemyPosition => 'E',
            Self::MoveOrAttack => 'X',
            Self::WalkAndMoveOrAttack => 'M',
            Self::Swap => 'S',
            Self::Rush => 'R',
            Self::CrossAttack => 'C',
            Self::ExplosionAttack => 'Y',
            Self::Zombie => 'Z',
            Self::RangeAttack => 'A',
            Self::Convert => 'Q',
            Self::Legion => 'L',
        }
    }

    /// Look up a catalog action by symbol.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.symbol() == symbol)
    }

    /// Build the action.
    #[must_use]
    pub fn action(self) -> Action {
        let not_friend = || Condition::FriendAtPosition.negate();
        let enemy_no_king = || Condition::EnemyAtPosition.and(Condition::IsNoKing);

        let (condition, kind) = match self {
            Self::MoveToFreePosition => (Condition::FreePosition, PieceActKind::Move),
            Self::MoveToEnemyPosition => (Condition::EnemyAtPosition, PieceActKind::MoveOrAttack),
            Self::MoveOrAttack => (not_friend(), PieceActKind::MoveOrAttack),
            Self::WalkAndMoveOrAttack => (
                Condition::ClearPath.and(not_friend()),
                PieceActKind::MoveOrAttack,
            ),
            Self::Swap => (Condition::FriendAtPosition, PieceActKind::SwapPositions),
            Self::Rush => (not_friend(), PieceActKind::Rush),
            Self::CrossAttack => (Condition::FreePosition, PieceActKind::CrossAttack),
            Self::ExplosionAttack => (Condition::FreePosition, PieceActKind::Explode),
            Self::Zombie => (enemy_no_king(), PieceActKind::ZombieAttack),
            Self::RangeAttack => (
                Condition::EnemyAtPosition.and(Condition::ClearPath),
                PieceActKind::RangeAttack,
            ),
            Self::Convert => (enemy_no_king(), PieceActKind::Convert),
            Self::Legion => (not_friend(), PieceActKind::LegionAttack),
        };

        Action::new(condition, PieceAct::new(kind), self.symbol())
    }
}

impl From<StandardAction> for Action {
    fn from(standard: StandardAction) -> Self {
        standard.action()
    }
}
