//! Connectors: follow-on acts chained onto the cells an act touched.
//!
//! A connector maps a symbolic position set to a positional act. After the
//! owning act's core mutation, every entry resolves its set against the
//! owning act's cells and runs its act, without chain, on each of them.
//!
//! | Set | Relational act `(from, to)` | Positional act `pos` |
//! |---|---|---|
//! | `Pos` | - | `pos` |
//! | `PosAround` | - | 8 neighbors of `pos` |
//! | `FromPos` | `from` | - |
//! | `ToPos` | `to` | - |
//! | `FromPosAround` | 8 neighbors of `from` | - |
//! | `ToPosAround` | 8 neighbors of `to` | - |
//!
//! Sets that do not apply to the owning act's shape resolve to nothing.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::Position;
use crate::state::GameOperator;

use super::act::PosAct;

/// Cells resolved from a `PosSet`.
pub type PosList = SmallVec<[Position; 8]>;

/// Symbolic set of cells relative to an act.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosSet {
    Pos,
    PosAround,
    FromPos,
    ToPos,
    FromPosAround,
    ToPosAround,
}

impl PosSet {
    /// Resolve against a positional act's cell.
    #[must_use]
    pub fn resolve_single(self, pos: Position) -> PosList {
        match self {
            Self::Pos => SmallVec::from_slice(&[pos]),
            Self::PosAround => SmallVec::from_slice(&pos.neighbors()),
            _ => SmallVec::new(),
        }
    }

    /// Resolve against a relational act's endpoints.
    #[must_use]
    pub fn resolve_pair(self, from: Position, to: Position) -> PosList {
        match self {
            Self::FromPos => SmallVec::from_slice(&[from]),
            Self::ToPos => SmallVec::from_slice(&[to]),
            Self::FromPosAround => SmallVec::from_slice(&from.neighbors()),
            Self::ToPosAround => SmallVec::from_slice(&to.neighbors()),
            _ => SmallVec::new(),
        }
    }
}

/// Ordered map from position set to follow-on act.
///
/// Each set appears at most once; adding an act for a set that already has
/// one replaces it in place.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    chains: SmallVec<[(PosSet, PosAct); 2]>,
}

impl Connector {
    /// Create an empty connector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of `insert`.
    #[must_use]
    pub fn with(mut self, set: PosSet, act: PosAct) -> Self {
        self.insert(set, act);
        self
    }

    /// Chain `act` onto `set`, returning the act it replaced.
    pub fn insert(&mut self, set: PosSet, act: PosAct) -> Option<PosAct> {
        match self.chains.iter_mut().find(|(s, _)| *s == set) {
            Some((_, existing)) => Some(std::mem::replace(existing, act)),
            None => {
                self.chains.push((set, act));
                None
            }
        }
    }

    /// The act chained onto `set`.
    #[must_use]
    pub fn get(&self, set: PosSet) -> Option<&PosAct> {
        self.chains.iter().find(|(s, _)| *s == set).map(|(_, a)| a)
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (PosSet, &PosAct)> {
        self.chains.iter().map(|(s, a)| (*s, a))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Fire every entry for a positional act at `pos`.
    pub fn perform_single(&self, operator: &mut GameOperator, pos: Position) {
        for (set, act) in &self.chains {
            for cell in set.resolve_single(pos) {
                trace!(?set, act = act.kind.name(), %cell, "chain");
                act.perform_without_chain(operator, cell);
            }
        }
    }

    /// Fire every entry for a relational act on `(from, to)`.
    pub fn perform_pair(&self, operator: &mut GameOperator, from: Position, to: Position) {
        for (set, act) in &self.chains {
            for cell in set.resolve_pair(from, to) {
                trace!(?set, act = act.kind.name(), %cell, "chain");
                act.perform_without_chain(operator, cell);
            }
        }
    }
}
