//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one `choose_draw` call.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Root candidates available.
    pub candidates: u32,

    /// Root candidates that received a score.
    pub evaluated: u32,

    /// Draws played during emulation, at every depth.
    pub nodes: u64,

    /// Best root score.
    pub best_value: f64,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Calculate emulated draws per second.
    #[must_use]
    pub fn nodes_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.nodes as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nodes_per_second() {
        let mut stats = SearchStats::new();
        assert_eq!(stats.nodes_per_second(), 0.0);

        stats.nodes = 500;
        stats.time_us = 250_000;
        assert_eq!(stats.nodes_per_second(), 2000.0);
    }

    #[test]
    fn test_reset() {
        let mut stats = SearchStats::new();
        stats.nodes = 10;
        stats.candidates = 3;
        stats.reset();
        assert_eq!(stats.nodes, 0);
        assert_eq!(stats.candidates, 0);
    }
}
