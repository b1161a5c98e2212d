//! Bot configuration parameters.

use serde::{Deserialize, Serialize};

/// Scores the search assigns to what a single draw does.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvalWeights {
    /// Capturing an enemy piece.
    pub beat: f64,

    /// Losing one of the bot's own pieces.
    pub lose: f64,

    /// Capturing (or losing) a king.
    pub king: f64,

    /// Ending closer to (or farther from) the nearest enemy piece.
    pub move_to_enemy: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            beat: 30.0,
            lose: 15.0,
            king: 1885.0,
            move_to_enemy: 10.0,
        }
    }
}

/// Board evaluation used to rank batch actions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchWeights {
    /// Per level of a live non-king piece.
    pub piece_level: f64,

    /// A live king.
    pub king: f64,

    /// Per cell of distance (own king away from enemies, own pieces toward them).
    pub distance: f64,

    /// Bonus or penalty once the game has a winner.
    pub winner: f64,
}

impl Default for BatchWeights {
    fn default() -> Self {
        Self {
            piece_level: 10.0,
            king: 2000.0,
            distance: 1.0,
            winner: 100_000.0,
        }
    }
}

/// Search configuration.
///
/// The breadth thresholds cut a node's candidate loop short: once more than
/// `min_draws_checking*` candidates were tried and the last improvement lies
/// more than `min_draws_checking_history*` candidates back, the rest are
/// skipped. Candidates are ordered by distance to the enemy, so the skipped
/// tail is the least aggressive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BotConfig {
    /// Plies searched below the root move (default: 2).
    pub depth: u32,

    /// Seed for tie-breaking between near-equal draws.
    pub seed: u64,

    /// Fraction of the best score a draw may fall short by and still be
    /// picked (0 = only the best, 1 = anything within 100%).
    pub tolerance: f64,

    /// Root breadth threshold.
    pub min_draws_checking: usize,

    /// Root improvement window.
    pub min_draws_checking_history: usize,

    /// Inner-node breadth threshold.
    pub min_draws_checking_deep: usize,

    /// Inner-node improvement window.
    pub min_draws_checking_history_deep: usize,

    /// Per-draw scoring.
    pub weights: EvalWeights,

    /// Batch-action board scoring.
    pub batch_weights: BatchWeights,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            depth: 2,
            seed: 42,
            tolerance: 0.2,
            min_draws_checking: 7,
            min_draws_checking_history: 4,
            min_draws_checking_deep: 5,
            min_draws_checking_history_deep: 4,
            weights: EvalWeights::default(),
            batch_weights: BatchWeights::default(),
        }
    }
}

impl BotConfig {
    /// Create a new config with custom depth.
    ///
    /// # Panics
    ///
    /// Panics if `depth` is zero.
    #[must_use]
    pub fn with_depth(mut self, depth: u32) -> Self {
        assert!(depth > 0, "Search depth must be at least 1");
        self.depth = depth;
        self
    }

    /// Create a new config with custom seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Create a new config with custom tolerance.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance` lies outside `[0, 1]`.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&tolerance),
            "Tolerance must be between 0 and 1, got {tolerance}"
        );
        self.tolerance = tolerance;
        self
    }

    /// Create a new config with custom draw weights.
    #[must_use]
    pub fn with_weights(mut self, weights: EvalWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Create a new config with custom batch weights.
    #[must_use]
    pub fn with_batch_weights(mut self, weights: BatchWeights) -> Self {
        self.batch_weights = weights;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BotConfig::default();
        assert_eq!(config.depth, 2);
        assert_eq!(config.seed, 42);
        assert_eq!(config.min_draws_checking, 7);
        assert_eq!(config.weights.king, 1885.0);
        assert_eq!(config.batch_weights.king, 2000.0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = BotConfig::default()
            .with_depth(1)
            .with_seed(7)
            .with_tolerance(0.0);

        assert_eq!(config.depth, 1);
        assert_eq!(config.seed, 7);
        assert_eq!(config.tolerance, 0.0);
    }

    #[test]
    #[should_panic(expected = "Tolerance must be between 0 and 1")]
    fn test_invalid_tolerance() {
        let _ = BotConfig::default().with_tolerance(1.5);
    }

    #[test]
    #[should_panic(expected = "at least 1")]
    fn test_zero_depth() {
        let _ = BotConfig::default().with_depth(0);
    }

    #[test]
    fn test_serialization() {
        let config = BotConfig::default().with_seed(99);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: BotConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
