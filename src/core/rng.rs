//! Deterministic random number generation.
//!
//! All randomness in the engine is seeded:
//!
//! - The bot owns one `GameRng` built from `BotConfig::seed` and uses it to
//!   break ties between near-equal draws.
//! - Random-action effects build a throwaway `GameRng` from the board itself
//!   (`GameRng::for_board`), so replaying the same position always forces the
//!   same follow-on move, including inside search after undo.
//!
//! ```
//! use proc_chess::core::{GameRng, Position};
//!
//! let mut a = GameRng::for_board(Position::new(3, 4), 12);
//! let mut b = GameRng::for_board(Position::new(3, 4), 12);
//! assert_eq!(a.gen_range_usize(0..100), b.gen_range_usize(0..100));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::Position;

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// RNG seeded from a board situation: the acting cell and the number of
    /// live pieces.
    #[must_use]
    pub fn for_board(pos: Position, piece_count: usize) -> Self {
        let seed = i64::from(pos.x) * i64::from(pos.y) + piece_count as i64;
        Self::new(seed as u64)
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self::new(fork_seed)
    }

    /// The seed this RNG was created from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }
}
