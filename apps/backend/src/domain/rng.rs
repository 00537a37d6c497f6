//! Injected randomness for deck picks, room codes and hot potato odds.

use parking_lot::Mutex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Uniform random primitives the coordinator depends on.
///
/// Shared across requests, hence `&self` with interior mutability.
pub trait RandomSource: Send + Sync {
    /// Uniform integer in `0..upper`. `upper` must be non-zero.
    fn below(&self, upper: usize) -> usize;

    /// True with probability `numerator / denominator`.
    fn chance(&self, numerator: u32, denominator: u32) -> bool {
        if denominator == 0 {
            return false;
        }
        (self.below(denominator as usize) as u32) < numerator
    }
}

/// ChaCha20 stream, either seeded for reproducible runs or from OS entropy.
pub struct SeededRandom {
    rng: Mutex<ChaCha20Rng>,
}

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha20Rng::seed_from_u64(seed)),
        }
    }

    pub fn from_os() -> Self {
        Self {
            rng: Mutex::new(ChaCha20Rng::from_os_rng()),
        }
    }

    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_os(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn below(&self, upper: usize) -> usize {
        debug_assert!(upper > 0, "below(0) has no valid result");
        if upper <= 1 {
            return 0;
        }
        self.rng.lock().random_range(0..upper)
    }
}

impl std::fmt::Debug for SeededRandom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SeededRandom")
    }
}

/// Replays a fixed script of values; for tests that need an exact outcome.
#[derive(Debug, Default)]
pub struct ScriptedRandom {
    values: Mutex<std::collections::VecDeque<usize>>,
}

impl ScriptedRandom {
    pub fn new(values: impl IntoIterator<Item = usize>) -> Self {
        Self {
            values: Mutex::new(values.into_iter().collect()),
        }
    }
}

impl RandomSource for ScriptedRandom {
    /// Next scripted value modulo `upper`; 0 once the script runs out.
    fn below(&self, upper: usize) -> usize {
        let next = self.values.lock().pop_front().unwrap_or(0);
        if upper == 0 {
            0
        } else {
            next % upper
        }
    }
}
