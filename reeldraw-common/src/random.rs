//! Randomness abstraction for the sampling core
//!
//! Every draw the selection pipeline makes goes through [`RandomSource`],
//! so tests can script exact outcomes and the pipeline itself stays
//! deterministic under test.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A uniform integer source over half-open ranges.
pub trait RandomSource: Send {
    /// Uniform draw from `[0, bound)`. Callers must pass `bound >= 1`.
    fn draw(&mut self, bound: u64) -> u64;
}

/// Production source seeded from OS entropy.
///
/// Backed by `StdRng` rather than the thread-local RNG so a source can be
/// carried across await points within a request. `gen_range` rejects
/// rather than reducing modulo the bound, so draws stay uniform.
#[derive(Debug)]
pub struct EntropyRandom {
    rng: StdRng,
}

impl EntropyRandom {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Fixed-seed source for reproducible statistical tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for EntropyRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EntropyRandom {
    fn draw(&mut self, bound: u64) -> u64 {
        self.rng.gen_range(0..bound)
    }
}

/// Scripted source for tests.
///
/// Returns the queued values in order and 0 once exhausted. Values are
/// clamped to the requested bound so a script stays valid even when a
/// test reshapes the pool it drives.
#[derive(Debug, Default)]
pub struct SequenceRandom {
    values: VecDeque<u64>,
}

impl SequenceRandom {
    pub fn new(values: impl IntoIterator<Item = u64>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }
}

impl RandomSource for SequenceRandom {
    fn draw(&mut self, bound: u64) -> u64 {
        let value = self.values.pop_front().unwrap_or(0);
        value.min(bound.saturating_sub(1))
    }
}
