//! Randomness sources
//!
//! Every draw the engine makes goes through [`RandomSource`], so a round can
//! be replayed from a seed or from a recorded sequence. A source is owned by
//! one engine or one evaluation and is never shared between threads.

use std::collections::VecDeque;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Uniform randomness consumed by generation and bonus draws
pub trait RandomSource {
    /// Uniform real in `[0, 1)`
    fn next_unit(&mut self) -> f64;

    /// Uniform integer in `[0, bound)`; `0` when `bound == 0`
    fn next_below(&mut self, bound: usize) -> usize;
}

/// Adapter over any `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn next_below(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        self.rng.random_range(0..bound)
    }
}

/// Reproducible ChaCha8 source
pub type SeededSource = RngSource<ChaCha8Rng>;

impl SeededSource {
    /// Deterministic source for a seed
    pub fn from_seed_u64(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Source seeded from the OS
    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_os_rng())
    }

    /// Optional seed, OS entropy when absent
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::from_seed_u64(s),
            None => Self::from_entropy(),
        }
    }
}

/// Replays a recorded sequence of draws.
///
/// Unit values and indices are kept in separate queues. An exhausted queue
/// yields `0.0` / `0`; indices are clamped below their bound.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    units: VecDeque<f64>,
    indices: VecDeque<usize>,
}

impl ScriptedSource {
    pub fn new(
        units: impl IntoIterator<Item = f64>,
        indices: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self {
            units: units.into_iter().collect(),
            indices: indices.into_iter().collect(),
        }
    }

    /// Script of unit draws only
    pub fn from_units(units: impl IntoIterator<Item = f64>) -> Self {
        Self::new(units, Vec::new())
    }

    /// Remaining unit draws
    pub fn units_left(&self) -> usize {
        self.units.len()
    }

    /// Remaining index draws
    pub fn indices_left(&self) -> usize {
        self.indices.len()
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        self.units.pop_front().unwrap_or(0.0)
    }

    fn next_below(&mut self, bound: usize) -> usize {
        let value = self.indices.pop_front().unwrap_or(0);
        if bound == 0 { 0 } else { value.min(bound - 1) }
    }
}
