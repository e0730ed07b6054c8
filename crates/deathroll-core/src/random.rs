//! Random number sources for the roll engine
//!
//! The engine only ever asks for one inclusive range draw per turn, so the
//! seam is a single method. Production code wraps a `rand` generator; tests
//! and replays feed a fixed script.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

use crate::error::RandomSourceError;

/// Uniform integer generator drawing from `low..=high`
pub trait RandomSource {
    fn next_in_range(&mut self, low: u32, high: u32) -> Result<u32, RandomSourceError>;
}

/// `RandomSource` backed by any `rand::Rng`
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Entropy-seeded `StdRng`. Unlike `ThreadRng` this is `Send + Sync`,
    /// so it can be stored in an ECS resource.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible sequence of games for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_in_range(&mut self, low: u32, high: u32) -> Result<u32, RandomSourceError> {
        if low > high {
            return Err(RandomSourceError::EmptyRange { low, high });
        }
        Ok(self.rng.gen_range(low..=high))
    }
}

/// Replays a fixed list of draws, in order.
///
/// Values are returned as-is (no clamping) so that a bad script is caught by
/// the engine's range check instead of silently altering the game.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    values: VecDeque<u32>,
}

impl ScriptedSource {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }

    pub fn push(&mut self, value: u32) {
        self.values.push_back(value);
    }
}

impl RandomSource for ScriptedSource {
    fn next_in_range(&mut self, _low: u32, _high: u32) -> Result<u32, RandomSourceError> {
        self.values.pop_front().ok_or(RandomSourceError::Exhausted)
    }
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn next_in_range(&mut self, low: u32, high: u32) -> Result<u32, RandomSourceError> {
        (**self).next_in_range(low, high)
    }
}
