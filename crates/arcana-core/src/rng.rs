//! Random number generator abstraction for determinism.
//!
//! Hosts inject [`StdRngSource`]; tests inject a seeded source or one of the
//! scripted generators from the test-support crate.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `u32` in the range `[min, max]` inclusive.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;

    /// Generate a random `f64` in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;
}

/// `rand`-backed generator.
#[derive(Debug, Clone)]
pub struct StdRngSource(StdRng);

impl StdRngSource {
    /// Seeds from the operating system.
    #[must_use]
    pub fn from_os_rng() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// Reproducible stream for a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl DeterministicRng for StdRngSource {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.0.random_range(min..=max)
    }

    fn next_f64(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Unbiased in-place Fisher–Yates shuffle driven by `rng`.
///
/// Slices longer than `u32::MAX` are not supported.
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn DeterministicRng) {
    for i in (1..items.len()).rev() {
        let upper = u32::try_from(i).unwrap_or(u32::MAX);
        let j = rng.next_u32_range(0, upper) as usize;
        items.swap(i, j.min(i));
    }
}
