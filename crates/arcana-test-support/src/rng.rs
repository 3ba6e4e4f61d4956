//! Test RNG — deterministic `DeterministicRng` implementations for tests.

use arcana_core::rng::DeterministicRng;

/// Always returns `min` for `next_u32_range` and `0.0` for `next_f64`.
///
/// Under this RNG every Fisher–Yates step swaps with index 0, and every card
/// of a reversible spread is drawn reversed.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }
}

/// An RNG that replays predetermined sequences. Integer draws panic once the
/// sequence is exhausted; float draws cycle, defaulting to `0.99` (upright).
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<u32>,
    index: usize,
    floats: Vec<f64>,
    float_index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` with the given integer values.
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        Self {
            values,
            index: 0,
            floats: Vec::new(),
            float_index: 0,
        }
    }

    /// Sets the float sequence used for orientation rolls.
    #[must_use]
    pub fn with_floats(mut self, floats: Vec<f64>) -> Self {
        self.floats = floats;
        self
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        let val = self.values[self.index];
        self.index += 1;
        val.clamp(min, max.max(min))
    }

    fn next_f64(&mut self) -> f64 {
        if self.floats.is_empty() {
            return 0.99;
        }
        let val = self.floats[self.float_index % self.floats.len()];
        self.float_index += 1;
        val
    }
}
