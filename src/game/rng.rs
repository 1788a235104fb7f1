//! Seeded randomness
//!
//! One ChaCha8 stream per simulation. Every random choice (throw spread,
//! spin, target placement, hue) draws from it, so a seed plus an input
//! stream reproduces a session exactly.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::game::config::ScalarRange;

/// Deterministic RNG (seeded)
#[derive(Debug, Clone)]
pub struct DeterministicRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restart the stream from the original seed.
    pub fn reseed(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
    }

    /// Uniform sample in `[min, max)`.
    ///
    /// An empty interval returns `min`. Non-finite bounds never reach the
    /// sampler: the finite bound is returned, or zero if neither is.
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        if !(min.is_finite() && max.is_finite() && (max - min).is_finite()) {
            return if min.is_finite() {
                min
            } else if max.is_finite() {
                max
            } else {
                0.0
            };
        }
        if max > min {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    /// Uniform sample within a configured range.
    pub fn in_range(&mut self, range: ScalarRange) -> f32 {
        self.range(range.min, range.max)
    }

    /// Symmetric sample in `[-half_width, half_width)`.
    pub fn spread(&mut self, half_width: f32) -> f32 {
        let half_width = half_width.abs();
        self.range(-half_width, half_width)
    }

    /// Uniform sample in `[0, 1)`.
    pub fn unit(&mut self) -> f32 {
        self.range(0.0, 1.0)
    }
}
