// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Seedable random source for probabilistic operations.
//!
//! Every value handed out here is derived from raw 64-bit draws of a ChaCha20 stream using only
//! integer arithmetic, so a given seed yields the same sequence of doubles and integers on every
//! platform.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Scale that maps the top 53 bits of a draw onto [0, 1).
const DOUBLE_SCALE: f64 = 1.0 / 9_007_199_254_740_992.0;

/// The random number generator used for measurements and noise injection. One instance is owned
/// by a simulation run and lent to each consumer in turn.
pub struct RandomGenerator {
    rng: ChaCha20Rng,
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomGenerator {
    /// Creates a generator whose sequence is fully determined by `seed`.
    #[must_use]
    pub fn from_seed_u64(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Creates a generator seeded from the operating system's entropy source.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    /// Restarts the sequence from the given seed.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha20Rng::seed_from_u64(seed);
    }

    /// Returns the next raw 64-bit value of the stream.
    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// Returns a double uniformly distributed in [0, 1).
    #[allow(clippy::cast_precision_loss)]
    pub fn random_zero_one_double(&mut self) -> f64 {
        let result = (self.next_u64() >> 11) as f64 * DOUBLE_SCALE;
        debug_assert!((0.0..1.0).contains(&result));
        result
    }

    /// Returns an integer uniformly distributed in the inclusive range `[min, max]`.
    ///
    /// Draws are split into equally sized buckets, one per candidate value, and any draw past the
    /// last full bucket is rejected so that no value is favored.
    /// # Panics
    ///
    /// This function will panic if `min` is greater than `max`.
    pub fn random_integer(&mut self, min: u64, max: u64) -> u64 {
        assert!(min <= max, "Invalid range [{min}, {max}] for random integer.");

        let number_of_buckets = (max - min).wrapping_add(1);
        if number_of_buckets == 0 {
            // The range covers every u64 value.
            return self.next_u64();
        }
        let bucket_size = u64::MAX / number_of_buckets;
        let limit = number_of_buckets * bucket_size;

        loop {
            let r = self.next_u64();
            if r < limit {
                let result = min + r / bucket_size;
                debug_assert!(min <= result && result <= max);
                return result;
            }
        }
    }
}
