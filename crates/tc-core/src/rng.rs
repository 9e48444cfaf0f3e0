//! Deterministic RNG for synthetic world generation.
//!
//! Decision logic never draws random numbers: determinism of the tick
//! pipeline requires guards and actions to depend only on their inputs.
//! `SimRng` exists for the code that *feeds* the pipeline (demo world
//! generators and test fixtures) so those inputs are reproducible from a
//! single seed.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seeded RNG for world generation.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Symmetric noise in `[-amplitude, amplitude]`.
    #[inline]
    pub fn jitter(&mut self, amplitude: f64) -> f64 {
        if amplitude <= 0.0 {
            return 0.0;
        }
        self.0.gen_range(-amplitude..=amplitude)
    }
}
