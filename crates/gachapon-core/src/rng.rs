//! Random number generator abstraction for draws.
//!
//! Production code wraps the standard PRNG. Tests inject scripted
//! implementations for repeatable outcomes. Draws have no cryptographic
//! requirements.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random number generation for draws.
pub trait DrawRng: Send + Sync {
    /// Picks a uniform index in `[0, len)`. Callers must pass a non-zero
    /// `len`; implementations may panic otherwise.
    fn pick_index(&mut self, len: usize) -> usize;

    /// Generates a random `f64` in `[0.0, 1.0)`.
    fn unit_f64(&mut self) -> f64;
}

/// Production RNG backed by the standard PRNG.
#[derive(Debug)]
pub struct StdDrawRng {
    rng: StdRng,
}

impl StdDrawRng {
    /// Creates an RNG seeded from the operating system.
    ///
    /// # Panics
    ///
    /// Panics if the operating system RNG is unavailable.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates an RNG from a fixed seed, for reproducible sessions.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for StdDrawRng {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawRng for StdDrawRng {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }

    fn unit_f64(&mut self) -> f64 {
        self.rng.random()
    }
}
