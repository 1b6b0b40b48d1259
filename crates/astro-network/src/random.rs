//! Uniform random draws shared by networks, genetics and simulations.
//!
//! There is no process-wide generator. Every consumer receives a generator
//! explicitly, so a training run seeded with [`seeded`] is reproducible, and
//! parallel simulations each own an independent stream derived with [`fork`].
//!
//! [`RandomSource`] is implemented for every [`rand::Rng`], so any generator
//! (including `rand::rng()`) can be passed where one is expected.

use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg64Mcg;

/// Seedable generator used throughout the workspace.
pub type SimRng = Pcg64Mcg;

/// Creates a generator from a fixed seed.
#[must_use]
pub fn seeded(seed: u64) -> SimRng {
    SimRng::seed_from_u64(seed)
}

/// Creates a generator seeded from the operating system's entropy source.
#[must_use]
pub fn from_os_rng() -> SimRng {
    SimRng::from_os_rng()
}

/// Derives an independent generator from `rng`.
///
/// The child stream is fully determined by the parent's state, which keeps a
/// seeded run reproducible even when children are consumed on other threads.
pub fn fork<R>(rng: &mut R) -> SimRng
where
    R: Rng + ?Sized,
{
    SimRng::seed_from_u64(rng.random())
}

/// Uniform draws in the ranges the controllers and genetic operators need.
pub trait RandomSource: Rng {
    /// Returns a uniform network weight in `[-1, 1]`.
    fn network_weight(&mut self) -> f64 {
        self.random_range(-1.0..=1.0)
    }

    /// Returns a uniform value in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        self.random::<f64>()
    }

    /// Returns a uniform value in `[0, max)`.
    fn scaled(&mut self, max: f64) -> f64 {
        self.unit() * max
    }

    /// Returns a uniform index in `[0, max)`.
    ///
    /// # Panics
    ///
    /// Panics if `max` is zero.
    fn index(&mut self, max: usize) -> usize {
        self.random_range(0..max)
    }

    /// Returns `true` or `false` with equal probability.
    fn coin(&mut self) -> bool {
        self.random_bool(0.5)
    }
}

impl<R> RandomSource for R where R: Rng + ?Sized {}
