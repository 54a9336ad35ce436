//! Pseudo-random number generation for Monte Carlo simulation.
//!
//! [`PricerRng`] wraps a seeded [`StdRng`] so that simulations are
//! reproducible: the same seed always produces the same trajectory batch.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

/// Seeded random number generator for path simulation.
///
/// # Examples
///
/// ```
/// use pricer_pricing::rng::PricerRng;
///
/// let mut a = PricerRng::from_seed(42);
/// let mut b = PricerRng::from_seed(42);
/// assert_eq!(a.gen_normal(), b.gen_normal());
/// ```
pub struct PricerRng {
    inner: StdRng,
    seed: u64,
}

impl PricerRng {
    /// Creates a generator initialised with the given seed.
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Returns the seed used for initialisation.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draws a single standard normal variate.
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    /// Fills `buffer` with standard normal variates.
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = StandardNormal.sample(&mut self.inner);
        }
    }
}
