//! Parallel generation of Heston path batches.
//!
//! # Memory Layout
//!
//! Both planes are stored row-major: entry `(path, step)` lives at
//! `path * (n_steps + 1) + step`, with step 0 holding the initial value.
//! A batch is created fresh per pricing call, owned by that call, and
//! discarded once the payoff engine has consumed it.

use super::config::SimulationConfig;
use crate::rng::PricerRng;
use pricer_models::heston::process::evolve_step;
use pricer_models::heston::HestonParams;
use rayon::prelude::*;

/// A batch of simulated trajectories: parallel price and variance planes
/// of shape `(n_paths, n_steps + 1)`.
#[derive(Clone, Debug)]
pub struct PathBatch {
    spot: Vec<f64>,
    variance: Vec<f64>,
    n_paths: usize,
    n_steps: usize,
}

impl PathBatch {
    /// Number of simulated paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Number of time steps per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Price observations of one path, in time order (initial value
    /// included).
    #[inline]
    pub fn spot_path(&self, path: usize) -> &[f64] {
        let row = self.n_steps + 1;
        &self.spot[path * row..(path + 1) * row]
    }

    /// Variance observations of one path, in time order.
    #[inline]
    pub fn variance_path(&self, path: usize) -> &[f64] {
        let row = self.n_steps + 1;
        &self.variance[path * row..(path + 1) * row]
    }

    /// Terminal price of one path.
    #[inline]
    pub fn terminal_spot(&self, path: usize) -> f64 {
        self.spot[path * (self.n_steps + 1) + self.n_steps]
    }

    /// Iterator over price paths.
    pub fn spot_paths(&self) -> impl Iterator<Item = &[f64]> {
        self.spot.chunks(self.n_steps + 1)
    }

    /// Iterator over variance paths.
    pub fn variance_paths(&self) -> impl Iterator<Item = &[f64]> {
        self.variance.chunks(self.n_steps + 1)
    }

    #[cfg(test)]
    pub(crate) fn from_planes(spot: Vec<f64>, variance: Vec<f64>, n_paths: usize, n_steps: usize) -> Self {
        debug_assert_eq!(spot.len(), n_paths * (n_steps + 1));
        debug_assert_eq!(variance.len(), n_paths * (n_steps + 1));
        Self {
            spot,
            variance,
            n_paths,
            n_steps,
        }
    }
}

/// Simulates a fresh batch of Heston trajectories.
///
/// Each path draws from its own seeded generator (derived from the
/// configured base seed), so the per-path loop is parallelised with no
/// shared mutable state and the batch is reproducible for a fixed seed.
///
/// # Arguments
///
/// * `params` - Validated model parameters
/// * `spot` - Initial price (S0 > 0)
/// * `rate` - Risk-free rate (annualised)
/// * `maturity` - Horizon in years (T > 0)
/// * `config` - Validated simulation sizing
pub fn generate_heston_paths(
    params: &HestonParams,
    spot: f64,
    rate: f64,
    maturity: f64,
    config: &SimulationConfig,
) -> PathBatch {
    debug_assert!(spot > 0.0);
    debug_assert!(maturity > 0.0);

    let n_paths = config.n_paths();
    let n_steps = config.n_steps();
    let dt = maturity / n_steps as f64;
    let row = n_steps + 1;

    let mut spot_plane = vec![0.0; n_paths * row];
    let mut variance_plane = vec![0.0; n_paths * row];
    let base_seed = config.seed().unwrap_or_else(rand::random);

    spot_plane
        .par_chunks_mut(row)
        .zip(variance_plane.par_chunks_mut(row))
        .enumerate()
        .for_each(|(path_idx, (spot_row, variance_row))| {
            let mut rng = PricerRng::from_seed(path_seed(base_seed, path_idx));
            spot_row[0] = spot;
            variance_row[0] = params.v0;
            for step in 0..n_steps {
                let z1 = rng.gen_normal();
                let z2 = rng.gen_normal();
                let (s_next, v_next) = evolve_step(
                    params,
                    rate,
                    spot_row[step],
                    variance_row[step],
                    dt,
                    z1,
                    z2,
                );
                spot_row[step + 1] = s_next;
                variance_row[step + 1] = v_next;
            }
        });

    PathBatch {
        spot: spot_plane,
        variance: variance_plane,
        n_paths,
        n_steps,
    }
}

/// SplitMix64-style mix keeps per-path streams decorrelated.
fn path_seed(base: u64, path_idx: usize) -> u64 {
    let mut z = base.wrapping_add((path_idx as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn test_config(n_paths: usize, n_steps: usize, seed: u64) -> SimulationConfig {
        SimulationConfig::builder()
            .n_paths(n_paths)
            .n_steps(n_steps)
            .seed(seed)
            .build()
            .unwrap()
    }

    fn params() -> HestonParams {
        HestonParams::new(0.04, 1.5, 0.04, 0.3, -0.7).unwrap()
    }

    #[test]
    fn initial_values_are_set() {
        let batch = generate_heston_paths(&params(), 100.0, 0.05, 1.0, &test_config(10, 5, 42));
        for path in 0..10 {
            assert_eq!(batch.spot_path(path)[0], 100.0);
            assert_eq!(batch.variance_path(path)[0], 0.04);
        }
    }

    #[test]
    fn shapes_are_consistent() {
        let batch = generate_heston_paths(&params(), 100.0, 0.05, 1.0, &test_config(7, 13, 42));
        assert_eq!(batch.n_paths(), 7);
        assert_eq!(batch.n_steps(), 13);
        assert_eq!(batch.spot_path(0).len(), 14);
        assert_eq!(batch.spot_paths().count(), 7);
        assert_eq!(batch.variance_paths().count(), 7);
        assert_eq!(batch.terminal_spot(3), batch.spot_path(3)[13]);
    }

    #[test]
    fn same_seed_reproduces_batch() {
        let a = generate_heston_paths(&params(), 100.0, 0.05, 1.0, &test_config(20, 30, 7));
        let b = generate_heston_paths(&params(), 100.0, 0.05, 1.0, &test_config(20, 30, 7));
        for path in 0..20 {
            assert_eq!(a.spot_path(path), b.spot_path(path));
            assert_eq!(a.variance_path(path), b.variance_path(path));
        }
    }

    #[test]
    fn different_seeds_differ() {
        let a = generate_heston_paths(&params(), 100.0, 0.05, 1.0, &test_config(5, 10, 1));
        let b = generate_heston_paths(&params(), 100.0, 0.05, 1.0, &test_config(5, 10, 2));
        let differs = (0..5).any(|p| a.spot_path(p) != b.spot_path(p));
        assert!(differs);
    }

    #[test]
    fn terminal_mean_matches_risk_neutral_drift() {
        // E[S_T] = S0 * exp(r * T) under the risk-neutral measure.
        let config = test_config(50_000, 16, 42);
        let batch = generate_heston_paths(&params(), 100.0, 0.05, 1.0, &config);
        let mean = (0..batch.n_paths())
            .map(|p| batch.terminal_spot(p))
            .sum::<f64>()
            / batch.n_paths() as f64;
        assert_relative_eq!(mean, 100.0 * (0.05_f64).exp(), max_relative = 0.02);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn variance_never_negative_and_prices_positive(
            seed in any::<u64>(),
            xi in 0.05f64..2.0,
            rho in -0.95f64..0.95,
        ) {
            // Deliberately includes Feller-violating parameter draws.
            let p = HestonParams::new(0.04, 0.8, 0.04, xi, rho).unwrap();
            let config = test_config(50, 50, seed);
            let batch = generate_heston_paths(&p, 100.0, 0.03, 1.0, &config);
            for path in 0..batch.n_paths() {
                for &v in batch.variance_path(path) {
                    prop_assert!(v >= 0.0);
                }
                for &s in batch.spot_path(path) {
                    prop_assert!(s > 0.0 && s.is_finite());
                }
            }
        }
    }
}
