//! Adaptive Simpson quadrature.
//!
//! The characteristic-function pricer integrates a damped oscillatory
//! integrand over a fixed practical cutoff. The adaptive rule refines the
//! mesh only where the integrand still moves, which keeps the evaluation
//! count modest at tight tolerances.

use num_traits::Float;

/// Configuration for adaptive Simpson integration.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
///
/// # Example
///
/// ```
/// use pricer_core::math::quadrature::QuadratureConfig;
///
/// let config: QuadratureConfig<f64> = QuadratureConfig::default();
/// assert_eq!(config.max_depth, 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureConfig<T: Float> {
    /// Absolute tolerance on each refined interval.
    pub eps_abs: T,
    /// Relative tolerance on each refined interval.
    pub eps_rel: T,
    /// Maximum bisection depth per interval.
    ///
    /// The budget bounds recursion; when it is exhausted the current
    /// Richardson-extrapolated estimate is accepted as-is.
    pub max_depth: usize,
}

impl<T: Float> Default for QuadratureConfig<T> {
    /// Tight tolerances (1e-12) with a generous 50-level budget.
    fn default() -> Self {
        Self {
            eps_abs: T::from(1e-12).unwrap_or_else(T::epsilon),
            eps_rel: T::from(1e-12).unwrap_or_else(T::epsilon),
            max_depth: 50,
        }
    }
}

impl<T: Float> QuadratureConfig<T> {
    /// Creates a configuration with the given tolerances and depth budget.
    pub fn new(eps_abs: T, eps_rel: T, max_depth: usize) -> Self {
        Self {
            eps_abs,
            eps_rel,
            max_depth,
        }
    }
}

/// Integrates `f` over `[a, b]` with adaptive Simpson refinement.
///
/// Each interval is accepted once the Richardson error estimate falls
/// below `max(eps_abs, eps_rel * |estimate|)`, or its depth budget is
/// exhausted. The returned value includes the extrapolation term, so the
/// rule is exact for cubics.
///
/// # Example
///
/// ```
/// use pricer_core::math::quadrature::{adaptive_simpson, QuadratureConfig};
///
/// let config = QuadratureConfig::default();
/// let integral = adaptive_simpson(|x: f64| x * x, 0.0, 1.0, &config);
/// assert!((integral - 1.0 / 3.0).abs() < 1e-12);
/// ```
pub fn adaptive_simpson<T, F>(f: F, a: T, b: T, config: &QuadratureConfig<T>) -> T
where
    T: Float,
    F: Fn(T) -> T,
{
    let half = T::from(0.5).unwrap_or(T::one());
    let m = half * (a + b);
    let fa = f(a);
    let fm = f(m);
    let fb = f(b);
    let whole = simpson_estimate(fa, fm, fb, a, b);
    refine(
        &f,
        a,
        b,
        fa,
        fm,
        fb,
        whole,
        config.eps_abs,
        config.eps_rel,
        config.max_depth,
    )
}

/// Composite Simpson estimate over one interval.
#[inline]
fn simpson_estimate<T: Float>(fa: T, fm: T, fb: T, a: T, b: T) -> T {
    let four = T::from(4.0).unwrap_or(T::one());
    let six = T::from(6.0).unwrap_or(T::one());
    (b - a) / six * (fa + four * fm + fb)
}

#[allow(clippy::too_many_arguments)]
fn refine<T, F>(
    f: &F,
    a: T,
    b: T,
    fa: T,
    fm: T,
    fb: T,
    whole: T,
    eps_abs: T,
    eps_rel: T,
    depth: usize,
) -> T
where
    T: Float,
    F: Fn(T) -> T,
{
    let half = T::from(0.5).unwrap_or(T::one());
    let fifteen = T::from(15.0).unwrap_or(T::one());

    let m = half * (a + b);
    let lm = half * (a + m);
    let rm = half * (m + b);
    let flm = f(lm);
    let frm = f(rm);

    let left = simpson_estimate(fa, flm, fm, a, m);
    let right = simpson_estimate(fm, frm, fb, m, b);
    let delta = left + right - whole;
    let tol = eps_abs.max(eps_rel * (left + right).abs());

    if depth == 0 || delta.abs() <= fifteen * tol {
        return left + right + delta / fifteen;
    }

    refine(f, a, m, fa, flm, fm, left, eps_abs, eps_rel, depth - 1)
        + refine(f, m, b, fm, frm, fb, right, eps_abs, eps_rel, depth - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn exact_for_cubics() {
        let config = QuadratureConfig::default();
        let integral = adaptive_simpson(|x: f64| x * x * x - 2.0 * x + 1.0, 0.0, 2.0, &config);
        // Antiderivative: x^4/4 - x^2 + x
        assert_relative_eq!(integral, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn sine_over_half_period() {
        let config = QuadratureConfig::default();
        let integral = adaptive_simpson(f64::sin, 0.0, PI, &config);
        assert_relative_eq!(integral, 2.0, epsilon = 1e-10);
    }

    #[test]
    fn damped_oscillation() {
        // A shape similar to the Fourier-inversion integrand.
        let config = QuadratureConfig::default();
        let integral = adaptive_simpson(|x: f64| (-x).exp() * (5.0 * x).cos(), 0.0, 50.0, &config);
        // Closed form: 1 / (1 + 25) at the infinite limit; the tail past
        // x = 50 is below 1e-21.
        assert_relative_eq!(integral, 1.0 / 26.0, epsilon = 1e-10);
    }

    #[test]
    fn depth_budget_caps_refinement() {
        let shallow = QuadratureConfig::new(1e-15, 1e-15, 2);
        let deep = QuadratureConfig::default();
        let f = |x: f64| (20.0 * x).sin().abs();
        let coarse = adaptive_simpson(f, 0.0, 1.0, &shallow);
        let fine = adaptive_simpson(f, 0.0, 1.0, &deep);
        // Exact value: (12 + 1 - cos(20 - 6*pi)) / 20.
        assert!(coarse.is_finite());
        assert_relative_eq!(fine, 0.6295958969093304, epsilon = 1e-9);
    }

    #[test]
    fn reversed_interval_flips_sign() {
        let config = QuadratureConfig::default();
        let forward = adaptive_simpson(|x: f64| x, 0.0, 1.0, &config);
        let backward = adaptive_simpson(|x: f64| x, 1.0, 0.0, &config);
        assert_relative_eq!(forward, -backward, epsilon = 1e-12);
    }
}
