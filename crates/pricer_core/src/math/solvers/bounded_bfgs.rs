//! Bound-constrained quasi-Newton minimisation.
//!
//! This module provides [`BoundedBfgsSolver`], a projected BFGS method for
//! minimising a scalar objective subject to independent per-parameter box
//! bounds. Gradients are approximated by forward finite differences (the
//! objective is treated as a black box), search directions are projected
//! onto the feasible box, and a backtracking line search enforces
//! sufficient decrease.
//!
//! The objective may return `+inf` to mark infeasible or numerically
//! unstable regions; such trial points are rejected by the line search and
//! skipped by the gradient approximation, steering the iterate away
//! without aborting the run.
//!
//! # Example
//!
//! ```
//! use pricer_core::math::solvers::{BfgsConfig, BoundedBfgsSolver};
//! use pricer_core::traits::calibration::ParameterBounds;
//!
//! let solver = BoundedBfgsSolver::with_defaults();
//! let bounds = vec![ParameterBounds::new(-10.0, 10.0); 2];
//!
//! // Minimise (x - 2)^2 + (y - 3)^2
//! let objective = |p: &[f64]| (p[0] - 2.0).powi(2) + (p[1] - 3.0).powi(2);
//! let result = solver.solve(objective, vec![0.0, 0.0], &bounds).unwrap();
//!
//! assert!(result.converged);
//! assert!((result.params[0] - 2.0).abs() < 1e-4);
//! assert!((result.params[1] - 3.0).abs() < 1e-4);
//! ```

use crate::traits::calibration::ParameterBounds;
use crate::types::SolverError;

/// Configuration for the bound-constrained BFGS solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BfgsConfig {
    /// Maximum number of accepted iterations.
    pub max_iterations: usize,
    /// Convergence tolerance on the relative objective reduction.
    pub ftol: f64,
    /// Convergence tolerance on the projected-gradient infinity norm.
    pub gtol: f64,
    /// Relative step for forward-difference gradients.
    pub fd_step: f64,
    /// Sufficient-decrease constant for the Armijo condition.
    pub armijo_c1: f64,
    /// Maximum number of step halvings per line search.
    pub max_backtracks: usize,
}

impl Default for BfgsConfig {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            ftol: 1e-8,
            gtol: 1e-6,
            fd_step: 1e-8,
            armijo_c1: 1e-4,
            max_backtracks: 30,
        }
    }
}

impl BfgsConfig {
    /// Creates a configuration with the given tolerances and budget.
    pub fn new(ftol: f64, gtol: f64, max_iterations: usize) -> Self {
        Self {
            ftol,
            gtol,
            max_iterations,
            ..Default::default()
        }
    }

    /// Relaxed tolerances for quick fits.
    pub fn fast() -> Self {
        Self {
            max_iterations: 100,
            ftol: 1e-6,
            gtol: 1e-4,
            ..Default::default()
        }
    }

    /// Tight tolerances with a large iteration budget.
    pub fn high_precision() -> Self {
        Self {
            max_iterations: 5000,
            ftol: 1e-12,
            gtol: 1e-8,
            ..Default::default()
        }
    }
}

/// Outcome of a bound-constrained minimisation.
///
/// Non-convergence is reported here, not as an error: the best-found
/// parameters are often still usable and the caller decides whether to
/// accept them.
#[derive(Debug, Clone, PartialEq)]
pub struct BfgsResult {
    /// Final parameter vector (inside the box).
    pub params: Vec<f64>,
    /// Objective value at `params`.
    pub objective: f64,
    /// Number of accepted iterations.
    pub iterations: usize,
    /// Whether a convergence criterion was met.
    pub converged: bool,
    /// Termination message (preserved verbatim by callers for diagnostics).
    pub message: String,
}

/// Box-constrained quasi-Newton minimiser.
///
/// Maintains a dense inverse-Hessian approximation updated with the BFGS
/// formula; suitable for the small parameter vectors that arise in model
/// calibration.
#[derive(Debug, Clone)]
pub struct BoundedBfgsSolver {
    config: BfgsConfig,
}

impl BoundedBfgsSolver {
    /// Creates a solver with the given configuration.
    pub fn new(config: BfgsConfig) -> Self {
        Self { config }
    }

    /// Creates a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: BfgsConfig::default(),
        }
    }

    /// Returns the solver configuration.
    pub fn config(&self) -> &BfgsConfig {
        &self.config
    }

    /// Minimises `objective` from `initial`, ignoring progress.
    ///
    /// # Errors
    ///
    /// Returns `SolverError` for structural misuse (empty parameter vector
    /// or mismatched bounds). Non-convergence is reported in the result.
    pub fn solve<F>(
        &self,
        objective: F,
        initial: Vec<f64>,
        bounds: &[ParameterBounds],
    ) -> Result<BfgsResult, SolverError>
    where
        F: Fn(&[f64]) -> f64,
    {
        self.solve_with_progress(objective, initial, bounds, |_, _| {})
    }

    /// Minimises `objective` from `initial`, reporting progress.
    ///
    /// The callback receives `(iteration, max_iterations)` after every
    /// accepted iteration; it has no effect on the optimisation
    /// trajectory.
    ///
    /// # Errors
    ///
    /// Returns `SolverError` for structural misuse (empty parameter vector
    /// or mismatched bounds).
    pub fn solve_with_progress<F, P>(
        &self,
        objective: F,
        initial: Vec<f64>,
        bounds: &[ParameterBounds],
        mut progress: P,
    ) -> Result<BfgsResult, SolverError>
    where
        F: Fn(&[f64]) -> f64,
        P: FnMut(usize, usize),
    {
        let n = initial.len();
        if n == 0 {
            return Err(SolverError::NumericalInstability(
                "empty parameter vector".to_string(),
            ));
        }
        if bounds.len() != n {
            return Err(SolverError::DimensionMismatch {
                expected: n,
                actual: bounds.len(),
            });
        }

        let cfg = &self.config;
        let mut x: Vec<f64> = initial
            .iter()
            .zip(bounds)
            .map(|(&v, b)| b.clamp(v))
            .collect();
        let mut f = objective(&x);
        if !f.is_finite() {
            return Ok(BfgsResult {
                params: x,
                objective: f,
                iterations: 0,
                converged: false,
                message: "objective is not finite at the initial point".to_string(),
            });
        }

        let mut g = fd_gradient(&objective, &x, f, bounds, cfg.fd_step);
        let mut h = identity(n);
        let mut iterations = 0;
        let mut converged = false;
        let mut message = String::new();

        for _ in 0..cfg.max_iterations {
            if projected_gradient_norm(&x, &g, bounds) <= cfg.gtol {
                converged = true;
                message = "convergence: projected gradient norm below gtol".to_string();
                break;
            }

            // Quasi-Newton direction, reset to steepest descent if the
            // curvature estimate has gone bad.
            let mut d = neg_mat_vec(&h, &g);
            if dot(&d, &g) >= 0.0 {
                h = identity(n);
                d = g.iter().map(|&gi| -gi).collect();
            }
            project_direction(&mut d, &x, bounds);
            if d.iter().all(|&di| di == 0.0) {
                message = "all search directions blocked by active bounds".to_string();
                break;
            }

            // Clamped so that a projected direction can never satisfy the
            // sufficient-decrease test with an increasing step.
            let g_dot_d = dot(&g, &d).min(0.0);
            let mut step = 1.0;
            let mut accepted: Option<(Vec<f64>, f64)> = None;
            for _ in 0..cfg.max_backtracks {
                let x_trial: Vec<f64> = x
                    .iter()
                    .zip(&d)
                    .zip(bounds)
                    .map(|((&xi, &di), b)| b.clamp(xi + step * di))
                    .collect();
                if x_trial == x {
                    step *= 0.5;
                    continue;
                }
                let f_trial = objective(&x_trial);
                if f_trial.is_finite() && f_trial <= f + cfg.armijo_c1 * step * g_dot_d {
                    accepted = Some((x_trial, f_trial));
                    break;
                }
                step *= 0.5;
            }

            let (x_new, f_new) = match accepted {
                Some(pair) => pair,
                None => {
                    message = "line search failed to find sufficient decrease".to_string();
                    break;
                }
            };

            let g_new = fd_gradient(&objective, &x_new, f_new, bounds, cfg.fd_step);
            let s: Vec<f64> = x_new.iter().zip(&x).map(|(a, b)| a - b).collect();
            let y: Vec<f64> = g_new.iter().zip(&g).map(|(a, b)| a - b).collect();
            let sy = dot(&s, &y);
            if sy > 1e-10 {
                bfgs_update(&mut h, &s, &y, sy);
            }

            let reduction = f - f_new;
            let scale = f.abs().max(f_new.abs()).max(1.0);
            x = x_new;
            f = f_new;
            g = g_new;
            iterations += 1;
            progress(iterations, cfg.max_iterations);

            if reduction <= cfg.ftol * scale {
                converged = true;
                message = "convergence: relative reduction of objective below ftol".to_string();
                break;
            }
        }

        if message.is_empty() {
            message = "maximum number of iterations reached".to_string();
        }

        Ok(BfgsResult {
            params: x,
            objective: f,
            iterations,
            converged,
            message,
        })
    }
}

/// Forward-difference gradient, flipped to a backward step at the upper
/// bound and zeroed for components whose probes are non-finite.
fn fd_gradient<F>(f: &F, x: &[f64], fx: f64, bounds: &[ParameterBounds], step: f64) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let n = x.len();
    let mut g = vec![0.0; n];
    let mut probe = x.to_vec();
    for i in 0..n {
        let h = step * x[i].abs().max(1.0);
        let forward = x[i] + h <= bounds[i].max;
        let (trial, sign) = if forward {
            (x[i] + h, 1.0)
        } else {
            (x[i] - h, -1.0)
        };
        probe[i] = trial;
        let mut ft = f(&probe);
        let mut s = sign;
        if !ft.is_finite() {
            // The probe landed in a penalised region; try the other side.
            let other = x[i] - sign * h;
            if bounds[i].contains(other) {
                probe[i] = other;
                ft = f(&probe);
                s = -sign;
            }
        }
        probe[i] = x[i];
        g[i] = if ft.is_finite() { s * (ft - fx) / h } else { 0.0 };
    }
    g
}

/// Infinity norm of the gradient projected onto the feasible directions.
fn projected_gradient_norm(x: &[f64], g: &[f64], bounds: &[ParameterBounds]) -> f64 {
    let mut norm: f64 = 0.0;
    for i in 0..x.len() {
        let blocked_low = x[i] <= bounds[i].min && g[i] > 0.0;
        let blocked_high = x[i] >= bounds[i].max && g[i] < 0.0;
        if !(blocked_low || blocked_high) {
            norm = norm.max(g[i].abs());
        }
    }
    norm
}

/// Zeroes direction components that point out of the box at active bounds.
fn project_direction(d: &mut [f64], x: &[f64], bounds: &[ParameterBounds]) {
    for i in 0..d.len() {
        if (x[i] <= bounds[i].min && d[i] < 0.0) || (x[i] >= bounds[i].max && d[i] > 0.0) {
            d[i] = 0.0;
        }
    }
}

fn identity(n: usize) -> Vec<f64> {
    let mut h = vec![0.0; n * n];
    for i in 0..n {
        h[i * n + i] = 1.0;
    }
    h
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Computes `-H g` for a dense symmetric `H` stored row-major.
fn neg_mat_vec(h: &[f64], g: &[f64]) -> Vec<f64> {
    let n = g.len();
    (0..n)
        .map(|i| -(0..n).map(|j| h[i * n + j] * g[j]).sum::<f64>())
        .collect()
}

/// BFGS update of the inverse Hessian approximation:
/// `H' = H + rho*((1 + rho*y'Hy) s s' - s (Hy)' - (Hy) s')`.
fn bfgs_update(h: &mut [f64], s: &[f64], y: &[f64], sy: f64) {
    let n = s.len();
    let rho = 1.0 / sy;
    let hy: Vec<f64> = (0..n)
        .map(|i| (0..n).map(|j| h[i * n + j] * y[j]).sum::<f64>())
        .collect();
    let yhy = dot(y, &hy);
    let c = rho * (1.0 + rho * yhy);
    for i in 0..n {
        for j in 0..n {
            h[i * n + j] += c * s[i] * s[j] - rho * (s[i] * hy[j] + hy[i] * s[j]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide_bounds(n: usize) -> Vec<ParameterBounds> {
        vec![ParameterBounds::new(-100.0, 100.0); n]
    }

    #[test]
    fn quadratic_bowl_converges() {
        let solver = BoundedBfgsSolver::with_defaults();
        let objective = |p: &[f64]| (p[0] - 2.0).powi(2) + (p[1] + 1.0).powi(2);
        let result = solver
            .solve(objective, vec![5.0, 5.0], &wide_bounds(2))
            .unwrap();
        assert!(result.converged, "{}", result.message);
        assert!((result.params[0] - 2.0).abs() < 1e-3);
        assert!((result.params[1] + 1.0).abs() < 1e-3);
        assert!(result.objective < 1e-6);
    }

    #[test]
    fn active_bound_is_respected() {
        let solver = BoundedBfgsSolver::with_defaults();
        let bounds = vec![ParameterBounds::new(-1.0, 1.0)];
        // Unconstrained minimum at x = 2, outside the box.
        let result = solver
            .solve(|p: &[f64]| (p[0] - 2.0).powi(2), vec![0.0], &bounds)
            .unwrap();
        assert!(result.converged, "{}", result.message);
        assert!((result.params[0] - 1.0).abs() < 1e-8);
    }

    #[test]
    fn initial_point_is_clamped_into_box() {
        let solver = BoundedBfgsSolver::with_defaults();
        let bounds = vec![ParameterBounds::new(0.0, 1.0)];
        let result = solver
            .solve(|p: &[f64]| p[0] * p[0], vec![25.0], &bounds)
            .unwrap();
        assert!(result.params[0] <= 1.0);
        assert!(result.params[0] >= 0.0);
    }

    #[test]
    fn infinite_regions_are_avoided() {
        let solver = BoundedBfgsSolver::with_defaults();
        let objective = |p: &[f64]| {
            if p[0] < 0.0 {
                f64::INFINITY
            } else {
                (p[0] - 1.0).powi(2)
            }
        };
        let result = solver
            .solve(objective, vec![3.0], &wide_bounds(1))
            .unwrap();
        assert!(result.converged, "{}", result.message);
        assert!((result.params[0] - 1.0).abs() < 1e-3);
    }

    #[test]
    fn infinite_initial_objective_fails_gracefully() {
        let solver = BoundedBfgsSolver::with_defaults();
        let result = solver
            .solve(|_: &[f64]| f64::INFINITY, vec![0.0], &wide_bounds(1))
            .unwrap();
        assert!(!result.converged);
        assert!(result.message.contains("initial point"));
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn iteration_budget_exhaustion_reports_message() {
        let config = BfgsConfig {
            max_iterations: 2,
            ftol: 1e-16,
            gtol: 1e-16,
            ..Default::default()
        };
        let solver = BoundedBfgsSolver::new(config);
        // Rosenbrock needs far more than two iterations.
        let objective = |p: &[f64]| {
            100.0 * (p[1] - p[0] * p[0]).powi(2) + (1.0 - p[0]).powi(2)
        };
        let result = solver
            .solve(objective, vec![-1.2, 1.0], &wide_bounds(2))
            .unwrap();
        assert!(!result.converged);
        assert_eq!(result.iterations, 2);
        assert!(result.message.contains("maximum number of iterations"));
    }

    #[test]
    fn progress_callback_sees_every_iteration() {
        let solver = BoundedBfgsSolver::with_defaults();
        let mut calls = Vec::new();
        let result = solver
            .solve_with_progress(
                |p: &[f64]| (p[0] - 2.0).powi(2),
                vec![10.0],
                &wide_bounds(1),
                |i, total| calls.push((i, total)),
            )
            .unwrap();
        assert_eq!(calls.len(), result.iterations);
        for (idx, &(i, total)) in calls.iter().enumerate() {
            assert_eq!(i, idx + 1);
            assert_eq!(total, solver.config().max_iterations);
        }
    }

    #[test]
    fn dimension_mismatch_is_an_error() {
        let solver = BoundedBfgsSolver::with_defaults();
        let err = solver
            .solve(|p: &[f64]| p[0], vec![0.0, 0.0], &wide_bounds(1))
            .unwrap_err();
        assert!(matches!(err, SolverError::DimensionMismatch { .. }));
    }

    #[test]
    fn empty_parameters_is_an_error() {
        let solver = BoundedBfgsSolver::with_defaults();
        let err = solver.solve(|_: &[f64]| 0.0, vec![], &[]).unwrap_err();
        assert!(matches!(err, SolverError::NumericalInstability(_)));
    }

    #[test]
    fn rosenbrock_converges_with_budget() {
        let solver = BoundedBfgsSolver::new(BfgsConfig {
            max_iterations: 2000,
            ..Default::default()
        });
        let objective = |p: &[f64]| {
            100.0 * (p[1] - p[0] * p[0]).powi(2) + (1.0 - p[0]).powi(2)
        };
        let result = solver
            .solve(objective, vec![-1.2, 1.0], &wide_bounds(2))
            .unwrap();
        assert!(result.objective < 1e-4, "objective = {}", result.objective);
    }
}
