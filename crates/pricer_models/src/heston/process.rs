//! Full-truncation Euler discretisation of the Heston SDEs.
//!
//! Time is discretised into equal intervals; two independent standard
//! normal draws per step are combined into correlated Brownian increments
//! with the model's rho. The variance step truncates at zero (the
//! variance process must never go negative mid-simulation) and the price
//! advances on the log scale, which keeps it strictly positive for any
//! input.

use super::params::HestonParams;

/// Advances one path by a single time step.
///
/// ```text
/// dW_V = z1 * sqrt(dt)
/// dW_S = (rho * z1 + sqrt(1 - rho^2) * z2) * sqrt(dt)
/// V' = max(0, V + kappa*(theta - V)*dt + xi*sqrt(max(0, V))*dW_V)
/// S' = S * exp((r - V/2)*dt + sqrt(max(0, V))*dW_S)
/// ```
///
/// Each step depends only on the path's own state and draws, so callers
/// can fan this out across paths with no shared mutable state.
///
/// # Arguments
///
/// * `params` - Validated model parameters
/// * `rate` - Risk-free rate (annualised)
/// * `spot` - Current price S_t
/// * `variance` - Current variance V_t (non-negative)
/// * `dt` - Time step in years
/// * `z1` - Standard normal draw for the variance driver
/// * `z2` - Standard normal draw completing the correlated price driver
///
/// # Returns
///
/// `(S_{t+dt}, V_{t+dt})` with `S > 0` and `V >= 0`.
#[inline]
pub fn evolve_step(
    params: &HestonParams,
    rate: f64,
    spot: f64,
    variance: f64,
    dt: f64,
    z1: f64,
    z2: f64,
) -> (f64, f64) {
    let sqrt_dt = dt.sqrt();
    let sqrt_v = variance.max(0.0).sqrt();

    let dw_v = z1 * sqrt_dt;
    let dw_s = (params.rho * z1 + (1.0 - params.rho * params.rho).sqrt() * z2) * sqrt_dt;

    let variance_next =
        (variance + params.kappa * (params.theta - variance) * dt + params.xi * sqrt_v * dw_v)
            .max(0.0);
    let spot_next = spot * ((rate - 0.5 * variance) * dt + sqrt_v * dw_s).exp();

    (spot_next, variance_next)
}
