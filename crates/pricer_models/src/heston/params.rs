//! Heston model parameters.

use pricer_core::types::PricingError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Heston parameter validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HestonError {
    /// Initial variance must be positive.
    #[error("invalid initial variance: v0 = {0} (must be positive)")]
    InvalidV0(f64),

    /// Mean-reversion speed must be positive.
    #[error("invalid mean-reversion speed: kappa = {0} (must be positive)")]
    InvalidKappa(f64),

    /// Long-run variance must be positive.
    #[error("invalid long-run variance: theta = {0} (must be positive)")]
    InvalidTheta(f64),

    /// Vol-of-vol must be positive.
    #[error("invalid vol-of-vol: xi = {0} (must be positive)")]
    InvalidXi(f64),

    /// Correlation must lie in [-1, 1].
    #[error("invalid correlation: rho = {0} (must be in [-1, 1])")]
    InvalidRho(f64),
}

impl From<HestonError> for PricingError {
    fn from(err: HestonError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

/// Heston model parameters.
///
/// Mutated only by the calibration optimiser's trial-parameter
/// generation; immutable once passed into pricing or simulation.
///
/// # Examples
///
/// ```
/// use pricer_models::heston::HestonParams;
///
/// let params = HestonParams::new(0.04, 1.5, 0.04, 0.3, -0.7).unwrap();
/// assert!(params.satisfies_feller());
///
/// // Out-of-bound correlation is rejected.
/// assert!(HestonParams::new(0.04, 1.5, 0.04, 0.3, -1.5).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HestonParams {
    /// Initial variance (v0 > 0).
    pub v0: f64,
    /// Mean-reversion speed (kappa > 0).
    pub kappa: f64,
    /// Long-run variance (theta > 0).
    pub theta: f64,
    /// Volatility of variance (xi > 0).
    pub xi: f64,
    /// Correlation between the price and variance drivers (rho in [-1, 1]).
    pub rho: f64,
}

impl HestonParams {
    /// Number of model parameters.
    pub const COUNT: usize = 5;

    /// Creates validated parameters.
    ///
    /// Logs a warning when the Feller condition `2*kappa*theta > xi^2` is
    /// violated: the variance process then touches zero with positive
    /// probability, which the simulation handles by truncation.
    ///
    /// # Errors
    ///
    /// Returns `HestonError` for the first violated bound.
    pub fn new(v0: f64, kappa: f64, theta: f64, xi: f64, rho: f64) -> Result<Self, HestonError> {
        let params = Self {
            v0,
            kappa,
            theta,
            xi,
            rho,
        };
        params.validate()?;
        if !params.satisfies_feller() {
            tracing::warn!(
                kappa,
                theta,
                xi,
                "Feller condition 2*kappa*theta > xi^2 violated; variance paths will be truncated at zero"
            );
        }
        Ok(params)
    }

    /// Validates the parameter bounds.
    ///
    /// # Errors
    ///
    /// Returns `HestonError` for the first violated bound.
    pub fn validate(&self) -> Result<(), HestonError> {
        if !(self.v0 > 0.0) || !self.v0.is_finite() {
            return Err(HestonError::InvalidV0(self.v0));
        }
        if !(self.kappa > 0.0) || !self.kappa.is_finite() {
            return Err(HestonError::InvalidKappa(self.kappa));
        }
        if !(self.theta > 0.0) || !self.theta.is_finite() {
            return Err(HestonError::InvalidTheta(self.theta));
        }
        if !(self.xi > 0.0) || !self.xi.is_finite() {
            return Err(HestonError::InvalidXi(self.xi));
        }
        if !(-1.0..=1.0).contains(&self.rho) {
            return Err(HestonError::InvalidRho(self.rho));
        }
        Ok(())
    }

    /// Non-allocating bound check used by the calibration objective.
    ///
    /// Equivalent to `validate().is_ok()`.
    #[inline]
    pub fn within_bounds(&self) -> bool {
        self.validate().is_ok()
    }

    /// Whether the Feller condition `2*kappa*theta > xi^2` holds.
    ///
    /// When it does, the variance process stays strictly positive.
    pub fn satisfies_feller(&self) -> bool {
        2.0 * self.kappa * self.theta > self.xi * self.xi
    }

    /// Feller ratio `2*kappa*theta / xi^2` (values above 1 satisfy the
    /// condition).
    pub fn feller_ratio(&self) -> f64 {
        let denominator = self.xi * self.xi;
        if denominator > 0.0 {
            2.0 * self.kappa * self.theta / denominator
        } else {
            f64::INFINITY
        }
    }

    /// Parameter vector in calibration order `[v0, kappa, theta, xi, rho]`.
    #[inline]
    pub fn to_array(&self) -> [f64; Self::COUNT] {
        [self.v0, self.kappa, self.theta, self.xi, self.rho]
    }

    /// Builds parameters from a calibration vector, without validation.
    ///
    /// Trial vectors from the optimiser may sit outside the valid region;
    /// the objective checks [`within_bounds`](Self::within_bounds) before
    /// pricing.
    #[inline]
    pub fn from_array(values: [f64; Self::COUNT]) -> Self {
        Self {
            v0: values[0],
            kappa: values[1],
            theta: values[2],
            xi: values[3],
            rho: values[4],
        }
    }
}

impl Default for HestonParams {
    /// Typical equity-index parameters (20% vol, leverage effect).
    fn default() -> Self {
        Self {
            v0: 0.04,
            kappa: 1.5,
            theta: 0.04,
            xi: 0.3,
            rho: -0.7,
        }
    }
}
