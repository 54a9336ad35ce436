//! Calibration vocabulary types.
//!
//! This module defines the shared result and constraint types for model
//! calibration:
//! - [`ParameterBounds`]: per-parameter box constraints
//! - [`CalibrationStatus`]: Success/Failed outcome vocabulary
//! - [`CalibrationResult`]: final parameters plus diagnostics
//!
//! Calibrators return a structured result in every case: non-convergence
//! carries the optimiser's termination message and the best-found
//! parameters, leaving the accept-or-discard decision to the caller.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Box constraint for a single calibration parameter.
///
/// # Examples
///
/// ```
/// use pricer_core::traits::calibration::ParameterBounds;
///
/// let bounds = ParameterBounds::new(0.01, 2.0);
/// assert!(bounds.contains(0.5));
/// assert_eq!(bounds.clamp(5.0), 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterBounds {
    /// Lower bound (inclusive).
    pub min: f64,
    /// Upper bound (inclusive).
    pub max: f64,
}

impl ParameterBounds {
    /// Creates bounds `[min, max]`.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Bounds for a strictly positive parameter.
    pub fn positive() -> Self {
        Self {
            min: f64::MIN_POSITIVE,
            max: f64::INFINITY,
        }
    }

    /// Unbounded parameter.
    pub fn unbounded() -> Self {
        Self {
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
        }
    }

    /// Whether `value` lies inside the bounds.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamps `value` into the bounds.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Outcome status of a calibration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalibrationStatus {
    /// The optimiser reported convergence.
    Success,
    /// The optimiser stopped without convergence, or calibration was
    /// aborted before the optimiser ran (for example, an empty quote set).
    Failed,
}

/// Result of a calibration run.
///
/// The fitted parameters and objective value are populated on `Failed` as
/// well, since the best-found point is often still usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationResult<P> {
    /// Final calibrated parameters.
    pub params: P,
    /// Success/Failed status.
    pub status: CalibrationStatus,
    /// Minimised objective value.
    pub objective: f64,
    /// Number of optimiser iterations performed.
    pub iterations: usize,
    /// Termination message, preserved verbatim for diagnostics.
    pub message: Option<String>,
}

impl<P> CalibrationResult<P> {
    /// Creates a successful result.
    pub fn success(params: P, iterations: usize, objective: f64) -> Self {
        Self {
            params,
            status: CalibrationStatus::Success,
            objective,
            iterations,
            message: None,
        }
    }

    /// Creates a failed result with a descriptive message.
    pub fn failed(
        params: P,
        iterations: usize,
        objective: f64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            params,
            status: CalibrationStatus::Failed,
            objective,
            iterations,
            message: Some(message.into()),
        }
    }

    /// Attaches a message to the result.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Whether the calibration converged.
    pub fn is_success(&self) -> bool {
        self.status == CalibrationStatus::Success
    }
}

impl<P: fmt::Debug> fmt::Display for CalibrationResult<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CalibrationResult {{ status: {:?}, iterations: {}, objective: {:.6e} }}",
            self.status, self.iterations, self.objective
        )
    }
}
