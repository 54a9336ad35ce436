//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from pricing operations
//! - `SolverError`: Errors from the bound-constrained optimiser

use thiserror::Error;

/// Categorised pricing errors.
///
/// Provides structured error handling for pricing operations with
/// descriptive context for each failure mode.
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("Negative spot price".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: Negative spot price");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Invalid input data or parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

/// Errors from the bound-constrained solver.
///
/// These indicate structural misuse of the solver (empty parameter
/// vectors, mismatched bounds); non-convergence is *not* an error and is
/// reported through the solver result instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// Parameter vector and bounds have different lengths.
    #[error("Dimension mismatch: {expected} bounds expected, {actual} provided")]
    DimensionMismatch {
        /// Number of parameters supplied.
        expected: usize,
        /// Number of bounds supplied.
        actual: usize,
    },

    /// Numerical breakdown inside the solver.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}
