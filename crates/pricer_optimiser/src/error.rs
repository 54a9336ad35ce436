//! Calibration failure causes.

use thiserror::Error;

/// Reasons a calibration run fails before the optimiser starts.
///
/// These become the message of a `Failed` calibration result; no
/// optimiser call is made once one of them is hit.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalibrationFailure {
    /// The supplied spot price is unusable.
    #[error("invalid spot price: {0}")]
    InvalidSpot(f64),

    /// No market quotes were supplied at all.
    #[error("no market quotes supplied for calibration")]
    NoQuotes,

    /// Every quote was dropped by the validity and liquidity filters.
    #[error("no quotes survived the validity and liquidity filters; loosen the filters or pick a nearer expiration")]
    EmptyAfterFiltering,
}
