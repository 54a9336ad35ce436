//! Error types for the Monte Carlo kernel.

use thiserror::Error;

/// Configuration error for the simulation engine.
///
/// These occur at build time when invalid sizing is requested.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Path count outside the valid range.
    #[error("invalid path count {0}: must be in range [1, 10000000]")]
    InvalidPathCount(usize),

    /// Step count outside the valid range.
    #[error("invalid step count {0}: must be in range [1, 10000]")]
    InvalidStepCount(usize),

    /// A required parameter was not supplied to the builder.
    #[error("invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}
