//! Heston stochastic-volatility model.
//!
//! - [`params`]: the five model parameters with validation and Feller
//!   diagnostics
//! - [`analytic`]: European pricing via characteristic-function inversion
//! - [`process`]: full-truncation Euler step for path simulation

pub mod analytic;
pub mod params;
pub mod process;

pub use analytic::AnalyticPrice;
pub use params::{HestonError, HestonParams};
