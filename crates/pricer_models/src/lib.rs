//! # Pricer Models (L2: Model Layer)
//!
//! The Heston stochastic-volatility model: parameters with validation,
//! the semi-analytical characteristic-function pricer, and the
//! full-truncation Euler discretisation of the coupled SDEs.
//!
//! The model is described by:
//!
//! ```text
//! dS = r * S * dt + sqrt(V) * S * dW_S
//! dV = kappa * (theta - V) * dt + xi * sqrt(V) * dW_V
//! E[dW_S * dW_V] = rho * dt
//! ```
//!
//! ## Design Principles
//!
//! - **Validation at construction**: [`HestonParams::new`] rejects
//!   out-of-bound parameters; pricing code assumes well-formed inputs
//! - **Explicit degeneracy**: the analytic pricer returns
//!   [`heston::AnalyticPrice`] instead of throwing, so calibration can
//!   treat a pathological evaluation as "badly priced" rather than
//!   crashing

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod heston;

pub use heston::{AnalyticPrice, HestonError, HestonParams};
