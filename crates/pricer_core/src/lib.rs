//! # Pricer Core (L1: Foundation)
//!
//! Shared types and numerical routines for the volcal pricing stack.
//!
//! This crate provides:
//! - Contract descriptions (option class, strike, maturity) with validation
//! - Structured error enums for pricing and solver failures
//! - Act/365-fixed year fractions for quote expirations
//! - Adaptive Simpson quadrature for Fourier-inversion integrals
//! - A bound-constrained quasi-Newton solver for model calibration
//! - Calibration result and parameter-bound types
//!
//! ## Design Principles
//!
//! - **Validation at the boundary**: invalid inputs are rejected with a
//!   descriptive error, never silently coerced
//! - **Explicit results**: fallible numerics return `Result`, never panic
//! - **No global state**: solver progress is surfaced through a callback
//!   parameter, not process-wide counters

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod traits;
pub mod types;

pub use traits::calibration::{CalibrationResult, CalibrationStatus, ParameterBounds};
pub use types::contract::{ContractTerms, OptionClass};
pub use types::error::{PricingError, SolverError};
