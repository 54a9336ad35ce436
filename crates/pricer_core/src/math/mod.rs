//! Numerical routines.
//!
//! This module provides:
//! - `quadrature`: adaptive Simpson integration for Fourier-inversion
//!   integrals
//! - `solvers`: bound-constrained quasi-Newton minimisation

pub mod quadrature;
pub mod solvers;

pub use quadrature::{adaptive_simpson, QuadratureConfig};
pub use solvers::{BfgsConfig, BfgsResult, BoundedBfgsSolver};
