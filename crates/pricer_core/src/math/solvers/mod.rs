//! Optimisation solvers.
//!
//! This module provides [`BoundedBfgsSolver`], a box-constrained
//! quasi-Newton minimiser with finite-difference gradients, used to drive
//! model calibration.

mod bounded_bfgs;

pub use bounded_bfgs::{BfgsConfig, BfgsResult, BoundedBfgsSolver};
