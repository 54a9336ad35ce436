//! Core type definitions.
//!
//! This module provides:
//! - `contract`: option class and validated contract terms
//! - `error`: structured error enums shared across the stack
//! - `time`: day-count conventions for quote expirations

pub mod contract;
pub mod error;
pub mod time;

pub use contract::{ContractTerms, OptionClass};
pub use error::{PricingError, SolverError};
pub use time::year_fraction_act365;
