//! # Pricer Optimiser (L2.5: Calibration)
//!
//! Fits the five Heston parameters to an observed option-price surface:
//!
//! ```text
//! MarketQuotes -> filter_quotes -> QuoteTargets -> BoundedBfgsSolver
//!                                       |                 |
//!                                sum_squared_error <------+  (many trials)
//!                                       |
//!                              CalibrationResult<HestonParams>
//! ```
//!
//! The optimiser's outer loop is inherently sequential; the per-quote
//! pricing inside one objective evaluation is independent across quotes
//! and runs in parallel. Progress is reported through an explicit
//! callback parameter; there is no process-wide iteration state.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod calibration;
pub mod error;
pub mod filtering;
pub mod objective;

pub use calibration::{HestonBounds, HestonCalibration};
pub use error::CalibrationFailure;
pub use filtering::{filter_quotes, FilteredQuoteSet, MAX_RELATIVE_SPREAD, MONEYNESS_BAND};
pub use objective::{build_targets, sum_squared_error, QuoteTarget};
