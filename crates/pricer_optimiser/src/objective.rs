//! Calibration objective function.
//!
//! Sum of squared differences between each surviving quote's mid price
//! and the characteristic-function price at the trial parameters. A trial
//! vector that violates the model bounds, or for which any single quote
//! prices degenerate, scores `+inf`: one bad option disqualifies the
//! whole parameter vector, steering the optimiser away from numerically
//! unstable regions rather than silently ignoring the quote.

use adapter_feeds::MarketQuote;
use chrono::NaiveDate;
use pricer_core::types::contract::OptionClass;
use pricer_core::types::time::year_fraction_act365;
use pricer_models::heston::analytic;
use pricer_models::heston::HestonParams;
use rayon::prelude::*;

use crate::filtering::FilteredQuoteSet;

/// One calibration target derived from a surviving market quote.
///
/// The mid price and the Act/365 maturity are computed once per quote at
/// calibration start; the optimiser then evaluates thousands of trials
/// against the same targets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuoteTarget {
    /// Strike price.
    pub strike: f64,
    /// Time to expiry in years from the calibration date.
    pub maturity: f64,
    /// Quote mid price `(bid + ask) / 2`.
    pub mid: f64,
    /// Call or put.
    pub class: OptionClass,
}

impl QuoteTarget {
    /// Derives a target from a quote and the calibration date.
    pub fn from_quote(quote: &MarketQuote, calibration_date: NaiveDate) -> Self {
        Self {
            strike: quote.strike,
            maturity: year_fraction_act365(calibration_date, quote.expiration),
            mid: quote.mid(),
            class: quote.class,
        }
    }
}

/// Builds the target list for a filtered quote set.
pub fn build_targets(quotes: &FilteredQuoteSet, calibration_date: NaiveDate) -> Vec<QuoteTarget> {
    quotes
        .quotes()
        .iter()
        .map(|quote| QuoteTarget::from_quote(quote, calibration_date))
        .collect()
}

/// Evaluates the calibration objective at a trial parameter vector.
///
/// `values` is the optimiser's trial in `[v0, kappa, theta, xi, rho]`
/// order. Returns `+inf` when the vector violates the model bounds, the
/// target list is empty, or any quote prices degenerate; otherwise the
/// sum of squared mid-versus-model errors. Per-quote pricing is
/// independent and runs in parallel.
pub fn sum_squared_error(
    values: &[f64],
    targets: &[QuoteTarget],
    spot: f64,
    rate: f64,
) -> f64 {
    let Ok(array) = <[f64; HestonParams::COUNT]>::try_from(values) else {
        return f64::INFINITY;
    };
    let params = HestonParams::from_array(array);
    if !params.within_bounds() {
        return f64::INFINITY;
    }
    if targets.is_empty() {
        return f64::INFINITY;
    }

    let total = targets
        .par_iter()
        .map(|target| {
            let price = match target.class {
                OptionClass::Call => {
                    analytic::call_price(&params, spot, target.strike, target.maturity, rate)
                }
                OptionClass::Put => {
                    analytic::put_price(&params, spot, target.strike, target.maturity, rate)
                }
            };
            price.value().map(|model| {
                let error = model - target.mid;
                error * error
            })
        })
        .reduce(
            || Some(0.0),
            |a, b| match (a, b) {
                (Some(x), Some(y)) => Some(x + y),
                _ => None,
            },
        );

    total.unwrap_or(f64::INFINITY)
}
