//! On-demand exotic option pricing.
//!
//! Each entry point simulates a fresh Heston path batch and evaluates one
//! payoff rule over it: the batch is owned by the call and discarded once
//! the engine has consumed it. Inputs are validated synchronously at this
//! boundary; simulation and payoff code below it assume well-formed
//! arguments.

use crate::mc::{generate_heston_paths, price_with_rule, McPrice, SimulationConfig};
use crate::payoff::{BarrierDirection, Knock, PayoffRule};
use pricer_core::types::contract::OptionClass;
use pricer_core::types::PricingError;
use pricer_models::heston::HestonParams;

/// Prices an arbitrary payoff rule by Monte Carlo simulation.
///
/// # Errors
///
/// Returns `PricingError::InvalidInput` when the model parameters violate
/// their bounds, the spot or maturity is not positive and finite, the
/// rate is not finite, or the payoff rule itself is malformed.
pub fn price_exotic(
    params: &HestonParams,
    spot: f64,
    rate: f64,
    maturity: f64,
    config: &SimulationConfig,
    rule: &PayoffRule,
) -> Result<McPrice, PricingError> {
    params.validate()?;
    if !(spot > 0.0) || !spot.is_finite() {
        return Err(PricingError::InvalidInput(format!(
            "spot must be positive and finite, got {}",
            spot
        )));
    }
    if !(maturity > 0.0) || !maturity.is_finite() {
        return Err(PricingError::InvalidInput(format!(
            "maturity must be positive and finite, got {}",
            maturity
        )));
    }
    if !rate.is_finite() {
        return Err(PricingError::InvalidInput(format!(
            "rate must be finite, got {}",
            rate
        )));
    }
    rule.validate()?;

    let batch = generate_heston_paths(params, spot, rate, maturity, config);
    Ok(price_with_rule(&batch, rate, maturity, rule))
}

/// Prices a European option by simulation.
///
/// # Errors
///
/// See [`price_exotic`].
pub fn price_vanilla(
    params: &HestonParams,
    spot: f64,
    rate: f64,
    maturity: f64,
    config: &SimulationConfig,
    strike: f64,
    class: OptionClass,
) -> Result<McPrice, PricingError> {
    price_exotic(
        params,
        spot,
        rate,
        maturity,
        config,
        &PayoffRule::Vanilla { strike, class },
    )
}

/// Prices an arithmetic-average Asian option by simulation.
///
/// # Errors
///
/// See [`price_exotic`].
pub fn price_asian(
    params: &HestonParams,
    spot: f64,
    rate: f64,
    maturity: f64,
    config: &SimulationConfig,
    strike: f64,
    class: OptionClass,
) -> Result<McPrice, PricingError> {
    price_exotic(
        params,
        spot,
        rate,
        maturity,
        config,
        &PayoffRule::Asian { strike, class },
    )
}

/// Prices a barrier option by simulation.
///
/// # Errors
///
/// See [`price_exotic`].
#[allow(clippy::too_many_arguments)]
pub fn price_barrier(
    params: &HestonParams,
    spot: f64,
    rate: f64,
    maturity: f64,
    config: &SimulationConfig,
    strike: f64,
    class: OptionClass,
    level: f64,
    knock: Knock,
    direction: BarrierDirection,
) -> Result<McPrice, PricingError> {
    price_exotic(
        params,
        spot,
        rate,
        maturity,
        config,
        &PayoffRule::Barrier {
            strike,
            class,
            level,
            knock,
            direction,
        },
    )
}

/// Prices a cash-or-nothing digital option by simulation.
///
/// # Errors
///
/// See [`price_exotic`].
pub fn price_digital(
    params: &HestonParams,
    spot: f64,
    rate: f64,
    maturity: f64,
    config: &SimulationConfig,
    strike: f64,
    class: OptionClass,
    cash: f64,
) -> Result<McPrice, PricingError> {
    price_exotic(
        params,
        spot,
        rate,
        maturity,
        config,
        &PayoffRule::Digital {
            strike,
            class,
            cash,
        },
    )
}
