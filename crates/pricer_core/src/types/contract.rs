//! Option contract terms.
//!
//! Immutable contract descriptions constructed per pricing request.
//! Validation happens once at construction; downstream pricers can assume
//! a well-formed contract.

use super::error::PricingError;
use serde::{Deserialize, Serialize};

/// Option exercise class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionClass {
    /// Right to buy at the strike.
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionClass {
    /// Returns `true` for a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionClass::Call)
    }

    /// Intrinsic value of this class at the given spot and strike.
    ///
    /// `max(0, S - K)` for a call, `max(0, K - S)` for a put.
    #[inline]
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionClass::Call => (spot - strike).max(0.0),
            OptionClass::Put => (strike - spot).max(0.0),
        }
    }
}

impl std::fmt::Display for OptionClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionClass::Call => write!(f, "call"),
            OptionClass::Put => write!(f, "put"),
        }
    }
}

/// Terms of a single European option contract.
///
/// # Examples
///
/// ```
/// use pricer_core::types::contract::{ContractTerms, OptionClass};
///
/// let terms = ContractTerms::new(100.0, 1.0, OptionClass::Call).unwrap();
/// assert_eq!(terms.strike, 100.0);
///
/// // A non-positive strike is rejected at the boundary.
/// assert!(ContractTerms::new(0.0, 1.0, OptionClass::Call).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContractTerms {
    /// Strike price (K > 0).
    pub strike: f64,
    /// Time to maturity in years (T >= 0).
    pub maturity: f64,
    /// Call or put.
    pub class: OptionClass,
}

impl ContractTerms {
    /// Creates validated contract terms.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidInput` when the strike is not a
    /// positive finite number or the maturity is negative or non-finite.
    pub fn new(strike: f64, maturity: f64, class: OptionClass) -> Result<Self, PricingError> {
        if !(strike > 0.0) || !strike.is_finite() {
            return Err(PricingError::InvalidInput(format!(
                "strike must be positive and finite, got {}",
                strike
            )));
        }
        if !(maturity >= 0.0) || !maturity.is_finite() {
            return Err(PricingError::InvalidInput(format!(
                "maturity must be non-negative and finite, got {}",
                maturity
            )));
        }
        Ok(Self {
            strike,
            maturity,
            class,
        })
    }

    /// Creates call terms.
    pub fn call(strike: f64, maturity: f64) -> Result<Self, PricingError> {
        Self::new(strike, maturity, OptionClass::Call)
    }

    /// Creates put terms.
    pub fn put(strike: f64, maturity: f64) -> Result<Self, PricingError> {
        Self::new(strike, maturity, OptionClass::Put)
    }

    /// Intrinsic value of the contract at the given spot.
    #[inline]
    pub fn intrinsic(&self, spot: f64) -> f64 {
        self.class.intrinsic(spot, self.strike)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_terms() {
        let terms = ContractTerms::new(95.0, 0.5, OptionClass::Put).unwrap();
        assert_eq!(terms.strike, 95.0);
        assert_eq!(terms.maturity, 0.5);
        assert!(!terms.class.is_call());
    }

    #[test]
    fn zero_maturity_is_allowed() {
        assert!(ContractTerms::call(100.0, 0.0).is_ok());
    }

    #[test]
    fn invalid_strike_rejected() {
        assert!(ContractTerms::call(0.0, 1.0).is_err());
        assert!(ContractTerms::call(-10.0, 1.0).is_err());
        assert!(ContractTerms::call(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn negative_maturity_rejected() {
        assert!(ContractTerms::call(100.0, -0.1).is_err());
        assert!(ContractTerms::call(100.0, f64::INFINITY).is_err());
    }

    #[test]
    fn intrinsic_values() {
        let call = ContractTerms::call(100.0, 1.0).unwrap();
        let put = ContractTerms::put(100.0, 1.0).unwrap();
        assert_eq!(call.intrinsic(110.0), 10.0);
        assert_eq!(call.intrinsic(90.0), 0.0);
        assert_eq!(put.intrinsic(90.0), 10.0);
        assert_eq!(put.intrinsic(110.0), 0.0);
    }

    #[test]
    fn class_display() {
        assert_eq!(OptionClass::Call.to_string(), "call");
        assert_eq!(OptionClass::Put.to_string(), "put");
    }
}
