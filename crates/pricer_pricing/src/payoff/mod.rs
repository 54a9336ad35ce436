//! Payoff rule library.
//!
//! A closed set of payoff variants consumed by the Monte Carlo engine.
//! Each variant is a pure function of one price path (observations in
//! time order, initial value included) and its own parameters; nothing is
//! mutated. The closed enum keeps the payoff set statically verifiable
//! and makes data-parallel evaluation safe: extension happens by adding a
//! variant, not by passing arbitrary callables.

use pricer_core::types::contract::OptionClass;
use pricer_core::types::PricingError;

/// Knock semantics of a barrier option.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Knock {
    /// The payoff activates once the barrier is touched.
    In,
    /// The payoff deactivates once the barrier is touched.
    Out,
}

/// Direction of the barrier relative to the starting price.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BarrierDirection {
    /// Touch test: max(path) >= level.
    Up,
    /// Touch test: min(path) <= level.
    Down,
}

/// A path-dependent payoff description.
///
/// # Examples
///
/// ```
/// use pricer_core::types::contract::OptionClass;
/// use pricer_pricing::payoff::PayoffRule;
///
/// let rule = PayoffRule::Vanilla {
///     strike: 100.0,
///     class: OptionClass::Call,
/// };
/// assert_eq!(rule.evaluate(&[100.0, 95.0, 110.0]), 10.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PayoffRule {
    /// European payoff on the terminal observation.
    Vanilla {
        /// Strike price.
        strike: f64,
        /// Call or put.
        class: OptionClass,
    },
    /// Payoff on the arithmetic mean of all observations (initial value
    /// included).
    Asian {
        /// Strike price.
        strike: f64,
        /// Call or put.
        class: OptionClass,
    },
    /// Vanilla payoff gated by whether the path touches a barrier level.
    Barrier {
        /// Strike price.
        strike: f64,
        /// Call or put.
        class: OptionClass,
        /// Barrier level.
        level: f64,
        /// Knock-in or knock-out.
        knock: Knock,
        /// Up or down barrier.
        direction: BarrierDirection,
    },
    /// Fixed cash amount paid when the terminal price finishes strictly
    /// beyond the strike in the option's direction.
    Digital {
        /// Strike price.
        strike: f64,
        /// Call or put.
        class: OptionClass,
        /// Cash amount paid when in the money.
        cash: f64,
    },
}

impl PayoffRule {
    /// The strike of the rule.
    pub fn strike(&self) -> f64 {
        match self {
            PayoffRule::Vanilla { strike, .. }
            | PayoffRule::Asian { strike, .. }
            | PayoffRule::Barrier { strike, .. }
            | PayoffRule::Digital { strike, .. } => *strike,
        }
    }

    /// Validates the rule parameters.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidInput` for a non-positive strike or
    /// barrier level, or a non-finite cash amount.
    pub fn validate(&self) -> Result<(), PricingError> {
        if !(self.strike() > 0.0) || !self.strike().is_finite() {
            return Err(PricingError::InvalidInput(format!(
                "strike must be positive and finite, got {}",
                self.strike()
            )));
        }
        match self {
            PayoffRule::Barrier { level, .. } => {
                if !(*level > 0.0) || !level.is_finite() {
                    return Err(PricingError::InvalidInput(format!(
                        "barrier level must be positive and finite, got {}",
                        level
                    )));
                }
            }
            PayoffRule::Digital { cash, .. } => {
                if !cash.is_finite() || *cash < 0.0 {
                    return Err(PricingError::InvalidInput(format!(
                        "digital cash amount must be non-negative and finite, got {}",
                        cash
                    )));
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Evaluates the payoff on one price path.
    ///
    /// An empty path pays nothing; in practice every simulated path holds
    /// at least its initial observation.
    pub fn evaluate(&self, path: &[f64]) -> f64 {
        let terminal = match path.last() {
            Some(&value) => value,
            None => return 0.0,
        };
        match self {
            PayoffRule::Vanilla { strike, class } => class.intrinsic(terminal, *strike),
            PayoffRule::Asian { strike, class } => {
                let mean = path.iter().sum::<f64>() / path.len() as f64;
                class.intrinsic(mean, *strike)
            }
            PayoffRule::Barrier {
                strike,
                class,
                level,
                knock,
                direction,
            } => {
                let touched = match direction {
                    BarrierDirection::Up => path.iter().any(|&s| s >= *level),
                    BarrierDirection::Down => path.iter().any(|&s| s <= *level),
                };
                let alive = match knock {
                    Knock::Out => !touched,
                    Knock::In => touched,
                };
                if alive {
                    class.intrinsic(terminal, *strike)
                } else {
                    0.0
                }
            }
            PayoffRule::Digital { strike, class, cash } => {
                let in_the_money = match class {
                    OptionClass::Call => terminal > *strike,
                    OptionClass::Put => terminal < *strike,
                };
                if in_the_money {
                    *cash
                } else {
                    0.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const PATH: [f64; 5] = [100.0, 105.0, 95.0, 102.0, 110.0];

    #[test]
    fn vanilla_uses_terminal_observation() {
        let call = PayoffRule::Vanilla {
            strike: 100.0,
            class: OptionClass::Call,
        };
        let put = PayoffRule::Vanilla {
            strike: 100.0,
            class: OptionClass::Put,
        };
        assert_eq!(call.evaluate(&PATH), 10.0);
        assert_eq!(put.evaluate(&PATH), 0.0);
    }

    #[test]
    fn asian_uses_arithmetic_mean_including_initial() {
        let call = PayoffRule::Asian {
            strike: 100.0,
            class: OptionClass::Call,
        };
        // mean = (100 + 105 + 95 + 102 + 110) / 5 = 102.4
        assert_relative_eq!(call.evaluate(&PATH), 2.4, epsilon = 1e-12);

        let put = PayoffRule::Asian {
            strike: 104.0,
            class: OptionClass::Put,
        };
        assert_relative_eq!(put.evaluate(&PATH), 1.6, epsilon = 1e-12);
    }

    #[test]
    fn up_and_out_knocks_on_touch() {
        let rule = PayoffRule::Barrier {
            strike: 100.0,
            class: OptionClass::Call,
            level: 108.0,
            knock: Knock::Out,
            direction: BarrierDirection::Up,
        };
        // max(PATH) = 110 >= 108: knocked out.
        assert_eq!(rule.evaluate(&PATH), 0.0);

        let survivor = PayoffRule::Barrier {
            strike: 100.0,
            class: OptionClass::Call,
            level: 120.0,
            knock: Knock::Out,
            direction: BarrierDirection::Up,
        };
        assert_eq!(survivor.evaluate(&PATH), 10.0);
    }

    #[test]
    fn up_and_in_requires_touch() {
        let rule = PayoffRule::Barrier {
            strike: 100.0,
            class: OptionClass::Call,
            level: 108.0,
            knock: Knock::In,
            direction: BarrierDirection::Up,
        };
        assert_eq!(rule.evaluate(&PATH), 10.0);

        let unborn = PayoffRule::Barrier {
            strike: 100.0,
            class: OptionClass::Call,
            level: 120.0,
            knock: Knock::In,
            direction: BarrierDirection::Up,
        };
        assert_eq!(unborn.evaluate(&PATH), 0.0);
    }

    #[test]
    fn down_barrier_tests_path_minimum() {
        let knocked = PayoffRule::Barrier {
            strike: 100.0,
            class: OptionClass::Call,
            level: 95.0,
            knock: Knock::Out,
            direction: BarrierDirection::Down,
        };
        // min(PATH) = 95 <= 95: touched.
        assert_eq!(knocked.evaluate(&PATH), 0.0);

        let alive = PayoffRule::Barrier {
            strike: 100.0,
            class: OptionClass::Call,
            level: 90.0,
            knock: Knock::Out,
            direction: BarrierDirection::Down,
        };
        assert_eq!(alive.evaluate(&PATH), 10.0);
    }

    #[test]
    fn in_plus_out_equals_vanilla_per_path() {
        let vanilla = PayoffRule::Vanilla {
            strike: 100.0,
            class: OptionClass::Call,
        };
        for level in [90.0, 100.0, 108.0, 120.0] {
            let knock_in = PayoffRule::Barrier {
                strike: 100.0,
                class: OptionClass::Call,
                level,
                knock: Knock::In,
                direction: BarrierDirection::Up,
            };
            let knock_out = PayoffRule::Barrier {
                strike: 100.0,
                class: OptionClass::Call,
                level,
                knock: Knock::Out,
                direction: BarrierDirection::Up,
            };
            assert_eq!(
                knock_in.evaluate(&PATH) + knock_out.evaluate(&PATH),
                vanilla.evaluate(&PATH)
            );
        }
    }

    #[test]
    fn digital_pays_cash_strictly_beyond_strike() {
        let call = PayoffRule::Digital {
            strike: 110.0,
            class: OptionClass::Call,
            cash: 5.0,
        };
        // Terminal is exactly 110: not strictly beyond.
        assert_eq!(call.evaluate(&PATH), 0.0);

        let call_itm = PayoffRule::Digital {
            strike: 105.0,
            class: OptionClass::Call,
            cash: 5.0,
        };
        assert_eq!(call_itm.evaluate(&PATH), 5.0);

        let put_itm = PayoffRule::Digital {
            strike: 115.0,
            class: OptionClass::Put,
            cash: 2.5,
        };
        assert_eq!(put_itm.evaluate(&PATH), 2.5);
    }

    #[test]
    fn empty_path_pays_nothing() {
        let rule = PayoffRule::Vanilla {
            strike: 100.0,
            class: OptionClass::Call,
        };
        assert_eq!(rule.evaluate(&[]), 0.0);
    }

    #[test]
    fn validation_rejects_bad_parameters() {
        assert!(PayoffRule::Vanilla {
            strike: -1.0,
            class: OptionClass::Call
        }
        .validate()
        .is_err());
        assert!(PayoffRule::Barrier {
            strike: 100.0,
            class: OptionClass::Call,
            level: 0.0,
            knock: Knock::Out,
            direction: BarrierDirection::Up,
        }
        .validate()
        .is_err());
        assert!(PayoffRule::Digital {
            strike: 100.0,
            class: OptionClass::Call,
            cash: f64::NAN,
        }
        .validate()
        .is_err());
        assert!(PayoffRule::Asian {
            strike: 100.0,
            class: OptionClass::Put
        }
        .validate()
        .is_ok());
    }
}
