//! Discounted payoff averaging over a simulated batch.

use super::paths::PathBatch;
use crate::payoff::PayoffRule;
use rayon::prelude::*;

/// Monte Carlo price estimate.
///
/// The sample standard error accompanies the price so that a caller (or
/// a test suite) can judge the estimate; the engine itself computes no
/// confidence bound.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct McPrice {
    /// Discounted mean payoff.
    pub price: f64,
    /// Standard error of the discounted estimate.
    pub std_error: f64,
}

impl McPrice {
    /// Half-width of the 95% confidence interval.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }

    /// Half-width of the 99% confidence interval.
    #[inline]
    pub fn confidence_99(&self) -> f64 {
        2.576 * self.std_error
    }
}

/// Prices a payoff rule over a simulated batch.
///
/// Evaluates the rule once per path (in parallel), averages the payoffs,
/// and discounts by `e^{-rT}`. The aggregation is a plain sum; its
/// floating-point order sensitivity is an accepted limitation of the
/// method, not a correctness bug.
pub fn price_with_rule(batch: &PathBatch, rate: f64, maturity: f64, rule: &PayoffRule) -> McPrice {
    let n = batch.n_paths();
    let discount = (-rate * maturity).exp();

    let payoffs: Vec<f64> = (0..n)
        .into_par_iter()
        .map(|path| rule.evaluate(batch.spot_path(path)))
        .collect();

    let mean = payoffs.iter().sum::<f64>() / n as f64;
    let variance = if n > 1 {
        payoffs.iter().map(|p| (p - mean) * (p - mean)).sum::<f64>() / (n - 1) as f64
    } else {
        0.0
    };

    McPrice {
        price: discount * mean,
        std_error: discount * (variance / n as f64).sqrt(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::types::contract::OptionClass;

    /// Hand-built two-step batch with known terminal values.
    fn fixed_batch() -> PathBatch {
        // Three paths, terminal prices 110, 90, 100.
        let spot = vec![
            100.0, 105.0, 110.0, //
            100.0, 95.0, 90.0, //
            100.0, 100.0, 100.0,
        ];
        let variance = vec![0.04; 9];
        PathBatch::from_planes(spot, variance, 3, 2)
    }

    #[test]
    fn discounted_mean_of_vanilla_payoffs() {
        let batch = fixed_batch();
        let rule = PayoffRule::Vanilla {
            strike: 100.0,
            class: OptionClass::Call,
        };
        let result = price_with_rule(&batch, 0.05, 1.0, &rule);
        // Payoffs: 10, 0, 0 -> mean 10/3, discounted.
        let expected = (10.0 / 3.0) * (-0.05_f64).exp();
        assert_relative_eq!(result.price, expected, epsilon = 1e-12);
        assert!(result.std_error > 0.0);
    }

    #[test]
    fn zero_rate_skips_discounting() {
        let batch = fixed_batch();
        let rule = PayoffRule::Digital {
            strike: 95.0,
            class: OptionClass::Call,
            cash: 1.0,
        };
        // Terminals 110 and 100 are above 95: payoff 1 on two of three.
        let result = price_with_rule(&batch, 0.0, 1.0, &rule);
        assert_relative_eq!(result.price, 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn constant_payoff_has_zero_std_error() {
        let batch = fixed_batch();
        // All three paths finish at or above 80.
        let rule = PayoffRule::Digital {
            strike: 80.0,
            class: OptionClass::Call,
            cash: 4.0,
        };
        let result = price_with_rule(&batch, 0.03, 2.0, &rule);
        assert_relative_eq!(result.price, 4.0 * (-0.06_f64).exp(), epsilon = 1e-12);
        assert_relative_eq!(result.std_error, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn confidence_interval_scales_with_std_error() {
        let price = McPrice {
            price: 10.0,
            std_error: 0.5,
        };
        assert_relative_eq!(price.confidence_95(), 0.98, epsilon = 1e-12);
        assert!(price.confidence_99() > price.confidence_95());
    }
}
