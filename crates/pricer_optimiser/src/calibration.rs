//! Heston calibration driver.
//!
//! Wires the filter pipeline, the objective, and the bound-constrained
//! solver into one run: filter -> guard empty -> minimise -> structured
//! outcome. Always returns a [`CalibrationResult`] (never panics on
//! non-convergence); the optimiser's termination message is preserved
//! verbatim for diagnostics.

use adapter_feeds::MarketQuote;
use chrono::NaiveDate;
use pricer_core::math::solvers::{BfgsConfig, BoundedBfgsSolver};
use pricer_core::traits::calibration::{CalibrationResult, ParameterBounds};
use pricer_models::heston::HestonParams;

use crate::error::CalibrationFailure;
use crate::filtering::filter_quotes;
use crate::objective::{build_targets, sum_squared_error};

/// Box bounds for the five Heston parameters, in
/// `[v0, kappa, theta, xi, rho]` order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HestonBounds(pub [ParameterBounds; HestonParams::COUNT]);

impl Default for HestonBounds {
    /// Wide bounds covering typical equity parameter ranges.
    fn default() -> Self {
        Self([
            ParameterBounds::new(1e-6, 1.0),     // v0
            ParameterBounds::new(0.01, 20.0),    // kappa
            ParameterBounds::new(1e-6, 1.0),     // theta
            ParameterBounds::new(0.01, 2.0),     // xi
            ParameterBounds::new(-0.999, 0.999), // rho
        ])
    }
}

impl HestonBounds {
    /// Creates bounds from explicit per-parameter intervals.
    pub fn new(bounds: [ParameterBounds; HestonParams::COUNT]) -> Self {
        Self(bounds)
    }

    /// The bounds as a slice for the solver.
    pub fn as_slice(&self) -> &[ParameterBounds] {
        &self.0
    }
}

/// Heston calibration configuration.
///
/// The run is synchronous; interactive callers should drive it from a
/// worker thread and marshal the progress callback and the final result
/// back onto their own context.
///
/// # Examples
///
/// ```no_run
/// use adapter_feeds::MarketQuote;
/// use chrono::NaiveDate;
/// use pricer_models::heston::HestonParams;
/// use pricer_optimiser::HestonCalibration;
///
/// # let quotes: Vec<MarketQuote> = Vec::new();
/// let today = NaiveDate::from_ymd_opt(2025, 8, 7).unwrap();
/// let initial = HestonParams::new(0.04, 1.5, 0.04, 0.3, -0.5).unwrap();
/// let result = HestonCalibration::new().run_with_progress(
///     187.5,
///     &quotes,
///     0.045,
///     today,
///     initial,
///     |done, total| eprintln!("iteration {done}/{total}"),
/// );
/// println!("{result}");
/// ```
#[derive(Clone, Debug)]
pub struct HestonCalibration {
    bounds: HestonBounds,
    solver: BfgsConfig,
}

impl Default for HestonCalibration {
    fn default() -> Self {
        Self::new()
    }
}

impl HestonCalibration {
    /// Creates a calibration with default bounds and a 2000-iteration
    /// solver budget.
    pub fn new() -> Self {
        Self {
            bounds: HestonBounds::default(),
            solver: BfgsConfig {
                max_iterations: 2000,
                ..Default::default()
            },
        }
    }

    /// Replaces the parameter bounds.
    pub fn with_bounds(mut self, bounds: HestonBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Replaces the solver configuration.
    pub fn with_solver_config(mut self, config: BfgsConfig) -> Self {
        self.solver = config;
        self
    }

    /// The configured bounds.
    pub fn bounds(&self) -> &HestonBounds {
        &self.bounds
    }

    /// Runs the calibration without progress reporting.
    pub fn run(
        &self,
        spot: f64,
        quotes: &[MarketQuote],
        rate: f64,
        calibration_date: NaiveDate,
        initial: HestonParams,
    ) -> CalibrationResult<HestonParams> {
        self.run_with_progress(spot, quotes, rate, calibration_date, initial, |_, _| {})
    }

    /// Runs the calibration, reporting `(iteration, budget)` after every
    /// optimiser iteration.
    ///
    /// The callback has no effect on the optimisation trajectory. The
    /// returned result is `Success` iff the optimiser converged; on
    /// `Failed` the best-found parameters and objective are still
    /// populated.
    pub fn run_with_progress<P>(
        &self,
        spot: f64,
        quotes: &[MarketQuote],
        rate: f64,
        calibration_date: NaiveDate,
        initial: HestonParams,
        progress: P,
    ) -> CalibrationResult<HestonParams>
    where
        P: FnMut(usize, usize),
    {
        if !(spot > 0.0) || !spot.is_finite() {
            return CalibrationResult::failed(
                initial,
                0,
                f64::INFINITY,
                CalibrationFailure::InvalidSpot(spot).to_string(),
            );
        }
        if quotes.is_empty() {
            return CalibrationResult::failed(
                initial,
                0,
                f64::INFINITY,
                CalibrationFailure::NoQuotes.to_string(),
            );
        }

        let filtered = filter_quotes(quotes, spot);
        tracing::debug!(
            raw = quotes.len(),
            surviving = filtered.len(),
            dropped = filtered.total_dropped(),
            "quote filtering finished"
        );
        if filtered.is_empty() {
            return CalibrationResult::failed(
                initial,
                0,
                f64::INFINITY,
                CalibrationFailure::EmptyAfterFiltering.to_string(),
            );
        }

        let targets = build_targets(&filtered, calibration_date);
        tracing::info!(
            n_targets = targets.len(),
            spot,
            rate,
            %calibration_date,
            "starting Heston calibration"
        );

        let objective = |values: &[f64]| sum_squared_error(values, &targets, spot, rate);
        let solver = BoundedBfgsSolver::new(self.solver);
        let solved = solver.solve_with_progress(
            objective,
            initial.to_array().to_vec(),
            self.bounds.as_slice(),
            progress,
        );

        match solved {
            Ok(result) => {
                let array = <[f64; HestonParams::COUNT]>::try_from(result.params.as_slice())
                    .unwrap_or(initial.to_array());
                let params = HestonParams::from_array(array);
                if !params.satisfies_feller() {
                    tracing::warn!(
                        feller_ratio = params.feller_ratio(),
                        "fitted parameters violate the Feller condition"
                    );
                }
                tracing::info!(
                    converged = result.converged,
                    objective = result.objective,
                    iterations = result.iterations,
                    message = %result.message,
                    "calibration finished"
                );
                if result.converged {
                    CalibrationResult::success(params, result.iterations, result.objective)
                        .with_message(result.message)
                } else {
                    CalibrationResult::failed(
                        params,
                        result.iterations,
                        result.objective,
                        result.message,
                    )
                }
            }
            Err(err) => CalibrationResult::failed(initial, 0, f64::INFINITY, err.to_string()),
        }
    }
}
