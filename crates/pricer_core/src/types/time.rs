//! Day-count conventions.
//!
//! The calibration objective measures time to expiry in years on an
//! Act/365-fixed basis (calendar days divided by 365.0).

use chrono::NaiveDate;

/// Act/365-fixed year fraction between two dates.
///
/// Negative when `to` precedes `from`; callers decide how to treat
/// already-expired quotes.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use pricer_core::types::time::year_fraction_act365;
///
/// let from = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let to = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let t = year_fraction_act365(from, to);
/// assert!((t - 366.0 / 365.0).abs() < 1e-12);
/// ```
#[inline]
pub fn year_fraction_act365(from: NaiveDate, to: NaiveDate) -> f64 {
    (to - from).num_days() as f64 / 365.0
}
