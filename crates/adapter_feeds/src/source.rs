//! The market-data source trait and a deterministic in-memory source.

use crate::error::FeedError;
use crate::quotes::OptionChain;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Fixed fallback used when the risk-free proxy feed is unavailable.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.04;

/// Boundary with the market-data collaborator.
///
/// Implementations fetch quotes from wherever they live (a vendor feed, a
/// file, a test fixture); the pricing core only consumes this interface.
pub trait MarketDataSource {
    /// Current spot price for the ticker.
    ///
    /// # Errors
    ///
    /// Returns `FeedError::SpotUnavailable` when no price can be fetched.
    fn spot_price(&self, ticker: &str) -> Result<f64, FeedError>;

    /// Option chain for one expiration.
    ///
    /// # Errors
    ///
    /// Returns `FeedError::ChainUnavailable` when the chain is missing.
    fn option_chain(&self, ticker: &str, expiration: NaiveDate) -> Result<OptionChain, FeedError>;

    /// Annualised risk-free rate as a decimal.
    ///
    /// # Errors
    ///
    /// Returns `FeedError::RateUnavailable` when the proxy feed fails;
    /// see [`risk_free_rate_or_default`] for the conventional fallback.
    fn risk_free_rate(&self) -> Result<f64, FeedError>;

    /// Listed option expirations for the ticker.
    ///
    /// # Errors
    ///
    /// Returns `FeedError::NoExpirations` when the ticker lists none.
    fn available_expirations(&self, ticker: &str) -> Result<Vec<NaiveDate>, FeedError>;
}

/// Risk-free rate with the conventional fallback.
///
/// The rate feed is a proxy and may be unavailable; in that case a fixed
/// default is used and a warning is logged.
pub fn risk_free_rate_or_default(source: &dyn MarketDataSource) -> f64 {
    match source.risk_free_rate() {
        Ok(rate) => rate,
        Err(err) => {
            tracing::warn!(%err, fallback = DEFAULT_RISK_FREE_RATE, "risk-free feed failed, using default rate");
            DEFAULT_RISK_FREE_RATE
        }
    }
}

/// Chooses a calibration expiration at least `min_days` out.
///
/// Scans the expirations in ascending order and returns the first one at
/// least `min_days` after `today`; when none qualifies, falls back to the
/// furthest listed expiration. Returns `None` for an empty list.
pub fn select_expiration(
    expirations: &[NaiveDate],
    today: NaiveDate,
    min_days: i64,
) -> Option<NaiveDate> {
    let mut sorted: Vec<NaiveDate> = expirations.to_vec();
    sorted.sort_unstable();
    sorted
        .iter()
        .find(|&&expiration| (expiration - today).num_days() >= min_days)
        .copied()
        .or_else(|| sorted.last().copied())
}

/// Deterministic in-memory market-data source.
///
/// Used by tests and in-process callers that already hold the data.
///
/// # Examples
///
/// ```
/// use adapter_feeds::{MarketDataSource, StaticDataSource};
///
/// let source = StaticDataSource::new()
///     .with_spot("AAPL", 187.5)
///     .with_rate(0.045);
/// assert_eq!(source.spot_price("AAPL").unwrap(), 187.5);
/// assert!(source.spot_price("MSFT").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct StaticDataSource {
    spots: HashMap<String, f64>,
    chains: HashMap<(String, NaiveDate), OptionChain>,
    rate: Option<f64>,
}

impl StaticDataSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a spot price.
    pub fn with_spot(mut self, ticker: &str, price: f64) -> Self {
        self.spots.insert(ticker.to_string(), price);
        self
    }

    /// Adds an option chain.
    pub fn with_chain(mut self, ticker: &str, expiration: NaiveDate, chain: OptionChain) -> Self {
        self.chains.insert((ticker.to_string(), expiration), chain);
        self
    }

    /// Sets the risk-free rate.
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }
}

impl MarketDataSource for StaticDataSource {
    fn spot_price(&self, ticker: &str) -> Result<f64, FeedError> {
        self.spots
            .get(ticker)
            .copied()
            .ok_or_else(|| FeedError::SpotUnavailable(ticker.to_string()))
    }

    fn option_chain(&self, ticker: &str, expiration: NaiveDate) -> Result<OptionChain, FeedError> {
        self.chains
            .get(&(ticker.to_string(), expiration))
            .cloned()
            .ok_or_else(|| FeedError::ChainUnavailable {
                ticker: ticker.to_string(),
                expiration,
            })
    }

    fn risk_free_rate(&self) -> Result<f64, FeedError> {
        self.rate.ok_or(FeedError::RateUnavailable)
    }

    fn available_expirations(&self, ticker: &str) -> Result<Vec<NaiveDate>, FeedError> {
        let mut expirations: Vec<NaiveDate> = self
            .chains
            .keys()
            .filter(|(t, _)| t == ticker)
            .map(|(_, expiration)| *expiration)
            .collect();
        if expirations.is_empty() {
            return Err(FeedError::NoExpirations(ticker.to_string()));
        }
        expirations.sort_unstable();
        Ok(expirations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn static_source_round_trips() {
        let source = StaticDataSource::new()
            .with_spot("AAPL", 187.5)
            .with_chain("AAPL", date(2026, 1, 16), OptionChain::default())
            .with_rate(0.05);
        assert_eq!(source.spot_price("AAPL").unwrap(), 187.5);
        assert!(source.option_chain("AAPL", date(2026, 1, 16)).is_ok());
        assert_eq!(source.risk_free_rate().unwrap(), 0.05);
        assert_eq!(
            source.available_expirations("AAPL").unwrap(),
            vec![date(2026, 1, 16)]
        );
    }

    #[test]
    fn missing_data_is_an_error() {
        let source = StaticDataSource::new();
        assert!(matches!(
            source.spot_price("AAPL"),
            Err(FeedError::SpotUnavailable(_))
        ));
        assert!(matches!(
            source.option_chain("AAPL", date(2026, 1, 16)),
            Err(FeedError::ChainUnavailable { .. })
        ));
        assert!(matches!(
            source.available_expirations("AAPL"),
            Err(FeedError::NoExpirations(_))
        ));
    }

    #[test]
    fn rate_fallback_uses_default() {
        let source = StaticDataSource::new();
        assert_eq!(risk_free_rate_or_default(&source), DEFAULT_RISK_FREE_RATE);
        let source = source.with_rate(0.052);
        assert_eq!(risk_free_rate_or_default(&source), 0.052);
    }

    #[test]
    fn expiration_selection_prefers_first_beyond_horizon() {
        let expirations = vec![date(2025, 8, 15), date(2025, 9, 19), date(2025, 12, 19)];
        let today = date(2025, 8, 7);
        assert_eq!(
            select_expiration(&expirations, today, 30),
            Some(date(2025, 9, 19))
        );
        // Nothing 200 days out: fall back to the furthest.
        assert_eq!(
            select_expiration(&expirations, today, 200),
            Some(date(2025, 12, 19))
        );
        assert_eq!(select_expiration(&[], today, 30), None);
    }
}
