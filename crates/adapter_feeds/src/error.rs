//! Market-data boundary errors.

use chrono::NaiveDate;
use thiserror::Error;

/// Failure modes of a market-data source.
///
/// Each variant carries enough context for a human-readable diagnostic;
/// callers surface these as failed statuses rather than substituting
/// fabricated data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// No spot price is available for the ticker.
    #[error("failed to fetch spot price for {0}")]
    SpotUnavailable(String),

    /// No option chain is available for the ticker and expiration.
    #[error("no option chain for {ticker} expiring {expiration}")]
    ChainUnavailable {
        /// Requested ticker symbol.
        ticker: String,
        /// Requested expiration date.
        expiration: NaiveDate,
    },

    /// The risk-free proxy feed produced nothing.
    #[error("failed to fetch the risk-free rate")]
    RateUnavailable,

    /// The ticker lists no option expirations.
    #[error("no option expirations found for {0}")]
    NoExpirations(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_ticker() {
        let err = FeedError::SpotUnavailable("AAPL".to_string());
        assert!(err.to_string().contains("AAPL"));

        let err = FeedError::ChainUnavailable {
            ticker: "MSFT".to_string(),
            expiration: NaiveDate::from_ymd_opt(2026, 1, 16).unwrap(),
        };
        assert!(err.to_string().contains("MSFT"));
        assert!(err.to_string().contains("2026-01-16"));
    }
}
