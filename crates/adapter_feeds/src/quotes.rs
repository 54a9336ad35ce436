//! Market quote and option chain types.

use chrono::NaiveDate;
use pricer_core::types::contract::OptionClass;
use serde::{Deserialize, Serialize};

/// One observed option quote.
///
/// Produced by the market-data collaborator and consumed read-only by the
/// calibration filters and objective. Bid and ask may be `NaN` when the
/// feed delivered a non-numeric field; the validity filter drops such
/// quotes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketQuote {
    /// Strike price.
    pub strike: f64,
    /// Expiration date.
    pub expiration: NaiveDate,
    /// Best bid.
    pub bid: f64,
    /// Best ask.
    pub ask: f64,
    /// Traded volume.
    pub volume: u64,
    /// Open interest.
    pub open_interest: u64,
    /// Call or put, inferred from the chain side the quote came from.
    pub class: OptionClass,
}

impl MarketQuote {
    /// Mid price `(bid + ask) / 2`.
    #[inline]
    pub fn mid(&self) -> f64 {
        0.5 * (self.bid + self.ask)
    }

    /// Relative bid-ask spread `(ask - bid) / bid`.
    #[inline]
    pub fn relative_spread(&self) -> f64 {
        (self.ask - self.bid) / self.bid
    }

    /// Whether bid and ask are both finite and positive.
    #[inline]
    pub fn has_valid_prices(&self) -> bool {
        self.bid.is_finite() && self.ask.is_finite() && self.bid > 0.0 && self.ask > 0.0
    }

    /// Whether the quote shows any trading activity.
    #[inline]
    pub fn is_traded(&self) -> bool {
        self.volume > 0 || self.open_interest > 0
    }
}

/// The two sides of an option chain for one expiration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionChain {
    /// Call quotes.
    pub calls: Vec<MarketQuote>,
    /// Put quotes.
    pub puts: Vec<MarketQuote>,
}

impl OptionChain {
    /// Whether both sides are empty.
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty() && self.puts.is_empty()
    }

    /// Total number of quotes.
    pub fn len(&self) -> usize {
        self.calls.len() + self.puts.len()
    }

    /// Flattens both sides into one quote list (calls first).
    pub fn flatten(self) -> Vec<MarketQuote> {
        let mut quotes = self.calls;
        quotes.extend(self.puts);
        quotes
    }
}
