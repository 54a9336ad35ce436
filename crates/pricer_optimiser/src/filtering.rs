//! Quote filtering pipeline.
//!
//! Four sequential stages narrow the raw quote set before calibration;
//! quotes are dropped, never mutated, and re-applying the pipeline to an
//! already-filtered set changes nothing:
//!
//! 1. validity: finite, positive bid and ask
//! 2. moneyness: strike within ±35% of spot
//! 3. spread: relative bid-ask spread at most 20%
//! 4. liquidity: traded volume or open interest present

use adapter_feeds::MarketQuote;

/// Moneyness band around spot: strikes within ±35% survive.
pub const MONEYNESS_BAND: f64 = 0.35;

/// Maximum relative bid-ask spread `(ask - bid) / bid`.
pub const MAX_RELATIVE_SPREAD: f64 = 0.20;

/// Quotes surviving the filter pipeline, with per-stage drop counts.
///
/// Recomputed once per calibration run and read-only thereafter.
#[derive(Clone, Debug, Default)]
pub struct FilteredQuoteSet {
    quotes: Vec<MarketQuote>,
    /// Quotes dropped for non-numeric or non-positive bid/ask.
    pub dropped_invalid_prices: usize,
    /// Quotes dropped outside the moneyness band.
    pub dropped_moneyness: usize,
    /// Quotes dropped for a too-wide relative spread.
    pub dropped_wide_spread: usize,
    /// Quotes dropped with neither volume nor open interest.
    pub dropped_illiquid: usize,
}

impl FilteredQuoteSet {
    /// Number of surviving quotes.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Whether nothing survived.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// The surviving quotes, in their original order.
    pub fn quotes(&self) -> &[MarketQuote] {
        &self.quotes
    }

    /// Total number of dropped quotes.
    pub fn total_dropped(&self) -> usize {
        self.dropped_invalid_prices
            + self.dropped_moneyness
            + self.dropped_wide_spread
            + self.dropped_illiquid
    }
}

/// Runs the four-stage filter pipeline against a spot price.
pub fn filter_quotes(quotes: &[MarketQuote], spot: f64) -> FilteredQuoteSet {
    let mut survivors: Vec<MarketQuote> = quotes.to_vec();

    let before = survivors.len();
    survivors.retain(MarketQuote::has_valid_prices);
    let dropped_invalid_prices = before - survivors.len();
    tracing::debug!(
        dropped = dropped_invalid_prices,
        remaining = survivors.len(),
        "validity filter"
    );

    let min_strike = spot * (1.0 - MONEYNESS_BAND);
    let max_strike = spot * (1.0 + MONEYNESS_BAND);
    let before = survivors.len();
    survivors.retain(|quote| quote.strike >= min_strike && quote.strike <= max_strike);
    let dropped_moneyness = before - survivors.len();
    tracing::debug!(
        dropped = dropped_moneyness,
        remaining = survivors.len(),
        "moneyness filter"
    );

    let before = survivors.len();
    survivors.retain(|quote| quote.relative_spread() <= MAX_RELATIVE_SPREAD);
    let dropped_wide_spread = before - survivors.len();
    tracing::debug!(
        dropped = dropped_wide_spread,
        remaining = survivors.len(),
        "spread filter"
    );

    let before = survivors.len();
    survivors.retain(MarketQuote::is_traded);
    let dropped_illiquid = before - survivors.len();
    tracing::debug!(
        dropped = dropped_illiquid,
        remaining = survivors.len(),
        "liquidity filter"
    );

    FilteredQuoteSet {
        quotes: survivors,
        dropped_invalid_prices,
        dropped_moneyness,
        dropped_wide_spread,
        dropped_illiquid,
    }
}
