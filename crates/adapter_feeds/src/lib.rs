//! # Adapter Feeds (A: Market-Data Boundary)
//!
//! Types and traits at the boundary with the market-data collaborator.
//! Live quote retrieval is not implemented here; this crate defines what
//! the pricing core consumes (quotes, chains, spot prices, risk-free
//! rates, expiration lists) plus a deterministic in-memory source for
//! tests and in-process use.
//!
//! Failures are surfaced as explicit [`FeedError`] values with
//! human-readable messages; data is never fabricated, with one documented
//! exception: the risk-free proxy feed may fall back to
//! [`DEFAULT_RISK_FREE_RATE`] via
//! [`risk_free_rate_or_default`](source::risk_free_rate_or_default).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod error;
pub mod quotes;
pub mod source;

pub use error::FeedError;
pub use quotes::{MarketQuote, OptionChain};
pub use source::{
    risk_free_rate_or_default, select_expiration, MarketDataSource, StaticDataSource,
    DEFAULT_RISK_FREE_RATE,
};
