//! Price reference source and USD conversion for the fundpool ledger.
//!
//! The ledger gates contributions on a USD-denominated minimum, so it needs a
//! reading of the native-currency price. This crate defines the reading
//! ([`PriceQuote`]), the source abstraction ([`PriceSource`]), the pure
//! conversion function ([`native_to_usd`]), and an HTTP-backed production
//! source ([`HttpPriceFeed`]).

pub mod convert;
pub mod error;
pub mod feed;

pub use convert::native_to_usd;
pub use error::OracleError;
pub use feed::HttpPriceFeed;

use serde::{Deserialize, Serialize};

/// The latest reading from a price source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Price of one whole native unit in USD, scaled by `10^decimals`.
    /// Signed because sources report signed integers; non-positive readings
    /// are rejected at conversion time.
    pub price: i128,
    /// Decimal precision the price is scaled by.
    pub decimals: u32,
}

impl PriceQuote {
    pub fn is_positive(&self) -> bool {
        self.price > 0
    }
}

/// A source of USD price readings for the native currency.
///
/// Sources are treated as untrusted and unreliable: callers re-query on every
/// conversion instead of caching a reading, and every failure is surfaced as
/// an [`OracleError`] — never as a silent zero.
pub trait PriceSource: Send + Sync {
    /// Fetch the latest price reading.
    fn latest_price(&self) -> Result<PriceQuote, OracleError>;

    /// Identifier for the source, exposed through the read accessors.
    fn name(&self) -> &str;
}
