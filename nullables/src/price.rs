//! Nullable price feed — deterministic quotes for testing.

use fundpool_oracle::{OracleError, PriceQuote, PriceSource};
use std::sync::Mutex;

/// A deterministic price feed for testing.
///
/// Serves a programmable quote; the reading only changes when you tell it
/// to, and it can be switched into a failing state to exercise
/// unavailable-source paths.
pub struct NullPriceFeed {
    quote: Mutex<Result<PriceQuote, String>>,
}

impl NullPriceFeed {
    /// A feed that always serves the given quote.
    pub fn fixed(price: i128, decimals: u32) -> Self {
        Self {
            quote: Mutex::new(Ok(PriceQuote { price, decimals })),
        }
    }

    /// A feed that fails every lookup.
    pub fn unavailable() -> Self {
        Self {
            quote: Mutex::new(Err("null feed set to unavailable".to_string())),
        }
    }

    /// Change the served quote.
    pub fn set_quote(&self, price: i128, decimals: u32) {
        *self.quote.lock().expect("null feed lock") = Ok(PriceQuote { price, decimals });
    }

    /// Make every subsequent lookup fail.
    pub fn set_unavailable(&self) {
        *self.quote.lock().expect("null feed lock") =
            Err("null feed set to unavailable".to_string());
    }
}

impl PriceSource for NullPriceFeed {
    fn latest_price(&self) -> Result<PriceQuote, OracleError> {
        self.quote
            .lock()
            .expect("null feed lock")
            .clone()
            .map_err(OracleError::Unavailable)
    }

    fn name(&self) -> &str {
        "null"
    }
}
