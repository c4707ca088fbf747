//! HTTP client for fetching price readings from a feed relay.

use crate::{OracleError, PriceQuote, PriceSource};
use serde::Deserialize;
use std::time::Duration;

/// Default request timeout — the lookup has a bounded-latency contract.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Wire format served by a feed relay at `GET {base}/price/latest`.
#[derive(Debug, Clone, Deserialize)]
struct FeedResponse {
    /// Price of one whole native unit in USD, scaled by `10^decimals`.
    price: i64,
    /// Decimal precision of `price`.
    decimals: u32,
}

/// HTTP-backed price source.
///
/// Every [`PriceSource::latest_price`] call performs a fresh fetch; quotes
/// are never cached, so a stale price can only be as old as the relay's own
/// reading. Requests carry a hard timeout.
pub struct HttpPriceFeed {
    /// Base URL of the feed relay.
    base_url: String,
    /// Reusable HTTP client.
    client: reqwest::blocking::Client,
}

impl HttpPriceFeed {
    /// Create a feed client with the default request timeout.
    pub fn new(base_url: &str) -> Result<Self, OracleError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a feed client with an explicit request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, OracleError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OracleError::Unavailable(format!("http client: {e}")))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// The relay URL this client fetches from.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn latest_url(&self) -> String {
        format!("{}/price/latest", self.base_url)
    }

    /// Fetch the latest quote from the relay.
    pub fn fetch_latest(&self) -> Result<PriceQuote, OracleError> {
        let url = self.latest_url();
        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| OracleError::Unavailable(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(OracleError::Unavailable(format!(
                "HTTP {} from {}",
                resp.status(),
                url
            )));
        }

        let body: FeedResponse = resp
            .json()
            .map_err(|e| OracleError::Unavailable(e.to_string()))?;

        tracing::debug!(price = body.price, decimals = body.decimals, "fetched quote");
        Ok(PriceQuote {
            price: body.price.into(),
            decimals: body.decimals,
        })
    }
}

impl PriceSource for HttpPriceFeed {
    fn latest_price(&self) -> Result<PriceQuote, OracleError> {
        self.fetch_latest()
    }

    fn name(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash() {
        let feed = HttpPriceFeed::new("http://feed.example/").unwrap();
        assert_eq!(feed.base_url(), "http://feed.example");
        assert_eq!(feed.latest_url(), "http://feed.example/price/latest");
    }

    #[test]
    fn deserializes_feed_response() {
        let json = r#"{"price":200000000000,"decimals":8}"#;
        let body: FeedResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.price, 2000_00000000);
        assert_eq!(body.decimals, 8);
    }

    #[test]
    fn rejects_response_missing_fields() {
        let json = r#"{"price":200000000000}"#;
        assert!(serde_json::from_str::<FeedResponse>(json).is_err());
    }

    #[test]
    fn silent_relay_times_out_as_unavailable() {
        // A listener that accepts connections but never answers.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let feed = HttpPriceFeed::with_timeout(
            &format!("http://{addr}"),
            Duration::from_millis(200),
        )
        .unwrap();
        let err = feed.fetch_latest().unwrap_err();
        assert!(matches!(err, OracleError::Unavailable(_)));
    }
}
