//! RPC request and response types.
//!
//! Amounts travel as decimal strings — u128 raw values do not fit in JSON
//! numbers.

use serde::{Deserialize, Serialize};

// ── Contribute ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ContributeRequest {
    pub caller: String,
    /// Raw native amount (18 decimals), as a decimal string.
    pub amount: String,
}

#[derive(Serialize)]
pub struct ContributeResponse {
    /// USD value of the accepted contribution, raw (18 decimals).
    pub usd_value: String,
    pub balance: String,
    pub epoch: u64,
}

// ── Withdraw ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct WithdrawRequest {
    pub caller: String,
    /// Use the buffered clearing algorithm instead of the walking one.
    #[serde(default)]
    pub buffered: bool,
}

#[derive(Serialize)]
pub struct WithdrawResponse {
    pub payout: String,
    pub epoch: u64,
}

// ── Read accessors ───────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct BalanceResponse {
    pub balance: String,
    pub funder_count: usize,
    pub epoch: u64,
}

#[derive(Serialize)]
pub struct OwnerResponse {
    pub owner: String,
}

#[derive(Serialize)]
pub struct MinimumResponse {
    /// Minimum accepted USD value, raw (18 decimals).
    pub minimum_usd: String,
}

#[derive(Serialize)]
pub struct PriceResponse {
    /// Latest price scaled by `10^decimals`, as a decimal string.
    pub price: String,
    pub decimals: u32,
    pub source: String,
}

#[derive(Serialize)]
pub struct FunderResponse {
    pub index: usize,
    pub address: String,
}

#[derive(Serialize)]
pub struct ContributionResponse {
    pub address: String,
    /// Raw native amount; "0" for addresses with no record.
    pub amount: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub epoch: u64,
}

// ── Errors ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
