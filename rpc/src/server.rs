//! Axum-based RPC server.
//!
//! The ledger is a serialized state machine: a single mutex guards it and is
//! held for the whole of each operation — validation, mutation, and the
//! external transfer — so mutating calls apply one at a time in arrival
//! order. Operations run on the blocking pool because the price lookup is a
//! bounded blocking call.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;

use fundpool_ledger::{FundingLedger, JournalSettlement, LedgerError};
use fundpool_oracle::HttpPriceFeed;
use fundpool_types::{AccountAddress, NativeAmount, UsdValue};

use crate::config::ServiceConfig;
use crate::error::RpcError;
use crate::handlers::{
    BalanceResponse, ContributeRequest, ContributeResponse, ContributionResponse, FunderResponse,
    HealthResponse, MinimumResponse, OwnerResponse, PriceResponse, WithdrawRequest,
    WithdrawResponse,
};

/// Shared server state.
pub struct AppState {
    ledger: Mutex<FundingLedger>,
}

impl AppState {
    pub fn new(ledger: FundingLedger) -> Self {
        Self {
            ledger: Mutex::new(ledger),
        }
    }
}

/// Build the ledger described by a service config: HTTP price feed,
/// journaling settlement rail.
pub fn build_ledger(config: &ServiceConfig) -> Result<FundingLedger, RpcError> {
    let owner = AccountAddress::parse(&config.owner)
        .map_err(|e| RpcError::Server(format!("config owner: {e}")))?;
    let feed = HttpPriceFeed::with_timeout(
        &config.feed_url,
        Duration::from_secs(config.feed_timeout_secs),
    )
    .map_err(|e| RpcError::Server(e.to_string()))?;
    Ok(FundingLedger::with_minimum(
        owner,
        UsdValue::from_usd(config.minimum_usd.into()),
        Box::new(feed),
        Box::new(JournalSettlement::new()),
    ))
}

/// Assemble the public routes over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/contribute", post(contribute))
        .route("/withdraw", post(withdraw))
        .route("/balance", get(balance))
        .route("/owner", get(owner))
        .route("/minimum", get(minimum))
        .route("/price", get(price))
        .route("/funders/:index", get(funder))
        .route("/contributions/:address", get(contribution))
        .route("/health", get(health))
        .with_state(state)
}

/// Bind and serve until the task is cancelled.
pub async fn serve(config: &ServiceConfig, ledger: FundingLedger) -> Result<(), RpcError> {
    let state = Arc::new(AppState::new(ledger));
    let mut app = router(state);
    if config.enable_cors {
        app = app.layer(CorsLayer::permissive());
    }
    let addr = format!("0.0.0.0:{}", config.listen_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| RpcError::Server(e.to_string()))?;
    tracing::info!(%addr, "RPC server listening");
    axum::serve(listener, app)
        .await
        .map_err(|e| RpcError::Server(e.to_string()))
}

/// Run a closure against the ledger on the blocking pool, holding the lock
/// for the closure's full duration.
async fn with_ledger<T, F>(state: Arc<AppState>, op: F) -> Result<T, RpcError>
where
    T: Send + 'static,
    F: FnOnce(&mut FundingLedger) -> Result<T, RpcError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut ledger = state
            .ledger
            .lock()
            .map_err(|_| RpcError::Server("ledger lock poisoned".into()))?;
        op(&mut ledger)
    })
    .await
    .map_err(|e| RpcError::Server(e.to_string()))?
}

fn parse_address(raw: &str) -> Result<AccountAddress, RpcError> {
    AccountAddress::parse(raw).map_err(|e| RpcError::InvalidRequest(e.to_string()))
}

fn parse_amount(raw: &str) -> Result<NativeAmount, RpcError> {
    raw.parse::<u128>()
        .map(NativeAmount::new)
        .map_err(|_| RpcError::InvalidRequest(format!("invalid amount: {raw:?}")))
}

// ── Handlers ─────────────────────────────────────────────────────────────

async fn contribute(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ContributeRequest>,
) -> Result<Json<ContributeResponse>, RpcError> {
    let caller = parse_address(&req.caller)?;
    let amount = parse_amount(&req.amount)?;
    let response = with_ledger(state, move |ledger| {
        let usd_value = ledger.contribute(&caller, amount)?;
        Ok(ContributeResponse {
            usd_value: usd_value.raw().to_string(),
            balance: ledger.balance().raw().to_string(),
            epoch: ledger.epoch(),
        })
    })
    .await?;
    Ok(Json(response))
}

async fn withdraw(
    State(state): State<Arc<AppState>>,
    Json(req): Json<WithdrawRequest>,
) -> Result<Json<WithdrawResponse>, RpcError> {
    let caller = parse_address(&req.caller)?;
    let buffered = req.buffered;
    let response = with_ledger(state, move |ledger| {
        let payout = if buffered {
            ledger.withdraw_buffered(&caller)?
        } else {
            ledger.withdraw(&caller)?
        };
        Ok(WithdrawResponse {
            payout: payout.raw().to_string(),
            epoch: ledger.epoch(),
        })
    })
    .await?;
    Ok(Json(response))
}

async fn balance(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BalanceResponse>, RpcError> {
    let response = with_ledger(state, |ledger| {
        Ok(BalanceResponse {
            balance: ledger.balance().raw().to_string(),
            funder_count: ledger.funder_count(),
            epoch: ledger.epoch(),
        })
    })
    .await?;
    Ok(Json(response))
}

async fn owner(State(state): State<Arc<AppState>>) -> Result<Json<OwnerResponse>, RpcError> {
    let response = with_ledger(state, |ledger| {
        Ok(OwnerResponse {
            owner: ledger.owner().to_string(),
        })
    })
    .await?;
    Ok(Json(response))
}

async fn minimum(State(state): State<Arc<AppState>>) -> Result<Json<MinimumResponse>, RpcError> {
    let response = with_ledger(state, |ledger| {
        Ok(MinimumResponse {
            minimum_usd: ledger.minimum_usd().raw().to_string(),
        })
    })
    .await?;
    Ok(Json(response))
}

async fn price(State(state): State<Arc<AppState>>) -> Result<Json<PriceResponse>, RpcError> {
    let response = with_ledger(state, |ledger| {
        let quote = ledger.latest_quote().map_err(LedgerError::from)?;
        Ok(PriceResponse {
            price: quote.price.to_string(),
            decimals: quote.decimals,
            source: ledger.price_source_name().to_string(),
        })
    })
    .await?;
    Ok(Json(response))
}

async fn funder(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Json<FunderResponse>, RpcError> {
    let response = with_ledger(state, move |ledger| {
        let address = ledger
            .funder_at(index)
            .ok_or_else(|| RpcError::NotFound(format!("no funder at index {index}")))?;
        Ok(FunderResponse {
            index,
            address: address.to_string(),
        })
    })
    .await?;
    Ok(Json(response))
}

async fn contribution(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> Result<Json<ContributionResponse>, RpcError> {
    let address = parse_address(&address)?;
    let response = with_ledger(state, move |ledger| {
        Ok(ContributionResponse {
            address: address.to_string(),
            amount: ledger.contribution_of(&address).raw().to_string(),
        })
    })
    .await?;
    Ok(Json(response))
}

async fn health(State(state): State<Arc<AppState>>) -> Result<Json<HealthResponse>, RpcError> {
    let response = with_ledger(state, |ledger| {
        Ok(HealthResponse {
            status: "ok".to_string(),
            epoch: ledger.epoch(),
        })
    })
    .await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_amount_accepts_decimal_strings() {
        assert_eq!(
            parse_amount("1000000000000000000").unwrap(),
            NativeAmount::from_native(1)
        );
    }

    #[test]
    fn parse_amount_rejects_garbage() {
        assert!(parse_amount("1.5").is_err());
        assert!(parse_amount("-3").is_err());
        assert!(parse_amount("").is_err());
    }

    #[test]
    fn parse_address_rejects_garbage() {
        assert!(parse_address("0xnope").is_err());
    }
}
