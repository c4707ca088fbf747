//! RPC error types and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fundpool_ledger::LedgerError;
use thiserror::Error;

use crate::handlers::ErrorResponse;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("server error: {0}")]
    Server(String),
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let status = match &self {
            RpcError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            RpcError::NotFound(_) => StatusCode::NOT_FOUND,
            RpcError::Ledger(e) => match e {
                LedgerError::NotAuthorized(_) => StatusCode::FORBIDDEN,
                LedgerError::InsufficientContribution { .. }
                | LedgerError::ZeroContribution
                | LedgerError::Overflow => StatusCode::UNPROCESSABLE_ENTITY,
                LedgerError::PriceSource(_) | LedgerError::TransferFailed(_) => {
                    StatusCode::BAD_GATEWAY
                }
            },
            RpcError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
