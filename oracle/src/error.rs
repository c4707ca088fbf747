//! Oracle error types.

use thiserror::Error;

/// Errors from the price source or the conversion arithmetic.
///
/// Every variant means the caller's operation must be rejected — a failed
/// lookup is never reported as a zero price.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("price source unreachable: {0}")]
    Unavailable(String),

    #[error("price source returned a non-positive price: {0}")]
    InvalidPrice(i128),

    #[error("price source declared an unusable decimal precision: {0}")]
    InvalidDecimals(u32),

    #[error("price conversion overflow")]
    Overflow,
}
