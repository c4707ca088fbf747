//! Ledger error types.

use crate::settlement::SettlementError;
use fundpool_oracle::OracleError;
use fundpool_types::{AccountAddress, UsdValue};
use thiserror::Error;

/// Errors from ledger operations.
///
/// Every variant is a rejected operation that leaves ledger state unchanged;
/// `TransferFailed` achieves that by rolling the withdrawal back in full.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("contribution worth {value} is below the {minimum} minimum")]
    InsufficientContribution { value: UsdValue, minimum: UsdValue },

    #[error("caller {0} is not the ledger owner")]
    NotAuthorized(AccountAddress),

    #[error("price lookup failed: {0}")]
    PriceSource(#[from] OracleError),

    #[error("settlement transfer failed: {0}")]
    TransferFailed(SettlementError),

    #[error("contribution amount must be greater than zero")]
    ZeroContribution,

    #[error("arithmetic overflow updating ledger state")]
    Overflow,
}
