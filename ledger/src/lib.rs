//! Access-controlled pooled-funds ledger.
//!
//! [`FundingLedger`] pools native-currency contributions gated by a
//! USD-denominated minimum and lets only its owner drain the pool. The price
//! reference and the transfer rail are injected collaborators
//! ([`fundpool_oracle::PriceSource`], [`Settlement`]).

pub mod error;
pub mod ledger;
pub mod settlement;

pub use error::LedgerError;
pub use ledger::FundingLedger;
pub use settlement::{JournalSettlement, PayoutReceipt, Settlement, SettlementError};
