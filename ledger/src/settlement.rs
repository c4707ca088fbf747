//! Settlement seam — the external rail that moves native value out of the pool.

use fundpool_types::{AccountAddress, NativeAmount};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use thiserror::Error;

/// Errors from the settlement rail.
#[derive(Debug, Error)]
pub enum SettlementError {
    #[error("recipient {0} rejected the transfer")]
    Rejected(AccountAddress),

    #[error("settlement channel unavailable: {0}")]
    Unavailable(String),
}

/// The external transfer rail.
///
/// A transfer either fully succeeds or fully fails; it is never retried
/// automatically — retrying a value transfer without idempotency keys is
/// unsafe, so retry policy belongs to the operator, not the ledger.
pub trait Settlement: Send + Sync {
    /// Move `amount` of pooled native value to `recipient`.
    fn transfer(&self, recipient: &AccountAddress, amount: NativeAmount)
        -> Result<(), SettlementError>;
}

impl<T: Settlement> Settlement for std::sync::Arc<T> {
    fn transfer(
        &self,
        recipient: &AccountAddress,
        amount: NativeAmount,
    ) -> Result<(), SettlementError> {
        (**self).transfer(recipient, amount)
    }
}

/// Record of one completed payout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutReceipt {
    pub recipient: AccountAddress,
    pub amount: NativeAmount,
}

/// Settlement rail that journals every payout in memory and logs it.
///
/// The production default for a single-process deployment: the pool's value
/// accounting is the journal itself.
#[derive(Default)]
pub struct JournalSettlement {
    receipts: Mutex<Vec<PayoutReceipt>>,
}

impl JournalSettlement {
    pub fn new() -> Self {
        Self::default()
    }

    /// All payouts recorded so far, oldest first.
    pub fn receipts(&self) -> Vec<PayoutReceipt> {
        self.receipts.lock().expect("journal lock poisoned").clone()
    }
}

impl Settlement for JournalSettlement {
    fn transfer(
        &self,
        recipient: &AccountAddress,
        amount: NativeAmount,
    ) -> Result<(), SettlementError> {
        self.receipts
            .lock()
            .map_err(|_| SettlementError::Unavailable("journal lock poisoned".into()))?
            .push(PayoutReceipt {
                recipient: recipient.clone(),
                amount,
            });
        tracing::info!(%recipient, %amount, "payout settled");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> AccountAddress {
        AccountAddress::new(format!("0x{:0>40}", n))
    }

    #[test]
    fn journal_records_payouts_in_order() {
        let journal = JournalSettlement::new();
        journal.transfer(&addr(1), NativeAmount::new(100)).unwrap();
        journal.transfer(&addr(2), NativeAmount::new(200)).unwrap();

        let receipts = journal.receipts();
        assert_eq!(receipts.len(), 2);
        assert_eq!(receipts[0].recipient, addr(1));
        assert_eq!(receipts[0].amount, NativeAmount::new(100));
        assert_eq!(receipts[1].recipient, addr(2));
    }

    #[test]
    fn journal_accepts_zero_payout() {
        let journal = JournalSettlement::new();
        journal.transfer(&addr(1), NativeAmount::ZERO).unwrap();
        assert_eq!(journal.receipts().len(), 1);
    }
}
