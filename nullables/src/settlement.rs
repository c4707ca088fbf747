//! Nullable settlement rail — records transfers, fails on demand.

use fundpool_ledger::{PayoutReceipt, Settlement, SettlementError};
use fundpool_types::{AccountAddress, NativeAmount};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// A deterministic settlement rail for testing.
///
/// Records every transfer it is asked to perform. Can be switched into a
/// rejecting state to exercise transfer-failure rollback paths.
#[derive(Default)]
pub struct NullSettlement {
    transfers: Mutex<Vec<PayoutReceipt>>,
    rejecting: AtomicBool,
}

impl NullSettlement {
    pub fn new() -> Self {
        Self::default()
    }

    /// A rail that rejects every transfer.
    pub fn rejecting() -> Self {
        let rail = Self::default();
        rail.rejecting.store(true, Ordering::SeqCst);
        rail
    }

    /// Make subsequent transfers fail (or succeed again).
    pub fn set_rejecting(&self, rejecting: bool) {
        self.rejecting.store(rejecting, Ordering::SeqCst);
    }

    /// All transfers performed so far, oldest first.
    pub fn transfers(&self) -> Vec<PayoutReceipt> {
        self.transfers.lock().expect("null settlement lock").clone()
    }
}

impl Settlement for NullSettlement {
    fn transfer(
        &self,
        recipient: &AccountAddress,
        amount: NativeAmount,
    ) -> Result<(), SettlementError> {
        if self.rejecting.load(Ordering::SeqCst) {
            return Err(SettlementError::Rejected(recipient.clone()));
        }
        self.transfers
            .lock()
            .expect("null settlement lock")
            .push(PayoutReceipt {
                recipient: recipient.clone(),
                amount,
            });
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
    fn records_transfers() {
        let rail = NullSettlement::new();
        rail.transfer(&addr(1), NativeAmount::new(7)).unwrap();
        let transfers = rail.transfers();
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].amount, NativeAmount::new(7));
    }

    #[test]
    fn rejecting_rail_fails_and_records_nothing() {
        let rail = NullSettlement::rejecting();
        let err = rail.transfer(&addr(1), NativeAmount::new(7)).unwrap_err();
        assert!(matches!(err, SettlementError::Rejected(_)));
        assert!(rail.transfers().is_empty());
    }

    #[test]
    fn rejection_can_be_toggled() {
        let rail = NullSettlement::new();
        rail.set_rejecting(true);
        assert!(rail.transfer(&addr(1), NativeAmount::new(1)).is_err());
        rail.set_rejecting(false);
        assert!(rail.transfer(&addr(1), NativeAmount::new(1)).is_ok());
    }
}
