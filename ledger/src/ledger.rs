//! The funding ledger — pooled contributions gated by a USD minimum, drained
//! only by the owner.

use crate::error::LedgerError;
use crate::settlement::Settlement;
use fundpool_oracle::{native_to_usd, OracleError, PriceQuote, PriceSource};
use fundpool_types::{AccountAddress, NativeAmount, UsdValue};
use std::collections::HashMap;

/// Default contribution minimum in whole USD.
const DEFAULT_MINIMUM_USD: u128 = 50;

/// Snapshot of the mutable ledger state, taken at the top of a withdrawal so
/// a failed settlement transfer can be undone in full.
struct Checkpoint {
    contributions: HashMap<AccountAddress, NativeAmount>,
    funders: Vec<AccountAddress>,
    balance: NativeAmount,
    epoch: u64,
}

/// Pooled-funds ledger.
///
/// Contributions are accepted when their USD value, computed from a fresh
/// price reading, meets the minimum. Only the owner fixed at construction can
/// drain the pool. The ledger is a serialized state machine: callers must
/// hold exclusive access (`&mut self`) across each whole operation, external
/// transfer included.
pub struct FundingLedger {
    owner: AccountAddress,
    minimum_usd: UsdValue,
    contributions: HashMap<AccountAddress, NativeAmount>,
    /// One slot per accepted contribution, insertion order. Iterated during
    /// withdrawal, cleared by it.
    funders: Vec<AccountAddress>,
    balance: NativeAmount,
    /// Completed funding/withdrawal cycles.
    epoch: u64,
    price_source: Box<dyn PriceSource>,
    settlement: Box<dyn Settlement>,
}

impl FundingLedger {
    /// Create a ledger with the default 50 USD minimum.
    pub fn new(
        owner: AccountAddress,
        price_source: Box<dyn PriceSource>,
        settlement: Box<dyn Settlement>,
    ) -> Self {
        Self::with_minimum(
            owner,
            UsdValue::from_usd(DEFAULT_MINIMUM_USD),
            price_source,
            settlement,
        )
    }

    /// Create a ledger with an explicit contribution minimum.
    pub fn with_minimum(
        owner: AccountAddress,
        minimum_usd: UsdValue,
        price_source: Box<dyn PriceSource>,
        settlement: Box<dyn Settlement>,
    ) -> Self {
        Self {
            owner,
            minimum_usd,
            contributions: HashMap::new(),
            funders: Vec::new(),
            balance: NativeAmount::ZERO,
            epoch: 0,
            price_source,
            settlement,
        }
    }

    /// Accept a contribution from `caller`.
    ///
    /// The amount's USD value is computed from a fresh price reading; values
    /// below the minimum are rejected. On success all three mutations —
    /// contributor record, funder slot, balance — commit as a unit. Returns
    /// the converted USD value.
    pub fn contribute(
        &mut self,
        caller: &AccountAddress,
        amount: NativeAmount,
    ) -> Result<UsdValue, LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::ZeroContribution);
        }
        let quote = self.price_source.latest_price()?;
        let value = native_to_usd(amount, &quote)?;
        if value < self.minimum_usd {
            return Err(LedgerError::InsufficientContribution {
                value,
                minimum: self.minimum_usd,
            });
        }

        // Compute every new value before writing any, so a failed checked
        // add leaves the ledger untouched.
        let total = self
            .contribution_of(caller)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let balance = self
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        self.contributions.insert(caller.clone(), total);
        self.funders.push(caller.clone());
        self.balance = balance;
        tracing::debug!(%caller, %amount, %value, "contribution accepted");
        Ok(value)
    }

    /// Drain the pool to the owner, walking the live funder sequence.
    ///
    /// Clears each contributor record one entry at a time directly against
    /// ledger state, then clears the sequence, then zeroes the balance —
    /// all before the external transfer. Returns the payout amount.
    pub fn withdraw(&mut self, caller: &AccountAddress) -> Result<NativeAmount, LedgerError> {
        self.ensure_owner(caller)?;
        let checkpoint = self.checkpoint();

        for i in 0..self.funders.len() {
            let funder = self.funders[i].clone();
            self.contributions.remove(&funder);
        }
        debug_assert!(self.contributions.is_empty());
        self.funders.clear();
        let payout = self.balance;
        self.balance = NativeAmount::ZERO;
        self.epoch += 1;

        self.settle(payout, checkpoint)
    }

    /// Drain the pool to the owner, iterating a transient copy of the
    /// funder sequence.
    ///
    /// Observably identical to [`FundingLedger::withdraw`]; the sequence is
    /// moved out of ledger state in one operation and the copy is iterated
    /// instead of the live sequence.
    pub fn withdraw_buffered(
        &mut self,
        caller: &AccountAddress,
    ) -> Result<NativeAmount, LedgerError> {
        self.ensure_owner(caller)?;
        let checkpoint = self.checkpoint();

        let funders = std::mem::take(&mut self.funders);
        for funder in &funders {
            self.contributions.remove(funder);
        }
        debug_assert!(self.contributions.is_empty());
        let payout = self.balance;
        self.balance = NativeAmount::ZERO;
        self.epoch += 1;

        self.settle(payout, checkpoint)
    }

    /// Phase 2 of a withdrawal: the external transfer comes last, and
    /// nothing here touches internal state except to roll back a failure.
    fn settle(
        &mut self,
        payout: NativeAmount,
        checkpoint: Checkpoint,
    ) -> Result<NativeAmount, LedgerError> {
        match self.settlement.transfer(&self.owner, payout) {
            Ok(()) => {
                tracing::info!(owner = %self.owner, %payout, epoch = self.epoch, "pool drained");
                Ok(payout)
            }
            Err(e) => {
                tracing::warn!(error = %e, "transfer failed, restoring ledger state");
                self.restore(checkpoint);
                Err(LedgerError::TransferFailed(e))
            }
        }
    }

    // ── Read accessors ───────────────────────────────────────────────────

    pub fn owner(&self) -> &AccountAddress {
        &self.owner
    }

    /// Whether `caller` is the ledger owner.
    pub fn is_owner(&self, caller: &AccountAddress) -> bool {
        *caller == self.owner
    }

    pub fn minimum_usd(&self) -> UsdValue {
        self.minimum_usd
    }

    pub fn balance(&self) -> NativeAmount {
        self.balance
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Accumulated contribution for an address; zero if it never contributed
    /// in the current epoch.
    pub fn contribution_of(&self, address: &AccountAddress) -> NativeAmount {
        self.contributions
            .get(address)
            .copied()
            .unwrap_or(NativeAmount::ZERO)
    }

    /// Funder at a position in the sequence, if any.
    pub fn funder_at(&self, index: usize) -> Option<&AccountAddress> {
        self.funders.get(index)
    }

    /// Number of slots in the funder sequence (one per accepted
    /// contribution, so an address can occupy several).
    pub fn funder_count(&self) -> usize {
        self.funders.len()
    }

    /// Identifier of the price source bound at construction.
    pub fn price_source_name(&self) -> &str {
        self.price_source.name()
    }

    /// A fresh reading from the bound price source.
    pub fn latest_quote(&self) -> Result<PriceQuote, OracleError> {
        self.price_source.latest_price()
    }

    // ── Internals ────────────────────────────────────────────────────────

    fn ensure_owner(&self, caller: &AccountAddress) -> Result<(), LedgerError> {
        if !self.is_owner(caller) {
            return Err(LedgerError::NotAuthorized(caller.clone()));
        }
        Ok(())
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            contributions: self.contributions.clone(),
            funders: self.funders.clone(),
            balance: self.balance,
            epoch: self.epoch,
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.contributions = checkpoint.contributions;
        self.funders = checkpoint.funders;
        self.balance = checkpoint.balance;
        self.epoch = checkpoint.epoch;
    }
}
