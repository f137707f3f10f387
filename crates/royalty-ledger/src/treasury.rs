//! Outbound value transfer.
//!
//! The ledger never moves value itself. Payee pushes and fan claims go
//! through a [`Treasury`], which the host implements on top of whatever
//! actually holds the funds. The ledger borrows the treasury mutably for the
//! duration of a single operation only, so a treasury cannot call back into
//! the ledger while a transfer is in flight.

use std::collections::{BTreeMap, BTreeSet};

use royalty_types::{Amount, Identity};

/// A transfer the treasury could not complete.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
#[error("{reason}")]
pub struct TransferError {
    /// Why the recipient could not be paid.
    pub reason: String,
}

impl TransferError {
    /// Build a transfer error from any message.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Sends value out of the ledger's holdings.
pub trait Treasury {
    /// Deliver `amount` to `to`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransferError`] if the recipient cannot accept funds.
    /// The ledger treats a failed transfer as never having happened.
    fn pay(&mut self, to: &Identity, amount: Amount) -> Result<(), TransferError>;
}

/// Treasury that credits recipient balances in memory.
///
/// Recipients registered with [`reject`](Self::reject) refuse every
/// transfer, standing in for accounts that cannot receive funds.
#[derive(Clone, Debug, Default)]
pub struct InMemoryTreasury {
    balances: BTreeMap<Identity, Amount>,
    rejecting: BTreeSet<Identity>,
    transfers: usize,
}

impl InMemoryTreasury {
    /// Create an empty treasury.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every future transfer to `recipient` fail.
    pub fn reject(&mut self, recipient: Identity) {
        self.rejecting.insert(recipient);
    }

    /// Let `recipient` receive transfers again.
    pub fn accept(&mut self, recipient: &Identity) {
        self.rejecting.remove(recipient);
    }

    /// Total received by `recipient`.
    pub fn balance_of(&self, recipient: &Identity) -> Amount {
        self.balances.get(recipient).copied().unwrap_or(0)
    }

    /// Sum of everything paid out.
    pub fn total_paid(&self) -> Amount {
        self.balances.values().sum()
    }

    /// Number of successful transfers.
    pub fn transfer_count(&self) -> usize {
        self.transfers
    }
}

impl Treasury for InMemoryTreasury {
    fn pay(&mut self, to: &Identity, amount: Amount) -> Result<(), TransferError> {
        if self.rejecting.contains(to) {
            return Err(TransferError::new(format!("recipient {to} rejects transfers")));
        }
        let balance = self.balances.entry(*to).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or_else(|| TransferError::new("recipient balance overflow"))?;
        self.transfers += 1;
        Ok(())
    }
}
