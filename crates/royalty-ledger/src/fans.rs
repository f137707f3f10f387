//! Fan token balances and cumulative claims.
//!
//! Accounts are created on first mint and never removed. Total supply only
//! grows. `total_claimed` always equals the sum of every account's
//! `cumulative_claimed`.

use std::collections::BTreeMap;

use royalty_types::{Amount, FanTokens, Identity};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use crate::{LedgerError, Result};

/// A fan's mock-token holding and claim history.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FanAccount {
    /// Account address.
    pub identity: Identity,
    /// Mock fan tokens held.
    #[serde_as(as = "DisplayFromStr")]
    pub token_balance: FanTokens,
    /// Total amount ever paid to this fan from the pool.
    #[serde_as(as = "DisplayFromStr")]
    pub cumulative_claimed: Amount,
}

/// Identity-keyed fan accounts plus supply and claim totals.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FanShareLedger {
    accounts: BTreeMap<Identity, FanAccount>,
    total_supply: FanTokens,
    total_claimed: Amount,
}

impl FanShareLedger {
    /// Create an empty fan ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from stored accounts, recomputing both totals.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidSnapshot`] if an identity repeats
    /// - [`LedgerError::Overflow`] if a total overflows
    pub fn from_accounts(accounts: Vec<FanAccount>) -> Result<Self> {
        let mut ledger = Self::new();
        for account in accounts {
            ledger.total_supply = ledger
                .total_supply
                .checked_add(account.token_balance)
                .ok_or(LedgerError::Overflow("fan total supply"))?;
            ledger.total_claimed = ledger
                .total_claimed
                .checked_add(account.cumulative_claimed)
                .ok_or(LedgerError::Overflow("fan total claimed"))?;
            if let Some(previous) = ledger.accounts.insert(account.identity, account) {
                return Err(LedgerError::InvalidSnapshot(format!(
                    "fan {} appears more than once",
                    previous.identity
                )));
            }
        }
        Ok(ledger)
    }

    /// Credit `amount` tokens to `fan`, creating the account if needed.
    ///
    /// Returns the new total supply. Nothing changes on error.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::ZeroAmount`] if `amount` is zero
    /// - [`LedgerError::Overflow`] if the balance or supply overflows
    pub fn mint(&mut self, fan: Identity, amount: FanTokens) -> Result<FanTokens> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow("fan total supply"))?;
        let new_balance = self
            .balance_of(&fan)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow("fan token balance"))?;

        self.accounts
            .entry(fan)
            .or_insert_with(|| FanAccount {
                identity: fan,
                token_balance: 0,
                cumulative_claimed: 0,
            })
            .token_balance = new_balance;
        self.total_supply = new_supply;
        Ok(new_supply)
    }

    /// Add `amount` to a fan's cumulative claim. Returns the new cumulative
    /// figure.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Overflow`] if a counter overflows
    pub fn record_claim(&mut self, fan: &Identity, amount: Amount) -> Result<Amount> {
        let new_total = self
            .total_claimed
            .checked_add(amount)
            .ok_or(LedgerError::Overflow("fan total claimed"))?;
        let account = self.accounts.entry(*fan).or_insert_with(|| FanAccount {
            identity: *fan,
            token_balance: 0,
            cumulative_claimed: 0,
        });
        let cumulative = account
            .cumulative_claimed
            .checked_add(amount)
            .ok_or(LedgerError::Overflow("fan cumulative claimed"))?;
        account.cumulative_claimed = cumulative;
        self.total_claimed = new_total;
        Ok(cumulative)
    }

    /// Undo a [`record_claim`](Self::record_claim) of the same amount.
    pub fn revert_claim(&mut self, fan: &Identity, amount: Amount) {
        if let Some(account) = self.accounts.get_mut(fan) {
            account.cumulative_claimed = account.cumulative_claimed.saturating_sub(amount);
            self.total_claimed = self.total_claimed.saturating_sub(amount);
        }
    }

    /// Token balance of `fan` (0 if unknown).
    pub fn balance_of(&self, fan: &Identity) -> FanTokens {
        self.accounts.get(fan).map_or(0, |a| a.token_balance)
    }

    /// Cumulative amount claimed by `fan` (0 if unknown).
    pub fn claimed_of(&self, fan: &Identity) -> Amount {
        self.accounts.get(fan).map_or(0, |a| a.cumulative_claimed)
    }

    /// The account for `fan`, if it was ever minted to.
    pub fn account(&self, fan: &Identity) -> Option<&FanAccount> {
        self.accounts.get(fan)
    }

    /// All accounts ordered by identity.
    pub fn accounts(&self) -> impl Iterator<Item = &FanAccount> {
        self.accounts.values()
    }

    /// Total mock tokens ever minted.
    pub fn total_supply(&self) -> FanTokens {
        self.total_supply
    }

    /// Sum of all fans' cumulative claims.
    pub fn total_claimed(&self) -> Amount {
        self.total_claimed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_creates_account_and_grows_supply() {
        let mut fans = FanShareLedger::new();
        let fan1 = Identity::from_label("fan1");
        let fan2 = Identity::from_label("fan2");

        assert_eq!(fans.mint(fan1, 1000).expect("mint"), 1000);
        assert_eq!(fans.mint(fan2, 500).expect("mint"), 1500);
        assert_eq!(fans.mint(fan1, 250).expect("mint"), 1750);

        assert_eq!(fans.balance_of(&fan1), 1250);
        assert_eq!(fans.balance_of(&fan2), 500);
        assert_eq!(fans.total_supply(), 1750);
        assert_eq!(fans.accounts().count(), 2);
    }

    #[test]
    fn test_mint_zero_rejected() {
        let mut fans = FanShareLedger::new();
        let fan = Identity::from_label("fan");
        assert_eq!(fans.mint(fan, 0), Err(LedgerError::ZeroAmount));
        assert!(fans.account(&fan).is_none());
        assert_eq!(fans.total_supply(), 0);
    }

    #[test]
    fn test_mint_overflow_leaves_state_untouched() {
        let mut fans = FanShareLedger::new();
        let fan = Identity::from_label("fan");
        fans.mint(fan, u128::MAX).expect("mint");
        assert!(matches!(
            fans.mint(Identity::from_label("other"), 1),
            Err(LedgerError::Overflow(_))
        ));
        assert_eq!(fans.total_supply(), u128::MAX);
        assert!(fans.account(&Identity::from_label("other")).is_none());
    }

    #[test]
    fn test_unknown_fan_reads_zero() {
        let fans = FanShareLedger::new();
        let fan = Identity::from_label("nobody");
        assert_eq!(fans.balance_of(&fan), 0);
        assert_eq!(fans.claimed_of(&fan), 0);
    }

    #[test]
    fn test_record_and_revert_claim() {
        let mut fans = FanShareLedger::new();
        let fan = Identity::from_label("fan");
        fans.mint(fan, 10).expect("mint");

        assert_eq!(fans.record_claim(&fan, 40).expect("record"), 40);
        assert_eq!(fans.record_claim(&fan, 2).expect("record"), 42);
        assert_eq!(fans.total_claimed(), 42);

        fans.revert_claim(&fan, 2);
        assert_eq!(fans.claimed_of(&fan), 40);
        assert_eq!(fans.total_claimed(), 40);
    }

    #[test]
    fn test_from_accounts_recomputes_totals() {
        let accounts = vec![
            FanAccount {
                identity: Identity::from_label("a"),
                token_balance: 3,
                cumulative_claimed: 10,
            },
            FanAccount {
                identity: Identity::from_label("b"),
                token_balance: 7,
                cumulative_claimed: 5,
            },
        ];
        let fans = FanShareLedger::from_accounts(accounts).expect("rebuild");
        assert_eq!(fans.total_supply(), 10);
        assert_eq!(fans.total_claimed(), 15);
    }

    #[test]
    fn test_from_accounts_rejects_duplicates() {
        let account = FanAccount {
            identity: Identity::from_label("a"),
            token_balance: 1,
            cumulative_claimed: 0,
        };
        assert!(matches!(
            FanShareLedger::from_accounts(vec![account.clone(), account]),
            Err(LedgerError::InvalidSnapshot(_))
        ));
    }
}
