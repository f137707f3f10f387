//! Pull-based fan claims.
//!
//! A fan's entitlement is `floor(total_fan_pool * balance / supply)`,
//! evaluated at claim time against the whole pool ever credited. What is
//! payable is the entitlement minus what the fan already claimed, capped by
//! the pool credit nobody has claimed yet. The cap matters once tokens are
//! minted after some fans have claimed: entitlements shift, and without it
//! the fans together could draw more than the pool ever received.

use royalty_types::events::LedgerEvent;
use royalty_types::{Amount, FanTokens, Identity};

use crate::ledger::RoyaltyLedger;
use crate::treasury::Treasury;
use crate::{math, LedgerError, Result};

/// `floor(total_fan_pool * balance / supply)`, or 0 when the supply or
/// balance is zero.
///
/// Returns `None` on overflow.
pub fn entitlement(total_fan_pool: Amount, balance: FanTokens, supply: FanTokens) -> Option<Amount> {
    if supply == 0 || balance == 0 {
        return Some(0);
    }
    math::mul_div_floor(total_fan_pool, balance, supply)
}

/// Amount newly payable given an entitlement, the fan's prior claims and
/// the unclaimed pool.
pub fn payable(entitlement: Amount, already_claimed: Amount, unclaimed_pool: Amount) -> Amount {
    entitlement.saturating_sub(already_claimed).min(unclaimed_pool)
}

impl RoyaltyLedger {
    /// What [`claim_fan`](Self::claim_fan) would pay `fan` right now.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Overflow`] if the entitlement overflows
    pub fn claimable(&self, fan: &Identity) -> Result<Amount> {
        let entitlement = entitlement(
            self.total_fan_pool,
            self.fans.balance_of(fan),
            self.fans.total_supply(),
        )
        .ok_or(LedgerError::Overflow("fan entitlement"))?;
        Ok(payable(
            entitlement,
            self.fans.claimed_of(fan),
            self.unclaimed_fan_pool(),
        ))
    }

    /// Pay `caller` their newly claimable share of the fan pool.
    ///
    /// Returns the amount paid; `Ok(0)` means there was nothing to claim and
    /// nothing changed. The caller's cumulative claim is recorded before the
    /// transfer is attempted and rolled back if it fails.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Overflow`] if the entitlement overflows
    /// - [`LedgerError::TransferFailed`] if the treasury refuses the
    ///   transfer; the ledger is left unchanged
    pub fn claim_fan(&mut self, caller: &Identity, treasury: &mut dyn Treasury) -> Result<Amount> {
        let amount = self.claimable(caller)?;
        if amount == 0 {
            tracing::debug!(fan = %caller, "claim: nothing claimable");
            return Ok(0);
        }

        let cumulative_claimed = self.fans.record_claim(caller, amount)?;
        self.held -= amount;

        if let Err(e) = treasury.pay(caller, amount) {
            self.held += amount;
            self.fans.revert_claim(caller, amount);
            tracing::warn!(fan = %caller, amount, reason = %e, "fan claim transfer failed, rolled back");
            return Err(LedgerError::TransferFailed {
                recipient: *caller,
                amount,
                reason: e.reason,
            });
        }

        self.events.push(LedgerEvent::FanClaimed {
            fan: *caller,
            amount,
            cumulative_claimed,
        });

        tracing::info!(
            fan = %caller,
            amount,
            cumulative_claimed,
            unclaimed_pool = self.unclaimed_fan_pool(),
            "fan claim paid"
        );

        Ok(amount)
    }
}
