//! Push payouts and fan-pool crediting.
//!
//! A distribution takes the whole distributable balance `B`:
//!
//! - `F = floor(B * fan_share_bps / 10000)` is credited to the fan pool
//! - `R = B - F` is split as `floor(R * w_i / Σw)` and pushed to each payee
//! - `R - Σ p_i` (dust) stays held and rolls into the next distribution
//!
//! All arithmetic is planned before any state changes. A payee whose
//! transfer fails is skipped: its share stays in the distributable balance
//! and is split again by the next call. The fan-pool credit and the other
//! payees' transfers are unaffected.

use royalty_types::events::LedgerEvent;
use royalty_types::{Amount, Identity};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use crate::ledger::RoyaltyLedger;
use crate::payees::PayeeRegistry;
use crate::treasury::Treasury;
use crate::{math, LedgerError, Result};

/// Amounts a distribution will move, computed up front.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistributionPlan {
    /// Balance being distributed.
    pub distributable: Amount,
    /// Fan-pool credit.
    pub fan_share: Amount,
    /// Per-payee amounts, in registry order.
    pub payouts: Vec<(Identity, Amount)>,
    /// Rounding remainder left held.
    pub dust: Amount,
}

impl DistributionPlan {
    /// Sum of all payee amounts.
    pub fn payee_total(&self) -> Amount {
        self.distributable - self.fan_share - self.dust
    }
}

/// Split `distributable` between the fan pool and the payees.
///
/// # Errors
///
/// - [`LedgerError::Overflow`] if any share overflows
pub fn plan(distributable: Amount, fan_share_bps: u16, payees: &PayeeRegistry) -> Result<DistributionPlan> {
    let fan_share =
        math::bps_share(distributable, fan_share_bps).ok_or(LedgerError::Overflow("fan share"))?;
    let remainder = distributable - fan_share;
    let split = math::split_weighted(remainder, &payees.weights())
        .ok_or(LedgerError::Overflow("payee split"))?;

    Ok(DistributionPlan {
        distributable,
        fan_share,
        payouts: payees
            .payees()
            .iter()
            .map(|p| p.address)
            .zip(split.shares)
            .collect(),
        dust: split.dust,
    })
}

/// What happened to one payee's share.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PayoutStatus {
    /// Transferred.
    Paid,
    /// The share rounded down to zero; nothing was sent.
    Empty,
    /// The transfer failed; the amount stays distributable.
    Failed { reason: String },
}

/// One payee's line in a [`DistributionReport`].
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayeeOutcome {
    /// Payee address.
    pub payee: Identity,
    /// Planned share.
    #[serde_as(as = "DisplayFromStr")]
    pub amount: Amount,
    /// Transfer result.
    pub status: PayoutStatus,
}

/// Result of one [`RoyaltyLedger::distribute`] call.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionReport {
    /// Balance that was split.
    #[serde_as(as = "DisplayFromStr")]
    pub distributable: Amount,
    /// Fan-pool credit.
    #[serde_as(as = "DisplayFromStr")]
    pub fan_share: Amount,
    /// Per-payee outcomes, in registry order. Empty when nothing was
    /// distributable.
    pub payees: Vec<PayeeOutcome>,
    /// Rounding remainder left held.
    #[serde_as(as = "DisplayFromStr")]
    pub dust: Amount,
    /// Fan pool total after this call.
    #[serde_as(as = "DisplayFromStr")]
    pub total_fan_pool: Amount,
}

impl DistributionReport {
    fn nothing(total_fan_pool: Amount) -> Self {
        Self {
            distributable: 0,
            fan_share: 0,
            payees: Vec::new(),
            dust: 0,
            total_fan_pool,
        }
    }

    /// Whether the call found nothing to distribute.
    pub fn is_empty(&self) -> bool {
        self.distributable == 0
    }

    /// Sum actually transferred to payees.
    pub fn paid_total(&self) -> Amount {
        self.payees
            .iter()
            .filter(|o| o.status == PayoutStatus::Paid)
            .map(|o| o.amount)
            .sum()
    }

    /// Sum whose transfer failed.
    pub fn failed_total(&self) -> Amount {
        self.payees
            .iter()
            .filter(|o| matches!(o.status, PayoutStatus::Failed { .. }))
            .map(|o| o.amount)
            .sum()
    }

    /// Amount left in the distributable balance: dust plus failed shares.
    pub fn retained(&self) -> Amount {
        self.dust + self.failed_total()
    }
}

impl RoyaltyLedger {
    /// Distribute the current distributable balance.
    ///
    /// A zero balance is a successful no-op. Payee shares are pushed through
    /// `treasury` one at a time; the ledger's accounting for each payee is
    /// updated before its transfer and restored if that transfer fails.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Overflow`] if planning overflows; nothing changes
    pub fn distribute(&mut self, treasury: &mut dyn Treasury) -> Result<DistributionReport> {
        let distributable = self.distributable_balance();
        if distributable == 0 {
            tracing::debug!(held = self.held, "distribute: nothing to distribute");
            return Ok(DistributionReport::nothing(self.total_fan_pool));
        }

        let plan = plan(distributable, self.fan_share_bps, &self.payees)?;
        let total_fan_pool = self
            .total_fan_pool
            .checked_add(plan.fan_share)
            .ok_or(LedgerError::Overflow("total fan pool"))?;
        if self.total_paid_to_payees.checked_add(plan.payee_total()).is_none() {
            return Err(LedgerError::Overflow("total paid to payees"));
        }

        self.total_fan_pool = total_fan_pool;
        if plan.fan_share > 0 {
            self.events.push(LedgerEvent::FanPoolCredited {
                amount: plan.fan_share,
                total_fan_pool,
            });
        }

        let mut outcomes = Vec::with_capacity(plan.payouts.len());
        for (payee, amount) in &plan.payouts {
            let status = self.push_payout(treasury, payee, *amount);
            outcomes.push(PayeeOutcome {
                payee: *payee,
                amount: *amount,
                status,
            });
        }

        let report = DistributionReport {
            distributable,
            fan_share: plan.fan_share,
            payees: outcomes,
            dust: plan.dust,
            total_fan_pool,
        };

        tracing::info!(
            distributable,
            fan_share = report.fan_share,
            paid = report.paid_total(),
            retained = report.retained(),
            total_fan_pool,
            "distribution complete"
        );

        Ok(report)
    }

    /// Send one payee share, keeping the ledger's books ahead of the
    /// transfer.
    fn push_payout(&mut self, treasury: &mut dyn Treasury, payee: &Identity, amount: Amount) -> PayoutStatus {
        if amount == 0 {
            return PayoutStatus::Empty;
        }

        self.held -= amount;
        self.total_paid_to_payees += amount;

        match treasury.pay(payee, amount) {
            Ok(()) => {
                self.events.push(LedgerEvent::PayeePaid {
                    payee: *payee,
                    amount,
                });
                PayoutStatus::Paid
            }
            Err(e) => {
                self.held += amount;
                self.total_paid_to_payees -= amount;
                tracing::warn!(%payee, amount, reason = %e, "payee transfer failed, amount retained");
                self.events.push(LedgerEvent::PayeeTransferFailed {
                    payee: *payee,
                    amount,
                    reason: e.reason.clone(),
                });
                PayoutStatus::Failed { reason: e.reason }
            }
        }
    }
}
