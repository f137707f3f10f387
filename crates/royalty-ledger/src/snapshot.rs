//! Serializable ledger state.
//!
//! A [`LedgerSnapshot`] captures everything needed to rebuild a
//! [`RoyaltyLedger`]: configuration, counters and every fan account.
//! Pending events are not part of the state.

use royalty_types::{Amount, Identity};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use crate::access::AccessControl;
use crate::fans::{FanAccount, FanShareLedger};
use crate::ledger::{LedgerConfig, RoyaltyLedger};
use crate::payees::Payee;
use crate::{LedgerError, Result};

/// Complete persisted ledger state.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Identity allowed to mint.
    pub owner: Identity,
    /// Fan pool share in basis points.
    pub fan_share_bps: u16,
    /// Payees in payout order.
    pub payees: Vec<Payee>,
    /// Every fan account, ordered by identity.
    pub fans: Vec<FanAccount>,
    /// Total ever credited to the fan pool.
    #[serde_as(as = "DisplayFromStr")]
    pub total_fan_pool: Amount,
    /// Received and not yet paid out.
    #[serde_as(as = "DisplayFromStr")]
    pub held: Amount,
    /// Sum of every funding.
    #[serde_as(as = "DisplayFromStr")]
    pub total_received: Amount,
    /// Sum of every successful payee transfer.
    #[serde_as(as = "DisplayFromStr")]
    pub total_paid_to_payees: Amount,
}

impl RoyaltyLedger {
    /// Capture the current state.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            owner: self.access.owner(),
            fan_share_bps: self.fan_share_bps,
            payees: self.payees.payees().to_vec(),
            fans: self.fans.accounts().cloned().collect(),
            total_fan_pool: self.total_fan_pool,
            held: self.held,
            total_received: self.total_received,
            total_paid_to_payees: self.total_paid_to_payees,
        }
    }

    /// Rebuild a ledger from a snapshot, re-checking every invariant.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Config`] if the stored configuration is invalid
    /// - [`LedgerError::InvalidSnapshot`] if the counters are inconsistent
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Result<Self> {
        let config = LedgerConfig {
            owner: snapshot.owner,
            payees: snapshot.payees,
            fan_share_bps: snapshot.fan_share_bps,
        };
        let payees = config.validate()?;
        let fans = FanShareLedger::from_accounts(snapshot.fans)?;

        let claimed = fans.total_claimed();
        if claimed > snapshot.total_fan_pool {
            return Err(LedgerError::InvalidSnapshot(format!(
                "fans claimed {claimed} but the pool only received {}",
                snapshot.total_fan_pool
            )));
        }
        let unclaimed = snapshot.total_fan_pool - claimed;
        if unclaimed > snapshot.held {
            return Err(LedgerError::InvalidSnapshot(format!(
                "unclaimed fan pool {unclaimed} exceeds held balance {}",
                snapshot.held
            )));
        }
        let accounted = snapshot
            .total_paid_to_payees
            .checked_add(claimed)
            .and_then(|v| v.checked_add(snapshot.held));
        if accounted != Some(snapshot.total_received) {
            return Err(LedgerError::InvalidSnapshot(format!(
                "payouts, claims and held balance do not add up to {} received",
                snapshot.total_received
            )));
        }

        tracing::debug!(
            owner = %config.owner,
            fans = fans.accounts().count(),
            total_fan_pool = snapshot.total_fan_pool,
            "royalty ledger restored"
        );

        Ok(Self {
            access: AccessControl::new(config.owner),
            payees,
            fans,
            fan_share_bps: config.fan_share_bps,
            total_fan_pool: snapshot.total_fan_pool,
            held: snapshot.held,
            total_received: snapshot.total_received,
            total_paid_to_payees: snapshot.total_paid_to_payees,
            events: Vec::new(),
        })
    }
}
