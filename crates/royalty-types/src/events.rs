//! Ledger events.
//!
//! The ledger appends one event per observable effect of a successful
//! operation. Hosts drain them and forward them to whatever log or
//! notification channel they run. Amounts serialize as decimal strings so
//! `u128` values survive JSON consumers.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use crate::{Amount, FanTokens, Identity};

/// An observable ledger effect.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// Funds were received.
    Funded {
        from: Identity,
        #[serde_as(as = "DisplayFromStr")]
        amount: Amount,
    },
    /// A distribution credited the fan pool.
    FanPoolCredited {
        #[serde_as(as = "DisplayFromStr")]
        amount: Amount,
        #[serde_as(as = "DisplayFromStr")]
        total_fan_pool: Amount,
    },
    /// A payee share was pushed out.
    PayeePaid {
        payee: Identity,
        #[serde_as(as = "DisplayFromStr")]
        amount: Amount,
    },
    /// A payee transfer failed; the amount stays in the distributable balance.
    PayeeTransferFailed {
        payee: Identity,
        #[serde_as(as = "DisplayFromStr")]
        amount: Amount,
        reason: String,
    },
    /// Fan tokens were minted.
    FanMinted {
        fan: Identity,
        #[serde_as(as = "DisplayFromStr")]
        amount: FanTokens,
        #[serde_as(as = "DisplayFromStr")]
        total_supply: FanTokens,
    },
    /// A fan claimed from the pool.
    FanClaimed {
        fan: Identity,
        #[serde_as(as = "DisplayFromStr")]
        amount: Amount,
        #[serde_as(as = "DisplayFromStr")]
        cumulative_claimed: Amount,
    },
}

impl LedgerEvent {
    /// Short event name, as used in the serialized `event_type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Funded { .. } => "funded",
            Self::FanPoolCredited { .. } => "fan_pool_credited",
            Self::PayeePaid { .. } => "payee_paid",
            Self::PayeeTransferFailed { .. } => "payee_transfer_failed",
            Self::FanMinted { .. } => "fan_minted",
            Self::FanClaimed { .. } => "fan_claimed",
        }
    }
}
