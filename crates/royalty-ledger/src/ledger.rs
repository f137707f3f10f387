//! The ledger facade.
//!
//! [`RoyaltyLedger`] owns the payee registry, the fan accounts and the
//! running counters. Funding and minting live here; the push path is in
//! [`crate::distribution`] and the pull path in [`crate::claim`].
//!
//! ## Balances
//!
//! - `held`: everything received minus everything successfully paid out
//! - `unclaimed_fan_pool`: `total_fan_pool - total_fan_claimed`
//! - `distributable`: `held - unclaimed_fan_pool`; dust and failed payee
//!   transfers stay here until the next distribution

use royalty_types::events::LedgerEvent;
use royalty_types::{Amount, FanTokens, Identity, Weight, BPS_DENOMINATOR};
use serde::{Deserialize, Serialize};

use crate::access::AccessControl;
use crate::fans::FanShareLedger;
use crate::payees::{Payee, PayeeRegistry};
use crate::{ConfigError, LedgerError, Result};

/// Construction parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Identity allowed to mint fan tokens.
    pub owner: Identity,
    /// Weighted payees, in payout order.
    pub payees: Vec<Payee>,
    /// Share of each distribution credited to the fan pool, in basis points.
    pub fan_share_bps: u16,
}

impl LedgerConfig {
    /// Check basis points and build the payee registry.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the first invalid parameter.
    pub fn validate(&self) -> std::result::Result<PayeeRegistry, ConfigError> {
        if self.fan_share_bps > BPS_DENOMINATOR {
            return Err(ConfigError::BasisPointsOutOfRange {
                bps: self.fan_share_bps,
            });
        }
        PayeeRegistry::new(self.payees.clone())
    }
}

/// Revenue-splitting and fan-dividend ledger.
///
/// Every mutating operation takes `&mut self` and either completes or
/// leaves the ledger unchanged.
#[derive(Clone, Debug)]
pub struct RoyaltyLedger {
    pub(crate) access: AccessControl,
    pub(crate) payees: PayeeRegistry,
    pub(crate) fans: FanShareLedger,
    pub(crate) fan_share_bps: u16,
    pub(crate) total_fan_pool: Amount,
    pub(crate) held: Amount,
    pub(crate) total_received: Amount,
    pub(crate) total_paid_to_payees: Amount,
    pub(crate) events: Vec<LedgerEvent>,
}

impl RoyaltyLedger {
    /// Create a ledger with no funds and no fans.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Config`] if the payees or basis points are invalid
    pub fn new(config: LedgerConfig) -> Result<Self> {
        let payees = config.validate()?;

        tracing::info!(
            owner = %config.owner,
            payees = payees.len(),
            total_weight = payees.total_weight(),
            fan_share_bps = config.fan_share_bps,
            "royalty ledger created"
        );

        Ok(Self {
            access: AccessControl::new(config.owner),
            payees,
            fans: FanShareLedger::new(),
            fan_share_bps: config.fan_share_bps,
            total_fan_pool: 0,
            held: 0,
            total_received: 0,
            total_paid_to_payees: 0,
            events: Vec::new(),
        })
    }

    /// Record incoming funds. Always accepted; zero is a no-op.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Overflow`] if the held balance would overflow
    pub fn fund(&mut self, from: &Identity, amount: Amount) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        let held = self
            .held
            .checked_add(amount)
            .ok_or(LedgerError::Overflow("held balance"))?;
        let total_received = self
            .total_received
            .checked_add(amount)
            .ok_or(LedgerError::Overflow("total received"))?;

        self.held = held;
        self.total_received = total_received;
        self.events.push(LedgerEvent::Funded {
            from: *from,
            amount,
        });

        tracing::debug!(%from, amount, held, "ledger funded");
        Ok(())
    }

    /// Mint mock fan tokens. Owner only.
    ///
    /// Minting after a distribution dilutes every fan's claim on the pool
    /// that has already accumulated.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Unauthorized`] if `caller` is not the owner
    /// - [`LedgerError::ZeroAmount`] if `amount` is zero
    /// - [`LedgerError::Overflow`] if the balance or supply overflows
    pub fn mint_fan(&mut self, caller: &Identity, fan: &Identity, amount: FanTokens) -> Result<()> {
        self.access.ensure_owner(caller)?;
        let total_supply = self.fans.mint(*fan, amount)?;

        self.events.push(LedgerEvent::FanMinted {
            fan: *fan,
            amount,
            total_supply,
        });

        tracing::info!(%fan, amount, total_supply, "fan tokens minted");
        Ok(())
    }

    /// Payee addresses and weights in construction order.
    pub fn payees(&self) -> (Vec<Identity>, Vec<Weight>) {
        self.payees.addresses_and_weights()
    }

    /// The payee registry.
    pub fn payee_registry(&self) -> &PayeeRegistry {
        &self.payees
    }

    /// Total ever credited to the fan pool.
    pub fn total_fan_pool(&self) -> Amount {
        self.total_fan_pool
    }

    /// Fan share of each distribution, in basis points.
    pub fn fan_share_bps(&self) -> u16 {
        self.fan_share_bps
    }

    /// Total mock fan tokens minted.
    pub fn fan_total_supply(&self) -> FanTokens {
        self.fans.total_supply()
    }

    /// Mock token balance of `fan`.
    pub fn fan_balance(&self, fan: &Identity) -> FanTokens {
        self.fans.balance_of(fan)
    }

    /// Cumulative amount claimed by `fan`.
    pub fn fan_claimed(&self, fan: &Identity) -> Amount {
        self.fans.claimed_of(fan)
    }

    /// Fan accounts.
    pub fn fan_accounts(&self) -> &FanShareLedger {
        &self.fans
    }

    /// The identity allowed to mint.
    pub fn owner(&self) -> Identity {
        self.access.owner()
    }

    /// Funds received and not yet paid out.
    pub fn held_balance(&self) -> Amount {
        self.held
    }

    /// Fan pool credit not yet claimed.
    pub fn unclaimed_fan_pool(&self) -> Amount {
        self.total_fan_pool.saturating_sub(self.fans.total_claimed())
    }

    /// Held funds not allocated to the fan pool.
    pub fn distributable_balance(&self) -> Amount {
        self.held.saturating_sub(self.unclaimed_fan_pool())
    }

    /// Sum of every `fund` call.
    pub fn total_received(&self) -> Amount {
        self.total_received
    }

    /// Sum of every successful payee transfer.
    pub fn total_paid_to_payees(&self) -> Amount {
        self.total_paid_to_payees
    }

    /// Sum of every fan's cumulative claim.
    pub fn total_fan_claimed(&self) -> Amount {
        self.fans.total_claimed()
    }

    /// Events recorded since the last [`take_events`](Self::take_events).
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Drain recorded events.
    pub fn take_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }
}
