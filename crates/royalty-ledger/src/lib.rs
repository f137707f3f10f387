//! # royalty-ledger
//!
//! Revenue-splitting and fan-dividend accounting.
//!
//! Received funds are split between a fixed set of weighted payees, who are
//! paid immediately, and a fan pool that fan-token holders claim from later.
//! A fan's entitlement is computed from the *current* token balance and
//! supply against the *total* pool ever accumulated, so minting after a
//! distribution dilutes every fan's share of what is already in the pool.
//!
//! ## Modules
//!
//! - [`math`]: Checked proportional splitting with floor rounding
//! - [`payees`]: Immutable weighted payee registry
//! - [`fans`]: Fan token balances and cumulative claims
//! - [`access`]: Single-owner gate for minting
//! - [`distribution`]: Push payouts and fan-pool crediting
//! - [`claim`]: Pull-based fan claims
//! - [`treasury`]: Outbound value transfer seam
//! - [`ledger`]: The [`RoyaltyLedger`] facade
//! - [`snapshot`]: Serializable ledger state

pub mod access;
pub mod claim;
pub mod distribution;
pub mod fans;
pub mod ledger;
pub mod math;
pub mod payees;
pub mod snapshot;
pub mod treasury;

use royalty_types::{Amount, Identity};

pub use distribution::{DistributionReport, PayeeOutcome, PayoutStatus};
pub use ledger::{LedgerConfig, RoyaltyLedger};
pub use payees::Payee;
pub use snapshot::LedgerSnapshot;
pub use treasury::{InMemoryTreasury, TransferError, Treasury};

/// Invalid construction parameters.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No payees were supplied.
    #[error("at least one payee is required")]
    EmptyPayees,

    /// A payee has a zero weight.
    #[error("payee at index {index} has zero weight")]
    ZeroWeight {
        /// Position of the offending payee.
        index: usize,
    },

    /// The same address appears more than once.
    #[error("payee {payee} is listed more than once")]
    DuplicatePayee {
        /// The repeated address.
        payee: Identity,
    },

    /// Fan share is above 10000 basis points.
    #[error("fan share {bps} bps is outside 0..=10000")]
    BasisPointsOutOfRange {
        /// The supplied value.
        bps: u16,
    },

    /// The weights do not fit in a single sum.
    #[error("sum of payee weights overflows")]
    WeightSumOverflow,
}

/// Error types for ledger operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LedgerError {
    /// Construction parameters are invalid.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// An owner-gated operation was called by someone else.
    #[error("caller {caller} is not the ledger owner")]
    Unauthorized {
        /// The rejected caller.
        caller: Identity,
    },

    /// Checked arithmetic failed.
    #[error("arithmetic overflow in {0}")]
    Overflow(&'static str),

    /// An outbound transfer failed and the operation was rolled back.
    #[error("transfer of {amount} to {recipient} failed: {reason}")]
    TransferFailed {
        /// Intended recipient.
        recipient: Identity,
        /// Amount that was not delivered.
        amount: Amount,
        /// Reason reported by the treasury.
        reason: String,
    },

    /// Minting zero tokens.
    #[error("mint amount is zero")]
    ZeroAmount,

    /// Restored state breaks a ledger invariant.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Convenience result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
