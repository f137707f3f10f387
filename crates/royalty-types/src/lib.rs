//! # royalty-types
//!
//! Shared domain types used across the royalty workspace: account
//! identities, amount aliases, value units and ledger events.

pub mod events;
pub mod identity;
pub mod units;

pub use identity::{Identity, IdentityError};

/// Value amount in the smallest unit of the underlying currency (wei-like).
pub type Amount = u128;

/// Relative payee weight. Weights are normalised by their sum, not by 100.
pub type Weight = u64;

/// Mock fan-token quantity.
pub type FanTokens = u128;

/// Basis points in one whole (100%).
pub const BPS_DENOMINATOR: u16 = 10_000;

/// Number of bytes in an account identity.
pub const IDENTITY_LEN: usize = 20;
