//! Weighted payee registry.
//!
//! Payees are fixed at construction and never change afterwards. Weights are
//! relative: `[80, 20]` and `[4, 1]` describe the same split.

use std::collections::BTreeSet;

use royalty_types::{Identity, Weight};
use serde::{Deserialize, Serialize};

use crate::{math, ConfigError};

/// A fixed-weight recipient of the non-fan portion of each distribution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payee {
    /// Payout address.
    pub address: Identity,
    /// Relative weight (> 0).
    pub weight: Weight,
}

/// Validated, immutable payee set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PayeeRegistry {
    payees: Vec<Payee>,
    total_weight: Weight,
}

impl PayeeRegistry {
    /// Validate and freeze a payee list.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptyPayees`] if the list is empty
    /// - [`ConfigError::ZeroWeight`] if any weight is zero
    /// - [`ConfigError::DuplicatePayee`] if an address repeats
    /// - [`ConfigError::WeightSumOverflow`] if the weights overflow `u64`
    pub fn new(payees: Vec<Payee>) -> Result<Self, ConfigError> {
        if payees.is_empty() {
            return Err(ConfigError::EmptyPayees);
        }

        let mut seen = BTreeSet::new();
        for (index, payee) in payees.iter().enumerate() {
            if payee.weight == 0 {
                return Err(ConfigError::ZeroWeight { index });
            }
            if !seen.insert(payee.address) {
                return Err(ConfigError::DuplicatePayee {
                    payee: payee.address,
                });
            }
        }

        let weights: Vec<Weight> = payees.iter().map(|p| p.weight).collect();
        let total_weight = math::total_weight(&weights).ok_or(ConfigError::WeightSumOverflow)?;

        Ok(Self {
            payees,
            total_weight,
        })
    }

    /// Payees in construction order.
    pub fn payees(&self) -> &[Payee] {
        &self.payees
    }

    /// Addresses and weights as parallel lists, in construction order.
    pub fn addresses_and_weights(&self) -> (Vec<Identity>, Vec<Weight>) {
        self.payees.iter().map(|p| (p.address, p.weight)).unzip()
    }

    /// Weights in construction order.
    pub fn weights(&self) -> Vec<Weight> {
        self.payees.iter().map(|p| p.weight).collect()
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> Weight {
        self.total_weight
    }

    /// Number of payees.
    pub fn len(&self) -> usize {
        self.payees.len()
    }

    /// Whether the registry holds no payees. Construction rejects an empty
    /// list, so this is `false` for any registry built by [`PayeeRegistry::new`].
    pub fn is_empty(&self) -> bool {
        self.payees.is_empty()
    }
}
