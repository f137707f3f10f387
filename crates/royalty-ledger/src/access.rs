//! Single-owner access control.

use royalty_types::Identity;

use crate::{LedgerError, Result};

/// Owner gate for mint-type operations. There is no ownership transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessControl {
    owner: Identity,
}

impl AccessControl {
    /// Set the owner.
    pub fn new(owner: Identity) -> Self {
        Self { owner }
    }

    /// The owner identity.
    pub fn owner(&self) -> Identity {
        self.owner
    }

    /// Fail unless `caller` is the owner.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Unauthorized`] if `caller` is not the owner
    pub fn ensure_owner(&self, caller: &Identity) -> Result<()> {
        if *caller == self.owner {
            Ok(())
        } else {
            Err(LedgerError::Unauthorized { caller: *caller })
        }
    }
}
