//! Account identities.
//!
//! An [`Identity`] is a 20-byte account address rendered as `0x`-prefixed
//! lowercase hex. Demo and test setups can also derive identities from
//! human-readable labels ("artist1", "fan2"), which gives every run the same
//! addresses for the same labels.

use std::fmt;
use std::str::FromStr;

use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::IDENTITY_LEN;

/// Domain separation context for label-derived identities.
const LABEL_CONTEXT: &str = "royalty v1 account-label";

/// Errors produced when parsing an identity.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IdentityError {
    /// The string is missing the `0x` prefix.
    #[error("identity must start with 0x: {0}")]
    MissingPrefix(String),

    /// The hex body has the wrong length.
    #[error("identity must be {expected} hex characters, got {actual}")]
    BadLength {
        /// Expected number of hex characters.
        expected: usize,
        /// Actual number of hex characters.
        actual: usize,
    },

    /// The hex body contains a non-hex character.
    #[error("identity is not valid hex: {0}")]
    InvalidHex(String),
}

/// A 20-byte account address.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, SerializeDisplay, DeserializeFromStr,
)]
pub struct Identity([u8; IDENTITY_LEN]);

impl Identity {
    /// Wrap raw address bytes.
    pub const fn from_bytes(bytes: [u8; IDENTITY_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw address bytes.
    pub fn as_bytes(&self) -> &[u8; IDENTITY_LEN] {
        &self.0
    }

    /// Derive a deterministic identity from a label.
    ///
    /// `identity = BLAKE3::derive_key(LABEL_CONTEXT, label)[..20]`
    pub fn from_label(label: &str) -> Self {
        let digest = blake3::derive_key(LABEL_CONTEXT, label.as_bytes());
        let mut bytes = [0u8; IDENTITY_LEN];
        bytes.copy_from_slice(&digest[..IDENTITY_LEN]);
        Self(bytes)
    }

    /// Resolve an account reference: `0x` hex is parsed, anything else is
    /// treated as a label.
    ///
    /// # Errors
    ///
    /// Returns an [`IdentityError`] if the reference starts with `0x` but is
    /// not a valid address.
    pub fn resolve(reference: &str) -> Result<Self, IdentityError> {
        if reference.starts_with("0x") {
            reference.parse()
        } else {
            Ok(Self::from_label(reference))
        }
    }
}

impl FromStr for Identity {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .strip_prefix("0x")
            .ok_or_else(|| IdentityError::MissingPrefix(s.to_string()))?;
        if body.len() != IDENTITY_LEN * 2 {
            return Err(IdentityError::BadLength {
                expected: IDENTITY_LEN * 2,
                actual: body.len(),
            });
        }
        let mut bytes = [0u8; IDENTITY_LEN];
        hex::decode_to_slice(body, &mut bytes)
            .map_err(|e| IdentityError::InvalidHex(e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({self})")
    }
}
