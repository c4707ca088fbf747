//! Account address type with `0x` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// An account address, always `0x` followed by 40 hex characters.
///
/// Addresses are opaque identities: the ledger never derives them, it only
/// stores and compares them. Stored lowercased so that two spellings of the
/// same address hash and compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountAddress(String);

/// Error returned when an address string is malformed.
#[derive(Debug, Error)]
#[error("invalid account address: {0:?}")]
pub struct AddressError(String);

impl AccountAddress {
    /// The standard prefix for all account addresses.
    pub const PREFIX: &'static str = "0x";

    /// Number of hex characters after the prefix.
    pub const HEX_LEN: usize = 40;

    /// Create an account address from a raw string.
    ///
    /// # Panics
    /// Panics if the string is not `0x` + 40 hex characters. Use
    /// [`AccountAddress::parse`] for untrusted input.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(
            Self::well_formed(&s),
            "address must be 0x followed by 40 hex characters"
        );
        Self(s.to_ascii_lowercase())
    }

    /// Parse an account address from untrusted input.
    pub fn parse(raw: &str) -> Result<Self, AddressError> {
        if !Self::well_formed(raw) {
            return Err(AddressError(raw.to_string()));
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this address is well-formed.
    pub fn is_valid(&self) -> bool {
        Self::well_formed(&self.0)
    }

    fn well_formed(s: &str) -> bool {
        match s.strip_prefix(Self::PREFIX) {
            Some(body) => body.len() == Self::HEX_LEN && hex::decode(body).is_ok(),
            None => false,
        }
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AccountAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
