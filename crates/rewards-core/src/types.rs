//! Principal identities and token amounts.
//!
//! All token quantities are `u128` base units, wide enough for an 18-decimal
//! token with a supply well beyond 10^20 whole tokens.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::ACCOUNT_ID_LEN;

/// Token quantity in base units.
pub type Amount = u128;

/// Serde adapter writing an [`Amount`] as a decimal string.
///
/// JSON numbers lose precision past 2^53, and token amounts routinely exceed
/// that, so every serialized amount goes through this module:
/// `#[serde(with = "rewards_core::types::amount_serde")]`.
pub mod amount_serde {
    use super::Amount;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(amount: &Amount, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(amount)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Amount, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors from parsing an [`AccountId`] string.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountIdError {
    #[error("missing 0x prefix")]
    MissingPrefix,
    #[error("invalid length: expected {expected} hex digits, got {got}")]
    InvalidLength { expected: usize, got: usize },
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

/// A 20-byte principal identifier.
///
/// Used for traders, the recorder, the owner, the token contract and the
/// ledger's own holder account. [`AccountId::ZERO`] is the null identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct AccountId(pub [u8; ACCOUNT_ID_LEN]);

impl AccountId {
    /// The null identity (20 zero bytes).
    pub const ZERO: Self = Self([0u8; ACCOUNT_ID_LEN]);

    /// Create an AccountId from a byte array.
    pub fn from_bytes(bytes: [u8; ACCOUNT_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Return the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; ACCOUNT_ID_LEN] {
        &self.0
    }

    /// Check if this is the null identity.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ACCOUNT_ID_LEN]
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for AccountId {
    type Err = AccountIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or(AccountIdError::MissingPrefix)?;
        if digits.len() != ACCOUNT_ID_LEN * 2 {
            return Err(AccountIdError::InvalidLength {
                expected: ACCOUNT_ID_LEN * 2,
                got: digits.len(),
            });
        }
        let mut bytes = [0u8; ACCOUNT_ID_LEN];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| AccountIdError::InvalidHex(e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl From<[u8; ACCOUNT_ID_LEN]> for AccountId {
    fn from(bytes: [u8; ACCOUNT_ID_LEN]) -> Self {
        Self(bytes)
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
