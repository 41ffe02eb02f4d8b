//! 20-byte chain account addresses with EIP-55 checksums

use crate::error::ParseError;
use crate::types::ids::prefixed_digits;
use alloy_primitives::AddressError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A chain account address.
///
/// Parsing accepts all-lowercase or all-uppercase hex as-is; mixed-case input
/// must carry a valid EIP-55 checksum. Display always renders the checksummed
/// form, which is what directory lookups and contract arguments use.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub alloy_primitives::Address);

impl Address {
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(alloy_primitives::Address::new(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0 .0 .0
    }

    /// EIP-55 checksummed text, `0x`-prefixed
    pub fn to_checksum(&self) -> String {
        self.0.to_checksum(None)
    }
}

impl From<alloy_primitives::Address> for Address {
    fn from(value: alloy_primitives::Address) -> Self {
        Self(value)
    }
}

impl From<Address> for alloy_primitives::Address {
    fn from(value: Address) -> Self {
        value.0
    }
}

impl FromStr for Address {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = prefixed_digits::<20>(s)?;

        let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
        let parsed = if has_lower && has_upper {
            alloy_primitives::Address::parse_checksummed(s, None).map_err(|e| match e {
                AddressError::InvalidChecksum => ParseError::BadChecksum(s.to_string()),
                other => ParseError::InvalidHex(other.to_string()),
            })?
        } else {
            alloy_primitives::Address::from_str(digits)
                .map_err(|e| ParseError::InvalidHex(e.to_string()))?
        };

        Ok(Self(parsed))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_checksum())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_checksum())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
