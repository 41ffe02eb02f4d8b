//! 32-byte hex identifiers (term ids, transaction hashes)

use crate::error::ParseError;
use alloy_primitives::{b256, B256};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Strip the mandatory `0x` prefix and check the digit count for `N` bytes
pub(crate) fn prefixed_digits<const N: usize>(s: &str) -> Result<&str, ParseError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .ok_or(ParseError::MissingPrefix)?;

    if digits.len() != N * 2 {
        return Err(ParseError::InvalidLength {
            expected: N,
            actual: digits.len() / 2,
        });
    }
    Ok(digits)
}

macro_rules! hex_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub B256);

        impl $name {
            pub const fn new(bytes: [u8; 32]) -> Self {
                Self(B256::new(bytes))
            }

            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0 .0
            }
        }

        impl From<B256> for $name {
            fn from(value: B256) -> Self {
                Self(value)
            }
        }

        impl From<$name> for B256 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                // full lowercase hex, never the abbreviated alternate form
                write!(f, "{}", self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }

        impl FromStr for $name {
            type Err = ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let digits = prefixed_digits::<32>(s.trim())?;
                B256::from_str(digits)
                    .map(Self)
                    .map_err(|e| ParseError::InvalidHex(e.to_string()))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

hex_id!(
    /// Opaque identifier of an atom or triple in the knowledge graph.
    ///
    /// Compared by equality only.
    TermId
);

hex_id!(
    /// Hash of a broadcast transaction
    TxHash
);

/// Term id of the "is a member of" predicate atom
pub const IS_MEMBER_OF: TermId =
    TermId(b256!("0x72b43d4202fe2070725a41e4ff1c83def872b3befadc0627edcc23ffa11b1c66"));
