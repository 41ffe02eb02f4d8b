//! Exact decimal stake amounts and base-unit conversion

use crate::error::ParseError;
use alloy_primitives::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Integer amount in the chain's smallest native unit (wei-like), as the
/// `uint256` the contracts take
pub type BaseUnits = U256;

/// A non-negative decimal quantity of the chain's native currency.
///
/// Stored exactly as `mantissa / 10^scale` with trailing fraction zeros
/// stripped, so conversion to base units never goes through floating point.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StakeAmount {
    mantissa: U256,
    scale: u32,
}

impl StakeAmount {
    pub const ZERO: StakeAmount = StakeAmount {
        mantissa: U256::ZERO,
        scale: 0,
    };

    /// Whole units of native currency
    pub const fn whole(units: u64) -> Self {
        Self {
            mantissa: U256::from_limbs([units, 0, 0, 0]),
            scale: 0,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    /// Number of significant fraction digits
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Convert to base units for a currency with `decimals` fraction digits.
    ///
    /// Fails with `PrecisionLoss` if the amount carries more fraction digits
    /// than the currency, and `Overflow` if the result exceeds `uint256`.
    pub fn to_base_units(&self, decimals: u8) -> Result<BaseUnits, ParseError> {
        let decimals_u32 = u32::from(decimals);
        if self.scale > decimals_u32 {
            return Err(ParseError::PrecisionLoss { decimals });
        }
        U256::from(10u8)
            .checked_pow(U256::from(decimals_u32 - self.scale))
            .and_then(|factor| self.mantissa.checked_mul(factor))
            .ok_or(ParseError::Overflow)
    }
}

impl From<u64> for StakeAmount {
    fn from(units: u64) -> Self {
        Self::whole(units)
    }
}

impl FromStr for StakeAmount {
    type Err = ParseError;

    /// Parse a plain decimal such as `5`, `0.25`, `.5` or `10.`.
    ///
    /// Signs, exponents and separators are rejected; a leading `-` is
    /// reported as `Negative`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.starts_with('-') {
            return Err(ParseError::Negative);
        }

        let (int_part, frac_part) = match trimmed.split_once('.') {
            Some((i, f)) => (i, f),
            None => (trimmed, ""),
        };

        let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
        if (int_part.is_empty() && frac_part.is_empty()) || !all_digits(int_part) || !all_digits(frac_part) {
            return Err(ParseError::InvalidDecimal(s.to_string()));
        }

        // zeros outside the significant digits never affect the value
        let int_part = int_part.trim_start_matches('0');
        let frac_part = frac_part.trim_end_matches('0');
        let digits = format!("{}{}", int_part, frac_part);
        if digits.bytes().all(|b| b == b'0') {
            return Ok(Self::ZERO);
        }

        let mantissa = U256::from_str_radix(&digits, 10).map_err(|_| ParseError::Overflow)?;
        let scale = u32::try_from(frac_part.len()).map_err(|_| ParseError::Overflow)?;
        Ok(Self { mantissa, scale })
    }
}

impl fmt::Display for StakeAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.mantissa);
        }
        let digits = format!("{:0>width$}", self.mantissa.to_string(), width = self.scale as usize + 1);
        let split = digits.len() - self.scale as usize;
        write!(f, "{}.{}", &digits[..split], &digits[split..])
    }
}

impl fmt::Debug for StakeAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StakeAmount({})", self)
    }
}

impl Serialize for StakeAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for StakeAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
