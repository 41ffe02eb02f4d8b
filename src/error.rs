//! Error types for the guild SDK

use thiserror::Error;

/// Result type for join operations
pub type Result<T> = std::result::Result<T, JoinError>;

/// Terminal failures of a guild join.
///
/// None of these are retried inside the orchestrator. Every variant carries
/// the underlying message so callers can display it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JoinError {
    /// Caller address, chain context or stake failed a precondition
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Stake could not be converted to base units, or the total overflowed
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// No subject atom could be found or created for the caller
    #[error("Could not resolve subject atom: {0}")]
    AtomResolutionFailed(String),

    /// Triple base cost could not be quoted
    #[error("Triple cost query failed: {0}")]
    CostQueryFailed(String),

    /// The membership triple transaction failed
    #[error("Transaction submission failed: {0}")]
    SubmissionFailed(String),
}

/// Failures reported by chain, directory and triple collaborators
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// The entity is already registered on-chain
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Wallet or node refused the request
    #[error("Rejected: {0}")]
    Rejected(String),

    /// Transaction reverted on-chain
    #[error("Reverted: {0}")]
    Reverted(String),

    /// Transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// Response could not be interpreted
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ChainError {
    /// Whether this is the benign "already registered" outcome
    pub fn is_already_exists(&self) -> bool {
        matches!(self, ChainError::AlreadyExists(_))
    }
}

#[cfg(feature = "client")]
impl From<reqwest::Error> for ChainError {
    fn from(err: reqwest::Error) -> Self {
        ChainError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ChainError {
    fn from(err: serde_json::Error) -> Self {
        ChainError::InvalidResponse(err.to_string())
    }
}

/// Parse failures for addresses, term ids and decimal amounts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Missing 0x prefix")]
    MissingPrefix,

    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Address checksum mismatch: {0}")]
    BadChecksum(String),

    #[error("Invalid decimal amount: {0:?}")]
    InvalidDecimal(String),

    #[error("Amount must not be negative")]
    Negative,

    #[error("Amount has more than {decimals} fraction digits")]
    PrecisionLoss { decimals: u8 },

    #[error("Amount overflows the base-unit range")]
    Overflow,
}

impl ParseError {
    /// Whether this error concerns a numeric amount rather than an identifier
    pub fn is_amount_error(&self) -> bool {
        matches!(
            self,
            ParseError::InvalidDecimal(_)
                | ParseError::Negative
                | ParseError::PrecisionLoss { .. }
                | ParseError::Overflow
        )
    }
}

impl From<ParseError> for JoinError {
    fn from(err: ParseError) -> Self {
        if err.is_amount_error() {
            JoinError::InvalidAmount(err.to_string())
        } else {
            JoinError::InvalidInput(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_mapping() {
        assert!(matches!(
            JoinError::from(ParseError::Negative),
            JoinError::InvalidAmount(_)
        ));
        assert!(matches!(
            JoinError::from(ParseError::PrecisionLoss { decimals: 18 }),
            JoinError::InvalidAmount(_)
        ));
        assert!(matches!(
            JoinError::from(ParseError::MissingPrefix),
            JoinError::InvalidInput(_)
        ));
    }

    #[test]
    fn test_already_exists() {
        assert!(ChainError::AlreadyExists("atom".into()).is_already_exists());
        assert!(!ChainError::Reverted("out of gas".into()).is_already_exists());
    }
}
