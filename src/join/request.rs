//! Join inputs, subject candidates and outcomes

use crate::error::{JoinError, Result};
use crate::types::{Address, BaseUnits, StakeAmount, TermId, TransactionReceipt};
use serde::{Deserialize, Serialize};

/// A join request parsed from user-facing text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRequest {
    pub caller: Address,
    pub guild: TermId,
    pub stake: StakeAmount,
}

impl JoinRequest {
    /// Parse caller address, guild term id and decimal stake.
    ///
    /// Malformed identifiers are `InvalidInput`; a malformed or negative
    /// stake is `InvalidAmount`.
    pub fn parse(caller: &str, guild: &str, stake: &str) -> Result<Self> {
        let caller: Address = caller
            .parse()
            .map_err(|e| JoinError::InvalidInput(format!("caller address: {}", e)))?;
        let guild: TermId = guild
            .parse()
            .map_err(|e| JoinError::InvalidInput(format!("guild id: {}", e)))?;
        let stake: StakeAmount = stake.parse()?;

        Ok(Self { caller, guild, stake })
    }
}

/// Directory keys the caller's identity atom may be indexed under, highest
/// priority first: the CAIP-10 account id, then the bare checksummed address.
pub fn subject_candidates(caller: &Address, chain_id: u64) -> Vec<String> {
    let checksum = caller.to_checksum();
    vec![format!("caip10:eip155:{}:{}", chain_id, checksum), checksum]
}

/// How the subject atom was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectSource {
    /// Found in the directory on first lookup
    Existing,
    /// Registered on-chain by this join
    Created,
    /// Creation failed but a concurrent registration was found afterwards
    Recovered,
}

/// The resolved subject atom for a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectResolution {
    pub term_id: TermId,
    pub source: SubjectSource,
}

/// Successful join
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinReceipt {
    pub receipt: TransactionReceipt,
    pub chain_id: u64,
    pub subject: SubjectResolution,
    pub guild: TermId,
    pub triple_cost: BaseUnits,
    pub stake: BaseUnits,
    /// Value attached to the triple transaction
    pub total_value: BaseUnits,
}

/// Side-effect free cost preview of a join
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinQuote {
    pub chain_id: u64,
    pub triple_cost: BaseUnits,
    pub stake: BaseUnits,
    pub total_value: BaseUnits,
    /// Caller's native balance; `None` if it could not be queried
    pub balance: Option<BaseUnits>,
}

impl JoinQuote {
    /// Whether the known balance covers the total; `None` when unknown
    pub fn is_affordable(&self) -> Option<bool> {
        self.balance.map(|balance| balance >= self.total_value)
    }
}
