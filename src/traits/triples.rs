//! Triple cost quotes and statement submission

use crate::error::ChainError;
use crate::types::{Address, BaseUnits, MembershipClaim, TransactionReceipt};
use async_trait::async_trait;

#[async_trait]
pub trait TripleService: Send + Sync {
    /// Protocol base cost of creating one triple on `registry`
    async fn get_triple_cost(&self, registry: Address) -> Result<BaseUnits, ChainError>;

    /// Create `claim` on `registry`, attaching `value` to the transaction.
    ///
    /// `value` is sent exactly once, as the transaction value; it must not
    /// be re-encoded into the call arguments.
    async fn submit_triple(
        &self,
        registry: Address,
        claim: &MembershipClaim,
        value: BaseUnits,
    ) -> Result<TransactionReceipt, ChainError>;
}
