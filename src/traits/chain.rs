//! Chain access: wallet-backed writes and read queries

use crate::error::ChainError;
use crate::traits::TripleService;
use crate::types::{Address, AtomCreation, BaseUnits};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Read/write access to the active chain through the connected wallet.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Register the identity atom for `owner` on the `registry` contract.
    ///
    /// This is a zero-value registration call. Implementations report an
    /// atom that is already registered as `ChainError::AlreadyExists`.
    async fn create_identity_atom(
        &self,
        registry: Address,
        owner: Address,
        chain_id: u64,
    ) -> Result<AtomCreation, ChainError>;

    /// Native balance of `address`, in base units
    async fn get_balance(&self, address: Address) -> Result<BaseUnits, ChainError>;
}

/// Per-invocation chain capabilities.
///
/// Passed explicitly to every join; the orchestrator never caches it.
#[derive(Clone)]
pub struct ChainContext {
    /// Chain the wallet is currently connected to
    pub wallet_chain_id: Option<u64>,
    /// Chain reported for the connected account
    pub account_chain_id: Option<u64>,
    /// Transacting and balance access
    pub chain: Arc<dyn ChainClient>,
    /// Triple cost quotes and submission
    pub triples: Arc<dyn TripleService>,
}

impl ChainContext {
    /// Context for a wallet connected to `chain_id`
    pub fn new(chain_id: u64, chain: Arc<dyn ChainClient>, triples: Arc<dyn TripleService>) -> Self {
        Self {
            wallet_chain_id: Some(chain_id),
            account_chain_id: None,
            chain,
            triples,
        }
    }

    /// Context where neither wallet nor account has reported a chain yet
    pub fn unconnected(chain: Arc<dyn ChainClient>, triples: Arc<dyn TripleService>) -> Self {
        Self {
            wallet_chain_id: None,
            account_chain_id: None,
            chain,
            triples,
        }
    }

    pub fn with_account_chain_id(mut self, chain_id: u64) -> Self {
        self.account_chain_id = Some(chain_id);
        self
    }

    /// The wallet's chain, falling back to the account's
    pub fn active_chain_id(&self) -> Option<u64> {
        self.wallet_chain_id.or(self.account_chain_id)
    }
}

impl fmt::Debug for ChainContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainContext")
            .field("wallet_chain_id", &self.wallet_chain_id)
            .field("account_chain_id", &self.account_chain_id)
            .finish_non_exhaustive()
    }
}
