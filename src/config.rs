//! Chain and orchestrator configuration

use crate::types::{Address, TermId, IS_MEMBER_OF};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Chain id of Intuition mainnet
pub const INTUITION_MAINNET_ID: u64 = 1155;

/// Chain id of Intuition testnet
pub const INTUITION_TESTNET_ID: u64 = 13579;

/// Native currency of a chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    /// Fraction digits between display units and base units
    pub decimals: u8,
}

/// Block explorer endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explorer {
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

/// Static description of a chain the SDK can join guilds on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    pub id: u64,
    pub name: String,
    pub network: String,
    pub native_currency: NativeCurrency,
    #[serde(default)]
    pub rpc_http: Vec<String>,
    #[serde(default)]
    pub rpc_ws: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explorer: Option<Explorer>,
    #[serde(default)]
    pub testnet: bool,
    /// Triple registry (MultiVault) contract; joins fail without one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_address: Option<Address>,
    /// Indexer GraphQL endpoint backing the atom directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphql_url: Option<String>,
}

impl ChainConfig {
    /// Intuition mainnet
    pub fn intuition_mainnet() -> Self {
        Self {
            id: INTUITION_MAINNET_ID,
            name: "Intuition".to_string(),
            network: "intuition".to_string(),
            native_currency: NativeCurrency {
                name: "TRUST".to_string(),
                symbol: "TRUST".to_string(),
                decimals: 18,
            },
            rpc_http: vec!["https://rpc.intuition.systems/http".to_string()],
            rpc_ws: Vec::new(),
            explorer: Some(Explorer {
                name: "IntuitionScan".to_string(),
                url: "https://explorer.intuition.systems/".to_string(),
                api_url: Some("https://explorer.intuition.systems/api".to_string()),
            }),
            testnet: false,
            registry_address: None,
            graphql_url: Some("https://mainnet.intuition.sh/v1/graphql".to_string()),
        }
    }

    /// Intuition testnet
    pub fn intuition_testnet() -> Self {
        Self {
            id: INTUITION_TESTNET_ID,
            name: "Intuition Testnet".to_string(),
            network: "intuition-testnet".to_string(),
            native_currency: NativeCurrency {
                name: "Testnet TRUST".to_string(),
                symbol: "TTRUST".to_string(),
                decimals: 18,
            },
            rpc_http: vec!["https://testnet.rpc.intuition.systems".to_string()],
            rpc_ws: vec!["wss://testnet.rpc.intuition.systems/ws".to_string()],
            explorer: Some(Explorer {
                name: "IntuitionScan (Testnet)".to_string(),
                url: "https://testnet.explorer.intuition.systems/".to_string(),
                api_url: Some("https://testnet.explorer.intuition.systems/api".to_string()),
            }),
            testnet: true,
            registry_address: None,
            graphql_url: Some("https://testnet.intuition.sh/v1/graphql".to_string()),
        }
    }

    /// Set the triple registry contract
    pub fn with_registry(mut self, registry: Address) -> Self {
        self.registry_address = Some(registry);
        self
    }

    /// Set the indexer GraphQL endpoint
    pub fn with_graphql_url(mut self, url: impl Into<String>) -> Self {
        self.graphql_url = Some(url.into());
        self
    }

    /// Explorer link for a transaction hash, if an explorer is configured
    pub fn explorer_tx_url(&self, tx_hash: &str) -> Option<String> {
        self.explorer
            .as_ref()
            .map(|e| format!("{}/tx/{}", e.url.trim_end_matches('/'), tx_hash))
    }
}

/// Known chains by id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainRegistry {
    chains: BTreeMap<u64, ChainConfig>,
}

impl ChainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Both Intuition networks
    pub fn intuition() -> Self {
        Self::new()
            .with_chain(ChainConfig::intuition_testnet())
            .with_chain(ChainConfig::intuition_mainnet())
    }

    /// Add or replace a chain
    pub fn with_chain(mut self, chain: ChainConfig) -> Self {
        self.insert(chain);
        self
    }

    pub fn insert(&mut self, chain: ChainConfig) {
        self.chains.insert(chain.id, chain);
    }

    pub fn get(&self, chain_id: u64) -> Option<&ChainConfig> {
        self.chains.get(&chain_id)
    }

    pub fn get_mut(&mut self, chain_id: u64) -> Option<&mut ChainConfig> {
        self.chains.get_mut(&chain_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChainConfig> {
        self.chains.values()
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

/// Configuration for the guild join orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Predicate of the membership triple
    #[serde(default = "default_member_predicate")]
    pub member_predicate: TermId,
    /// Chain used when neither wallet nor account reports one
    #[serde(default = "default_chain_id")]
    pub default_chain_id: Option<u64>,
    /// Chains joins may run on
    #[serde(default = "ChainRegistry::intuition")]
    pub chains: ChainRegistry,
}

fn default_member_predicate() -> TermId {
    IS_MEMBER_OF
}

fn default_chain_id() -> Option<u64> {
    Some(INTUITION_MAINNET_ID)
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            member_predicate: default_member_predicate(),
            default_chain_id: default_chain_id(),
            chains: ChainRegistry::intuition(),
        }
    }
}

impl OrchestratorConfig {
    /// Load from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Configuration with a single chain and no fallback chain id
    pub fn single_chain(chain: ChainConfig) -> Self {
        Self {
            member_predicate: default_member_predicate(),
            default_chain_id: None,
            chains: ChainRegistry::new().with_chain(chain),
        }
    }

    pub fn with_chain(mut self, chain: ChainConfig) -> Self {
        self.chains.insert(chain);
        self
    }

    pub fn with_default_chain_id(mut self, chain_id: Option<u64>) -> Self {
        self.default_chain_id = chain_id;
        self
    }

    /// Set the registry contract of an already configured chain
    pub fn with_registry(mut self, chain_id: u64, registry: Address) -> Self {
        if let Some(chain) = self.chains.get_mut(chain_id) {
            chain.registry_address = Some(registry);
        }
        self
    }
}
