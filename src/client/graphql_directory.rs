//! Atom directory backed by the protocol indexer's GraphQL API

use crate::config::ChainConfig;
use crate::error::ChainError;
use crate::traits::{AtomDirectory, AtomReader};
use crate::types::{AtomMatch, TermId};
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const FIND_ATOM_IDS: &str = r#"query FindAtomIds($data: [String!]!) {
  atoms(where: { data: { _in: $data } }) {
    term_id
    data
  }
}"#;

const GET_ATOM: &str = r#"query GetAtom($id: String!) {
  atom(term_id: $id) {
    term_id
    label
    image
    data
    type
    value {
      thing { name description image }
      person { name description image }
      organization { name description image }
      account { name: label image }
    }
    term {
      vaults { positions_aggregate { aggregate { count } } }
    }
  }
}"#;

/// Directory client configuration
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// Indexer GraphQL endpoint
    pub graphql_url: String,
    /// Optional API key, sent as a bearer token
    pub api_key: Option<String>,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            graphql_url: "https://mainnet.intuition.sh/v1/graphql".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

impl DirectoryConfig {
    /// Configuration for a chain's indexer, if it has one
    pub fn for_chain(chain: &ChainConfig) -> Option<Self> {
        chain.graphql_url.as_ref().map(|url| Self {
            graphql_url: url.clone(),
            ..Default::default()
        })
    }
}

#[derive(Serialize)]
struct GraphqlRequest<'a, V: Serialize> {
    query: &'a str,
    variables: V,
}

#[derive(Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlMessage>,
}

#[derive(Deserialize)]
struct GraphqlMessage {
    message: String,
}

#[derive(Deserialize)]
struct AtomsData {
    atoms: Vec<AtomRow>,
}

#[derive(Deserialize)]
struct AtomRow {
    term_id: TermId,
    #[serde(default)]
    data: Option<String>,
}

#[derive(Deserialize)]
struct AtomData {
    atom: Option<serde_json::Value>,
}

/// GraphQL client for atom lookups
///
/// # Example
///
/// ```rust,no_run
/// use guild_sdk::{AtomDirectory, DirectoryConfig, GraphqlAtomDirectory};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let directory = GraphqlAtomDirectory::new(DirectoryConfig::default())?;
/// let matches = directory
///     .find_atom_ids(&["0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".to_string()])
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct GraphqlAtomDirectory {
    config: DirectoryConfig,
    client: Client,
}

impl GraphqlAtomDirectory {
    pub fn new(config: DirectoryConfig) -> Result<Self, ChainError> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref api_key) = config.api_key {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|e| ChainError::InvalidResponse(format!("invalid API key: {}", e)))?;
            headers.insert(header::AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    async fn query<V: Serialize, T: for<'de> Deserialize<'de>>(
        &self,
        query: &str,
        variables: V,
    ) -> Result<T, ChainError> {
        let response = self
            .client
            .post(&self.config.graphql_url)
            .json(&GraphqlRequest { query, variables })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ChainError::Network(format!("HTTP {} - {}", status, body)));
        }

        let body: GraphqlResponse<T> = response.json().await?;
        if !body.errors.is_empty() {
            let messages: Vec<String> = body.errors.into_iter().map(|e| e.message).collect();
            return Err(ChainError::InvalidResponse(messages.join("; ")));
        }

        body.data
            .ok_or_else(|| ChainError::InvalidResponse("response carried no data".to_string()))
    }
}

#[async_trait]
impl AtomDirectory for GraphqlAtomDirectory {
    async fn find_atom_ids(&self, candidates: &[String]) -> Result<Vec<AtomMatch>, ChainError> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let data: AtomsData = self
            .query(FIND_ATOM_IDS, serde_json::json!({ "data": candidates }))
            .await?;

        let mut rows = data.atoms;
        // indexer order is unspecified; rank by candidate priority
        rows.sort_by_key(|row| {
            row.data
                .as_ref()
                .and_then(|d| candidates.iter().position(|c| c == d))
                .unwrap_or(usize::MAX)
        });

        tracing::debug!("Directory matched {} atom(s) for {} candidate(s)", rows.len(), candidates.len());

        Ok(rows
            .into_iter()
            .map(|row| AtomMatch {
                term_id: row.term_id,
                data: row.data,
            })
            .collect())
    }
}

#[async_trait]
impl AtomReader for GraphqlAtomDirectory {
    async fn fetch_atom(&self, id: &TermId) -> Result<Option<serde_json::Value>, ChainError> {
        let data: AtomData = self
            .query(GET_ATOM, serde_json::json!({ "id": id.to_string() }))
            .await?;
        Ok(data.atom.filter(|atom| !atom.is_null()))
    }
}
