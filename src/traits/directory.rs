//! Atom lookup by indexed data

use crate::error::ChainError;
use crate::types::{AtomMatch, TermId};
use async_trait::async_trait;

/// Lookup of existing atoms by the strings they were created from.
#[async_trait]
pub trait AtomDirectory: Send + Sync {
    /// Find atoms indexed under any of `candidates`.
    ///
    /// An empty result means not found. Results are ordered by candidate
    /// priority: a match for `candidates[0]` comes before one for
    /// `candidates[1]`, so callers take the first entry.
    async fn find_atom_ids(&self, candidates: &[String]) -> Result<Vec<AtomMatch>, ChainError>;
}

/// Raw atom record access for presentation
#[async_trait]
pub trait AtomReader: Send + Sync {
    /// Fetch the indexer's record for an atom; `None` if it is unknown
    async fn fetch_atom(&self, id: &TermId) -> Result<Option<serde_json::Value>, ChainError>;
}
