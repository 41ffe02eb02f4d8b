//! Guild SDK - join knowledge-graph guilds on-chain
//!
//! A guild is an atom in the knowledge graph. Joining one means creating the
//! triple `(you, is a member of, guild)` with a stake attached, which first
//! requires an identity atom for your address.
//!
//! # Architecture
//!
//! The SDK owns the orchestration only. Everything protocol-specific sits
//! behind collaborator traits:
//! - **ChainClient**: wallet-backed atom registration and balance reads
//! - **AtomDirectory**: lookup of existing atoms by indexed data
//! - **TripleService**: triple base cost and triple submission
//!
//! # Example
//!
//! ```rust,ignore
//! use guild_sdk::{ChainContext, GraphqlAtomDirectory, DirectoryConfig, GuildJoinOrchestrator,
//!                 JoinRequest, OrchestratorConfig};
//!
//! let config = OrchestratorConfig::default().with_registry(1155, multivault);
//! let directory = GraphqlAtomDirectory::new(DirectoryConfig::default())?;
//! let orchestrator = GuildJoinOrchestrator::new(config, Arc::new(directory));
//!
//! let request = JoinRequest::parse(&wallet_address, &guild_id, "5")?;
//! let ctx = ChainContext::new(1155, wallet_chain, multivault_triples);
//! let joined = orchestrator
//!     .join_guild(request.caller, request.guild, request.stake, &ctx)
//!     .await?;
//! ```

// Value types (addresses, term ids, amounts)
pub mod types;

// Collaborator traits
pub mod traits;

// Guild join orchestration
pub mod join;

// Chain and orchestrator configuration
pub mod config;

// Stake presets
pub mod stake;

// Atom normalization and balance display
pub mod presentation;

// Guild listing
pub mod catalog;

// HTTP collaborators
#[cfg(feature = "client")]
pub mod client;

// Error types
pub mod error;

// Re-export core types
pub use types::{
    Address, Atom, AtomCreation, AtomMatch, BaseUnits, Guild, MembershipClaim, StakeAmount,
    TermId, TransactionReceipt, TxHash, IS_MEMBER_OF,
};

// Re-export collaborator traits
pub use traits::{AtomDirectory, AtomReader, ChainClient, ChainContext, TripleService};

// Re-export join types
pub use join::{
    subject_candidates, GuildJoinOrchestrator, JoinQuote, JoinReceipt, JoinRequest,
    SubjectResolution, SubjectSource,
};

// Re-export configuration
pub use config::{
    ChainConfig, ChainRegistry, Explorer, NativeCurrency, OrchestratorConfig,
    INTUITION_MAINNET_ID, INTUITION_TESTNET_ID,
};

pub use stake::{StakePreset, StakeSelection};
pub use presentation::{format_native_balance, normalize_atom};
pub use catalog::{GuildCatalog, DEFAULT_GUILD_IDS};

#[cfg(feature = "client")]
pub use client::{DirectoryConfig, GraphqlAtomDirectory};

// Re-export error types
pub use error::{ChainError, JoinError, ParseError, Result};
