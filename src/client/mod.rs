//! HTTP-backed collaborators
//!
//! Network implementations of the collaborator traits. Chain writes stay
//! with the wallet integration; only indexer reads live here.

mod graphql_directory;

pub use graphql_directory::{DirectoryConfig, GraphqlAtomDirectory};
