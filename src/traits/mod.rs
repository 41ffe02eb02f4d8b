//! Collaborator traits
//!
//! The join flow talks to the chain, the atom directory and the triple
//! contract only through these interfaces, so any SDK or test double can be
//! plugged in.

mod chain;
mod directory;
mod triples;

pub use chain::{ChainClient, ChainContext};
pub use directory::{AtomDirectory, AtomReader};
pub use triples::TripleService;
