//! Core value types
//!
//! Addresses and term ids are parsed once at the boundary and then passed
//! around as fixed-size byte newtypes.

mod address;
mod amount;
mod atom;
mod ids;

pub use address::Address;
pub use amount::{BaseUnits, StakeAmount};
pub use atom::{Atom, AtomCreation, AtomMatch, Guild, MembershipClaim, TransactionReceipt};
pub use ids::{TermId, TxHash, IS_MEMBER_OF};
