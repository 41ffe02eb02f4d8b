//! Guild join flow
//!
//! Resolves (or registers) the caller's identity atom, prices the membership
//! triple and submits it with the stake attached.

mod orchestrator;
mod request;

pub use orchestrator::GuildJoinOrchestrator;
pub use request::{
    subject_candidates, JoinQuote, JoinReceipt, JoinRequest, SubjectResolution, SubjectSource,
};
