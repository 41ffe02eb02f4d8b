//! Knowledge-graph records: atoms, guilds, membership claims and receipts

use crate::types::ids::{TermId, TxHash, IS_MEMBER_OF};
use serde::{Deserialize, Serialize};

/// An atom as presented to users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Atom {
    pub id: TermId,
    pub name: String,
    pub description: String,
    pub image: String,
    /// Aggregate number of positions across the atom's vaults, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positions_count: Option<u64>,
}

impl Atom {
    /// Placeholder for an atom whose record could not be loaded
    pub fn unknown(id: TermId) -> Self {
        Self {
            id,
            name: "Unknown Atom".to_string(),
            description: String::new(),
            image: String::new(),
            positions_count: None,
        }
    }
}

/// An atom used as the object of a membership triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guild {
    pub id: TermId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Guild {
    pub fn new(id: TermId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Build the guild shown for an atom; an unnamed atom is labelled by its id
    pub fn from_atom(atom: &Atom) -> Self {
        let name = if atom.name.is_empty() {
            atom.id.to_string()
        } else {
            atom.name.clone()
        };
        Self {
            id: atom.id,
            name,
            image: (!atom.image.is_empty()).then(|| atom.image.clone()),
        }
    }
}

/// The statement `(subject, predicate, object)` submitted as a triple.
///
/// Carries no value: the stake and base cost travel only as the
/// transaction's attached value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MembershipClaim {
    pub subject: TermId,
    pub predicate: TermId,
    pub object: TermId,
}

impl MembershipClaim {
    /// `subject` is a member of `guild`
    pub fn member_of(subject: TermId, guild: TermId) -> Self {
        Self::with_predicate(subject, IS_MEMBER_OF, guild)
    }

    pub fn with_predicate(subject: TermId, predicate: TermId, object: TermId) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

/// A directory hit for one of the candidate keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomMatch {
    pub term_id: TermId,
    /// The indexed atom data the match was found under, if reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl AtomMatch {
    pub fn new(term_id: TermId) -> Self {
        Self { term_id, data: None }
    }
}

/// Result of registering a new atom on-chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomCreation {
    /// Term id decoded from the creation event; absent if the receipt
    /// carried no decodable event
    pub term_id: Option<TermId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<TxHash>,
}

impl AtomCreation {
    pub fn created(term_id: TermId) -> Self {
        Self {
            term_id: Some(term_id),
            transaction_hash: None,
        }
    }
}

/// Receipt of a mined transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub transaction_hash: TxHash,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    /// Id of the triple created by the transaction, if decoded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triple_id: Option<TermId>,
}

impl TransactionReceipt {
    pub fn new(transaction_hash: TxHash) -> Self {
        Self {
            transaction_hash,
            block_number: None,
            triple_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(byte: u8) -> TermId {
        TermId::new([byte; 32])
    }

    #[test]
    fn test_guild_from_unnamed_atom() {
        let mut atom = Atom::unknown(id(1));
        atom.name.clear();
        let guild = Guild::from_atom(&atom);
        assert_eq!(guild.name, id(1).to_string());
        assert_eq!(guild.image, None);
    }

    #[test]
    fn test_guild_keeps_name_and_image() {
        let atom = Atom {
            id: id(2),
            name: "Builders".into(),
            description: String::new(),
            image: "https://img/builders.png".into(),
            positions_count: Some(3),
        };
        let guild = Guild::from_atom(&atom);
        assert_eq!(guild.name, "Builders");
        assert_eq!(guild.image.as_deref(), Some("https://img/builders.png"));
    }

    #[test]
    fn test_member_of_uses_fixed_predicate() {
        let claim = MembershipClaim::member_of(id(1), id(2));
        assert_eq!(claim.predicate, IS_MEMBER_OF);
        assert_eq!(claim.subject, id(1));
        assert_eq!(claim.object, id(2));
    }
}
