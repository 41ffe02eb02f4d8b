//! Guild catalog: the fixed set of guild atoms offered for joining

use crate::presentation::normalize_atom;
use crate::traits::AtomReader;
use crate::types::{Atom, Guild, TermId};
use tracing::{debug, warn};

/// Guilds listed by default
pub const DEFAULT_GUILD_IDS: [&str; 3] = [
    "0x1e26f83663a1ecad2e6e064cbd2d1bb630fff9d4a33e17b1742c8e994ca8a592",
    "0x8c486fd3377cef67861f7137bcc89b188c7f1781314e393e22c1fa6fa24e520e",
    "0x1de157191ec5d1e398819f11b3664b1827d80437d5e6d1db61bbf569f90ae980",
];

/// Guild atoms loaded for display, in listing order
#[derive(Debug, Clone, Default)]
pub struct GuildCatalog {
    atoms: Vec<Atom>,
}

impl GuildCatalog {
    /// Parse [`DEFAULT_GUILD_IDS`]
    pub fn default_ids() -> Vec<TermId> {
        DEFAULT_GUILD_IDS
            .iter()
            .filter_map(|id| id.parse().ok())
            .collect()
    }

    /// Fetch and normalize each guild atom in order.
    ///
    /// Atoms are fetched one at a time. A failed or empty fetch yields the
    /// "Unknown Atom" placeholder so the listing stays complete.
    pub async fn load(reader: &dyn AtomReader, ids: &[TermId]) -> Self {
        let mut atoms = Vec::with_capacity(ids.len());
        for id in ids {
            let record = match reader.fetch_atom(id).await {
                Ok(record) => record,
                Err(e) => {
                    warn!("Failed to fetch guild atom {}: {}", id, e);
                    None
                }
            };
            atoms.push(normalize_atom(record.as_ref(), *id));
        }
        debug!("Loaded {} guild atoms", atoms.len());
        Self { atoms }
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Join targets for every listed atom
    pub fn guilds(&self) -> Vec<Guild> {
        self.atoms.iter().map(Guild::from_atom).collect()
    }

    pub fn get(&self, id: &TermId) -> Option<&Atom> {
        self.atoms.iter().find(|a| a.id == *id)
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}
