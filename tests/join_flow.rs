//! End-to-end join flows with recording chain doubles

use async_trait::async_trait;
use guild_sdk::{
    Address, AtomCreation, AtomDirectory, AtomMatch, BaseUnits, ChainClient, ChainContext,
    ChainError, GuildJoinOrchestrator, JoinError, JoinRequest, MembershipClaim,
    OrchestratorConfig, StakePreset, StakeSelection, SubjectSource, TermId, TransactionReceipt,
    TripleService, TxHash, INTUITION_MAINNET_ID, IS_MEMBER_OF,
};
use std::sync::{Arc, Mutex};

const CALLER: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
const GUILD: &str = "0x1e26f83663a1ecad2e6e064cbd2d1bb630fff9d4a33e17b1742c8e994ca8a592";
const REGISTRY: &str = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359";
const ETHER: u128 = 1_000_000_000_000_000_000;

fn wei(amount: u128) -> BaseUnits {
    BaseUnits::from(amount)
}

/// Shared on-chain state: the atoms registered so far
#[derive(Default)]
struct Ledger {
    atoms: Mutex<Vec<(String, TermId)>>,
}

struct LedgerDirectory {
    ledger: Arc<Ledger>,
    lookups: Mutex<Vec<Vec<String>>>,
}

#[async_trait]
impl AtomDirectory for LedgerDirectory {
    async fn find_atom_ids(&self, candidates: &[String]) -> Result<Vec<AtomMatch>, ChainError> {
        self.lookups.lock().unwrap().push(candidates.to_vec());
        let atoms = self.ledger.atoms.lock().unwrap();
        Ok(candidates
            .iter()
            .filter_map(|c| {
                atoms
                    .iter()
                    .find(|(data, _)| data == c)
                    .map(|(data, id)| AtomMatch {
                        term_id: *id,
                        data: Some(data.clone()),
                    })
            })
            .collect())
    }
}

/// Wallet double; optionally loses the creation race to another actor
struct Wallet {
    ledger: Arc<Ledger>,
    lose_race: bool,
    creations: Mutex<u32>,
}

#[async_trait]
impl ChainClient for Wallet {
    async fn create_identity_atom(
        &self,
        _registry: Address,
        owner: Address,
        chain_id: u64,
    ) -> Result<AtomCreation, ChainError> {
        *self.creations.lock().unwrap() += 1;
        let data = format!("caip10:eip155:{}:{}", chain_id, owner);
        let id = TermId::new([0xa1; 32]);
        self.ledger.atoms.lock().unwrap().push((data, id));
        if self.lose_race {
            Err(ChainError::AlreadyExists("AtomExists".to_string()))
        } else {
            Ok(AtomCreation::created(id))
        }
    }

    async fn get_balance(&self, _address: Address) -> Result<BaseUnits, ChainError> {
        Ok(wei(100 * ETHER))
    }
}

#[derive(Default)]
struct Triples {
    submitted: Mutex<Vec<(Address, MembershipClaim, BaseUnits)>>,
}

#[async_trait]
impl TripleService for Triples {
    async fn get_triple_cost(&self, _registry: Address) -> Result<BaseUnits, ChainError> {
        Ok(wei(ETHER / 1000))
    }

    async fn submit_triple(
        &self,
        registry: Address,
        claim: &MembershipClaim,
        value: BaseUnits,
    ) -> Result<TransactionReceipt, ChainError> {
        self.submitted.lock().unwrap().push((registry, *claim, value));
        Ok(TransactionReceipt::new(TxHash::new([0xee; 32])))
    }
}

struct Setup {
    orchestrator: GuildJoinOrchestrator,
    directory: Arc<LedgerDirectory>,
    wallet: Arc<Wallet>,
    triples: Arc<Triples>,
    ctx: ChainContext,
}

fn setup(lose_race: bool) -> Setup {
    let ledger = Arc::new(Ledger::default());
    let directory = Arc::new(LedgerDirectory {
        ledger: ledger.clone(),
        lookups: Mutex::new(Vec::new()),
    });
    let wallet = Arc::new(Wallet {
        ledger,
        lose_race,
        creations: Mutex::new(0),
    });
    let triples = Arc::new(Triples::default());

    let config = OrchestratorConfig::default()
        .with_registry(INTUITION_MAINNET_ID, REGISTRY.parse().unwrap());
    let orchestrator = GuildJoinOrchestrator::new(config, directory.clone());
    let ctx = ChainContext::new(INTUITION_MAINNET_ID, wallet.clone(), triples.clone());

    Setup {
        orchestrator,
        directory,
        wallet,
        triples,
        ctx,
    }
}

#[tokio::test]
async fn test_first_join_creates_identity_and_submits() {
    let s = setup(false);
    let request = JoinRequest::parse(CALLER, GUILD, "5").unwrap();

    let joined = s
        .orchestrator
        .join_guild(request.caller, request.guild, request.stake, &s.ctx)
        .await
        .unwrap();

    assert_eq!(joined.subject.source, SubjectSource::Created);
    assert_eq!(joined.chain_id, INTUITION_MAINNET_ID);
    assert_eq!(joined.stake, wei(5 * ETHER));
    assert_eq!(joined.total_value, wei(5 * ETHER + ETHER / 1000));
    assert_eq!(*s.wallet.creations.lock().unwrap(), 1);

    let lookups = s.directory.lookups.lock().unwrap();
    assert_eq!(
        lookups[0],
        vec![format!("caip10:eip155:1155:{}", CALLER), CALLER.to_string()]
    );

    let submitted = s.triples.submitted.lock().unwrap();
    assert_eq!(submitted.len(), 1);
    let (registry, claim, value) = &submitted[0];
    assert_eq!(registry.to_string(), REGISTRY);
    assert_eq!(claim.subject, TermId::new([0xa1; 32]));
    assert_eq!(claim.predicate, IS_MEMBER_OF);
    assert_eq!(claim.object.to_string(), GUILD);
    assert_eq!(*value, joined.total_value);
}

#[tokio::test]
async fn test_second_join_reuses_identity() {
    let s = setup(false);
    let request = JoinRequest::parse(CALLER, GUILD, "1").unwrap();

    s.orchestrator
        .join_guild(request.caller, request.guild, request.stake, &s.ctx)
        .await
        .unwrap();
    let again = s
        .orchestrator
        .join_guild(request.caller, request.guild, request.stake, &s.ctx)
        .await
        .unwrap();

    assert_eq!(again.subject.source, SubjectSource::Existing);
    assert_eq!(*s.wallet.creations.lock().unwrap(), 1);
    assert_eq!(s.triples.submitted.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_lost_creation_race_is_recovered() {
    let s = setup(true);
    let stake = StakeSelection::preset(StakePreset::Strong).amount().unwrap();

    let joined = s
        .orchestrator
        .join_guild(CALLER.parse().unwrap(), GUILD.parse().unwrap(), stake, &s.ctx)
        .await
        .unwrap();

    assert_eq!(joined.subject.source, SubjectSource::Recovered);
    assert_eq!(joined.subject.term_id, TermId::new([0xa1; 32]));
    assert_eq!(joined.stake, wei(10 * ETHER));
    assert_eq!(s.directory.lookups.lock().unwrap().len(), 2);
    assert_eq!(s.triples.submitted.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_custom_stake_with_fraction() {
    let s = setup(false);
    let stake = StakeSelection::custom("0.25").amount().unwrap();

    let quote = s
        .orchestrator
        .quote_join(CALLER.parse().unwrap(), stake, &s.ctx)
        .await
        .unwrap();
    assert_eq!(quote.stake, wei(ETHER / 4));
    assert_eq!(quote.total_value, wei(ETHER / 4 + ETHER / 1000));
    assert_eq!(quote.is_affordable(), Some(true));

    // quoting never registers or submits
    assert_eq!(*s.wallet.creations.lock().unwrap(), 0);
    assert!(s.triples.submitted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_request_rejected_before_chain() {
    assert!(matches!(
        JoinRequest::parse("not-an-address", GUILD, "5"),
        Err(JoinError::InvalidInput(_))
    ));
    assert!(matches!(
        JoinRequest::parse(CALLER, GUILD, "-1"),
        Err(JoinError::InvalidAmount(_))
    ));

    let s = setup(false);
    let err = s
        .orchestrator
        .join_guild(
            CALLER.parse().unwrap(),
            GUILD.parse().unwrap(),
            StakeSelection::custom("").amount().unwrap(),
            &s.ctx,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, JoinError::InvalidInput(_)));
    assert!(s.directory.lookups.lock().unwrap().is_empty());
}
