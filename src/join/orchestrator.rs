//! Guild join orchestration
//!
//! Turns "caller X joins guild G with stake S" into one submitted
//! membership triple:
//!
//! ```text
//! caller ──► candidates ──► directory lookup ──┬─► found ─────────────────┐
//!                                              └─► create atom ─┬─► ok ───┤
//!                                                               └─► err ──► re-lookup ─► found ─┤
//!                                                                                                │
//!            submit (subject, is-member-of, guild) ◄── cost + stake ◄── triple cost quote ◄──────┘
//! ```
//!
//! Every step is awaited in order; nothing runs concurrently. Anything
//! broadcast before a failure (e.g. the identity atom) stays on-chain, and a
//! retried join finds it through the directory instead of creating it again.

use crate::config::{ChainConfig, OrchestratorConfig};
use crate::error::{ChainError, JoinError, Result};
use crate::join::request::{
    subject_candidates, JoinQuote, JoinReceipt, SubjectResolution, SubjectSource,
};
use crate::traits::{AtomDirectory, ChainContext};
use crate::types::{Address, AtomCreation, BaseUnits, MembershipClaim, StakeAmount, TermId};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// The chain a join runs on, resolved from context and config
struct ActiveChain<'a> {
    id: u64,
    registry: Address,
    config: &'a ChainConfig,
}

/// Drives guild joins.
///
/// Holds configuration and the atom directory only; chain access arrives
/// per call through [`ChainContext`]. Concurrent joins by the same caller are
/// not guarded here and must be serialized by the caller.
pub struct GuildJoinOrchestrator {
    config: OrchestratorConfig,
    directory: Arc<dyn AtomDirectory>,
}

impl GuildJoinOrchestrator {
    pub fn new(config: OrchestratorConfig, directory: Arc<dyn AtomDirectory>) -> Self {
        Self { config, directory }
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Join `guild` as `caller`, staking `stake` on the membership triple.
    ///
    /// Fails with `InvalidInput` (zero stake, unknown chain, no registry)
    /// or `InvalidAmount` (stake not representable in base units) before any
    /// network call. Later failures are `AtomResolutionFailed`,
    /// `CostQueryFailed` or `SubmissionFailed`.
    pub async fn join_guild(
        &self,
        caller: Address,
        guild: TermId,
        stake: StakeAmount,
        ctx: &ChainContext,
    ) -> Result<JoinReceipt> {
        let result = self.run_join(caller, guild, stake, ctx).await;
        if let Err(ref e) = result {
            error!("Join of guild {} by {} failed: {}", guild, caller, e);
        }
        result
    }

    async fn run_join(
        &self,
        caller: Address,
        guild: TermId,
        stake: StakeAmount,
        ctx: &ChainContext,
    ) -> Result<JoinReceipt> {
        let stake = Self::validate_stake(stake)?;
        let chain = self.active_chain(ctx)?;
        let stake_units = base_units(stake, chain.config)?;

        info!(
            "Joining guild {} as {} on chain {} with stake {} {}",
            guild, caller, chain.id, stake, chain.config.native_currency.symbol
        );

        let subject = self.resolve_subject(caller, chain.id, chain.registry, ctx).await?;

        let triple_cost = ctx
            .triples
            .get_triple_cost(chain.registry)
            .await
            .map_err(|e| JoinError::CostQueryFailed(e.to_string()))?;
        let total_value = checked_total(triple_cost, stake_units)?;
        debug!(
            "Triple cost {} + stake {} = {} base units",
            triple_cost, stake_units, total_value
        );

        let claim = MembershipClaim::with_predicate(subject.term_id, self.config.member_predicate, guild);
        let receipt = ctx
            .triples
            .submit_triple(chain.registry, &claim, total_value)
            .await
            .map_err(|e| JoinError::SubmissionFailed(e.to_string()))?;

        info!(
            "Joined guild {} as {} in transaction {}",
            guild, subject.term_id, receipt.transaction_hash
        );

        Ok(JoinReceipt {
            receipt,
            chain_id: chain.id,
            subject,
            guild,
            triple_cost,
            stake: stake_units,
            total_value,
        })
    }

    /// Preview the value a join would attach, plus the caller's balance.
    ///
    /// Performs only read queries. A failing balance query is reported as an
    /// unknown balance rather than an error.
    pub async fn quote_join(
        &self,
        caller: Address,
        stake: StakeAmount,
        ctx: &ChainContext,
    ) -> Result<JoinQuote> {
        let stake = Self::validate_stake(stake)?;
        let chain = self.active_chain(ctx)?;
        let stake_units = base_units(stake, chain.config)?;

        let triple_cost = ctx
            .triples
            .get_triple_cost(chain.registry)
            .await
            .map_err(|e| JoinError::CostQueryFailed(e.to_string()))?;
        let total_value = checked_total(triple_cost, stake_units)?;

        let balance = match ctx.chain.get_balance(caller).await {
            Ok(balance) => Some(balance),
            Err(e) => {
                warn!("Balance query for {} failed: {}", caller, e);
                None
            }
        };

        Ok(JoinQuote {
            chain_id: chain.id,
            triple_cost,
            stake: stake_units,
            total_value,
            balance,
        })
    }

    /// Find the caller's identity atom, registering it if the directory has none.
    ///
    /// A failed registration is re-checked against the directory: another
    /// actor may have registered the same atom between lookup and creation.
    pub async fn resolve_subject(
        &self,
        caller: Address,
        chain_id: u64,
        registry: Address,
        ctx: &ChainContext,
    ) -> Result<SubjectResolution> {
        let candidates = subject_candidates(&caller, chain_id);
        debug!("Resolving subject atom from candidates {:?}", candidates);

        let existing = self
            .lookup(&candidates)
            .await
            .map_err(|e| JoinError::AtomResolutionFailed(format!("directory lookup failed: {}", e)))?;
        if let Some(term_id) = existing {
            debug!("Found subject atom {} for {}", term_id, caller);
            return Ok(SubjectResolution {
                term_id,
                source: SubjectSource::Existing,
            });
        }

        match ctx.chain.create_identity_atom(registry, caller, chain_id).await {
            Ok(AtomCreation { term_id: Some(term_id), .. }) => {
                info!("Created subject atom {} for {}", term_id, caller);
                Ok(SubjectResolution {
                    term_id,
                    source: SubjectSource::Created,
                })
            }
            Ok(AtomCreation { term_id: None, transaction_hash }) => {
                warn!(
                    "Atom creation for {} returned no term id (tx {:?}), checking directory",
                    caller, transaction_hash
                );
                match self.lookup(&candidates).await {
                    Ok(Some(term_id)) => Ok(SubjectResolution {
                        term_id,
                        source: SubjectSource::Created,
                    }),
                    Ok(None) => Err(JoinError::AtomResolutionFailed(
                        "atom creation returned no term id".to_string(),
                    )),
                    Err(e) => Err(JoinError::AtomResolutionFailed(format!(
                        "atom creation returned no term id; directory lookup failed: {}",
                        e
                    ))),
                }
            }
            Err(create_err) => {
                if create_err.is_already_exists() {
                    info!(
                        "Subject atom for {} was registered concurrently ({}), checking directory",
                        caller, create_err
                    );
                } else {
                    warn!(
                        "Atom creation for {} failed ({}), checking directory before giving up",
                        caller, create_err
                    );
                }
                match self.lookup(&candidates).await {
                    Ok(Some(term_id)) => {
                        info!("Recovered subject atom {} for {}", term_id, caller);
                        Ok(SubjectResolution {
                            term_id,
                            source: SubjectSource::Recovered,
                        })
                    }
                    Ok(None) => Err(JoinError::AtomResolutionFailed(create_err.to_string())),
                    Err(lookup_err) => {
                        debug!("Directory re-check failed: {}", lookup_err);
                        Err(JoinError::AtomResolutionFailed(create_err.to_string()))
                    }
                }
            }
        }
    }

    async fn lookup(&self, candidates: &[String]) -> std::result::Result<Option<TermId>, ChainError> {
        let matches = self.directory.find_atom_ids(candidates).await?;
        Ok(matches.first().map(|m| m.term_id))
    }

    fn validate_stake(stake: StakeAmount) -> Result<StakeAmount> {
        if stake.is_zero() {
            return Err(JoinError::InvalidInput(
                "stake amount must be greater than zero".to_string(),
            ));
        }
        Ok(stake)
    }

    fn active_chain(&self, ctx: &ChainContext) -> Result<ActiveChain<'_>> {
        let id = ctx
            .active_chain_id()
            .or(self.config.default_chain_id)
            .ok_or_else(|| JoinError::InvalidInput("no active chain id".to_string()))?;

        let config = self
            .config
            .chains
            .get(id)
            .ok_or_else(|| JoinError::InvalidInput(format!("chain {} is not configured", id)))?;

        let registry = config.registry_address.ok_or_else(|| {
            JoinError::InvalidInput(format!("no registry contract configured for chain {}", id))
        })?;

        Ok(ActiveChain { id, registry, config })
    }
}

fn base_units(stake: StakeAmount, chain: &ChainConfig) -> Result<BaseUnits> {
    Ok(stake.to_base_units(chain.native_currency.decimals)?)
}

fn checked_total(triple_cost: BaseUnits, stake: BaseUnits) -> Result<BaseUnits> {
    triple_cost.checked_add(stake).ok_or_else(|| {
        JoinError::InvalidAmount(format!(
            "triple cost {} plus stake {} overflows",
            triple_cost, stake
        ))
    })
}
