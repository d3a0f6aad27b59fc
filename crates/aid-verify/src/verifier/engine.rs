//! The verification pipeline.
//!
//! A run walks these stages in order, stopping at the first failure:
//!
//! 1. Format check on both identifiers (no store I/O yet)
//! 2. Existence of both key states
//! 3. Delegation proof over the two event logs
//! 4. Consistency checks over the assembled proof
//! 5. Leaf credential fetch (the holder's OOR credential)
//! 6. Credential chain walk, leaf to root
//! 7. Revocation sweep over the resolved chain
//!
//! Every stage failure lands in `VerificationResult::failure_reason`;
//! the only `Err` a caller ever sees is `AccessorUnavailable`, meaning
//! the verdict could not be reached at all.

use std::sync::Arc;

use crate::aid::Aid;
use crate::credential::{check_revocations, walk_chain, CredentialChain, CredentialSchema};
use crate::delegation::{check_consistency, prove_delegation};
use crate::error::{Result, VerifyError};
use crate::store::{CredentialStore, EventStore, RevocationRegistry};

use super::result::{VerificationDepth, VerificationResult};

/// Engine configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerifierConfig {
    /// Pipeline depth used when a run does not name its own.
    pub depth: VerificationDepth,
}

/// The delegation and credential-chain verification engine.
///
/// Accessors ride behind `Arc` so one engine serves any number of
/// concurrent verifications. Runs are request-scoped: nothing is cached
/// between them, and every verdict reflects store state at the time of
/// the run.
pub struct AgentVerifier {
    events: Arc<dyn EventStore>,
    credentials: Arc<dyn CredentialStore>,
    revocations: Arc<dyn RevocationRegistry>,
    config: VerifierConfig,
}

impl AgentVerifier {
    /// Assemble an engine from its three accessors.
    pub fn new(
        events: Arc<dyn EventStore>,
        credentials: Arc<dyn CredentialStore>,
        revocations: Arc<dyn RevocationRegistry>,
        config: VerifierConfig,
    ) -> Self {
        Self {
            events,
            credentials,
            revocations,
            config,
        }
    }

    /// The configuration the engine was built with.
    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Verify that `agent_aid` is a delegated identifier whose delegator
    /// is `oor_holder_aid`, backed by that holder's credential chain.
    ///
    /// Runs at the configured depth. See [`verify_at_depth`](Self::verify_at_depth).
    pub async fn verify_agent_delegation(
        &self,
        agent_aid: &str,
        oor_holder_aid: &str,
    ) -> Result<VerificationResult> {
        self.verify_at_depth(agent_aid, oor_holder_aid, self.config.depth)
            .await
    }

    /// Verify at an explicit depth, overriding the configured one.
    ///
    /// # Errors
    ///
    /// Returns `Err` only for `AccessorUnavailable`. Every other failure
    /// is a reached verdict and comes back as `Ok` with `valid == false`
    /// and a populated `failure_reason`.
    pub async fn verify_at_depth(
        &self,
        agent_aid: &str,
        oor_holder_aid: &str,
        depth: VerificationDepth,
    ) -> Result<VerificationResult> {
        match self.run_pipeline(agent_aid, oor_holder_aid, depth).await {
            Ok(chain) => Ok(VerificationResult::pass(
                agent_aid,
                oor_holder_aid,
                depth,
                chain,
            )),
            Err(err) if err.is_accessor_fault() => Err(err),
            Err(reason) => Ok(VerificationResult::fail(
                agent_aid,
                oor_holder_aid,
                depth,
                reason,
            )),
        }
    }

    /// Run the stages up to `depth`. `Ok` carries the resolved chain
    /// when the run went deep enough to walk one.
    async fn run_pipeline(
        &self,
        agent_aid: &str,
        oor_holder_aid: &str,
        depth: VerificationDepth,
    ) -> Result<Option<CredentialChain>> {
        // 1. Format checks, before any accessor I/O.
        let agent = Aid::parse(agent_aid)?;
        let holder = Aid::parse(oor_holder_aid)?;
        if depth == VerificationDepth::FormatOnly {
            return Ok(None);
        }

        // 2. Existence: both parties must resolve to a key state. Deeper
        // runs fold this into the delegation proof itself.
        if depth == VerificationDepth::ExistenceOnly {
            for aid in [&agent, &holder] {
                if self.events.key_state(aid).await?.is_none() {
                    return Err(VerifyError::UnknownIdentifier { aid: aid.clone() });
                }
            }
            return Ok(None);
        }

        // 3. Delegation proof over the two event logs.
        let proof = prove_delegation(self.events.as_ref(), &agent, &holder).await?;

        // 4. Consistency checks over the assembled proof.
        check_consistency(&proof)
            .map_err(|failures| VerifyError::ConsistencyFailed { failures })?;
        if depth == VerificationDepth::DelegationOnly {
            return Ok(None);
        }

        // 5. Leaf credential: the holder's OOR credential.
        let leaf = self
            .credentials
            .credential_by_subject_and_schema(&holder, &CredentialSchema::Oor)
            .await?
            .ok_or_else(|| VerifyError::CredentialNotFound {
                subject: holder.clone(),
                schema: CredentialSchema::Oor,
            })?;

        // 6. Chain walk, leaf to root.
        let chain = walk_chain(self.credentials.as_ref(), leaf).await?;

        // 7. Revocation sweep over the resolved chain.
        check_revocations(self.revocations.as_ref(), &chain).await?;

        Ok(Some(chain))
    }
}
