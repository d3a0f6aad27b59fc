//! Verification verdicts and pipeline depth selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::credential::CredentialChain;
use crate::error::VerifyError;
use crate::time::now_micros;

/// How far down the verification pipeline a run goes.
///
/// Levels are ordered; each level runs everything the previous one runs.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum VerificationDepth {
    /// Parse both identifiers; touch no store.
    FormatOnly,
    /// Both identifiers must resolve to a known key state.
    ExistenceOnly,
    /// Delegation proof and consistency checks must pass.
    DelegationOnly,
    /// Delegation plus credential chain walk and revocation sweep.
    #[default]
    FullChain,
}

impl VerificationDepth {
    /// Stable string form, matching the serde encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FormatOnly => "format_only",
            Self::ExistenceOnly => "existence_only",
            Self::DelegationOnly => "delegation_only",
            Self::FullChain => "full_chain",
        }
    }
}

impl fmt::Display for VerificationDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationDepth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "format_only" => Ok(Self::FormatOnly),
            "existence_only" => Ok(Self::ExistenceOnly),
            "delegation_only" => Ok(Self::DelegationOnly),
            "full_chain" => Ok(Self::FullChain),
            other => Err(format!("unknown verification depth: {other}")),
        }
    }
}

/// Outcome of a verification run.
///
/// A result with `valid == false` is a reached verdict of rejection;
/// runs the engine could not complete (accessor faults) never produce a
/// result at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Did every requested stage pass?
    pub valid: bool,
    /// The agent identifier exactly as supplied by the caller.
    pub subject_aid: String,
    /// The claimed delegator (OOR holder) exactly as supplied.
    pub delegator_aid: String,
    /// The depth the run was performed at.
    pub depth: VerificationDepth,
    /// The resolved credential chain, present on full-chain success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain: Option<CredentialChain>,
    /// The first failure encountered, present when `valid` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<VerifyError>,
    /// Verification timestamp (Unix epoch microseconds).
    pub verified_at: u64,
}

impl VerificationResult {
    pub(crate) fn pass(
        subject_aid: &str,
        delegator_aid: &str,
        depth: VerificationDepth,
        chain: Option<CredentialChain>,
    ) -> Self {
        Self {
            valid: true,
            subject_aid: subject_aid.to_string(),
            delegator_aid: delegator_aid.to_string(),
            depth,
            chain,
            failure_reason: None,
            verified_at: now_micros(),
        }
    }

    pub(crate) fn fail(
        subject_aid: &str,
        delegator_aid: &str,
        depth: VerificationDepth,
        reason: VerifyError,
    ) -> Self {
        Self {
            valid: false,
            subject_aid: subject_aid.to_string(),
            delegator_aid: delegator_aid.to_string(),
            depth,
            chain: None,
            failure_reason: Some(reason),
            verified_at: now_micros(),
        }
    }
}
