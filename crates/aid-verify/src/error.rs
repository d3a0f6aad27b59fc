//! Error types for the verification engine.
//!
//! Every rejection the engine can produce is a typed variant, and the
//! whole taxonomy is serializable so a transport can pass the structured
//! failure reason through unchanged. Accessor faults travel in the
//! `AccessorUnavailable` variant, kept apart from genuine verdicts: a
//! caller reads it as "verification could not be performed", not
//! "verification failed".

use serde::{Deserialize, Serialize};

use crate::aid::{Aid, Said};
use crate::credential::{CredentialSchema, MAX_CHAIN_LEN, MIN_CHAIN_LEN};
use crate::delegation::ConsistencyFailure;

/// Fault reported by a store implementation.
///
/// Message-carrying so the error taxonomy stays cloneable and
/// serializable; the originating error is rendered into `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("io: {err}"))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("malformed record: {err}"))
    }
}

/// Verification failure taxonomy, covering every pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VerifyError {
    #[error("Invalid identifier format: {aid}")]
    InvalidIdentifierFormat { aid: String },

    #[error("Unknown identifier: {aid}")]
    UnknownIdentifier { aid: Aid },

    #[error("Identifier is not delegated: {aid}")]
    NotDelegated { aid: Aid },

    #[error("Delegator mismatch: expected {expected}, actual {actual}")]
    DelegatorMismatch { actual: Aid, expected: Aid },

    #[error("No digest-verified seal for {delegatee} in the log of {delegator}")]
    SealNotFound { delegatee: Aid, delegator: Aid },

    #[error("Delegation consistency failed: {} check(s) violated", .failures.len())]
    ConsistencyFailed { failures: Vec<ConsistencyFailure> },

    #[error("No {schema} credential found for subject {subject}")]
    CredentialNotFound {
        subject: Aid,
        schema: CredentialSchema,
    },

    #[error("Credential chain broken at index {index}: expected subject {expected}, found {found}")]
    ChainBroken {
        index: usize,
        expected: Aid,
        found: Aid,
    },

    #[error("Credential chain too short: {length} links (minimum {})", MIN_CHAIN_LEN)]
    ChainTooShort { length: usize },

    #[error("Credential chain exceeded {} links", MAX_CHAIN_LEN)]
    ChainTooLong { length: usize },

    #[error("Credential at chain index {chain_index} is revoked: {said}")]
    RevokedCredential { chain_index: usize, said: Said },

    #[error("Accessor unavailable: {0}")]
    AccessorUnavailable(#[from] StoreError),
}

impl VerifyError {
    /// True for faults of the accessor layer rather than verdicts about
    /// the verified parties.
    pub fn is_accessor_fault(&self) -> bool {
        matches!(self, VerifyError::AccessorUnavailable(_))
    }
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, VerifyError>;
