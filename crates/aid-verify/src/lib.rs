//! AID Verify — delegation and credential-chain verification for
//! autonomic identifiers.
//!
//! Answers one question: is this agent identifier a delegated AID whose
//! delegator holds a role credential chaining back, unrevoked, to an
//! ecosystem root? The engine proves the delegation from both parties'
//! key event logs, checks the proof for internal consistency, walks the
//! holder's credential chain leaf to root, sweeps it for revocations,
//! and reports a structured verdict.

pub mod aid;
pub mod credential;
pub mod delegation;
pub mod error;
pub mod kel;
pub mod store;
pub mod time;
pub mod verifier;

// Re-export primary types
pub use aid::{Aid, Said};
pub use error::{Result, StoreError, VerifyError};
pub use verifier::{AgentVerifier, VerificationDepth, VerificationResult, VerifierConfig};

// Re-export key-event-log types
pub use kel::{Event, EventType, KeyState, Seal};

// Re-export credential types
pub use credential::{
    check_revocations, walk_chain, Credential, CredentialChain, CredentialSchema,
    CredentialStatus, RevocationReason, RevocationRecord, MAX_CHAIN_LEN, MIN_CHAIN_LEN,
};

// Re-export delegation types
pub use delegation::{check_consistency, prove_delegation, ConsistencyFailure, DelegationProof};

// Re-export store types
pub use store::{CredentialStore, EventStore, FileStore, MemoryStore, RevocationRegistry};
