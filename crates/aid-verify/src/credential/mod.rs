//! Role credentials and the issuance chain.
//!
//! The credential module provides:
//! - Schema role tags with the published vLEI schema SAIDs
//! - The credential record (SAID, issuer, subject, schema, status)
//! - Leaf-to-root chain construction with cycle and length bounds
//! - Revocation records and the chain revocation sweep

pub mod chain;
#[allow(clippy::module_inception)]
pub mod credential;
pub mod revocation;
pub mod schema;

pub use chain::{walk_chain, CredentialChain, MAX_CHAIN_LEN, MIN_CHAIN_LEN};
pub use credential::{Credential, CredentialStatus};
pub use revocation::{check_revocations, RevocationReason, RevocationRecord};
pub use schema::{schema_said, CredentialSchema};
