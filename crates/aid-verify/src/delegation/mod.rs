//! Delegation proof and its checks.
//!
//! The delegation module provides:
//! - Proof that one identifier is delegated by another, built from the
//!   two parties' event logs alone
//! - Digest verification of the delegator's approval seal
//! - Structural consistency checks between the claim and its anchor

pub mod consistency;
pub mod proof;
pub mod verify;

pub use consistency::{check_consistency, ConsistencyFailure};
pub use proof::DelegationProof;
pub use verify::prove_delegation;
