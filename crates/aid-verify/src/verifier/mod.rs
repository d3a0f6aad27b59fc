//! Verification orchestration.
//!
//! - [`AgentVerifier`] — the staged pipeline over the accessor traits
//! - [`VerificationDepth`] — how far down the pipeline a run goes
//! - [`VerificationResult`] — the structured verdict a run produces

pub mod engine;
pub mod result;

pub use engine::{AgentVerifier, VerifierConfig};
pub use result::{VerificationDepth, VerificationResult};
