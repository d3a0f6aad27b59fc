//! Revocation records and the chain revocation sweep.

use serde::{Deserialize, Serialize};

use crate::aid::{Aid, Said};
use crate::credential::chain::CredentialChain;
use crate::credential::credential::CredentialStatus;
use crate::error::{Result, VerifyError};
use crate::store::RevocationRegistry;
use crate::time::now_micros;

/// Why a credential was revoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevocationReason {
    /// Key or holder compromise.
    Compromised,
    /// Replaced by a newer credential.
    Superseded,
    /// Should never have been issued.
    Misissued,
    /// Passed its validity period.
    Expired,
    /// Anything else, with a free-form note.
    Other(String),
}

impl RevocationReason {
    pub fn as_str(&self) -> &str {
        match self {
            RevocationReason::Compromised => "compromised",
            RevocationReason::Superseded => "superseded",
            RevocationReason::Misissued => "misissued",
            RevocationReason::Expired => "expired",
            RevocationReason::Other(note) => note,
        }
    }
}

/// What a registry stores about one revocation.
///
/// The engine never writes these; they are the registry-side state that
/// `is_revoked` answers from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationRecord {
    /// SAID of the revoked credential.
    pub said: Said,
    /// Identifier that performed the revocation, usually the issuer.
    pub revoker: Aid,
    /// Unix epoch microseconds.
    pub revoked_at: u64,
    pub reason: RevocationReason,
}

impl RevocationRecord {
    pub fn new(said: Said, revoker: Aid, reason: RevocationReason) -> Self {
        Self {
            said,
            revoker,
            revoked_at: now_micros(),
            reason,
        }
    }
}

/// Check every chain member against the revocation registry.
///
/// Traversal is leaf-to-root so the most specific credential is checked
/// first. A member admitted with a `Revoked` status counts as a hit even
/// when the registry holds no matching record; the first revoked member
/// ends the sweep with `RevokedCredential { chain_index, said }`.
pub async fn check_revocations(
    registry: &dyn RevocationRegistry,
    chain: &CredentialChain,
) -> Result<()> {
    for (index, credential) in chain.iter().enumerate() {
        if credential.status == CredentialStatus::Revoked
            || registry.is_revoked(&credential.said).await?
        {
            return Err(VerifyError::RevokedCredential {
                chain_index: index,
                said: credential.said.clone(),
            });
        }
    }
    Ok(())
}
