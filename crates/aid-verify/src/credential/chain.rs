//! Credential chain construction.
//!
//! A chain is walked strictly leaf-to-root: the credential whose subject
//! is the current credential's issuer is the next link up. The walk ends
//! at the first issuer holding no credential (the trust anchor). Bounds
//! terminate malformed and cyclic credential graphs.

use serde::{Deserialize, Serialize};

use crate::credential::credential::Credential;
use crate::error::{Result, VerifyError};
use crate::store::CredentialStore;

/// Minimum acceptable chain length (role, its authorization, and the
/// legal entity at the least).
pub const MIN_CHAIN_LEN: usize = 3;

/// Maximum chain length walked before the graph is declared malformed.
pub const MAX_CHAIN_LEN: usize = 10;

/// Ordered credential chain. Index 0 is the leaf (most specific role);
/// the last entry is the closest credential to the root issuer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialChain(Vec<Credential>);

impl CredentialChain {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The most specific credential, where the walk started.
    pub fn leaf(&self) -> Option<&Credential> {
        self.0.first()
    }

    /// The last resolved credential, closest to the trust anchor.
    pub fn root(&self) -> Option<&Credential> {
        self.0.last()
    }

    pub fn get(&self, index: usize) -> Option<&Credential> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Credential> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Credential] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a CredentialChain {
    type Item = &'a Credential;
    type IntoIter = std::slice::Iter<'a, Credential>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Walk from `leaf` up to the root issuer.
///
/// Each step resolves the credential whose subject is the current
/// issuer. Termination and rejection:
/// - issuer holds no credential: the chain ends there;
/// - more than [`MAX_CHAIN_LEN`] links: `ChainTooLong` (cycle guard);
/// - fewer than [`MIN_CHAIN_LEN`] links at the end: `ChainTooShort`;
/// - a resolved credential whose subject is not the queried issuer:
///   `ChainBroken`, never silently skipped.
pub async fn walk_chain(store: &dyn CredentialStore, leaf: Credential) -> Result<CredentialChain> {
    let mut chain = vec![leaf];
    loop {
        if chain.len() > MAX_CHAIN_LEN {
            return Err(VerifyError::ChainTooLong {
                length: chain.len(),
            });
        }
        // chain is never empty: it starts with the leaf
        let issuer = chain[chain.len() - 1].issuer.clone();
        match store.credential_by_subject(&issuer).await? {
            None => break,
            Some(next) => {
                if next.subject != issuer {
                    return Err(VerifyError::ChainBroken {
                        index: chain.len(),
                        expected: issuer,
                        found: next.subject,
                    });
                }
                chain.push(next);
            }
        }
    }
    if chain.len() < MIN_CHAIN_LEN {
        return Err(VerifyError::ChainTooShort {
            length: chain.len(),
        });
    }
    Ok(CredentialChain(chain))
}
