//! In-memory store for tests, benches, and embedders.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::aid::{Aid, Said};
use crate::credential::{Credential, CredentialSchema, RevocationReason, RevocationRecord};
use crate::error::StoreError;
use crate::kel::{Event, KeyState};

use super::{CredentialStore, EventStore, RevocationRegistry};

/// In-memory implementation of all three accessor traits.
///
/// Uses `BTreeMap` throughout so scans resolve in a stable order. Never
/// returns a `StoreError`; to exercise accessor-fault paths, implement
/// the traits on a failing stub instead.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Event logs by identifier.
    kels: BTreeMap<Aid, Vec<Event>>,
    /// Key states, derived from logs at insert time or set explicitly.
    key_states: BTreeMap<Aid, KeyState>,
    /// Credentials by SAID.
    credentials: BTreeMap<Said, Credential>,
    /// Revocation records by the SAID of the revoked credential.
    revocations: BTreeMap<Said, RevocationRecord>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an identifier's event log and derive its key state from it.
    pub fn insert_kel(&mut self, aid: Aid, events: Vec<Event>) {
        if let Some(state) = KeyState::from_events(&events) {
            self.key_states.insert(aid.clone(), state);
        }
        self.kels.insert(aid, events);
    }

    /// Set an identifier's key state directly, replacing any state
    /// previously derived by [`insert_kel`](Self::insert_kel).
    pub fn insert_key_state(&mut self, state: KeyState) {
        self.key_states.insert(state.identifier.clone(), state);
    }

    /// Store a credential, keyed by its SAID.
    pub fn insert_credential(&mut self, credential: Credential) {
        self.credentials.insert(credential.said.clone(), credential);
    }

    /// Record a revocation for the credential identified by `said`.
    pub fn revoke(&mut self, said: Said, revoker: Aid, reason: RevocationReason) {
        let record = RevocationRecord::new(said.clone(), revoker, reason);
        self.revocations.insert(said, record);
    }

    /// The stored revocation record for `said`, if any.
    pub fn revocation(&self, said: &Said) -> Option<&RevocationRecord> {
        self.revocations.get(said)
    }

    /// Number of stored credentials.
    pub fn num_credentials(&self) -> usize {
        self.credentials.len()
    }

    /// Number of stored event logs.
    pub fn num_kels(&self) -> usize {
        self.kels.len()
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn key_state(&self, aid: &Aid) -> Result<Option<KeyState>, StoreError> {
        Ok(self.key_states.get(aid).cloned())
    }

    async fn events(&self, aid: &Aid) -> Result<Option<Vec<Event>>, StoreError> {
        Ok(self.kels.get(aid).cloned())
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn credential_by_subject_and_schema(
        &self,
        subject: &Aid,
        schema: &CredentialSchema,
    ) -> Result<Option<Credential>, StoreError> {
        Ok(self
            .credentials
            .values()
            .find(|c| c.subject == *subject && c.schema == *schema)
            .cloned())
    }

    async fn credential_by_subject(
        &self,
        subject: &Aid,
    ) -> Result<Option<Credential>, StoreError> {
        // SAID order, so repeat queries pick the same credential.
        Ok(self
            .credentials
            .values()
            .find(|c| c.subject == *subject)
            .cloned())
    }
}

#[async_trait]
impl RevocationRegistry for MemoryStore {
    async fn is_revoked(&self, said: &Said) -> Result<bool, StoreError> {
        Ok(self.revocations.contains_key(said))
    }
}
