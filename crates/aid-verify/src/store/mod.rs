//! Accessor boundary between the verification engine and its data.
//!
//! The engine never reads key event logs, credentials, or revocation
//! records directly; it goes through three narrow async traits:
//!
//! - [`EventStore`] — key event logs and derived key state
//! - [`CredentialStore`] — issued credentials, queried by subject
//! - [`RevocationRegistry`] — revocation status by credential SAID
//!
//! All methods distinguish "absent" from "unavailable": a missing
//! identifier or credential comes back as `Ok(None)` and feeds the
//! verification verdict, while an infrastructure fault comes back as
//! [`StoreError`] and surfaces to callers as
//! `VerifyError::AccessorUnavailable`.
//!
//! Two implementations ship with the crate: [`MemoryStore`] for tests,
//! benches, and embedders, and [`FileStore`] over a local directory of
//! JSON documents.

use async_trait::async_trait;

use crate::aid::{Aid, Said};
use crate::credential::{Credential, CredentialSchema};
use crate::error::StoreError;
use crate::kel::{Event, KeyState};

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Read access to key event logs.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Current key state for `aid`, or `None` if the identifier is unknown.
    async fn key_state(&self, aid: &Aid) -> Result<Option<KeyState>, StoreError>;

    /// The complete event log for `aid` in sequence order, or `None` if
    /// the identifier is unknown.
    async fn events(&self, aid: &Aid) -> Result<Option<Vec<Event>>, StoreError>;
}

/// Read access to issued credentials.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// The credential held by `subject` under `schema`, or `None`.
    async fn credential_by_subject_and_schema(
        &self,
        subject: &Aid,
        schema: &CredentialSchema,
    ) -> Result<Option<Credential>, StoreError>;

    /// Any credential held by `subject`, or `None`.
    ///
    /// When a subject holds more than one credential the store must pick
    /// deterministically; chain walking relies on that stability.
    async fn credential_by_subject(&self, subject: &Aid)
        -> Result<Option<Credential>, StoreError>;
}

/// Read access to revocation state.
#[async_trait]
pub trait RevocationRegistry: Send + Sync {
    /// Whether a revocation record exists for `said`.
    async fn is_revoked(&self, said: &Said) -> Result<bool, StoreError>;
}
