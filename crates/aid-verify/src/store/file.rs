//! Filesystem-backed store over a directory of JSON documents.
//!
//! Lays records out under a directory tree:
//!
//! ```text
//! {base_dir}/
//! ├── kels/             — key event logs, one file per identifier
//! │   └── {aid}.json
//! ├── credentials/      — issued credentials, one file per SAID
//! │   └── {said}.json
//! └── revocations/      — revocation records, named by revoked SAID
//!     └── {said}.json
//! ```
//!
//! File format for event logs:
//! ```json
//! { "version": 1, "events": [ ... Event ... ] }
//! ```
//!
//! File format for credentials:
//! ```json
//! { "version": 1, "credential": { ... Credential ... } }
//! ```
//!
//! File format for revocations:
//! ```json
//! { "version": 1, "revocation": { ... RevocationRecord ... } }
//! ```
//!
//! The verification engine only ever reads; the `save_*` helpers exist
//! for the sync tooling and tests that populate a store directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::aid::{Aid, Said};
use crate::credential::{Credential, CredentialSchema, RevocationRecord};
use crate::error::StoreError;
use crate::kel::{Event, KeyState};

use super::{CredentialStore, EventStore, RevocationRegistry};

// ── File format constants ─────────────────────────────────────────────────────

const STORE_FILE_VERSION: u32 = 1;

// ── On-disk structures ────────────────────────────────────────────────────────

/// Wrapper written to disk for each key event log.
#[derive(Debug, Serialize, Deserialize)]
struct KelFile {
    /// Format version number.
    version: u32,
    /// The stored event log, in sequence order.
    events: Vec<Event>,
}

/// Wrapper written to disk for each credential.
#[derive(Debug, Serialize, Deserialize)]
struct CredentialFile {
    /// Format version number.
    version: u32,
    /// The stored credential.
    credential: Credential,
}

/// Wrapper written to disk for each revocation.
#[derive(Debug, Serialize, Deserialize)]
struct RevocationFile {
    /// Format version number.
    version: u32,
    /// The stored revocation record.
    revocation: RevocationRecord,
}

// ── Sub-directory names ───────────────────────────────────────────────────────

const KELS_DIR: &str = "kels";
const CREDENTIALS_DIR: &str = "credentials";
const REVOCATIONS_DIR: &str = "revocations";

// ── FileStore ─────────────────────────────────────────────────────────────────

/// Store over a local directory of JSON documents, the shape in which a
/// deployed verifier reads its replicated copy of logs, credentials, and
/// revocation state.
///
/// Records are small single-purpose files; reads happen inline. A file
/// that exists but fails to parse is reported as a [`StoreError`], never
/// swallowed into a "not found".
#[derive(Debug, Clone)]
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    /// Create a `FileStore` rooted at `base_dir`.
    ///
    /// Creates `kels/`, `credentials/`, and `revocations/` sub-directories
    /// if they do not already exist.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if any directory cannot be created.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(base_dir.join(KELS_DIR))?;
        std::fs::create_dir_all(base_dir.join(CREDENTIALS_DIR))?;
        std::fs::create_dir_all(base_dir.join(REVOCATIONS_DIR))?;
        Ok(Self { base_dir })
    }

    // ── Write helpers ─────────────────────────────────────────────────────────

    /// Persist an identifier's event log to `kels/{aid}.json`, replacing
    /// any previous log for the same identifier.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` for serialization or filesystem failures.
    pub fn save_kel(&self, aid: &Aid, events: &[Event]) -> Result<(), StoreError> {
        let file = KelFile {
            version: STORE_FILE_VERSION,
            events: events.to_vec(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        std::fs::write(self.kel_path(aid), json.as_bytes())?;
        Ok(())
    }

    /// Persist a credential to `credentials/{said}.json`.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` for serialization or filesystem failures.
    pub fn save_credential(&self, credential: &Credential) -> Result<(), StoreError> {
        let file = CredentialFile {
            version: STORE_FILE_VERSION,
            credential: credential.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        std::fs::write(self.credential_path(&credential.said), json.as_bytes())?;
        Ok(())
    }

    /// Persist a revocation record to `revocations/{said}.json`.
    ///
    /// The file is named by the revoked SAID so `is_revoked` resolves in
    /// one filesystem lookup.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` for serialization or filesystem failures.
    pub fn save_revocation(&self, record: &RevocationRecord) -> Result<(), StoreError> {
        let file = RevocationFile {
            version: STORE_FILE_VERSION,
            revocation: record.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        std::fs::write(self.revocation_path(&record.said), json.as_bytes())?;
        Ok(())
    }

    // ── Read surface ──────────────────────────────────────────────────────────

    /// Load an identifier's event log, or `None` if no log file exists.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` for malformed files or filesystem failures.
    pub fn load_kel(&self, aid: &Aid) -> Result<Option<Vec<Event>>, StoreError> {
        let path = self.kel_path(aid);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = std::fs::read(&path)?;
        let file: KelFile = serde_json::from_slice(&bytes).map_err(|e| {
            StoreError::new(format!(
                "failed to parse key event log {}: {e}",
                path.display()
            ))
        })?;
        Ok(Some(file.events))
    }

    /// Load a credential by SAID, or `None` if no credential file exists.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` for malformed files or filesystem failures.
    pub fn load_credential(&self, said: &Said) -> Result<Option<Credential>, StoreError> {
        let path = self.credential_path(said);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(self.read_credential(&path)?))
    }

    /// Load a revocation record by the SAID it revokes, or `None`.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` for malformed files or filesystem failures.
    pub fn load_revocation(&self, said: &Said) -> Result<Option<RevocationRecord>, StoreError> {
        let path = self.revocation_path(said);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = std::fs::read(&path)?;
        let file: RevocationFile = serde_json::from_slice(&bytes).map_err(|e| {
            StoreError::new(format!(
                "failed to parse revocation file {}: {e}",
                path.display()
            ))
        })?;
        Ok(Some(file.revocation))
    }

    /// List the SAIDs of all stored credentials.
    ///
    /// The returned list is not sorted in any particular order.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the directory cannot be read.
    pub fn list_credentials(&self) -> Result<Vec<Said>, StoreError> {
        self.list_ids(CREDENTIALS_DIR)
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    /// Read and deserialize a credential from an absolute path.
    fn read_credential(&self, path: &Path) -> Result<Credential, StoreError> {
        let bytes = std::fs::read(path)?;
        let file: CredentialFile = serde_json::from_slice(&bytes).map_err(|e| {
            StoreError::new(format!(
                "failed to parse credential file {}: {e}",
                path.display()
            ))
        })?;
        Ok(file.credential)
    }

    /// Scan `credentials/` for credentials whose subject is `subject`,
    /// optionally narrowed to one schema, and pick the lowest SAID.
    ///
    /// Directory order is not stable across filesystems, so matches are
    /// collected and ordered before one is chosen.
    fn scan_by_subject(
        &self,
        subject: &Aid,
        schema: Option<&CredentialSchema>,
    ) -> Result<Option<Credential>, StoreError> {
        let dir = self.base_dir.join(CREDENTIALS_DIR);
        let mut matches = Vec::new();

        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            let credential = self.read_credential(&path)?;
            if credential.subject != *subject {
                continue;
            }
            if let Some(schema) = schema {
                if credential.schema != *schema {
                    continue;
                }
            }
            matches.push(credential);
        }

        matches.sort_by(|a, b| a.said.cmp(&b.said));
        Ok(matches.into_iter().next())
    }

    /// Build the filesystem path for an event log: `{base_dir}/kels/{aid}.json`.
    fn kel_path(&self, aid: &Aid) -> PathBuf {
        self.base_dir
            .join(KELS_DIR)
            .join(format!("{}.json", aid.as_str()))
    }

    /// Build the filesystem path for a credential: `{base_dir}/credentials/{said}.json`.
    fn credential_path(&self, said: &Said) -> PathBuf {
        self.base_dir
            .join(CREDENTIALS_DIR)
            .join(format!("{}.json", said.as_str()))
    }

    /// Build the filesystem path for a revocation: `{base_dir}/revocations/{said}.json`.
    fn revocation_path(&self, said: &Said) -> PathBuf {
        self.base_dir
            .join(REVOCATIONS_DIR)
            .join(format!("{}.json", said.as_str()))
    }

    /// Read a directory listing and extract SAIDs from `{said}.json` filenames.
    fn list_ids(&self, sub_dir: &str) -> Result<Vec<Said>, StoreError> {
        let dir = self.base_dir.join(sub_dir);
        let mut ids = Vec::new();

        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(stem) = name_str.strip_suffix(".json") {
                if let Ok(said) = Said::parse(stem) {
                    ids.push(said);
                }
            }
        }

        Ok(ids)
    }
}

// ── Trait implementations ─────────────────────────────────────────────────────

#[async_trait]
impl EventStore for FileStore {
    async fn key_state(&self, aid: &Aid) -> Result<Option<KeyState>, StoreError> {
        Ok(self.load_kel(aid)?.as_deref().and_then(KeyState::from_events))
    }

    async fn events(&self, aid: &Aid) -> Result<Option<Vec<Event>>, StoreError> {
        self.load_kel(aid)
    }
}

#[async_trait]
impl CredentialStore for FileStore {
    async fn credential_by_subject_and_schema(
        &self,
        subject: &Aid,
        schema: &CredentialSchema,
    ) -> Result<Option<Credential>, StoreError> {
        self.scan_by_subject(subject, Some(schema))
    }

    async fn credential_by_subject(
        &self,
        subject: &Aid,
    ) -> Result<Option<Credential>, StoreError> {
        self.scan_by_subject(subject, None)
    }
}

#[async_trait]
impl RevocationRegistry for FileStore {
    async fn is_revoked(&self, said: &Said) -> Result<bool, StoreError> {
        Ok(self.revocation_path(said).exists())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
