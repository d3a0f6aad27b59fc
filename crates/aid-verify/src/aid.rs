//! Qualified base-64 identifiers.
//!
//! AIDs (identifier prefixes) and SAIDs (content digests) share one wire
//! form: 44 characters, a one-character derivation code followed by 43
//! URL-safe base-64 characters carrying a 256-bit digest. The only code
//! this engine accepts is `E`, a Blake3-256 digest.

use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VerifyError};

/// Length in characters of a qualified base-64 identifier.
pub const QB64_LEN: usize = 44;

/// Derivation code for a Blake3-256 digest.
pub const BLAKE3_CODE: char = 'E';

/// An autonomic identifier: the self-certifying prefix of a key event log.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Aid(String);

impl Aid {
    /// Parse an identifier string, rejecting anything that is not a
    /// well-formed qualified base-64 prefix.
    pub fn parse(s: &str) -> Result<Self> {
        if !is_qualified(s) {
            return Err(VerifyError::InvalidIdentifierFormat { aid: s.to_string() });
        }
        Ok(Self(s.to_string()))
    }

    /// Derive an identifier from content bytes (Blake3-256, `E` code).
    pub fn derive(data: &[u8]) -> Self {
        Self(qualify_digest(data))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Aid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Aid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A self-addressing identifier: the content digest of the data it names.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Said(String);

impl Said {
    /// Parse a SAID string, rejecting malformed input.
    pub fn parse(s: &str) -> Result<Self> {
        if !is_qualified(s) {
            return Err(VerifyError::InvalidIdentifierFormat { aid: s.to_string() });
        }
        Ok(Self(s.to_string()))
    }

    /// Derive the SAID of `data` (Blake3-256, `E` code).
    pub fn derive(data: &[u8]) -> Self {
        Self(qualify_digest(data))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Said {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Said {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Check the qualified base-64 form: 44 characters, `E` code, base-64url
/// body. Cheap and I/O-free, run before any store lookup.
pub fn is_qualified(s: &str) -> bool {
    s.len() == QB64_LEN
        && s.starts_with(BLAKE3_CODE)
        && s.bytes()
            .skip(1)
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Qualified digest of `data`: one zero pad byte is prepended so the
/// 33-byte whole encodes to exactly 44 base-64 characters, then the lead
/// pad character is replaced by the derivation code.
fn qualify_digest(data: &[u8]) -> String {
    let digest = blake3::hash(data);
    let mut raw = Vec::with_capacity(33);
    raw.push(0u8);
    raw.extend_from_slice(digest.as_bytes());
    let body = URL_SAFE_NO_PAD.encode(&raw);
    let mut qb64 = String::with_capacity(QB64_LEN);
    qb64.push(BLAKE3_CODE);
    qb64.push_str(&body[1..]);
    qb64
}
