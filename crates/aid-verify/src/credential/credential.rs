//! The credential record.

use serde::{Deserialize, Serialize};

use crate::aid::{Aid, Said};
use crate::credential::schema::CredentialSchema;

/// Issuance status recorded on a credential at admission time.
///
/// Carries what the issuing registry said when the credential was
/// stored. The revocation sweep honors it: a credential admitted as
/// `Revoked` is rejected even when the registry holds no matching
/// record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialStatus {
    #[default]
    Issued,
    Revoked,
}

/// A role credential binding a subject to its issuer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Self-addressing identifier, the content digest of the credential.
    pub said: Said,
    pub issuer: Aid,
    pub subject: Aid,
    pub schema: CredentialSchema,
    #[serde(default)]
    pub status: CredentialStatus,
}

impl Credential {
    /// Build a credential with a content-derived SAID.
    pub fn new(issuer: Aid, subject: Aid, schema: CredentialSchema) -> Self {
        let said = Said::derive(&canonical_bytes(&issuer, &subject, &schema));
        Self {
            said,
            issuer,
            subject,
            schema,
            status: CredentialStatus::Issued,
        }
    }
}

fn canonical_bytes(issuer: &Aid, subject: &Aid, schema: &CredentialSchema) -> Vec<u8> {
    let mut out = Vec::with_capacity(128);
    out.extend_from_slice(issuer.as_str().as_bytes());
    out.push(b'|');
    out.extend_from_slice(subject.as_str().as_bytes());
    out.push(b'|');
    out.extend_from_slice(schema.as_str().as_bytes());
    out
}
