//! Credential schema role tags.
//!
//! The vLEI ecosystem publishes one schema SAID per credential role; the
//! tags here name the roles this engine understands, with an open arm for
//! anything outside the published set.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Published vLEI schema SAIDs, pinned by the ecosystem registry.
pub mod schema_said {
    /// Qualified vLEI Issuer credential.
    pub const QVI: &str = "EBfdlu8R27Fbx-ehrqwImnK-8Cm79sqbAQ4MmvEAYqao";
    /// Legal Entity credential.
    pub const LE: &str = "ENPXp1vQzRF6JwIuS-mp2U8Uf1MoADoP_GqQ62VsDZWY";
    /// Official Organizational Role authorization credential.
    pub const OOR_AUTH: &str = "EKA57bKBKxr_kN7iN5i7lMUxpMG-s19dRcmov1iDxz-E";
    /// Engagement Context Role authorization credential.
    pub const ECR_AUTH: &str = "EH6ekLjSr8V32WyFbGe1zXjTzFs9PkTYmupJ9H65O14g";
    /// Official Organizational Role credential.
    pub const OOR: &str = "EBNaNu-M9P5cgrnfl2Fvymy4E_jvxxyjb70PRtiANlJy";
}

/// Role tag identifying a credential's schema.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CredentialSchema {
    /// Official Organizational Role.
    Oor,
    /// OOR authorization, issued to the QVI by the legal entity.
    OorAuth,
    /// Engagement Context Role authorization.
    EcrAuth,
    /// Legal Entity.
    Le,
    /// Qualified vLEI Issuer.
    Qvi,
    /// GLEIF External Delegated AID, the root of the ecosystem.
    Geda,
    /// Schema outside the published set.
    Other(String),
}

impl CredentialSchema {
    pub fn as_str(&self) -> &str {
        match self {
            CredentialSchema::Oor => "OOR",
            CredentialSchema::OorAuth => "OOR_AUTH",
            CredentialSchema::EcrAuth => "ECR_AUTH",
            CredentialSchema::Le => "LE",
            CredentialSchema::Qvi => "QVI",
            CredentialSchema::Geda => "GEDA",
            CredentialSchema::Other(tag) => tag,
        }
    }

    /// The published schema SAID for this role, where one is pinned.
    pub fn published_said(&self) -> Option<&'static str> {
        match self {
            CredentialSchema::Oor => Some(schema_said::OOR),
            CredentialSchema::OorAuth => Some(schema_said::OOR_AUTH),
            CredentialSchema::EcrAuth => Some(schema_said::ECR_AUTH),
            CredentialSchema::Le => Some(schema_said::LE),
            CredentialSchema::Qvi => Some(schema_said::QVI),
            _ => None,
        }
    }

    /// Resolve a role tag from a published schema SAID.
    pub fn from_published_said(said: &str) -> Option<Self> {
        match said {
            schema_said::OOR => Some(CredentialSchema::Oor),
            schema_said::OOR_AUTH => Some(CredentialSchema::OorAuth),
            schema_said::ECR_AUTH => Some(CredentialSchema::EcrAuth),
            schema_said::LE => Some(CredentialSchema::Le),
            schema_said::QVI => Some(CredentialSchema::Qvi),
            _ => None,
        }
    }
}

impl From<&str> for CredentialSchema {
    /// Accepts a role tag or a published schema SAID, so stored
    /// credentials and operator input may name a schema either way.
    fn from(tag: &str) -> Self {
        if let Some(role) = CredentialSchema::from_published_said(tag) {
            return role;
        }
        match tag {
            "OOR" => CredentialSchema::Oor,
            "OOR_AUTH" => CredentialSchema::OorAuth,
            "ECR_AUTH" => CredentialSchema::EcrAuth,
            "LE" => CredentialSchema::Le,
            "QVI" => CredentialSchema::Qvi,
            "GEDA" => CredentialSchema::Geda,
            other => CredentialSchema::Other(other.to_string()),
        }
    }
}

impl fmt::Display for CredentialSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Serialized as the bare tag string so stored credentials stay readable;
// deserialization also resolves published schema SAIDs to their role.
impl Serialize for CredentialSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CredentialSchema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        if tag.is_empty() {
            return Err(D::Error::custom("empty schema tag"));
        }
        Ok(CredentialSchema::from(tag.as_str()))
    }
}
