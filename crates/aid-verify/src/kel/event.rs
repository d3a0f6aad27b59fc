//! Key event log entries and seals.
//!
//! Events serialize with the compact field labels of the underlying
//! identity system (`t`, `s`, `i`, `di`, `a`), so stored logs read the
//! same way the wire data does. Sequence numbers are plain integers,
//! strictly increasing per identifier, starting at 0.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::aid::{Aid, Said};

/// Event kinds that appear in a key event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "icp")]
    Inception,
    #[serde(rename = "rot")]
    Rotation,
    #[serde(rename = "ixn")]
    Interaction,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Inception => "icp",
            EventType::Rotation => "rot",
            EventType::Interaction => "ixn",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A commitment to another identifier's event, carried in an anchor list.
///
/// A seal approves a delegation only if its digest matches the actual
/// digest of the referenced event; matching on the identifier alone is
/// necessary but not sufficient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seal {
    /// Identifier whose event is referenced.
    #[serde(rename = "i")]
    pub identifier: Aid,
    /// Sequence number of the referenced event.
    #[serde(rename = "s")]
    pub sequence: u64,
    /// Digest of the referenced event.
    #[serde(rename = "d")]
    pub digest: Said,
}

impl Seal {
    /// Build a seal committing to `event`, digest included.
    pub fn committing_to(event: &Event) -> Self {
        Self {
            identifier: event.identifier.clone(),
            sequence: event.sequence,
            digest: event.digest(),
        }
    }
}

/// One entry in an identifier's key event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "t")]
    pub event_type: EventType,
    #[serde(rename = "s")]
    pub sequence: u64,
    #[serde(rename = "i")]
    pub identifier: Aid,
    /// Delegating identifier, present only on a delegated inception.
    #[serde(rename = "di", default, skip_serializing_if = "Option::is_none")]
    pub delegator: Option<Aid>,
    /// Seals anchored by this event.
    #[serde(rename = "a", default, skip_serializing_if = "Vec::is_empty")]
    pub anchors: Vec<Seal>,
}

impl Event {
    /// Plain (non-delegated) inception at sequence 0.
    pub fn inception(identifier: Aid) -> Self {
        Self {
            event_type: EventType::Inception,
            sequence: 0,
            identifier,
            delegator: None,
            anchors: Vec::new(),
        }
    }

    /// Delegated inception at sequence 0, naming the delegator.
    pub fn delegated_inception(identifier: Aid, delegator: Aid) -> Self {
        Self {
            event_type: EventType::Inception,
            sequence: 0,
            identifier,
            delegator: Some(delegator),
            anchors: Vec::new(),
        }
    }

    /// Rotation event.
    pub fn rotation(identifier: Aid, sequence: u64) -> Self {
        Self {
            event_type: EventType::Rotation,
            sequence,
            identifier,
            delegator: None,
            anchors: Vec::new(),
        }
    }

    /// Interaction event carrying anchors.
    pub fn interaction(identifier: Aid, sequence: u64, anchors: Vec<Seal>) -> Self {
        Self {
            event_type: EventType::Interaction,
            sequence,
            identifier,
            delegator: None,
            anchors,
        }
    }

    /// Content digest of this event over its canonical byte form.
    pub fn digest(&self) -> Said {
        Said::derive(&self.canonical_bytes())
    }

    /// Deterministic byte encoding for digesting: labeled fields joined
    /// in fixed order. Infallible by construction.
    fn canonical_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(128);
        out.extend_from_slice(self.event_type.as_str().as_bytes());
        out.push(b'|');
        out.extend_from_slice(self.sequence.to_string().as_bytes());
        out.push(b'|');
        out.extend_from_slice(self.identifier.as_str().as_bytes());
        out.push(b'|');
        if let Some(di) = &self.delegator {
            out.extend_from_slice(di.as_str().as_bytes());
        }
        for seal in &self.anchors {
            out.push(b'|');
            out.extend_from_slice(seal.identifier.as_str().as_bytes());
            out.push(b':');
            out.extend_from_slice(seal.sequence.to_string().as_bytes());
            out.push(b':');
            out.extend_from_slice(seal.digest.as_str().as_bytes());
        }
        out
    }
}
