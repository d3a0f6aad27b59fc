//! The delegation proof.

use serde::{Deserialize, Serialize};

use crate::aid::{Aid, Said};
use crate::kel::EventType;

/// Evidence that a delegation relationship holds, assembled from the two
/// parties' event logs.
///
/// Besides the pair itself, the proof records where the delegatee's log
/// begins and what the delegator's seal claims about it; the consistency
/// checker cross-validates those positions without further store access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationProof {
    pub delegatee: Aid,
    pub delegator: Aid,
    /// Type of the first event in the delegatee's log.
    pub inception_type: EventType,
    /// Sequence number of that first event.
    pub inception_sequence: u64,
    /// Identifier recorded in that event's body.
    pub inception_identifier: Aid,
    /// Sequence of the delegator event that carries the seal.
    pub seal_event_sequence: u64,
    /// Sequence the seal claims for the delegatee's event.
    pub seal_subject_sequence: u64,
    /// Identifier the seal names.
    pub seal_identifier: Aid,
    /// Digest the seal commits to, already verified against the
    /// referenced event.
    pub seal_digest: Said,
}
