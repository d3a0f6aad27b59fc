//! Structural consistency checks on a delegation proof.
//!
//! Four independent cross-validations between the delegatee's inception
//! and the delegator's anchoring seal. All are evaluated; nothing
//! short-circuits, so a caller sees every violated check at once.

use serde::{Deserialize, Serialize};

use crate::aid::Aid;
use crate::delegation::proof::DelegationProof;
use crate::kel::EventType;

/// One violated consistency check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum ConsistencyFailure {
    /// The delegatee's log does not begin with an inception at
    /// sequence 0. Delegation is only valid at inception; a later event
    /// cannot retroactively claim delegated status.
    InceptionNotFirst {
        event_type: EventType,
        sequence: u64,
    },
    /// The seal references a sequence other than the inception's.
    SealSequenceMismatch { expected: u64, actual: u64 },
    /// The anchoring event sits at the delegator's own inception; an
    /// identifier cannot approve a delegation before it exists past
    /// inception.
    AnchorAtInception { sequence: u64 },
    /// The identifier in the inception body differs from the one the
    /// seal names.
    IdentifierMismatch { inception: Aid, seal: Aid },
}

/// Cross-validate a delegation proof.
///
/// Returns every violated check; an empty `Ok` means the proof is
/// structurally sound.
pub fn check_consistency(
    proof: &DelegationProof,
) -> std::result::Result<(), Vec<ConsistencyFailure>> {
    let mut failures = Vec::new();

    if proof.inception_type != EventType::Inception || proof.inception_sequence != 0 {
        failures.push(ConsistencyFailure::InceptionNotFirst {
            event_type: proof.inception_type,
            sequence: proof.inception_sequence,
        });
    }

    if proof.seal_subject_sequence != 0 {
        failures.push(ConsistencyFailure::SealSequenceMismatch {
            expected: 0,
            actual: proof.seal_subject_sequence,
        });
    }

    if proof.seal_event_sequence < 1 {
        failures.push(ConsistencyFailure::AnchorAtInception {
            sequence: proof.seal_event_sequence,
        });
    }

    if proof.inception_identifier != proof.seal_identifier {
        failures.push(ConsistencyFailure::IdentifierMismatch {
            inception: proof.inception_identifier.clone(),
            seal: proof.seal_identifier.clone(),
        });
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(failures)
    }
}
