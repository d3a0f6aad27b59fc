//! Proving a delegation relationship from two event logs.

use crate::aid::Aid;
use crate::delegation::proof::DelegationProof;
use crate::error::{Result, VerifyError};
use crate::kel::{Event, Seal};
use crate::store::EventStore;

/// Prove that `delegatee` is delegated by `delegator`.
///
/// Each numbered step is a distinct rejection condition. The proof never
/// mutates external state and is idempotent against unchanged logs.
pub async fn prove_delegation(
    store: &dyn EventStore,
    delegatee: &Aid,
    delegator: &Aid,
) -> Result<DelegationProof> {
    // 1. The delegatee must resolve to a key state.
    let state = store
        .key_state(delegatee)
        .await?
        .ok_or_else(|| VerifyError::UnknownIdentifier {
            aid: delegatee.clone(),
        })?;

    // 2. It must hold a delegation relationship at all.
    if !state.is_delegated {
        return Err(VerifyError::NotDelegated {
            aid: delegatee.clone(),
        });
    }
    let actual = state.delegator.ok_or_else(|| VerifyError::NotDelegated {
        aid: delegatee.clone(),
    })?;

    // 3. That relationship must point at the claimed delegator.
    if &actual != delegator {
        return Err(VerifyError::DelegatorMismatch {
            actual,
            expected: delegator.clone(),
        });
    }

    // 4. The delegator's history must exist.
    let delegator_events =
        store
            .events(delegator)
            .await?
            .ok_or_else(|| VerifyError::UnknownIdentifier {
                aid: delegator.clone(),
            })?;

    // 5. Somewhere in that history, any event type may anchor the
    //    approval seal. A seal counts only if its digest matches the
    //    actual digest of the delegatee's referenced event; a seal
    //    naming the delegatee but carrying a wrong digest is treated as
    //    absent and the scan continues.
    let delegatee_events =
        store
            .events(delegatee)
            .await?
            .ok_or_else(|| VerifyError::UnknownIdentifier {
                aid: delegatee.clone(),
            })?;
    let inception = delegatee_events
        .first()
        .ok_or_else(|| VerifyError::UnknownIdentifier {
            aid: delegatee.clone(),
        })?;

    let (seal_event_sequence, seal) =
        find_verified_seal(&delegator_events, &delegatee_events, delegatee).ok_or_else(|| {
            VerifyError::SealNotFound {
                delegatee: delegatee.clone(),
                delegator: delegator.clone(),
            }
        })?;

    // 6. Assemble the proof from the inception and the verified seal.
    Ok(DelegationProof {
        delegatee: delegatee.clone(),
        delegator: delegator.clone(),
        inception_type: inception.event_type,
        inception_sequence: inception.sequence,
        inception_identifier: inception.identifier.clone(),
        seal_event_sequence,
        seal_subject_sequence: seal.sequence,
        seal_identifier: seal.identifier.clone(),
        seal_digest: seal.digest.clone(),
    })
}

/// First digest-correct seal naming `delegatee`, scanning the delegator's
/// events in log order. A seal naming the delegatee but carrying a wrong
/// digest, or referencing an event the delegatee's log does not contain,
/// is skipped.
fn find_verified_seal<'a>(
    delegator_events: &'a [Event],
    delegatee_events: &[Event],
    delegatee: &Aid,
) -> Option<(u64, &'a Seal)> {
    for event in delegator_events {
        for seal in &event.anchors {
            if &seal.identifier != delegatee {
                continue;
            }
            let verified = delegatee_events
                .iter()
                .find(|referenced| referenced.sequence == seal.sequence)
                .map_or(false, |referenced| referenced.digest() == seal.digest);
            if verified {
                return Some((event.sequence, seal));
            }
        }
    }
    None
}
