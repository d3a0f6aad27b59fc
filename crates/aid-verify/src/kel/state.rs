//! Derived key state.

use serde::{Deserialize, Serialize};

use crate::aid::Aid;
use crate::kel::event::Event;

/// Current-state view of an identifier, derived from its event log.
///
/// The delegation relationship is fixed at inception: a delegated
/// identifier names its delegator in the first event of its log and that
/// relationship never changes across rotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyState {
    pub identifier: Aid,
    pub latest_sequence: u64,
    pub is_delegated: bool,
    pub delegator: Option<Aid>,
}

impl KeyState {
    /// Derive the current key state from an event log.
    ///
    /// Returns `None` for an empty log; an identifier with no events has
    /// no state.
    pub fn from_events(events: &[Event]) -> Option<Self> {
        let first = events.first()?;
        let last = events.last()?;
        Some(Self {
            identifier: first.identifier.clone(),
            latest_sequence: last.sequence,
            is_delegated: first.delegator.is_some(),
            delegator: first.delegator.clone(),
        })
    }
}
