//! Key event log data model.
//!
//! The kel module provides:
//! - Event entries (inception, rotation, interaction) with anchor lists
//! - Seals, the content-addressed commitments embedded in anchors
//! - Canonical event digesting for seal verification
//! - Derived key state (latest sequence, delegation relationship)

pub mod event;
pub mod state;

pub use event::{Event, EventType, Seal};
pub use state::KeyState;
