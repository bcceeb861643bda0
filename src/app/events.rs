//! Outbound application events.
//!
//! The [`PowerCoordinator`](super::coordinator::PowerCoordinator) emits
//! these through the [`EventSink`](super::ports::EventSink) port.

use crate::events::ButtonEvent;
use crate::fsm::PowerArmState;

/// Structured events emitted by the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Every rail is on and the panel has been initialised.
    RailsEnergised,

    /// The initial screen is up and the coordinator is ready for events.
    Started(PowerArmState),

    /// The arm state moved.
    StateChanged {
        from: PowerArmState,
        to: PowerArmState,
    },

    /// The OFF screen is committed; VBAT is cut next.  Emitted before the
    /// cut because nothing after it is guaranteed to run.
    VbatCutting { settle_ms: u32 },

    /// A button event had no meaning in the current state.
    Ignored {
        state: PowerArmState,
        event: ButtonEvent,
    },
}
