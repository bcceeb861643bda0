//! Power-arm state machine.
//!
//! Two states, one transition table, no I/O:
//!
//! ```text
//!            LongPress
//!   ARMED ──────────────▶ DISARMED
//!     ▲   (render OFF,        │
//!     │    settle, cut VBAT)  │
//!     └───────────────────────┘
//!              Release (silent)
//! ```
//!
//! Every other (state, event) pair is a no-op.  The table only decides
//! *what* happens; the [`PowerCoordinator`](crate::app::coordinator::PowerCoordinator)
//! executes the effect against the hardware ports.

pub mod intent;

use crate::events::ButtonEvent;

pub use intent::DisplayIntent;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Whether the device is logically on.
///
/// Independent of physical power: `Disarmed` is entered just before the
/// battery rail is cut and may never be observed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PowerArmState {
    /// Battery rail live, device considered on.  The board boots here.
    #[default]
    Armed,
    /// Battery rail cut (or about to be), device considered off.
    Disarmed,
}

impl PowerArmState {
    pub fn name(self) -> &'static str {
        match self {
            Self::Armed => "Armed",
            Self::Disarmed => "Disarmed",
        }
    }

    /// Screen that matches this state.
    pub fn intent(self) -> DisplayIntent {
        DisplayIntent::for_state(self)
    }

    /// Look up the transition for `event` in this state.
    pub fn on_event(self, event: ButtonEvent) -> Transition {
        match (self, event) {
            (Self::Armed, ButtonEvent::LongPress) => Transition {
                next: Self::Disarmed,
                effect: Effect::PowerDown,
            },
            (Self::Disarmed, ButtonEvent::Release) => Transition {
                next: Self::Armed,
                effect: Effect::None,
            },
            (state, _) => Transition::stay(state),
        }
    }
}

// ---------------------------------------------------------------------------
// Transition descriptor
// ---------------------------------------------------------------------------

/// Hardware work attached to a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// No display or rail action.
    None,
    /// Render the OFF screen, wait out the settle delay, cut VBAT.
    PowerDown,
}

/// Result of one table lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: PowerArmState,
    pub effect: Effect,
}

impl Transition {
    fn stay(state: PowerArmState) -> Self {
        Self {
            next: state,
            effect: Effect::None,
        }
    }

    /// Whether the state changes.
    pub fn changes_from(&self, current: PowerArmState) -> bool {
        self.next != current
    }
}
