//! On-screen message derived from the arm state.

use super::PowerArmState;

/// Headline and hint shown on the panel.  Never stored; recomputed on
/// each render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayIntent {
    pub headline: &'static str,
    pub subtext: &'static str,
}

pub const ON_INTENT: DisplayIntent = DisplayIntent {
    headline: "ON",
    subtext: "long press to turn off",
};

pub const OFF_INTENT: DisplayIntent = DisplayIntent {
    headline: "OFF",
    subtext: "long press to turn on",
};

impl DisplayIntent {
    pub fn for_state(state: PowerArmState) -> Self {
        match state {
            PowerArmState::Armed => ON_INTENT,
            PowerArmState::Disarmed => OFF_INTENT,
        }
    }
}
