//! Port traits: the hexagonal boundary between the power coordinator and
//! the board.
//!
//! ```text
//!   EventSource ──▶ PowerCoordinator ──▶ DisplaySink
//!                                    ──▶ RailController
//!                                    ──▶ DelayNs (embedded-hal)
//!                                    ──▶ EventSink
//! ```
//!
//! Hardware commands are one-way: no method returns a status.  Adapters
//! log their own failures; the coordinator cannot act on them anyway,
//! since the worst outcome (losing power) ends execution.

use core::time::Duration;

use crate::events::ButtonEvent;

// ───────────────────────────────────────────────────────────────
// Event source (driving adapter: button → domain)
// ───────────────────────────────────────────────────────────────

/// Blocking, bounded wait for the next logical button event.
pub trait EventSource {
    /// Wait up to `timeout`.  Returns [`ButtonEvent::Timeout`] when
    /// nothing arrived.
    fn wait_event(&mut self, timeout: Duration) -> ButtonEvent;
}

// ───────────────────────────────────────────────────────────────
// Display sink (driven adapter: domain → panel)
// ───────────────────────────────────────────────────────────────

/// Bistable status display.
pub trait DisplaySink {
    /// One-time panel initialisation.  Requires a stable panel supply.
    fn begin(&mut self);

    /// Clear, paint `headline` and `subtext` centered, refresh the whole
    /// panel, then put it into its image-holding low-power state.
    ///
    /// Returns only once the refresh has been committed.
    fn render_full(&mut self, headline: &str, subtext: &str);
}

// ───────────────────────────────────────────────────────────────
// Rail controller (driven adapter: domain → power switches)
// ───────────────────────────────────────────────────────────────

/// Independently switchable supply domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rail {
    /// Battery hold.  Cutting it powers down the main logic.
    Vbat,
    /// E-paper panel supply.
    Epd,
    /// Auxiliary (audio) supply.
    Aux,
}

impl Rail {
    /// Energise order at boot: battery first, panel before its init.
    pub const BOOT_ORDER: [Rail; 3] = [Rail::Vbat, Rail::Epd, Rail::Aux];

    pub fn name(self) -> &'static str {
        match self {
            Self::Vbat => "VBAT",
            Self::Epd => "EPD",
            Self::Aux => "AUX",
        }
    }
}

/// Idempotent, synchronous rail switching.
pub trait RailController {
    fn set_rail(&mut self, rail: Rail, on: bool);

    fn rail_on(&mut self, rail: Rail) {
        self.set_rail(rail, true);
    }

    fn rail_off(&mut self, rail: Rail) {
        self.set_rail(rail, false);
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The coordinator emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
