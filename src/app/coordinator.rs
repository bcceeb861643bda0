//! Power coordinator: the hexagonal core.
//!
//! [`PowerCoordinator`] owns the [`PowerArmState`] and nothing else.  All
//! I/O flows through port traits injected at call sites, so the whole
//! sequencing policy runs against recording mocks on the host.
//!
//! ```text
//!  EventSource ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                  │    PowerCoordinator     │
//!  DisplaySink ◀── │  arm state · sequencing │
//!  RailController ◀│                         │
//!  DelayNs ◀────── └────────────────────────┘
//! ```
//!
//! A transition runs to completion once started: render, settle and rail
//! cut execute back-to-back without waiting on the event source, so a
//! press during the settle delay is not observed until the next cycle.

use core::time::Duration;

use embedded_hal::delay::DelayNs;
use log::{debug, info};

use crate::config::PowerConfig;
use crate::events::ButtonEvent;
use crate::fsm::{Effect, PowerArmState};

use super::events::AppEvent;
use super::ports::{DisplaySink, EventSink, EventSource, Rail, RailController};

// ───────────────────────────────────────────────────────────────
// PowerCoordinator
// ───────────────────────────────────────────────────────────────

pub struct PowerCoordinator {
    state: PowerArmState,
    settle_delay_ms: u32,
    wait_timeout: Duration,
    /// Completed Armed → Disarmed sequences since boot.
    power_downs: u32,
}

impl PowerCoordinator {
    /// Build the coordinator in the `Armed` state: the board is already
    /// powered when this code runs.
    pub fn new(config: &PowerConfig) -> Self {
        Self {
            state: PowerArmState::Armed,
            settle_delay_ms: config.settle_delay_ms,
            wait_timeout: Duration::from_millis(u64::from(config.event_wait_timeout_ms)),
            power_downs: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Energise every rail in boot order, then initialise the panel.
    ///
    /// The panel's init protocol needs a stable supply, so this ordering
    /// is a hard precondition of [`start`](Self::start).
    pub fn bring_up(
        &mut self,
        hw: &mut (impl DisplaySink + RailController),
        sink: &mut impl EventSink,
    ) {
        for rail in Rail::BOOT_ORDER {
            info!("Rail {} on", rail.name());
            hw.rail_on(rail);
        }
        hw.begin();
        sink.emit(&AppEvent::RailsEnergised);
    }

    /// Show the screen for the current state and announce readiness.
    pub fn start(&mut self, hw: &mut impl DisplaySink, sink: &mut impl EventSink) {
        let intent = self.state.intent();
        hw.render_full(intent.headline, intent.subtext);
        sink.emit(&AppEvent::Started(self.state));
        info!("PowerCoordinator started in {}", self.state.name());
    }

    // ── Event processing ──────────────────────────────────────

    /// Apply one event.  Returns the state after the step.
    pub fn handle(
        &mut self,
        event: ButtonEvent,
        hw: &mut (impl DisplaySink + RailController + DelayNs),
        sink: &mut impl EventSink,
    ) -> PowerArmState {
        let from = self.state;
        let transition = from.on_event(event);

        if !transition.changes_from(from) {
            if event != ButtonEvent::Timeout {
                debug!("{:?} ignored in {}", event, from.name());
                sink.emit(&AppEvent::Ignored { state: from, event });
            }
            return from;
        }

        self.state = transition.next;
        sink.emit(&AppEvent::StateChanged {
            from,
            to: transition.next,
        });

        match transition.effect {
            Effect::None => {}
            Effect::PowerDown => self.power_down(hw, sink),
        }

        self.state
    }

    /// Wait one bounded cycle for an event and apply it.
    pub fn poll(
        &mut self,
        source: &mut impl EventSource,
        hw: &mut (impl DisplaySink + RailController + DelayNs),
        sink: &mut impl EventSink,
    ) -> PowerArmState {
        let event = source.wait_event(self.wait_timeout);
        self.handle(event, hw, sink)
    }

    /// The coordinator task body.  Never returns; ends when power does.
    pub fn run(
        mut self,
        mut source: impl EventSource,
        mut hw: impl DisplaySink + RailController + DelayNs,
        mut sink: impl EventSink,
    ) -> ! {
        loop {
            self.poll(&mut source, &mut hw, &mut sink);
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> PowerArmState {
        self.state
    }

    /// Armed → Disarmed sequences executed since boot.
    pub fn power_downs(&self) -> u32 {
        self.power_downs
    }

    pub fn wait_timeout(&self) -> Duration {
        self.wait_timeout
    }

    // ── Internal ──────────────────────────────────────────────

    /// OFF screen, settle, VBAT cut.  Strictly in that order.
    fn power_down(
        &mut self,
        hw: &mut (impl DisplaySink + RailController + DelayNs),
        sink: &mut impl EventSink,
    ) {
        let intent = PowerArmState::Disarmed.intent();
        hw.render_full(intent.headline, intent.subtext);

        // The refresh may still be settling on the glass after the
        // controller reports idle; hold before pulling the rail.
        hw.delay_ms(self.settle_delay_ms);

        self.power_downs = self.power_downs.saturating_add(1);
        sink.emit(&AppEvent::VbatCutting {
            settle_ms: self.settle_delay_ms,
        });
        hw.rail_off(Rail::Vbat);
        // The board may lose power here.
    }
}
