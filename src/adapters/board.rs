//! Board adapter: bridges the real peripherals to the coordinator's ports.
//!
//! Owns the display adapter, the rail switches and a delay provider, and
//! exposes them through [`DisplaySink`], [`RailController`] and
//! `embedded_hal`'s [`DelayNs`].  On non-espidf targets the rail driver
//! uses its simulation stubs.

use embedded_hal::delay::DelayNs;

use crate::app::ports::{DisplaySink, Rail, RailController};
use crate::drivers::rails::BoardPower;

/// Concrete adapter that combines all coordinator-facing hardware.
pub struct Board<DISP, DELAY> {
    display: DISP,
    power: BoardPower,
    delay: DELAY,
}

impl<DISP, DELAY> Board<DISP, DELAY> {
    pub fn new(display: DISP, power: BoardPower, delay: DELAY) -> Self {
        Self {
            display,
            power,
            delay,
        }
    }

    pub fn power(&self) -> &BoardPower {
        &self.power
    }

    pub fn display(&self) -> &DISP {
        &self.display
    }
}

// ── DisplaySink implementation ────────────────────────────────

impl<DISP: DisplaySink, DELAY> DisplaySink for Board<DISP, DELAY> {
    fn begin(&mut self) {
        self.display.begin();
    }

    fn render_full(&mut self, headline: &str, subtext: &str) {
        self.display.render_full(headline, subtext);
    }
}

// ── RailController implementation ─────────────────────────────

impl<DISP, DELAY> RailController for Board<DISP, DELAY> {
    fn set_rail(&mut self, rail: Rail, on: bool) {
        self.power.set_rail(rail, on);
    }
}

// ── DelayNs implementation ────────────────────────────────────

impl<DISP, DELAY: DelayNs> DelayNs for Board<DISP, DELAY> {
    fn delay_ns(&mut self, ns: u32) {
        self.delay.delay_ns(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
