//! Fuzz target: event-group words → `ButtonEvent::from_bits` → coordinator
//!
//! Each 4-byte chunk is one observed flag word.  The coordinator runs
//! against counting hardware.
//!
//! Invariants checked:
//! - No panics under any flag word
//! - VBAT is cut exactly once per Armed → Disarmed transition
//! - Each cut is preceded by exactly one OFF render
//!
//! cargo fuzz run fuzz_event_bits

#![no_main]

use battpwr::app::coordinator::PowerCoordinator;
use battpwr::app::events::AppEvent;
use battpwr::app::ports::{DisplaySink, EventSink, Rail, RailController};
use battpwr::config::PowerConfig;
use battpwr::events::ButtonEvent;
use battpwr::fsm::PowerArmState;
use embedded_hal::delay::DelayNs;
use libfuzzer_sys::fuzz_target;

#[derive(Default)]
struct Counting {
    off_renders: u32,
    vbat_cuts: u32,
}

impl DisplaySink for Counting {
    fn begin(&mut self) {}
    fn render_full(&mut self, headline: &str, _subtext: &str) {
        if headline == "OFF" {
            self.off_renders += 1;
        }
    }
}

impl RailController for Counting {
    fn set_rail(&mut self, rail: Rail, on: bool) {
        if rail == Rail::Vbat && !on {
            assert_eq!(self.off_renders, self.vbat_cuts + 1, "cut without OFF render");
            self.vbat_cuts += 1;
        }
    }
}

impl DelayNs for Counting {
    fn delay_ns(&mut self, _ns: u32) {}
}

#[derive(Default)]
struct DisarmCount(u32);

impl EventSink for DisarmCount {
    fn emit(&mut self, event: &AppEvent) {
        if let AppEvent::StateChanged { to: PowerArmState::Disarmed, .. } = event {
            self.0 += 1;
        }
    }
}

fuzz_target!(|data: &[u8]| {
    let mut c = PowerCoordinator::new(&PowerConfig::default());
    let mut hw = Counting::default();
    let mut sink = DisarmCount::default();
    c.bring_up(&mut hw, &mut sink);
    c.start(&mut hw, &mut sink);

    for chunk in data.chunks_exact(4) {
        let word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        c.handle(ButtonEvent::from_bits(word), &mut hw, &mut sink);
    }

    assert_eq!(hw.vbat_cuts, sink.0);
    assert_eq!(hw.vbat_cuts, c.power_downs());
});
