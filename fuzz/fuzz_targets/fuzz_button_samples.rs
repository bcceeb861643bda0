//! Fuzz target: `ButtonDriver::tick` with arbitrary timing and levels
//!
//! Each byte is one sample: bit 7 is the pressed level, bits 0..6 the
//! milliseconds since the previous sample.
//!
//! Invariants checked:
//! - No panics, including across the u32 clock wrap
//! - At most one `LongPress` between two `Release`s
//! - Never emits `Timeout`
//!
//! cargo fuzz run fuzz_button_samples

#![no_main]

use battpwr::config::PowerConfig;
use battpwr::drivers::button::ButtonDriver;
use battpwr::events::ButtonEvent;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut driver = ButtonDriver::new(&PowerConfig::default());
    // Start near the wrap so long inputs cross it.
    let mut now = u32::MAX - 5_000;
    let mut long_pending = false;

    for &b in data {
        now = now.wrapping_add(u32::from(b & 0x7F));
        match driver.tick(now, b & 0x80 != 0) {
            Some(ButtonEvent::LongPress) => {
                assert!(!long_pending, "second LongPress without Release");
                long_pending = true;
            }
            Some(ButtonEvent::Release) => long_pending = false,
            Some(ButtonEvent::Timeout) => panic!("classifier emitted Timeout"),
            None => {}
        }
    }
});
