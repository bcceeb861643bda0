//! Indicator LED blink task.
//!
//! A plain square wave on one GPIO: the only sign of life while the
//! e-paper holds a static image.  Shares no state with the coordinator.

use std::time::Duration;

use log::warn;

use crate::drivers::hw_init;
use crate::pins;

/// Square-wave generator.  Pure; the task loop does the I/O.
#[derive(Debug, Default)]
pub struct Blinker {
    lit: bool,
    toggles: u32,
}

impl Blinker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one half-period and return the new LED level.
    pub fn tick(&mut self) -> bool {
        self.lit = !self.lit;
        self.toggles = self.toggles.wrapping_add(1);
        self.lit
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    pub fn toggles(&self) -> u32 {
        self.toggles
    }
}

/// LED task body.  A failed GPIO setup is logged and the task keeps
/// running so timing stays identical.
pub fn run_led_task(half_period: Duration) -> ! {
    if let Err(e) = hw_init::init_led_gpio() {
        warn!("led: {e}; blinking blind");
    }

    let mut blinker = Blinker::new();
    loop {
        hw_init::gpio_write(pins::LED_GPIO, blinker.tick());
        std::thread::sleep(half_period);
    }
}
