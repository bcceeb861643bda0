//! Board supply switches: VBAT hold, panel supply, auxiliary supply.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the three switch GPIOs configured by
//! [`hw_init::init_rail_gpios`](super::hw_init::init_rail_gpios).
//! On host/test: tracks state in-memory only.

use log::info;

use crate::app::ports::{Rail, RailController};
use crate::drivers::hw_init;
use crate::pins;

pub struct BoardPower {
    on: [bool; 3],
}

impl Default for BoardPower {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardPower {
    /// All rails considered off; matches the inactive levels left by
    /// `init_rail_gpios`.
    pub fn new() -> Self {
        Self { on: [false; 3] }
    }

    pub fn is_on(&self, rail: Rail) -> bool {
        self.on[Self::slot(rail)]
    }

    /// `(gpio, active_high)` for a rail.
    pub fn pin(rail: Rail) -> (i32, bool) {
        match rail {
            Rail::Vbat => (pins::VBAT_PWR_GPIO, pins::VBAT_PWR_ACTIVE_HIGH),
            Rail::Epd => (pins::EPD_PWR_GPIO, pins::EPD_PWR_ACTIVE_HIGH),
            Rail::Aux => (pins::AUX_PWR_GPIO, pins::AUX_PWR_ACTIVE_HIGH),
        }
    }

    /// Electrical level that puts `rail` into state `on`.
    pub fn level(rail: Rail, on: bool) -> bool {
        let (_, active_high) = Self::pin(rail);
        on == active_high
    }

    fn slot(rail: Rail) -> usize {
        match rail {
            Rail::Vbat => 0,
            Rail::Epd => 1,
            Rail::Aux => 2,
        }
    }
}

impl RailController for BoardPower {
    fn set_rail(&mut self, rail: Rail, on: bool) {
        let (gpio, _) = Self::pin(rail);
        hw_init::gpio_write(gpio, Self::level(rail, on));
        if self.on[Self::slot(rail)] != on {
            info!("rails: {} {}", rail.name(), if on { "on" } else { "off" });
        }
        self.on[Self::slot(rail)] = on;
    }
}
