//! One-shot GPIO initialization for the rails, the button and the LED.
//!
//! Uses raw ESP-IDF sys calls.  The panel's SPI and control lines are
//! claimed separately through typed `esp-idf-hal` drivers in `main.rs`.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use log::error;
#[cfg(target_os = "espidf")]
use log::info;

use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    GpioLevelFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::GpioLevelFailed(rc) => write!(f, "GPIO set level failed (rc={})", rc),
        }
    }
}

// ── Rail outputs ──────────────────────────────────────────────

/// Every rail switch as `(gpio, active_high)`.
const RAIL_PINS: [(i32, bool); 3] = [
    (pins::VBAT_PWR_GPIO, pins::VBAT_PWR_ACTIVE_HIGH),
    (pins::EPD_PWR_GPIO, pins::EPD_PWR_ACTIVE_HIGH),
    (pins::AUX_PWR_GPIO, pins::AUX_PWR_ACTIVE_HIGH),
];

/// Run `configure` on every rail pin.  A failing pin is logged and the
/// rest are still configured; the first error is returned.
fn configure_each(
    rails: &[(i32, bool)],
    mut configure: impl FnMut(i32, bool) -> Result<(), HwInitError>,
) -> Result<(), HwInitError> {
    let mut first = None;
    for &(pin, active_high) in rails {
        if let Err(e) = configure(pin, active_high) {
            error!("hw_init: rail GPIO{} failed: {}", pin, e);
            first.get_or_insert(e);
        }
    }
    first.map_or(Ok(()), Err)
}

/// Configure the rail switches as push-pull outputs, left in their
/// inactive level.  The coordinator energises them in boot order.
#[cfg(target_os = "espidf")]
pub fn init_rail_gpios() -> Result<(), HwInitError> {
    configure_each(&RAIL_PINS, |pin, active_high| {
        // SAFETY: Called once from app_init before any task is spawned.
        unsafe { config_output(pin, false)? };
        let ret = unsafe { gpio_set_level(pin, u32::from(!active_high)) };
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioLevelFailed(ret)); }
        Ok(())
    })?;
    info!("hw_init: rail outputs configured (VBAT, EPD, AUX)");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_rail_gpios() -> Result<(), HwInitError> {
    configure_each(&RAIL_PINS, |_, _| Ok(()))?;
    log::info!("hw_init(sim): rail outputs skipped");
    Ok(())
}

// ── Button input ──────────────────────────────────────────────

/// Active-low push-button with the internal pull-up enabled.  Sampled by
/// the poller task; no interrupt.
#[cfg(target_os = "espidf")]
pub fn init_button_gpio() -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::PWR_BUTTON_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    // SAFETY: Single call from app_init; the pin is not shared.
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }

    info!("hw_init: button input configured (GPIO{})", pins::PWR_BUTTON_GPIO);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_button_gpio() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): button input skipped");
    Ok(())
}

// ── Indicator output ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn init_led_gpio() -> Result<(), HwInitError> {
    // SAFETY: Called from the LED task before its loop starts; the pin is
    // owned by that task alone.
    unsafe { config_output(pins::LED_GPIO, true) }?;
    info!("hw_init: LED output configured (GPIO{})", pins::LED_GPIO);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_led_gpio() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): LED output skipped");
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn config_output(pin: i32, pull_up: bool) -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pin,
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: if pull_up {
            gpio_pullup_t_GPIO_PULLUP_ENABLE
        } else {
            gpio_pullup_t_GPIO_PULLUP_DISABLE
        },
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
    Ok(())
}

// ── Level access ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin.
    unsafe { gpio_set_level(pin, u32::from(high)); }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin.
    (unsafe { gpio_get_level(pin) }) != 0
}

/// Idle level of a pulled-up input.
#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    true
}

/// Milliseconds since boot, truncated to `u32`.
#[cfg(target_os = "espidf")]
pub fn now_ms() -> u32 {
    // SAFETY: esp_timer_get_time reads the RTC counter; callable anywhere.
    (unsafe { esp_timer_get_time() } / 1_000) as u32
}

#[cfg(not(target_os = "espidf"))]
pub fn now_ms() -> u32 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static EPOCH: OnceLock<Instant> = OnceLock::new();
    EPOCH.get_or_init(Instant::now).elapsed().as_millis() as u32
}
