//! System configuration parameters
//!
//! All tunable timing for the power coordinator, the button classifier,
//! the indicator LED and the spawned tasks.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerConfig {
    // --- Power sequencing ---
    /// Hold between committing the OFF screen and cutting VBAT (milliseconds).
    /// Must exceed the panel's worst-case full refresh.
    pub settle_delay_ms: u32,
    /// Bounded wait for the next button event per coordinator cycle.
    pub event_wait_timeout_ms: u32,

    // --- Button ---
    /// Hold time classified as a long press (milliseconds)
    pub long_press_ms: u32,
    /// Debounce window for press and release edges (milliseconds)
    pub debounce_ms: u32,
    /// Button poller period (milliseconds)
    pub button_poll_ms: u32,

    // --- Indicator ---
    /// LED on/off half-period (milliseconds)
    pub led_half_period_ms: u32,

    // --- Tasks ---
    /// FreeRTOS priority of the spawned tasks
    pub task_priority: u8,
    /// Stack size of the spawned tasks (KiB)
    pub task_stack_kb: usize,

    // --- Panel ---
    /// Upper bound on a single BUSY wait before the driver gives up
    pub busy_timeout_ms: u32,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            // Power sequencing
            settle_delay_ms: 600,
            event_wait_timeout_ms: 2000,

            // Button
            long_press_ms: 1500,
            debounce_ms: 50,
            button_poll_ms: 10,

            // Indicator
            led_half_period_ms: 200,

            // Tasks
            task_priority: 4,
            task_stack_kb: 4,

            // Panel
            busy_timeout_ms: 5000,
        }
    }
}

impl PowerConfig {
    /// Reject values that would break the power-down sequence or the
    /// button classifier.  Nothing is clamped.
    pub fn validate(&self) -> Result<()> {
        if self.settle_delay_ms == 0 {
            return Err(Error::Config("settle_delay_ms must be non-zero"));
        }
        if self.event_wait_timeout_ms == 0 {
            return Err(Error::Config("event_wait_timeout_ms must be non-zero"));
        }
        if self.button_poll_ms == 0 {
            return Err(Error::Config("button_poll_ms must be non-zero"));
        }
        if self.led_half_period_ms == 0 {
            return Err(Error::Config("led_half_period_ms must be non-zero"));
        }
        if self.debounce_ms >= self.long_press_ms {
            return Err(Error::Config("debounce_ms must be below long_press_ms"));
        }
        Ok(())
    }
}
