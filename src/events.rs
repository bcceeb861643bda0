//! Button event group.
//!
//! Events are produced by the button poller task (see
//! [`ButtonDriver`](crate::drivers::button::ButtonDriver)) and consumed by
//! the power coordinator, which blocks on the group with a bounded timeout.
//!
//! ```text
//! ┌───────────────┐  set_bits   ┌──────────────┐  wait_bits  ┌──────────────┐
//! │ Button poller │────────────▶│ Event group  │────────────▶│ Coordinator  │
//! │ (GPIO sample) │  bit 2 / 3  │ (flag word)  │  2 s bound  │ (one task)   │
//! └───────────────┘             └──────────────┘             └──────────────┘
//! ```
//!
//! The group holds flags, not a queue: a second long press posted before
//! the coordinator wakes collapses into the first.  Bits are cleared when
//! a waiter observes them.

use std::sync::{Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::app::ports::EventSource;

/// Bit index of the long-press flag.
pub const LONG_PRESS_BIT_INDEX: u32 = 2;
/// Bit index of the release flag.
pub const RELEASE_BIT_INDEX: u32 = 3;

pub const LONG_PRESS_BIT: u32 = 1 << LONG_PRESS_BIT_INDEX;
pub const RELEASE_BIT: u32 = 1 << RELEASE_BIT_INDEX;

/// Every flag the coordinator waits on.
pub const BUTTON_BITS: u32 = LONG_PRESS_BIT | RELEASE_BIT;

/// Logical button events, decoded once at the event-source boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    /// Debounced hold beyond the long-press threshold.
    LongPress,
    /// Debounced release.
    Release,
    /// Nothing arrived within the wait interval.
    Timeout,
}

impl ButtonEvent {
    /// Decode an observed flag word.
    ///
    /// Long press takes precedence; a release observed in the same wait
    /// cycle is consumed with it.
    pub fn from_bits(bits: u32) -> Self {
        if bits & LONG_PRESS_BIT != 0 {
            Self::LongPress
        } else if bits & RELEASE_BIT != 0 {
            Self::Release
        } else {
            Self::Timeout
        }
    }

    /// Flag this event is posted as.  `Timeout` has no flag.
    pub fn bits(self) -> u32 {
        match self {
            Self::LongPress => LONG_PRESS_BIT,
            Self::Release => RELEASE_BIT,
            Self::Timeout => 0,
        }
    }
}

/// A FreeRTOS-style event group: a word of flags with blocking waits.
///
/// `std` synchronisation maps onto FreeRTOS primitives under ESP-IDF, so
/// the same type serves the firmware and host tests.
pub struct ButtonEventGroup {
    bits: Mutex<u32>,
    changed: Condvar,
}

impl Default for ButtonEventGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonEventGroup {
    pub const fn new() -> Self {
        Self {
            bits: Mutex::new(0),
            changed: Condvar::new(),
        }
    }

    /// OR `bits` into the group and wake any waiter.
    pub fn set_bits(&self, bits: u32) {
        let mut current = self.bits.lock().unwrap_or_else(PoisonError::into_inner);
        *current |= bits;
        self.changed.notify_all();
    }

    /// Post a decoded event.  `Timeout` is ignored.
    pub fn post(&self, event: ButtonEvent) {
        let bits = event.bits();
        if bits != 0 {
            self.set_bits(bits);
        }
    }

    /// Flags currently pending, without consuming them.
    pub fn peek(&self) -> u32 {
        *self.bits.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until any bit in `mask` is set or `timeout` elapses.
    ///
    /// Returns the observed bits within `mask` and clears them, or `0`
    /// on timeout.  Bits outside `mask` are left untouched.
    pub fn wait_bits(&self, mask: u32, timeout: Duration) -> u32 {
        let deadline = Instant::now() + timeout;
        let mut current = self.bits.lock().unwrap_or_else(PoisonError::into_inner);

        loop {
            let hit = *current & mask;
            if hit != 0 {
                *current &= !hit;
                return hit;
            }

            let now = Instant::now();
            if now >= deadline {
                return 0;
            }

            current = self
                .changed
                .wait_timeout(current, deadline - now)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }
}

impl EventSource for &ButtonEventGroup {
    fn wait_event(&mut self, timeout: Duration) -> ButtonEvent {
        ButtonEvent::from_bits(self.wait_bits(BUTTON_BITS, timeout))
    }
}
