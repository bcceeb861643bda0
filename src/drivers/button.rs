//! Polled, debounced power-button classifier.
//!
//! ## Hardware
//!
//! Active-low momentary switch with the internal pull-up enabled.  The
//! poller task samples the level every `button_poll_ms` and feeds
//! [`ButtonDriver::tick`], which runs the debounce + gesture state machine
//! and posts the result into the [`ButtonEventGroup`].
//!
//! ## Gesture detection
//!
//! | Gesture    | Condition                         | Event       |
//! |------------|-----------------------------------|-------------|
//! | Long press | Debounced hold >= `long_press_ms` | `LongPress` |
//! | Release    | Debounced release, any duration   | `Release`   |
//!
//! `LongPress` fires once per hold, while the button is still down.
//!
//! ## Start-up guard
//!
//! The same button switches the board on, so it is usually still down
//! when the poller starts.  A new driver classifies nothing until it has
//! seen a debounced release; that first release produces no event.

use std::time::Duration;

use log::debug;

use crate::config::PowerConfig;
use crate::events::{ButtonEvent, ButtonEventGroup};

/// Internal state machine for gesture detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GestureState {
    /// Waiting for the first debounced release after start-up.
    AwaitRelease { since_ms: Option<u32> },
    Idle,
    PressDebounce { since_ms: u32 },
    Held { since_ms: u32, long_sent: bool },
    ReleaseDebounce { at_ms: u32, since_ms: u32, long_sent: bool },
}

pub struct ButtonDriver {
    state: GestureState,
    debounce_ms: u32,
    long_press_ms: u32,
}

impl ButtonDriver {
    pub fn new(config: &PowerConfig) -> Self {
        Self {
            state: GestureState::AwaitRelease { since_ms: None },
            debounce_ms: config.debounce_ms,
            long_press_ms: config.long_press_ms,
        }
    }

    /// Feed one sample.  `now_ms` is monotonic milliseconds since boot,
    /// `pressed` the logical (already inverted) button level.
    pub fn tick(&mut self, now_ms: u32, pressed: bool) -> Option<ButtonEvent> {
        match self.state {
            GestureState::AwaitRelease { since_ms } => {
                if pressed {
                    self.state = GestureState::AwaitRelease { since_ms: None };
                    return None;
                }
                match since_ms {
                    None => self.state = GestureState::AwaitRelease { since_ms: Some(now_ms) },
                    Some(t) if now_ms.wrapping_sub(t) >= self.debounce_ms => {
                        debug!("button: released after start-up, gestures enabled");
                        self.state = GestureState::Idle;
                    }
                    Some(_) => {}
                }
                None
            }

            GestureState::Idle => {
                if pressed {
                    self.state = GestureState::PressDebounce { since_ms: now_ms };
                }
                None
            }

            GestureState::PressDebounce { since_ms } => {
                if !pressed {
                    self.state = GestureState::Idle;
                    return None;
                }
                if now_ms.wrapping_sub(since_ms) >= self.debounce_ms {
                    self.state = GestureState::Held {
                        since_ms,
                        long_sent: false,
                    };
                    return self.check_long(now_ms);
                }
                None
            }

            GestureState::Held { since_ms, long_sent } => {
                if !pressed {
                    self.state = GestureState::ReleaseDebounce {
                        at_ms: now_ms,
                        since_ms,
                        long_sent,
                    };
                    return None;
                }
                self.check_long(now_ms)
            }

            GestureState::ReleaseDebounce { at_ms, since_ms, long_sent } => {
                if pressed {
                    // Contact bounce: still holding.
                    self.state = GestureState::Held { since_ms, long_sent };
                    return self.check_long(now_ms);
                }
                if now_ms.wrapping_sub(at_ms) >= self.debounce_ms {
                    self.state = GestureState::Idle;
                    return Some(ButtonEvent::Release);
                }
                None
            }
        }
    }

    /// Whether the start-up guard has been passed.
    pub fn is_ready(&self) -> bool {
        !matches!(self.state, GestureState::AwaitRelease { .. })
    }

    /// Whether a debounced press is in progress.
    pub fn is_held(&self) -> bool {
        matches!(
            self.state,
            GestureState::Held { .. } | GestureState::ReleaseDebounce { .. }
        )
    }

    fn check_long(&mut self, now_ms: u32) -> Option<ButtonEvent> {
        if let GestureState::Held { since_ms, long_sent: false } = self.state {
            if now_ms.wrapping_sub(since_ms) >= self.long_press_ms {
                self.state = GestureState::Held { since_ms, long_sent: true };
                return Some(ButtonEvent::LongPress);
            }
        }
        None
    }

    /// Poller task body: sample, classify, post.  Never returns.
    pub fn run_poller(mut self, events: &ButtonEventGroup, period: Duration) -> ! {
        loop {
            let now = crate::drivers::hw_init::now_ms();
            let pressed = !crate::drivers::hw_init::gpio_read(crate::pins::PWR_BUTTON_GPIO);
            if let Some(event) = self.tick(now, pressed) {
                debug!("button: {:?} at {} ms", event, now);
                events.post(event);
            }
            std::thread::sleep(period);
        }
    }
}
