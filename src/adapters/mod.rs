//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements      | Connects to                   |
//! |---------------|-----------------|-------------------------------|
//! | `board`       | DisplaySink     | `epd_display` (delegated)     |
//! |               | RailController  | VBAT / EPD / AUX switch GPIOs |
//! |               | DelayNs         | FreeRTOS delay                |
//! | `epd_display` | DisplaySink     | SSD1681 over SPI              |
//! | `log_sink`    | EventSink       | Serial log output             |
//!
//! The event source is the [`ButtonEventGroup`](crate::events::ButtonEventGroup)
//! itself.

pub mod board;
pub mod epd_display;
pub mod log_sink;
