//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART / USB-CDC on the board).

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }

    /// The single line logged for `event`.
    pub fn format(event: &AppEvent) -> String {
        match event {
            AppEvent::RailsEnergised => "RAILS | VBAT, EPD, AUX energised".to_owned(),
            AppEvent::Started(state) => format!("START | initial_state={}", state.name()),
            AppEvent::StateChanged { from, to } => {
                format!("STATE | {} -> {}", from.name(), to.name())
            }
            AppEvent::VbatCutting { settle_ms } => {
                format!("VBAT | cutting after {}ms", settle_ms)
            }
            AppEvent::Ignored { state, event } => {
                format!("IGNORE | {:?} in {}", event, state.name())
            }
        }
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        let line = Self::format(event);
        match event {
            AppEvent::Ignored { .. } => debug!("{}", line),
            AppEvent::VbatCutting { .. } => warn!("{}", line),
            _ => info!("{}", line),
        }
    }
}
