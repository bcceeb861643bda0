//! Mock hardware for integration tests.
//!
//! Display, rail and delay calls land in one ordered log so tests can
//! assert on cross-port ordering (render before settle before VBAT cut).

use std::collections::VecDeque;
use std::time::Duration;

use battpwr::app::events::AppEvent;
use battpwr::app::ports::{DisplaySink, EventSink, EventSource, Rail, RailController};
use battpwr::events::ButtonEvent;
use embedded_hal::delay::DelayNs;

// ── Call record ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    RailOn(Rail),
    RailOff(Rail),
    Begin,
    Render { headline: String, subtext: String },
    Delay { ns: u64 },
}

// ── MockHardware ──────────────────────────────────────────────

#[derive(Default)]
pub struct MockHardware {
    pub calls: Vec<Call>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn renders(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Render { headline, .. } => Some(headline.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn last_headline(&self) -> Option<&str> {
        self.renders().last().copied()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    pub fn position(&self, call: &Call) -> Option<usize> {
        self.calls.iter().position(|c| c == call)
    }

    pub fn total_delay(&self) -> Duration {
        let ns = self
            .calls
            .iter()
            .map(|c| match c {
                Call::Delay { ns } => *ns,
                _ => 0,
            })
            .sum();
        Duration::from_nanos(ns)
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl DisplaySink for MockHardware {
    fn begin(&mut self) {
        self.calls.push(Call::Begin);
    }

    fn render_full(&mut self, headline: &str, subtext: &str) {
        self.calls.push(Call::Render {
            headline: headline.to_owned(),
            subtext: subtext.to_owned(),
        });
    }
}

impl RailController for MockHardware {
    fn set_rail(&mut self, rail: Rail, on: bool) {
        self.calls.push(if on { Call::RailOn(rail) } else { Call::RailOff(rail) });
    }
}

impl DelayNs for MockHardware {
    fn delay_ns(&mut self, ns: u32) {
        self.calls.push(Call::Delay { ns: u64::from(ns) });
    }

    // One record per settle instead of the default 1 µs chunks.
    fn delay_ms(&mut self, ms: u32) {
        self.calls.push(Call::Delay {
            ns: u64::from(ms) * 1_000_000,
        });
    }
}

// ── Scripted event source ─────────────────────────────────────

/// Replays a fixed sequence, then times out forever.
pub struct ScriptedSource {
    events: VecDeque<ButtonEvent>,
    pub waits: Vec<Duration>,
}

#[allow(dead_code)]
impl ScriptedSource {
    pub fn new(events: impl IntoIterator<Item = ButtonEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            waits: Vec::new(),
        }
    }
}

impl EventSource for ScriptedSource {
    fn wait_event(&mut self, timeout: Duration) -> ButtonEvent {
        self.waits.push(timeout);
        self.events.pop_front().unwrap_or(ButtonEvent::Timeout)
    }
}

// ── Recording event sink ──────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
