//! Unified error types for the battpwr firmware.
//!
//! A single `Error` enum that every subsystem can convert into.  All
//! variants are `Copy` so adapters can log and drop them without
//! allocation.  The power coordinator itself never sees these: display
//! and rail commands are fire-and-forget at the port boundary.

use core::fmt;

use crate::drivers::hw_init::HwInitError;
use crate::drivers::ssd1681::EpdError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral initialisation failed.
    Init(HwInitError),
    /// The e-paper panel rejected a command or stayed busy.
    Display(EpdError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Display(e) => write!(f, "display: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

impl From<EpdError> for Error {
    fn from(e: EpdError) -> Self {
        Self::Display(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
