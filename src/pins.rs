//! GPIO / peripheral pin assignments for the Waveshare ESP32-S3 1.54" e-paper board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.
//!
//! The SPI and control lines of the panel are claimed through typed
//! `esp-idf-hal` peripherals in `main.rs`; keep those in sync with the
//! numbers below.

// ---------------------------------------------------------------------------
// E-paper panel (SSD1681, 200×200, write-only SPI)
// ---------------------------------------------------------------------------

pub const EPD_DC_GPIO: i32 = 10;
pub const EPD_CS_GPIO: i32 = 11;
pub const EPD_SCK_GPIO: i32 = 12;
pub const EPD_MOSI_GPIO: i32 = 13;
pub const EPD_RST_GPIO: i32 = 9;
/// HIGH while the controller is busy refreshing.
pub const EPD_BUSY_GPIO: i32 = 8;

/// SPI clock for the panel.  The SSD1681 tolerates up to 20 MHz writes.
pub const EPD_SPI_HZ: u32 = 10_000_000;

// ---------------------------------------------------------------------------
// Power rails (board power switches)
// ---------------------------------------------------------------------------

/// Battery hold switch.  HIGH keeps VBAT connected; LOW lets the board die
/// once the button is released.
pub const VBAT_PWR_GPIO: i32 = 17;
pub const VBAT_PWR_ACTIVE_HIGH: bool = true;

/// Panel supply load switch (P-channel, active LOW).
pub const EPD_PWR_GPIO: i32 = 6;
pub const EPD_PWR_ACTIVE_HIGH: bool = false;

/// Auxiliary (audio codec / amplifier) supply load switch (active LOW).
pub const AUX_PWR_GPIO: i32 = 42;
pub const AUX_PWR_ACTIVE_HIGH: bool = false;

// ---------------------------------------------------------------------------
// User input / indicator
// ---------------------------------------------------------------------------

/// Power push-button, active-low with pull-up.
pub const PWR_BUTTON_GPIO: i32 = 18;

/// Indicator LED driven by the blink task.
pub const LED_GPIO: i32 = 3;
