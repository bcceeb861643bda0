//! SSD1681 e-paper controller, 200×200 black/white, write-only SPI.
//!
//! Blocking driver over `embedded-hal` 1.0 traits.  Only the subset the
//! status screen needs: init, full-frame RAM write, full refresh and deep
//! sleep.  After [`hibernate`](Ssd1681::hibernate) the controller ignores
//! SPI until a hardware reset, so the next [`init`](Ssd1681::init) must
//! run before any write.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;
use log::{debug, warn};

pub const WIDTH: u16 = 200;
pub const HEIGHT: u16 = 200;

/// One bit per pixel, rows of `WIDTH / 8` bytes.
pub const FRAME_BYTES: usize = WIDTH as usize * HEIGHT as usize / 8;

const CMD_DRIVER_OUTPUT_CONTROL: u8 = 0x01;
const CMD_DEEP_SLEEP: u8 = 0x10;
const CMD_DATA_ENTRY_MODE: u8 = 0x11;
const CMD_SOFT_RESET: u8 = 0x12;
const CMD_TEMP_SENSOR_CONTROL: u8 = 0x18;
const CMD_MASTER_ACTIVATION: u8 = 0x20;
const CMD_DISPLAY_UPDATE_CTRL2: u8 = 0x22;
const CMD_WRITE_RAM_BW: u8 = 0x24;
const CMD_WRITE_RAM_RED: u8 = 0x26;
const CMD_BORDER_WAVEFORM: u8 = 0x3C;
const CMD_SET_RAM_X_RANGE: u8 = 0x44;
const CMD_SET_RAM_Y_RANGE: u8 = 0x45;
const CMD_SET_RAM_X_COUNTER: u8 = 0x4E;
const CMD_SET_RAM_Y_COUNTER: u8 = 0x4F;

/// Clock + analog on, load temperature and waveform, display, all off.
const UPDATE_FULL: u8 = 0xF7;
/// Deep sleep mode 1: RAM retained, image held.
const DEEP_SLEEP_MODE_1: u8 = 0x01;
/// X increment, Y increment.
const DATA_ENTRY_XINC_YINC: u8 = 0x03;
/// Internal temperature sensor.
const TEMP_SENSOR_INTERNAL: u8 = 0x80;
const BORDER_FOLLOW_LUT: u8 = 0x05;

const BUSY_POLL_MS: u32 = 1;

/// Panel driver failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpdError {
    /// SPI transfer rejected by the bus.
    Spi,
    /// DC or RST could not be driven, or BUSY could not be read.
    Pin,
    /// BUSY stayed high past the configured bound.
    BusyTimeout,
}

impl core::fmt::Display for EpdError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi => write!(f, "SPI write failed"),
            Self::Pin => write!(f, "control pin access failed"),
            Self::BusyTimeout => write!(f, "BUSY line stuck high"),
        }
    }
}

pub struct Ssd1681<SPI, DC, RST, BUSY, D> {
    spi: SPI,
    dc: DC,
    rst: RST,
    busy: BUSY,
    delay: D,
    busy_timeout_ms: u32,
    asleep: bool,
}

impl<SPI, DC, RST, BUSY, D> Ssd1681<SPI, DC, RST, BUSY, D>
where
    SPI: SpiDevice<u8>,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
    D: DelayNs,
{
    /// Wrap the bus and control lines.  Touches no hardware; the panel
    /// counts as asleep until [`init`](Self::init) succeeds.
    pub fn new(spi: SPI, dc: DC, rst: RST, busy: BUSY, delay: D, busy_timeout_ms: u32) -> Self {
        Self {
            spi,
            dc,
            rst,
            busy,
            delay,
            busy_timeout_ms,
            asleep: true,
        }
    }

    /// Hardware reset and full register setup for a 200×200 glass.
    pub fn init(&mut self) -> Result<(), EpdError> {
        self.reset()?;
        self.wait_busy()?;

        self.command(CMD_SOFT_RESET)?;
        self.wait_busy()?;

        let last_row = HEIGHT - 1;
        self.command_with(
            CMD_DRIVER_OUTPUT_CONTROL,
            &[(last_row % 256) as u8, (last_row / 256) as u8, 0x00],
        )?;
        self.command_with(CMD_BORDER_WAVEFORM, &[BORDER_FOLLOW_LUT])?;
        self.command_with(CMD_TEMP_SENSOR_CONTROL, &[TEMP_SENSOR_INTERNAL])?;
        self.command_with(CMD_DATA_ENTRY_MODE, &[DATA_ENTRY_XINC_YINC])?;
        self.command_with(CMD_SET_RAM_X_RANGE, &[0x00, (WIDTH / 8 - 1) as u8])?;
        self.command_with(
            CMD_SET_RAM_Y_RANGE,
            &[0x00, 0x00, (last_row % 256) as u8, (last_row / 256) as u8],
        )?;
        self.set_ram_counters()?;
        self.wait_busy()?;

        self.asleep = false;
        debug!("ssd1681: init complete");
        Ok(())
    }

    /// Load `frame` into both the current and previous RAM banks.
    pub fn write_frame(&mut self, frame: &[u8; FRAME_BYTES]) -> Result<(), EpdError> {
        self.set_ram_counters()?;
        self.command_with(CMD_WRITE_RAM_BW, frame)?;
        self.set_ram_counters()?;
        self.command_with(CMD_WRITE_RAM_RED, frame)
    }

    /// Full-waveform refresh; blocks until BUSY drops.
    pub fn refresh_full(&mut self) -> Result<(), EpdError> {
        self.command_with(CMD_DISPLAY_UPDATE_CTRL2, &[UPDATE_FULL])?;
        self.command(CMD_MASTER_ACTIVATION)?;
        self.wait_busy()
    }

    /// Enter deep sleep.  The image stays on the glass with the supply
    /// removed.
    pub fn hibernate(&mut self) -> Result<(), EpdError> {
        self.command_with(CMD_DEEP_SLEEP, &[DEEP_SLEEP_MODE_1])?;
        self.asleep = true;
        Ok(())
    }

    /// True before the first init and after every hibernate.
    pub fn is_asleep(&self) -> bool {
        self.asleep
    }

    // ── Internal ──────────────────────────────────────────────

    fn reset(&mut self) -> Result<(), EpdError> {
        self.rst.set_high().map_err(|_| EpdError::Pin)?;
        self.delay.delay_ms(10);
        self.rst.set_low().map_err(|_| EpdError::Pin)?;
        self.delay.delay_ms(2);
        self.rst.set_high().map_err(|_| EpdError::Pin)?;
        self.delay.delay_ms(10);
        Ok(())
    }

    fn wait_busy(&mut self) -> Result<(), EpdError> {
        let mut waited = 0;
        while self.busy.is_high().map_err(|_| EpdError::Pin)? {
            if waited >= self.busy_timeout_ms {
                warn!("ssd1681: BUSY still high after {} ms", waited);
                return Err(EpdError::BusyTimeout);
            }
            self.delay.delay_ms(BUSY_POLL_MS);
            waited += BUSY_POLL_MS;
        }
        Ok(())
    }

    fn set_ram_counters(&mut self) -> Result<(), EpdError> {
        self.command_with(CMD_SET_RAM_X_COUNTER, &[0x00])?;
        self.command_with(CMD_SET_RAM_Y_COUNTER, &[0x00, 0x00])
    }

    fn command(&mut self, cmd: u8) -> Result<(), EpdError> {
        self.dc.set_low().map_err(|_| EpdError::Pin)?;
        self.spi.write(&[cmd]).map_err(|_| EpdError::Spi)
    }

    fn command_with(&mut self, cmd: u8, data: &[u8]) -> Result<(), EpdError> {
        self.command(cmd)?;
        self.dc.set_high().map_err(|_| EpdError::Pin)?;
        self.spi.write(data).map_err(|_| EpdError::Spi)
    }
}
