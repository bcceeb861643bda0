//! E-paper display adapter.
//!
//! Implements [`DisplaySink`] on top of the SSD1681 driver and a local
//! [`Framebuffer`].  `begin` wipes the panel to white with one full
//! refresh and leaves the controller awake.  Every render is a full redraw: clear, two centered
//! lines, full refresh, hibernate.  The controller is re-initialised
//! lazily when a render finds it asleep.
//!
//! Driver errors stop the current render, are logged, and are not
//! reported upward.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_7X13_BOLD};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;
use log::{error, info};

use crate::app::ports::DisplaySink;
use crate::drivers::framebuffer::Framebuffer;
use crate::drivers::ssd1681::{EpdError, Ssd1681, HEIGHT, WIDTH};
use crate::error::Error;

/// Baseline of the headline.
pub const HEADLINE_Y: i32 = 90;
/// Baseline of the hint line.
pub const SUBTEXT_Y: i32 = 150;

const HEADLINE_FONT: &MonoFont<'static> = &FONT_10X20;
const SUBTEXT_FONT: &MonoFont<'static> = &FONT_7X13_BOLD;

/// Paint the status screen into `fb`.  Pure; no panel I/O.
pub fn compose(fb: &mut Framebuffer, headline: &str, subtext: &str) {
    fb.clear_white();

    let centered = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Alphabetic)
        .build();
    let x = i32::from(WIDTH) / 2;

    // Infallible target: the results carry no information.
    let _ = Text::with_text_style(
        headline,
        Point::new(x, HEADLINE_Y),
        MonoTextStyle::new(HEADLINE_FONT, BinaryColor::On),
        centered,
    )
    .draw(fb);
    let _ = Text::with_text_style(
        subtext,
        Point::new(x, SUBTEXT_Y),
        MonoTextStyle::new(SUBTEXT_FONT, BinaryColor::On),
        centered,
    )
    .draw(fb);
}

pub struct EpdDisplay<SPI, DC, RST, BUSY, D> {
    epd: Ssd1681<SPI, DC, RST, BUSY, D>,
    fb: Box<Framebuffer>,
    renders: u32,
}

impl<SPI, DC, RST, BUSY, D> EpdDisplay<SPI, DC, RST, BUSY, D>
where
    SPI: SpiDevice<u8>,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
    D: DelayNs,
{
    pub fn new(epd: Ssd1681<SPI, DC, RST, BUSY, D>) -> Self {
        Self {
            epd,
            fb: Box::default(),
            renders: 0,
        }
    }

    /// Completed full refreshes since boot.
    pub fn renders(&self) -> u32 {
        self.renders
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.fb
    }

    fn clear_panel(&mut self) -> Result<(), EpdError> {
        self.epd.init()?;
        self.fb.clear_white();
        self.epd.write_frame(self.fb.as_bytes())?;
        self.epd.refresh_full()
    }

    fn try_render(&mut self, headline: &str, subtext: &str) -> Result<(), EpdError> {
        if self.epd.is_asleep() {
            self.epd.init()?;
        }
        compose(&mut self.fb, headline, subtext);
        self.epd.write_frame(self.fb.as_bytes())?;
        self.epd.refresh_full()?;
        self.epd.hibernate()
    }
}

impl<SPI, DC, RST, BUSY, D> DisplaySink for EpdDisplay<SPI, DC, RST, BUSY, D>
where
    SPI: SpiDevice<u8>,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
    D: DelayNs,
{
    fn begin(&mut self) {
        match self.clear_panel() {
            Ok(()) => info!("display: panel cleared ({}x{})", WIDTH, HEIGHT),
            Err(e) => error!("{}", Error::from(e)),
        }
    }

    fn render_full(&mut self, headline: &str, subtext: &str) {
        match self.try_render(headline, subtext) {
            Ok(()) => {
                self.renders = self.renders.wrapping_add(1);
                info!("display: \"{}\" committed", headline);
            }
            Err(e) => error!("{} (rendering \"{}\")", Error::from(e), headline),
        }
    }
}
