//! 1-bpp framebuffer in SSD1681 RAM layout.
//!
//! `BinaryColor::On` is ink (black), stored as a cleared bit; a blank
//! frame is all `0xFF`.  Row-major, MSB is the leftmost pixel.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use super::ssd1681::{FRAME_BYTES, HEIGHT, WIDTH};

const ROW_BYTES: usize = WIDTH as usize / 8;

pub struct Framebuffer {
    buf: [u8; FRAME_BYTES],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    pub const fn new() -> Self {
        Self {
            buf: [0xFF; FRAME_BYTES],
        }
    }

    /// Fill with paper white.
    pub fn clear_white(&mut self) {
        self.buf.fill(0xFF);
    }

    pub fn as_bytes(&self) -> &[u8; FRAME_BYTES] {
        &self.buf
    }

    /// Ink at `(x, y)`, or `None` off-screen.
    pub fn pixel(&self, x: i32, y: i32) -> Option<BinaryColor> {
        let (idx, mask) = Self::locate(x, y)?;
        Some(if self.buf[idx] & mask == 0 {
            BinaryColor::On
        } else {
            BinaryColor::Off
        })
    }

    /// Number of inked pixels.
    pub fn ink_count(&self) -> u32 {
        self.buf.iter().map(|b| b.count_zeros()).sum()
    }

    fn locate(x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x >= i32::from(WIDTH) || y >= i32::from(HEIGHT) {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some((y * ROW_BYTES + x / 8, 0x80 >> (x % 8)))
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(u32::from(WIDTH), u32::from(HEIGHT))
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some((idx, mask)) = Self::locate(point.x, point.y) {
                match color {
                    BinaryColor::On => self.buf[idx] &= !mask,
                    BinaryColor::Off => self.buf[idx] |= mask,
                }
            }
        }
        Ok(())
    }
}
