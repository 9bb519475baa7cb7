//! Page-packed monochrome frame buffer mirroring the SSD1306 display RAM.
//!
//! Eight vertically stacked pixels share a byte: pixel (x, y) lives in byte
//! `x + (y / 8) * WIDTH`, bit `y % 8`. Bytes are stored page by page, which is
//! the order the controller expects in horizontal addressing mode.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::config::{BUFFER_SIZE, DISPLAY_HEIGHT, DISPLAY_WIDTH, PAGE_HEIGHT};

/// In-memory copy of the panel's pixels (1024 bytes for 128x64).
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    bytes: [u8; BUFFER_SIZE],
}

impl FrameBuffer {
    /// All pixels off.
    pub const fn new() -> Self {
        Self {
            bytes: [0; BUFFER_SIZE],
        }
    }

    /// Byte index and bit mask for an on-panel coordinate.
    #[inline]
    fn locate(
        x: i32,
        y: i32,
    ) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x >= DISPLAY_WIDTH as i32 || y >= DISPLAY_HEIGHT as i32 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some((x + (y / PAGE_HEIGHT) * DISPLAY_WIDTH, 1 << (y % PAGE_HEIGHT)))
    }

    /// Turn a pixel on or off. Coordinates off the panel are ignored.
    #[inline]
    pub fn set_pixel(
        &mut self,
        x: i32,
        y: i32,
        on: bool,
    ) {
        if let Some((idx, mask)) = Self::locate(x, y) {
            if on {
                self.bytes[idx] |= mask;
            } else {
                self.bytes[idx] &= !mask;
            }
        }
    }

    /// Pixel state, or `None` off the panel.
    #[inline]
    pub fn pixel(
        &self,
        x: i32,
        y: i32,
    ) -> Option<bool> {
        Self::locate(x, y).map(|(idx, mask)| self.bytes[idx] & mask != 0)
    }

    /// Set every byte to zero.
    pub fn clear(&mut self) { self.bytes.fill(0); }

    /// Raw bytes in transmission order.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; BUFFER_SIZE] { &self.bytes }
}

impl Default for FrameBuffer {
    fn default() -> Self { Self::new() }
}

impl core::fmt::Debug for FrameBuffer {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        let lit = self.bytes.iter().map(|b| b.count_ones()).sum::<u32>();
        f.debug_struct("FrameBuffer").field("lit_pixels", &lit).finish()
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size { Size::new(DISPLAY_WIDTH as u32, DISPLAY_HEIGHT as u32) }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.bytes.fill(if color.is_on() { 0xFF } else { 0x00 });
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
