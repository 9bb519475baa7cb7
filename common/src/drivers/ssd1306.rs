//! SSD1306 OLED driver over a 4-wire SPI bus.
//!
//! The driver owns the bus, the three control lines and a [`FrameBuffer`].
//! Drawing only touches the buffer; [`Ssd1306::flush()`] sends all of it.
//!
//! # Wire format
//!
//! Every byte is framed on its own: DC is set first (low = command, high =
//! data), then CS is pulled low for a single SPI write and released again.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use super::commands::{Command, FULL_WINDOW, INIT_SEQUENCE};
use super::frame_buffer::FrameBuffer;
use crate::config::{BUFFER_SIZE, DISPLAY_HEIGHT, DISPLAY_WIDTH, RESET_PULSE_TICKS};
use crate::delay::TickDelay;

/// Bus or control-line failure, carrying the underlying error.
///
/// With the STM32F1 implementations both variants are uninhabited.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<SpiE, PinE> {
    Spi(SpiE),
    Pin(PinE),
}

/// SSD1306 128x64 display.
pub struct Ssd1306<SPI, RST, DC, CS> {
    spi: SPI,
    rst: RST,
    dc: DC,
    cs: CS,
    buffer: FrameBuffer,
}

impl<SPI, RST, DC, CS, PinE> Ssd1306<SPI, RST, DC, CS>
where
    SPI: SpiBus<u8>,
    RST: OutputPin<Error = PinE>,
    DC: OutputPin<Error = PinE>,
    CS: OutputPin<Error = PinE>,
{
    /// Take ownership of the bus and control lines. Nothing is sent yet.
    pub const fn new(
        spi: SPI,
        rst: RST,
        dc: DC,
        cs: CS,
    ) -> Self {
        Self {
            spi,
            rst,
            dc,
            cs,
            buffer: FrameBuffer::new(),
        }
    }

    /// Reset the controller, send the power-on table and clear the buffer.
    ///
    /// The reset pulse holds RST low for [`RESET_PULSE_TICKS`] and then waits the
    /// same again before the first command.
    pub fn initialize<D: TickDelay>(
        &mut self,
        delay: &mut D,
    ) -> Result<(), Error<SPI::Error, PinE>> {
        // Idle levels: out of reset, deselected
        self.rst.set_high().map_err(Error::Pin)?;
        self.cs.set_high().map_err(Error::Pin)?;

        self.rst.set_low().map_err(Error::Pin)?;
        delay.delay_ticks(RESET_PULSE_TICKS);
        self.rst.set_high().map_err(Error::Pin)?;
        delay.delay_ticks(RESET_PULSE_TICKS);
        debug!("SSD1306 reset pulse done");

        for command in &INIT_SEQUENCE {
            self.send_command(command)?;
        }

        self.buffer.clear();
        info!("SSD1306 initialised ({=usize} commands)", INIT_SEQUENCE.len());
        Ok(())
    }

    /// Send one command byte (DC low).
    pub fn write_command(
        &mut self,
        byte: u8,
    ) -> Result<(), Error<SPI::Error, PinE>> {
        self.dc.set_low().map_err(Error::Pin)?;
        self.write_framed(byte)
    }

    /// Send one data byte (DC high).
    pub fn write_data(
        &mut self,
        byte: u8,
    ) -> Result<(), Error<SPI::Error, PinE>> {
        self.dc.set_high().map_err(Error::Pin)?;
        self.write_framed(byte)
    }

    /// Send an opcode and its operands, one command write per byte.
    pub fn send_command(
        &mut self,
        command: &Command,
    ) -> Result<(), Error<SPI::Error, PinE>> {
        for byte in command.bytes() {
            self.write_command(byte)?;
        }
        Ok(())
    }

    /// Select, write one byte, deselect.
    fn write_framed(
        &mut self,
        byte: u8,
    ) -> Result<(), Error<SPI::Error, PinE>> {
        self.cs.set_low().map_err(Error::Pin)?;
        self.spi.write(&[byte]).map_err(Error::Spi)?;
        self.cs.set_high().map_err(Error::Pin)
    }

    /// Set the full address window and send the whole frame buffer.
    pub fn flush(&mut self) -> Result<(), Error<SPI::Error, PinE>> {
        for command in &FULL_WINDOW {
            self.send_command(command)?;
        }
        for idx in 0..BUFFER_SIZE {
            let byte = self.buffer.as_bytes()[idx];
            self.write_data(byte)?;
        }
        trace!("SSD1306 frame flushed");
        Ok(())
    }

    /// Give back the bus and control lines.
    pub fn release(self) -> (SPI, RST, DC, CS) { (self.spi, self.rst, self.dc, self.cs) }
}

impl<SPI, RST, DC, CS> Ssd1306<SPI, RST, DC, CS> {
    /// Turn a buffered pixel on or off. Coordinates off the panel are ignored.
    #[inline]
    pub fn set_pixel(
        &mut self,
        x: i32,
        y: i32,
        on: bool,
    ) {
        self.buffer.set_pixel(x, y, on);
    }

    /// Buffered pixel state, or `None` off the panel.
    #[inline]
    pub fn pixel(
        &self,
        x: i32,
        y: i32,
    ) -> Option<bool> {
        self.buffer.pixel(x, y)
    }

    /// Buffered frame.
    #[inline]
    pub const fn frame_buffer(&self) -> &FrameBuffer { &self.buffer }

    /// Buffered frame, for drawing.
    #[inline]
    pub fn frame_buffer_mut(&mut self) -> &mut FrameBuffer { &mut self.buffer }
}

impl<SPI, RST, DC, CS> OriginDimensions for Ssd1306<SPI, RST, DC, CS> {
    fn size(&self) -> Size { Size::new(DISPLAY_WIDTH as u32, DISPLAY_HEIGHT as u32) }
}

impl<SPI, RST, DC, CS> DrawTarget for Ssd1306<SPI, RST, DC, CS> {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.buffer.draw_iter(pixels)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
