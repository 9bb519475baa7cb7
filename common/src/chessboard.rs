//! 8x8 chessboard pattern for the 128x64 panel.
//!
//! Each cell covers 16x8 pixels. Cell (row, col) is lit when `row + col` is odd,
//! so the top-left cell is dark.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::config::{BOARD_CELLS, CELL_HEIGHT, CELL_WIDTH};
use crate::drivers::{Error, Ssd1306};

/// Colour of the cell at (`row`, `col`).
#[inline]
pub const fn cell_color(
    row: usize,
    col: usize,
) -> BinaryColor {
    if (row + col) % 2 == 0 { BinaryColor::Off } else { BinaryColor::On }
}

/// Paint every pixel of every cell onto `target`.
pub fn draw_chessboard<D>(target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let cell_size = Size::new(CELL_WIDTH as u32, CELL_HEIGHT as u32);
    for row in 0..BOARD_CELLS {
        for col in 0..BOARD_CELLS {
            let top_left = Point::new((col * CELL_WIDTH) as i32, (row * CELL_HEIGHT) as i32);
            Rectangle::new(top_left, cell_size)
                .into_styled(PrimitiveStyle::with_fill(cell_color(row, col)))
                .draw(target)?;
        }
    }
    Ok(())
}

impl<SPI, RST, DC, CS, PinE> Ssd1306<SPI, RST, DC, CS>
where
    SPI: SpiBus<u8>,
    RST: OutputPin<Error = PinE>,
    DC: OutputPin<Error = PinE>,
    CS: OutputPin<Error = PinE>,
{
    /// Draw the chessboard into the frame buffer and flush it to the panel.
    pub fn show_chessboard(&mut self) -> Result<(), Error<SPI::Error, PinE>> {
        // Drawing into the frame buffer cannot fail
        let Ok(()) = draw_chessboard(self.frame_buffer_mut());
        self.flush()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
