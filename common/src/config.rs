//! Board, display and timing configuration constants.
//!
//! Pin numbers are bit positions within their GPIO port. All delays are opaque
//! busy-wait tick counts (see [`crate::delay`]), not calibrated time.

// =============================================================================
// Display Configuration
// =============================================================================

/// Panel width in pixels (SSD1306 128x64).
pub const DISPLAY_WIDTH: usize = 128;

/// Panel height in pixels.
pub const DISPLAY_HEIGHT: usize = 64;

/// Rows packed into one frame buffer byte (one controller page).
pub const PAGE_HEIGHT: usize = 8;

/// Number of pages on the panel.
pub const PAGE_COUNT: usize = DISPLAY_HEIGHT / PAGE_HEIGHT;

/// Frame buffer size in bytes (1024 for 128x64).
pub const BUFFER_SIZE: usize = DISPLAY_WIDTH * PAGE_COUNT;

/// Ticks held in each half of the reset pulse (low phase, then settle phase).
pub const RESET_PULSE_TICKS: u32 = 100_000;

// =============================================================================
// Chessboard Configuration
// =============================================================================

/// Cells per side of the chessboard.
pub const BOARD_CELLS: usize = 8;

/// Cell width in pixels (128 / 8 = 16).
pub const CELL_WIDTH: usize = DISPLAY_WIDTH / BOARD_CELLS;

/// Cell height in pixels (64 / 8 = 8).
pub const CELL_HEIGHT: usize = DISPLAY_HEIGHT / BOARD_CELLS;

// =============================================================================
// SPI Configuration
// =============================================================================

/// Byte clocked out by `read()` to generate the receive clock.
pub const SPI_FILLER_BYTE: u8 = 0xFF;

// =============================================================================
// Pin Assignments (program 1: OLED on GPIOA)
// =============================================================================

/// Display reset line (PA0, active-low).
pub const OLED_RST_PIN: u8 = 0;

/// Display data/command select (PA1, low = command).
pub const OLED_DC_PIN: u8 = 1;

/// Display chip select (PA2, active-low).
pub const OLED_CS_PIN: u8 = 2;

/// SPI1 clock (PA5).
pub const SPI1_SCK_PIN: u8 = 5;

/// SPI1 data in (PA6). Wired but unused by the display.
pub const SPI1_MISO_PIN: u8 = 6;

/// SPI1 data out (PA7).
pub const SPI1_MOSI_PIN: u8 = 7;

// =============================================================================
// Pin Assignments (program 2: blinker)
// =============================================================================

/// Status LED (PC13).
pub const LED_PIN: u8 = 13;

/// Button A (PA0, active-low). Halves the blink period.
pub const BUTTON_A_PIN: u8 = 0;

/// Button C (PC14, active-low). Doubles the blink period.
pub const BUTTON_C_PIN: u8 = 14;

// =============================================================================
// Blink Period Configuration
// =============================================================================

/// Half-period the blinker starts with, in delay ticks.
pub const BLINK_PERIOD_INITIAL: u32 = 500_000;

/// Shortest half-period button A may reach (initial / 16).
pub const BLINK_PERIOD_MIN: u32 = 31_250;

/// Longest half-period button C may reach (initial * 8).
pub const BLINK_PERIOD_MAX: u32 = 4_000_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_size() {
        assert_eq!(BUFFER_SIZE, 1024, "128x64 panel packs into 1024 bytes");
        assert_eq!(PAGE_COUNT, 8);
    }

    #[test]
    fn test_cell_geometry() {
        assert_eq!(CELL_WIDTH, 16);
        assert_eq!(CELL_HEIGHT, 8);
    }

    #[test]
    fn test_period_limits_ordered() {
        assert!(BLINK_PERIOD_MIN <= BLINK_PERIOD_INITIAL);
        assert!(BLINK_PERIOD_INITIAL <= BLINK_PERIOD_MAX);
    }
}
