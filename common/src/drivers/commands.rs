//! SSD1306 command set.
//!
//! The power-on configuration is kept as a table of [`Command`] entries rather
//! than inline bytes, so the exact byte stream sent by `initialize()` can be
//! checked against the table on its own.

use crate::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH, PAGE_COUNT};

// SSD1306 opcodes
pub const DISPLAY_OFF: u8 = 0xAE;
pub const DISPLAY_ON: u8 = 0xAF;
pub const SET_DISPLAY_CLOCK_DIV: u8 = 0xD5;
pub const SET_MULTIPLEX: u8 = 0xA8;
pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
pub const SET_START_LINE: u8 = 0x40;
pub const CHARGE_PUMP: u8 = 0x8D;
pub const MEMORY_MODE: u8 = 0x20;
pub const SEGMENT_REMAP: u8 = 0xA0;
pub const COM_SCAN_DEC: u8 = 0xC8;
pub const SET_COM_PINS: u8 = 0xDA;
pub const SET_CONTRAST: u8 = 0x81;
pub const SET_PRECHARGE: u8 = 0xD9;
pub const SET_VCOM_DETECT: u8 = 0xDB;
pub const DISPLAY_ALL_ON_RESUME: u8 = 0xA4;
pub const NORMAL_DISPLAY: u8 = 0xA6;
pub const COLUMN_ADDR: u8 = 0x21;
pub const PAGE_ADDR: u8 = 0x22;

const MULTIPLEX_RATIO: u8 = (DISPLAY_HEIGHT - 1) as u8;
const LAST_COLUMN: u8 = (DISPLAY_WIDTH - 1) as u8;
const LAST_PAGE: u8 = (PAGE_COUNT - 1) as u8;

/// One controller command: an opcode and its operand bytes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    pub opcode: u8,
    pub operands: &'static [u8],
}

impl Command {
    /// Command without operands.
    pub const fn new(opcode: u8) -> Self {
        Self {
            opcode,
            operands: &[],
        }
    }

    /// Command followed by operand bytes.
    pub const fn with(
        opcode: u8,
        operands: &'static [u8],
    ) -> Self {
        Self { opcode, operands }
    }

    /// Opcode then operands, in wire order.
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        core::iter::once(self.opcode).chain(self.operands.iter().copied())
    }
}

/// Power-on configuration for a 128x64 panel with the internal charge pump.
pub const INIT_SEQUENCE: [Command; 16] = [
    Command::new(DISPLAY_OFF),
    // Oscillator default, divide ratio 1
    Command::with(SET_DISPLAY_CLOCK_DIV, &[0x80]),
    Command::with(SET_MULTIPLEX, &[MULTIPLEX_RATIO]),
    Command::with(SET_DISPLAY_OFFSET, &[0x00]),
    // Start line 0
    Command::new(SET_START_LINE),
    Command::with(CHARGE_PUMP, &[0x14]),
    // Horizontal addressing
    Command::with(MEMORY_MODE, &[0x00]),
    // Column 127 mapped to SEG0
    Command::new(SEGMENT_REMAP | 0x01),
    Command::new(COM_SCAN_DEC),
    // Alternative COM pin layout
    Command::with(SET_COM_PINS, &[0x12]),
    Command::with(SET_CONTRAST, &[0xCF]),
    Command::with(SET_PRECHARGE, &[0xF1]),
    Command::with(SET_VCOM_DETECT, &[0x40]),
    Command::new(DISPLAY_ALL_ON_RESUME),
    Command::new(NORMAL_DISPLAY),
    Command::new(DISPLAY_ON),
];

/// Address window covering every column and page, sent before each flush.
pub const FULL_WINDOW: [Command; 2] = [
    Command::with(COLUMN_ADDR, &[0, LAST_COLUMN]),
    Command::with(PAGE_ADDR, &[0, LAST_PAGE]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_sequence_bytes() {
        let bytes: Vec<u8> = INIT_SEQUENCE.iter().flat_map(Command::bytes).collect();
        assert_eq!(
            bytes,
            [
                0xAE, 0xD5, 0x80, 0xA8, 0x3F, 0xD3, 0x00, 0x40, 0x8D, 0x14, 0x20, 0x00, 0xA1, 0xC8, 0xDA, 0x12, 0x81, 0xCF,
                0xD9, 0xF1, 0xDB, 0x40, 0xA4, 0xA6, 0xAF,
            ],
            "power-on bytes must match the controller's expected sequence exactly"
        );
    }

    #[test]
    fn test_init_sequence_bounds() {
        assert_eq!(INIT_SEQUENCE.first().map(|c| c.opcode), Some(DISPLAY_OFF), "configure with the panel off");
        assert_eq!(INIT_SEQUENCE.last().map(|c| c.opcode), Some(DISPLAY_ON), "switch on last");
    }

    #[test]
    fn test_full_window_bytes() {
        let bytes: Vec<u8> = FULL_WINDOW.iter().flat_map(Command::bytes).collect();
        assert_eq!(bytes, [0x21, 0x00, 0x7F, 0x22, 0x00, 0x07]);
    }

    #[test]
    fn test_command_without_operands() {
        let cmd = Command::new(NORMAL_DISPLAY);
        assert_eq!(cmd.bytes().collect::<Vec<_>>(), [0xA6]);
    }
}
