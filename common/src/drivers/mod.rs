//! Display drivers.
//!
//! - `ssd1306`: SSD1306 OLED driver over a 4-wire SPI bus
//! - `commands`: SSD1306 opcodes and the power-on command table
//! - `frame_buffer`: page-packed monochrome frame buffer

pub mod commands;
mod frame_buffer;
mod ssd1306;

pub use commands::{Command, INIT_SEQUENCE};
pub use frame_buffer::FrameBuffer;
pub use ssd1306::{Error, Ssd1306};
