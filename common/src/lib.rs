//! Blue Pill demo library - testable modules for the OLED and blinker firmware.
//!
//! This library contains the peripheral logic that can be tested on the host machine.
//! The firmware binaries (`firmware/`) bind it to the STM32F103 registers.
//!
//! - [`peripherals`]: SPI master and GPIO register encodings behind capability traits
//! - [`drivers`]: SSD1306 display driver, command table and frame buffer
//! - [`chessboard`]: 8x8 chessboard pattern generator
//! - [`state`]: Blink period and per-button press latches
//! - [`blinker`]: Button-controlled LED blink loop
//! - [`delay`]: Opaque busy-wait tick delays
//! - [`config`]: Pin assignments, geometry and timing constants
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test -p bluepill-common
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the firmware runs as `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

// Must come first so the logging macros are visible to every module below
#[macro_use]
mod fmt;

pub mod blinker;
pub mod chessboard;
pub mod config;
pub mod delay;
pub mod drivers;
pub mod peripherals;
pub mod state;

#[cfg(test)]
mod testing;

// Re-export commonly used items
pub use blinker::Blinker;
pub use delay::{NopDelay, TickDelay};
pub use drivers::{FrameBuffer, Ssd1306};
pub use peripherals::{SpiConfig, SpiMaster, SpiRegisters};
