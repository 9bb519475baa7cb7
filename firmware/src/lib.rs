//! STM32F103 bindings for the Blue Pill demos.
//!
//! The drivers in `bluepill-common` talk to hardware through small register
//! traits; this crate implements them on the `stm32f1` peripheral access crate.
//!
//! - [`board`]: GPIO port and SPI1 register adapters, clock gating
//!
//! Binaries:
//! - `oled-chessboard`: SSD1306 on SPI1 showing an 8x8 chessboard
//! - `button-blinker`: PC13 LED whose period is set with two buttons
//!
//! # Building
//!
//! ```bash
//! cd firmware && cargo run --release --bin oled-chessboard
//! ```
//!
//! The binaries only build for `thumbv7m-none-eabi`; `firmware/.cargo/config.toml`
//! selects it when cargo runs from this directory.
//!
//! ```bash
//! cd firmware && cargo run --release --bin button-blinker
//! ```

#![no_std]

// The PAC is an ARM-only dependency; on the host this library is empty
#[cfg(target_arch = "arm")]
pub mod board;

#[cfg(target_arch = "arm")]
pub use stm32f1::stm32f103 as pac;
