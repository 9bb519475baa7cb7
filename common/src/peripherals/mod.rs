//! Peripheral abstractions for the STM32F1 register blocks used by the demos.
//!
//! - `spi`: SPI1 master with blocking, flag-polling transfers
//! - `gpio`: CRL/CRH/BSRR encodings and pins over a port register block
//!
//! Register access sits behind the [`SpiRegisters`] and [`PortRegisters`] traits.
//! The firmware implements them for the PAC register blocks; tests use fakes.

mod gpio;
mod spi;

pub use gpio::{
    GpioPin,
    PinMode,
    PortRegisters,
    RCC_APB2ENR_IOPAEN,
    RCC_APB2ENR_IOPCEN,
    RCC_APB2ENR_SPI1EN,
    bsrr_reset,
    bsrr_set,
    configure_nibble,
};
pub use spi::{BaudDivisor, BitOrder, CR1_SPE, Flag, SpiConfig, SpiError, SpiMaster, SpiRegisters, Status};
