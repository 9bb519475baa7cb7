//! Register adapters between the `stm32f1` PAC and the common drivers.

use core::ops::Deref;

use bluepill_common::peripherals::{PortRegisters, SpiRegisters, Status};

use crate::pac::{self, gpioa};

/// Turn on the APB2 peripheral clocks in `mask` (see `RCC_APB2ENR_*`).
pub fn enable_apb2_clocks(
    rcc: &pac::RCC,
    mask: u32,
) {
    rcc.apb2enr.modify(|r, w| unsafe { w.bits(r.bits() | mask) });
}

// =============================================================================
// GPIO
// =============================================================================

/// A GPIO port (GPIOA..GPIOG share one register layout).
pub struct Port<G> {
    regs: G,
}

impl<G> Port<G>
where
    G: Deref<Target = gpioa::RegisterBlock>,
{
    pub const fn new(regs: G) -> Self { Self { regs } }
}

impl<G> PortRegisters for Port<G>
where
    G: Deref<Target = gpioa::RegisterBlock>,
{
    fn modify_config(
        &self,
        high: bool,
        f: impl FnOnce(u32) -> u32,
    ) {
        if high {
            self.regs.crh.modify(|r, w| unsafe { w.bits(f(r.bits())) });
        } else {
            self.regs.crl.modify(|r, w| unsafe { w.bits(f(r.bits())) });
        }
    }

    fn write_bsrr(
        &self,
        mask: u32,
    ) {
        self.regs.bsrr.write(|w| unsafe { w.bits(mask) });
    }

    fn read_idr(&self) -> u32 { self.regs.idr.read().bits() }

    fn read_odr(&self) -> u32 { self.regs.odr.read().bits() }
}

// =============================================================================
// SPI1
// =============================================================================

/// SPI1 register block.
pub struct Spi1 {
    regs: pac::SPI1,
}

impl Spi1 {
    pub const fn new(regs: pac::SPI1) -> Self { Self { regs } }
}

impl SpiRegisters for Spi1 {
    fn configure(
        &mut self,
        cr1: u32,
    ) {
        self.regs.cr1.write(|w| unsafe { w.bits(cr1) });
    }

    fn status(&mut self) -> Status { Status::from_bits(self.regs.sr.read().bits()) }

    fn write_data(
        &mut self,
        byte: u8,
    ) {
        self.regs.dr.write(|w| unsafe { w.bits(u32::from(byte)) });
    }

    fn read_data(&mut self) -> u8 { self.regs.dr.read().bits() as u8 }
}
