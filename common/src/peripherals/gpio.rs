//! STM32F1 GPIO register encodings and `embedded-hal` pins.
//!
//! Each pin owns a 4-bit field in CRL (pins 0-7) or CRH (pins 8-15): MODE in the
//! low two bits, CNF in the high two. Output levels change through BSRR so a
//! write never disturbs the other pins of the port.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin, StatefulOutputPin};

/// APB2ENR: I/O port A clock enable.
pub const RCC_APB2ENR_IOPAEN: u32 = 1 << 2;

/// APB2ENR: I/O port C clock enable.
pub const RCC_APB2ENR_IOPCEN: u32 = 1 << 4;

/// APB2ENR: SPI1 clock enable.
pub const RCC_APB2ENR_SPI1EN: u32 = 1 << 12;

/// Pin configuration nibble (CNF[1:0] << 2 | MODE[1:0]).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PinMode {
    /// General purpose push-pull output, 10 MHz.
    PushPull10MHz = 0b0001,
    /// General purpose push-pull output, 2 MHz.
    PushPull2MHz = 0b0010,
    /// Alternate function push-pull output, 50 MHz (SCK, MOSI).
    AltPushPull50MHz = 0b1011,
    /// Floating input (MISO).
    FloatingInput = 0b0100,
    /// Input with pull-up/pull-down; the ODR bit selects pull-up.
    PullUpInput = 0b1000,
}

impl PinMode {
    /// The raw nibble written into CRL/CRH.
    #[inline]
    pub const fn bits(self) -> u32 { self as u32 }
}

/// Replace the 4-bit configuration field of `pin` inside a CRL/CRH value.
///
/// `pin` is taken modulo 8: the caller picks CRL or CRH.
#[inline]
pub const fn configure_nibble(
    reg: u32,
    pin: u8,
    mode: PinMode,
) -> u32 {
    let shift = (pin as u32 % 8) * 4;
    (reg & !(0xF << shift)) | (mode.bits() << shift)
}

/// BSRR mask that drives `pin` high.
#[inline]
pub const fn bsrr_set(pin: u8) -> u32 { 1 << pin }

/// BSRR mask that drives `pin` low.
#[inline]
pub const fn bsrr_reset(pin: u8) -> u32 { 1 << (pin as u32 + 16) }

/// Register-level access to one GPIO port.
///
/// Methods take `&self`: the registers are memory mapped and several pins of the
/// same port hold handles to the same block.
pub trait PortRegisters {
    /// Read-modify-write CRL (`high == false`) or CRH (`high == true`).
    fn modify_config(
        &self,
        high: bool,
        f: impl FnOnce(u32) -> u32,
    );

    /// Write the bit set/reset register.
    fn write_bsrr(
        &self,
        mask: u32,
    );

    /// Read the input data register.
    fn read_idr(&self) -> u32;

    /// Read the output data register.
    fn read_odr(&self) -> u32;
}

impl<T: PortRegisters + ?Sized> PortRegisters for &T {
    fn modify_config(
        &self,
        high: bool,
        f: impl FnOnce(u32) -> u32,
    ) {
        (**self).modify_config(high, f);
    }

    fn write_bsrr(
        &self,
        mask: u32,
    ) {
        (**self).write_bsrr(mask);
    }

    fn read_idr(&self) -> u32 { (**self).read_idr() }

    fn read_odr(&self) -> u32 { (**self).read_odr() }
}

/// One configured pin of a GPIO port.
pub struct GpioPin<P> {
    port: P,
    pin: u8,
}

impl<P: PortRegisters> GpioPin<P> {
    /// Configure `pin` of `port` for `mode` and take a handle to it.
    ///
    /// Pull-up inputs also get their ODR bit set, which selects the pull-up.
    pub fn new(
        port: P,
        pin: u8,
        mode: PinMode,
    ) -> Self {
        assert!(pin < 16, "GPIO ports have 16 pins");
        port.modify_config(pin >= 8, |reg| configure_nibble(reg, pin, mode));
        if mode == PinMode::PullUpInput {
            port.write_bsrr(bsrr_set(pin));
        }
        Self { port, pin }
    }

    /// Pin number within the port.
    #[inline]
    pub const fn pin(&self) -> u8 { self.pin }
}

impl<P> ErrorType for GpioPin<P> {
    type Error = Infallible;
}

impl<P: PortRegisters> OutputPin for GpioPin<P> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.port.write_bsrr(bsrr_reset(self.pin));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.port.write_bsrr(bsrr_set(self.pin));
        Ok(())
    }
}

impl<P: PortRegisters> StatefulOutputPin for GpioPin<P> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> { Ok(self.port.read_odr() & (1 << self.pin) != 0) }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> { Ok(self.port.read_odr() & (1 << self.pin) == 0) }
}

impl<P: PortRegisters> InputPin for GpioPin<P> {
    fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(self.port.read_idr() & (1 << self.pin) != 0) }

    fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(self.port.read_idr() & (1 << self.pin) == 0) }
}

// =============================================================================
// Unit Tests
// =============================================================================
