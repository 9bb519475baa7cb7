//! Blocking SPI master over the STM32F1 SPI register block.
//!
//! Every transfer busy-polls the status register. `write_byte()` waits for TXE,
//! loads DR, then waits for BSY to clear, so a returning caller never leaves a
//! byte half-shifted on the wire. By default the waits never give up; a poll
//! limit can be configured to turn a stalled peripheral into [`SpiError::Timeout`].

use embedded_hal::spi::{self, ErrorKind, Mode, Phase, Polarity, SpiBus};

use crate::config::SPI_FILLER_BYTE;

// CR1 bit positions (RM0008 25.5.1)
const CR1_CPHA: u32 = 1 << 0;
const CR1_CPOL: u32 = 1 << 1;
const CR1_MSTR: u32 = 1 << 2;
const CR1_BR_SHIFT: u32 = 3;
/// CR1: SPI enable.
pub const CR1_SPE: u32 = 1 << 6;
const CR1_LSBFIRST: u32 = 1 << 7;
const CR1_SSI: u32 = 1 << 8;
const CR1_SSM: u32 = 1 << 9;

// SR bit positions
const SR_RXNE: u32 = 1 << 0;
const SR_TXE: u32 = 1 << 1;
const SR_BSY: u32 = 1 << 7;

/// Baud rate divisor applied to the peripheral clock (CR1.BR).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum BaudDivisor {
    Div2 = 0,
    Div4 = 1,
    Div8 = 2,
    Div16 = 3,
    Div32 = 4,
    Div64 = 5,
    Div128 = 6,
    Div256 = 7,
}

/// Bit order on the wire.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitOrder {
    #[default]
    MsbFirst,
    LsbFirst,
}

/// SPI master configuration.
///
/// Frames are always 8 bits and chip select is managed in software (SSM=1, SSI=1).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SpiConfig {
    /// Clock polarity and phase.
    pub mode: Mode,
    /// Bit order on the wire.
    pub bit_order: BitOrder,
    /// Clock divisor relative to the APB2 peripheral clock.
    pub baud: BaudDivisor,
    /// Give up a flag wait after this many status reads. `None` waits forever.
    pub poll_limit: Option<u32>,
}

impl SpiConfig {
    /// Mode 0, MSB first, fPCLK/4, no timeout.
    pub const fn new() -> Self {
        Self {
            mode: spi::MODE_0,
            bit_order: BitOrder::MsbFirst,
            baud: BaudDivisor::Div4,
            poll_limit: None,
        }
    }

    /// Same configuration with flag waits bounded to `polls` status reads.
    #[must_use]
    pub const fn with_poll_limit(
        mut self,
        polls: u32,
    ) -> Self {
        self.poll_limit = Some(polls);
        self
    }

    /// CR1 value for this configuration, master mode, with SPE still clear.
    pub const fn cr1(&self) -> u32 {
        let mut cr1 = CR1_MSTR | CR1_SSM | CR1_SSI | ((self.baud as u32) << CR1_BR_SHIFT);
        if matches!(self.mode.polarity, Polarity::IdleHigh) {
            cr1 |= CR1_CPOL;
        }
        if matches!(self.mode.phase, Phase::CaptureOnSecondTransition) {
            cr1 |= CR1_CPHA;
        }
        if matches!(self.bit_order, BitOrder::LsbFirst) {
            cr1 |= CR1_LSBFIRST;
        }
        cr1
    }
}

impl Default for SpiConfig {
    fn default() -> Self { Self::new() }
}

/// Status register flags the master waits on.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Flag {
    /// TXE: transmit buffer empty.
    TxEmpty,
    /// RXNE: receive buffer not empty.
    RxNotEmpty,
    /// BSY: a frame is being shifted.
    Busy,
}

/// Decoded SPI status register.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    pub rx_not_empty: bool,
    pub tx_empty: bool,
    pub busy: bool,
}

impl Status {
    /// Decode a raw SR value.
    pub const fn from_bits(sr: u32) -> Self {
        Self {
            rx_not_empty: sr & SR_RXNE != 0,
            tx_empty: sr & SR_TXE != 0,
            busy: sr & SR_BSY != 0,
        }
    }

    /// Whether `flag` is set.
    #[inline]
    pub const fn is_set(
        &self,
        flag: Flag,
    ) -> bool {
        match flag {
            Flag::TxEmpty => self.tx_empty,
            Flag::RxNotEmpty => self.rx_not_empty,
            Flag::Busy => self.busy,
        }
    }
}

/// SPI transfer failure. Only produced when a poll limit is configured.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiError {
    /// The flag never reached the awaited level within the poll limit.
    Timeout(Flag),
}

impl spi::Error for SpiError {
    fn kind(&self) -> ErrorKind { ErrorKind::Other }
}

/// Register-level access to one SPI peripheral.
pub trait SpiRegisters {
    /// Write CR1.
    fn configure(
        &mut self,
        cr1: u32,
    );

    /// Read and decode SR.
    fn status(&mut self) -> Status;

    /// Write one frame to DR.
    fn write_data(
        &mut self,
        byte: u8,
    );

    /// Read one frame from DR.
    fn read_data(&mut self) -> u8;
}

/// Blocking SPI master.
pub struct SpiMaster<R> {
    regs: R,
    config: SpiConfig,
}

impl<R: SpiRegisters> SpiMaster<R> {
    /// Configure and enable the peripheral in master mode.
    ///
    /// CR1 is written once with the transfer parameters and once more with SPE
    /// set. The GPIO alternate functions and the peripheral clock must already
    /// be set up.
    pub fn new(
        mut regs: R,
        config: SpiConfig,
    ) -> Self {
        let cr1 = config.cr1();
        regs.configure(cr1);
        regs.configure(cr1 | CR1_SPE);
        debug!("SPI master enabled, CR1 = {=u32:#x}", cr1 | CR1_SPE);
        Self { regs, config }
    }

    /// Active configuration.
    #[inline]
    pub const fn config(&self) -> &SpiConfig { &self.config }

    /// Give back the register block.
    pub fn release(self) -> R { self.regs }

    /// Send one byte and wait until it has left the shift register.
    pub fn write_byte(
        &mut self,
        byte: u8,
    ) -> Result<(), SpiError> {
        self.wait_for(Flag::TxEmpty, true)?;
        self.regs.write_data(byte);
        self.wait_for(Flag::Busy, false)
    }

    /// Clock out the filler byte and return what was received.
    ///
    /// A frame left unread by earlier writes is discarded first, so the returned
    /// byte always belongs to the filler frame.
    pub fn read_byte(&mut self) -> Result<u8, SpiError> {
        self.drain_rx();
        self.regs.write_data(SPI_FILLER_BYTE);
        self.wait_for(Flag::RxNotEmpty, true)?;
        Ok(self.regs.read_data())
    }

    /// Full-duplex exchange of one frame.
    fn exchange(
        &mut self,
        byte: u8,
    ) -> Result<u8, SpiError> {
        self.drain_rx();
        self.wait_for(Flag::TxEmpty, true)?;
        self.regs.write_data(byte);
        self.wait_for(Flag::RxNotEmpty, true)?;
        Ok(self.regs.read_data())
    }

    /// Discard a received frame nobody read.
    ///
    /// `write_byte()` never reads DR, so RXNE stays set after it and the next
    /// frame overruns. Reading DR then SR clears both RXNE and OVR.
    fn drain_rx(&mut self) {
        if self.regs.status().rx_not_empty {
            let stale = self.regs.read_data();
            let _ = self.regs.status();
            trace!("SPI dropped stale frame {=u8:#x}", stale);
        }
    }

    /// Spin until `flag` reads as `level`.
    fn wait_for(
        &mut self,
        flag: Flag,
        level: bool,
    ) -> Result<(), SpiError> {
        let mut polls: u32 = 0;
        loop {
            if self.regs.status().is_set(flag) == level {
                return Ok(());
            }
            if let Some(limit) = self.config.poll_limit {
                polls = polls.saturating_add(1);
                if polls >= limit {
                    warn!("SPI wait for {} timed out after {=u32} polls", flag, polls);
                    return Err(SpiError::Timeout(flag));
                }
            }
        }
    }
}

impl<R> spi::ErrorType for SpiMaster<R> {
    type Error = SpiError;
}

impl<R: SpiRegisters> SpiBus<u8> for SpiMaster<R> {
    fn read(
        &mut self,
        words: &mut [u8],
    ) -> Result<(), Self::Error> {
        for word in words {
            *word = self.read_byte()?;
        }
        Ok(())
    }

    fn write(
        &mut self,
        words: &[u8],
    ) -> Result<(), Self::Error> {
        for &word in words {
            self.write_byte(word)?;
        }
        Ok(())
    }

    fn transfer(
        &mut self,
        read: &mut [u8],
        write: &[u8],
    ) -> Result<(), Self::Error> {
        let len = read.len().max(write.len());
        for i in 0..len {
            let out = write.get(i).copied().unwrap_or(SPI_FILLER_BYTE);
            let received = self.exchange(out)?;
            if let Some(slot) = read.get_mut(i) {
                *slot = received;
            }
        }
        self.flush()
    }

    fn transfer_in_place(
        &mut self,
        words: &mut [u8],
    ) -> Result<(), Self::Error> {
        for word in words {
            *word = self.exchange(*word)?;
        }
        self.flush()
    }

    fn flush(&mut self) -> Result<(), Self::Error> { self.wait_for(Flag::Busy, false) }
}

// =============================================================================
// Unit Tests
// =============================================================================
