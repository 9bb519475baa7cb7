//! Host-side fakes for the peripheral traits.
//!
//! Every fake appends to one shared [`EventLog`], so a test can assert the order
//! of operations across devices (a pin toggle relative to an SPI byte, a button
//! sample relative to a delay).

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{self, InputPin, OutputPin};
use embedded_hal::spi::{self, SpiBus};

use crate::delay::TickDelay;
use crate::peripherals::{SpiRegisters, Status};

/// Something a fake observed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Event {
    /// CR1 written.
    Configure(u32),
    /// SR read.
    StatusRead,
    /// DR written.
    DataWrite(u8),
    /// DR read.
    DataRead(u8),
    /// Output pin driven to a level (`true` = high).
    Pin(&'static str, bool),
    /// Byte written through an `SpiBus`.
    Bus(u8),
    /// Delay requested.
    Delay(u32),
    /// Input pin sampled (`true` = pressed, i.e. low).
    Sample(&'static str, bool),
}

pub type EventLog = Rc<RefCell<Vec<Event>>>;

pub fn event_log() -> EventLog { Rc::new(RefCell::new(Vec::new())) }

// =============================================================================
// SPI register block
// =============================================================================

/// SPI registers that replay canned status values around a loopback receiver.
///
/// Each DR write clocks in the next byte queued with [`with_rx`](Self::with_rx)
/// (or 0). The byte is latched only while RXNE is clear; otherwise the frame is
/// lost and DR keeps the older byte, as on overrun. A DR read clears RXNE.
///
/// Scripted statuses set TXE and BSY and can hold RXNE low while a frame is
/// still shifting, but RXNE only reads high once a frame is latched. Once the
/// script runs out the peripheral looks idle: TXE set, BSY clear.
pub struct ScriptedRegisters {
    log: EventLog,
    statuses: VecDeque<Status>,
    rx: VecDeque<u8>,
    dr: u8,
    rx_full: bool,
}

impl ScriptedRegisters {
    pub fn new(
        log: &EventLog,
        statuses: impl IntoIterator<Item = Status>,
    ) -> Self {
        Self {
            log: Rc::clone(log),
            statuses: statuses.into_iter().collect(),
            rx: VecDeque::new(),
            dr: 0,
            rx_full: false,
        }
    }

    /// Bytes the slave shifts back, one per written frame.
    pub fn with_rx(
        mut self,
        bytes: impl IntoIterator<Item = u8>,
    ) -> Self {
        self.rx.extend(bytes);
        self
    }
}

impl SpiRegisters for ScriptedRegisters {
    fn configure(
        &mut self,
        cr1: u32,
    ) {
        self.log.borrow_mut().push(Event::Configure(cr1));
    }

    fn status(&mut self) -> Status {
        self.log.borrow_mut().push(Event::StatusRead);
        match self.statuses.pop_front() {
            Some(status) => Status {
                rx_not_empty: status.rx_not_empty && self.rx_full,
                ..status
            },
            None => Status {
                rx_not_empty: self.rx_full,
                tx_empty: true,
                busy: false,
            },
        }
    }

    fn write_data(
        &mut self,
        byte: u8,
    ) {
        self.log.borrow_mut().push(Event::DataWrite(byte));
        let received = self.rx.pop_front().unwrap_or(0);
        if !self.rx_full {
            self.dr = received;
            self.rx_full = true;
        }
    }

    fn read_data(&mut self) -> u8 {
        self.rx_full = false;
        self.log.borrow_mut().push(Event::DataRead(self.dr));
        self.dr
    }
}

// =============================================================================
// SPI bus
// =============================================================================

/// `SpiBus` that logs every written byte.
pub struct RecordingBus {
    log: EventLog,
}

impl RecordingBus {
    pub fn new(log: &EventLog) -> Self { Self { log: Rc::clone(log) } }
}

impl spi::ErrorType for RecordingBus {
    type Error = Infallible;
}

impl SpiBus<u8> for RecordingBus {
    fn read(
        &mut self,
        words: &mut [u8],
    ) -> Result<(), Self::Error> {
        words.fill(0);
        Ok(())
    }

    fn write(
        &mut self,
        words: &[u8],
    ) -> Result<(), Self::Error> {
        let mut log = self.log.borrow_mut();
        log.extend(words.iter().map(|&b| Event::Bus(b)));
        Ok(())
    }

    fn transfer(
        &mut self,
        read: &mut [u8],
        write: &[u8],
    ) -> Result<(), Self::Error> {
        read.fill(0);
        self.write(write)
    }

    fn transfer_in_place(
        &mut self,
        words: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.write(words)?;
        words.fill(0);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
}

// =============================================================================
// GPIO
// =============================================================================

/// Output pin that logs every level it is driven to.
pub struct RecordingPin {
    name: &'static str,
    log: EventLog,
}

impl RecordingPin {
    pub fn new(
        log: &EventLog,
        name: &'static str,
    ) -> Self {
        Self {
            name,
            log: Rc::clone(log),
        }
    }
}

impl digital::ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Pin(self.name, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Pin(self.name, true));
        Ok(())
    }
}

/// Active-low input that replays a script of pressed (`true`) / released samples.
///
/// After the script runs out the input reads released forever.
pub struct ScriptedInput {
    name: &'static str,
    log: EventLog,
    script: VecDeque<bool>,
}

impl ScriptedInput {
    pub fn new(
        log: &EventLog,
        name: &'static str,
        script: impl IntoIterator<Item = bool>,
    ) -> Self {
        Self {
            name,
            log: Rc::clone(log),
            script: script.into_iter().collect(),
        }
    }

    /// Never pressed.
    pub fn released(
        log: &EventLog,
        name: &'static str,
    ) -> Self {
        Self::new(log, name, [])
    }

    /// Pressed for `samples` reads, then released.
    pub fn held_for(
        log: &EventLog,
        name: &'static str,
        samples: usize,
    ) -> Self {
        Self::new(log, name, core::iter::repeat_n(true, samples))
    }

    /// Append more samples after the current script.
    pub fn then(
        mut self,
        script: impl IntoIterator<Item = bool>,
    ) -> Self {
        self.script.extend(script);
        self
    }

    fn sample(&mut self) -> bool {
        let pressed = self.script.pop_front().unwrap_or(false);
        self.log.borrow_mut().push(Event::Sample(self.name, pressed));
        pressed
    }
}

impl digital::ErrorType for ScriptedInput {
    type Error = Infallible;
}

impl InputPin for ScriptedInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(!self.sample()) }

    fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(self.sample()) }
}

// =============================================================================
// Delay
// =============================================================================

/// Delay that returns immediately and logs the requested ticks.
pub struct RecordingDelay {
    log: EventLog,
}

impl RecordingDelay {
    pub fn new(log: &EventLog) -> Self { Self { log: Rc::clone(log) } }
}

impl TickDelay for RecordingDelay {
    fn delay_ticks(
        &mut self,
        ticks: u32,
    ) {
        self.log.borrow_mut().push(Event::Delay(ticks));
    }
}

// =============================================================================
// Log decoding
// =============================================================================

/// A byte as the display controller sees it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DisplayByte {
    Command(u8),
    Data(u8),
}

/// Decode bus bytes into commands and data using the DC level at the time of the
/// write. Panics if a byte was clocked while CS was high.
pub fn display_bytes(log: &EventLog) -> Vec<DisplayByte> {
    let mut dc_high = false;
    let mut cs_low = false;
    let mut out = Vec::new();
    for event in log.borrow().iter() {
        match *event {
            Event::Pin("dc", level) => dc_high = level,
            Event::Pin("cs", level) => cs_low = !level,
            Event::Bus(byte) => {
                assert!(cs_low, "byte {byte:#04x} sent while the display was deselected");
                out.push(if dc_high { DisplayByte::Data(byte) } else { DisplayByte::Command(byte) });
            }
            _ => {}
        }
    }
    out
}

/// Only the command bytes from [`display_bytes`].
pub fn commands(log: &EventLog) -> Vec<u8> {
    display_bytes(log)
        .into_iter()
        .filter_map(|b| match b {
            DisplayByte::Command(c) => Some(c),
            DisplayByte::Data(_) => None,
        })
        .collect()
}

/// Only the data bytes from [`display_bytes`].
pub fn data(log: &EventLog) -> Vec<u8> {
    display_bytes(log)
        .into_iter()
        .filter_map(|b| match b {
            DisplayByte::Data(d) => Some(d),
            DisplayByte::Command(_) => None,
        })
        .collect()
}
