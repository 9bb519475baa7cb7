//! Active-low push buttons with a press latch.
//!
//! A press fires its action once. The latch stays set until the button is
//! seen released, so holding the button down never repeats the action.

use embedded_hal::digital::InputPin;

use super::period::{BlinkPeriod, Scale};

/// Remembers that the current press has already been handled.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressLatch {
    latched: bool,
}

impl PressLatch {
    /// Latch clear.
    pub const fn new() -> Self { Self { latched: false } }

    /// Feed one sample. Returns true only for the first pressed sample of a press.
    ///
    /// Buttons are active-low, so `is_low` means pressed. A released sample
    /// clears the latch.
    pub fn just_pressed(
        &mut self,
        is_low: bool,
    ) -> bool {
        if !is_low {
            self.latched = false;
            return false;
        }
        if self.latched {
            return false;
        }
        self.latched = true;
        true
    }

    /// Whether a press has been handled and not yet released.
    #[inline]
    pub const fn is_latched(&self) -> bool { self.latched }
}

/// A button wired to ground that rescales the blink period when pressed.
pub struct Button<P> {
    pin: P,
    scale: Scale,
    latch: PressLatch,
}

impl<P: InputPin> Button<P> {
    pub const fn new(
        pin: P,
        scale: Scale,
    ) -> Self {
        Self {
            pin,
            scale,
            latch: PressLatch::new(),
        }
    }

    /// Action applied on each press.
    #[inline]
    pub const fn scale(&self) -> Scale { self.scale }

    /// Whether the handled press is still held.
    #[inline]
    pub const fn is_latched(&self) -> bool { self.latch.is_latched() }

    /// Sample the button once and handle a new press.
    ///
    /// On a new press the period is rescaled (or left alone at its limit) and
    /// this call then blocks until the button is released. Returns whether a
    /// press was handled.
    pub fn poll(
        &mut self,
        period: &mut BlinkPeriod,
    ) -> Result<bool, P::Error> {
        let is_low = self.pin.is_low()?;
        if !self.latch.just_pressed(is_low) {
            return Ok(false);
        }

        if period.apply(self.scale) {
            info!("{} -> period {=u32} ticks", self.scale, period.ticks());
        } else {
            debug!("{} ignored at limit ({=u32} ticks)", self.scale, period.ticks());
        }

        self.wait_for_release()?;
        Ok(true)
    }

    /// Busy-wait until the pin reads high, then clear the latch.
    pub fn wait_for_release(&mut self) -> Result<(), P::Error> {
        while self.pin.is_low()? {
            core::hint::spin_loop();
        }
        self.latch.just_pressed(false);
        Ok(())
    }

    /// Give back the pin.
    pub fn release(self) -> P { self.pin }
}

// =============================================================================
// Unit Tests
// =============================================================================
