//! Blink half-period in delay ticks.
//!
//! Halving stops at the floor and doubling at the ceiling. A request that would
//! cross a limit leaves the period unchanged; it does not clamp or wrap.

use crate::config::{BLINK_PERIOD_INITIAL, BLINK_PERIOD_MAX, BLINK_PERIOD_MIN};

/// How a button press rescales the period.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Scale {
    /// Blink twice as fast.
    Halve,
    /// Blink half as fast.
    Double,
}

/// Inclusive bounds for the period.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeriodLimits {
    pub min: u32,
    pub max: u32,
}

impl Default for PeriodLimits {
    fn default() -> Self {
        Self {
            min: BLINK_PERIOD_MIN,
            max: BLINK_PERIOD_MAX,
        }
    }
}

/// Time the LED spends in each state, in delay ticks.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlinkPeriod {
    ticks: u32,
    limits: PeriodLimits,
}

impl BlinkPeriod {
    /// Start at `ticks`, pulled inside `limits` if it lies outside them.
    pub const fn new(
        ticks: u32,
        limits: PeriodLimits,
    ) -> Self {
        let ticks = if ticks < limits.min {
            limits.min
        } else if ticks > limits.max {
            limits.max
        } else {
            ticks
        };
        Self { ticks, limits }
    }

    /// Current half-period.
    #[inline]
    pub const fn ticks(&self) -> u32 { self.ticks }

    /// Active limits.
    #[inline]
    pub const fn limits(&self) -> PeriodLimits { self.limits }

    /// Halve the period unless that would go below the floor.
    ///
    /// Returns whether the period changed.
    pub fn halve(&mut self) -> bool {
        let next = self.ticks / 2;
        if next < self.limits.min || next == self.ticks {
            return false;
        }
        self.ticks = next;
        true
    }

    /// Double the period unless that would exceed the ceiling.
    ///
    /// Returns whether the period changed.
    pub fn double(&mut self) -> bool {
        match self.ticks.checked_mul(2) {
            Some(next) if next <= self.limits.max && next != self.ticks => {
                self.ticks = next;
                true
            }
            _ => false,
        }
    }

    /// Apply `scale`. Returns whether the period changed.
    pub fn apply(
        &mut self,
        scale: Scale,
    ) -> bool {
        match scale {
            Scale::Halve => self.halve(),
            Scale::Double => self.double(),
        }
    }
}

impl Default for BlinkPeriod {
    fn default() -> Self { Self::new(BLINK_PERIOD_INITIAL, PeriodLimits::default()) }
}
