//! Busy-wait tick delays.
//!
//! A tick is one iteration of a spin loop, not a unit of time: the real duration
//! depends on the core clock and code generation. The drivers only need "wait a
//! while", so the delay is kept opaque rather than calibrated against a timer.

/// Blocking delay measured in spin-loop iterations.
pub trait TickDelay {
    /// Spin for `ticks` iterations.
    fn delay_ticks(
        &mut self,
        ticks: u32,
    );
}

impl<T: TickDelay + ?Sized> TickDelay for &mut T {
    #[inline]
    fn delay_ticks(
        &mut self,
        ticks: u32,
    ) {
        (**self).delay_ticks(ticks);
    }
}

/// Spin loop delay. One tick is one spin-loop hint plus loop overhead.
#[derive(Clone, Copy, Debug, Default)]
pub struct NopDelay;

impl NopDelay {
    pub const fn new() -> Self { Self }
}

impl TickDelay for NopDelay {
    #[inline(never)]
    fn delay_ticks(
        &mut self,
        ticks: u32,
    ) {
        for _ in 0..ticks {
            // Keeps the loop from being optimised away
            core::hint::spin_loop();
        }
    }
}
