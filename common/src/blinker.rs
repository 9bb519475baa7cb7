//! Button-controlled LED blinker.
//!
//! Each step polls button A (halve the period), then button C (double it), then
//! runs one blink cycle: LED on for one period, off for one period. A handled
//! press blocks until its button is released, so while a button is held the
//! LED stops blinking and the other button is not sampled.

use core::convert::Infallible;

use embedded_hal::digital::{InputPin, OutputPin};

use crate::delay::TickDelay;
use crate::state::{BlinkPeriod, Button, Scale};

/// LED or button failure, carrying the underlying error.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<LedE, InputE> {
    Led(LedE),
    Input(InputE),
}

/// LED driven by two period buttons.
pub struct Blinker<LED, A, C, D> {
    led: LED,
    button_a: Button<A>,
    button_c: Button<C>,
    delay: D,
    period: BlinkPeriod,
}

impl<LED, A, C, D, InputE> Blinker<LED, A, C, D>
where
    LED: OutputPin,
    A: InputPin<Error = InputE>,
    C: InputPin<Error = InputE>,
    D: TickDelay,
{
    /// Blinker starting at the default period and limits.
    pub fn new(
        led: LED,
        button_a: A,
        button_c: C,
        delay: D,
    ) -> Self {
        Self::with_period(led, button_a, button_c, delay, BlinkPeriod::default())
    }

    /// Blinker starting at `period`.
    pub fn with_period(
        led: LED,
        button_a: A,
        button_c: C,
        delay: D,
        period: BlinkPeriod,
    ) -> Self {
        Self {
            led,
            button_a: Button::new(button_a, Scale::Halve),
            button_c: Button::new(button_c, Scale::Double),
            delay,
            period,
        }
    }

    /// Current half-period in ticks.
    #[inline]
    pub const fn period(&self) -> u32 { self.period.ticks() }

    /// Handle button A completely, including its release wait, then button C.
    pub fn poll_buttons(&mut self) -> Result<(), Error<LED::Error, InputE>> {
        self.button_a.poll(&mut self.period).map_err(Error::Input)?;
        self.button_c.poll(&mut self.period).map_err(Error::Input)?;
        Ok(())
    }

    /// LED on, wait one period, LED off, wait one period.
    pub fn blink_once(&mut self) -> Result<(), Error<LED::Error, InputE>> {
        let ticks = self.period.ticks();
        self.led.set_high().map_err(Error::Led)?;
        self.delay.delay_ticks(ticks);
        self.led.set_low().map_err(Error::Led)?;
        self.delay.delay_ticks(ticks);
        Ok(())
    }

    /// One loop iteration: buttons, then a blink cycle.
    pub fn step(&mut self) -> Result<(), Error<LED::Error, InputE>> {
        self.poll_buttons()?;
        self.blink_once()
    }

    /// Step forever. Only returns if a pin reports an error.
    pub fn run(mut self) -> Result<Infallible, Error<LED::Error, InputE>> {
        info!("blinker running, period {=u32} ticks", self.period.ticks());
        loop {
            self.step()?;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
