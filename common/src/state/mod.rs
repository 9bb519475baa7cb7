//! State for the button-controlled blinker.
//!
//! - `period`: Blink half-period with floor/ceiling limits
//! - `button`: Press latch and active-low button handling

mod button;
mod period;

pub use button::{Button, PressLatch};
pub use period::{BlinkPeriod, PeriodLimits, Scale};
