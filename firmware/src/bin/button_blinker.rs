//! Button-controlled blinker for the Blue Pill.
//!
//! - **PC13**: LED
//! - **PA0** (button A, to ground): blink twice as fast
//! - **PC14** (button C, to ground): blink half as fast
//!
//! Holding a button pauses blinking until it is released.

#![no_std]
#![no_main]

use bluepill_common::config::{BUTTON_A_PIN, BUTTON_C_PIN, LED_PIN};
use bluepill_common::peripherals::{GpioPin, PinMode, RCC_APB2ENR_IOPAEN, RCC_APB2ENR_IOPCEN};
use bluepill_common::{Blinker, NopDelay};
use bluepill_firmware::board::{Port, enable_apb2_clocks};
use bluepill_firmware::pac;
use cortex_m_rt::entry;
use defmt::info;
use {defmt_rtt as _, panic_probe as _};

#[entry]
fn main() -> ! {
    let dp = pac::Peripherals::take().unwrap();
    info!("button-blinker starting");

    enable_apb2_clocks(&dp.RCC, RCC_APB2ENR_IOPAEN | RCC_APB2ENR_IOPCEN);
    let gpioa = Port::new(dp.GPIOA);
    let gpioc = Port::new(dp.GPIOC);

    let led = GpioPin::new(&gpioc, LED_PIN, PinMode::PushPull2MHz);
    let button_a = GpioPin::new(&gpioa, BUTTON_A_PIN, PinMode::PullUpInput);
    let button_c = GpioPin::new(&gpioc, BUTTON_C_PIN, PinMode::PullUpInput);

    let blinker = Blinker::new(led, button_a, button_c, NopDelay::new());
    match defmt::unwrap!(blinker.run()) {}
}
