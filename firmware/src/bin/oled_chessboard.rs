//! SSD1306 chessboard demo for the Blue Pill.
//!
//! Wiring (all on GPIOA): PA5 SCK, PA6 MISO, PA7 MOSI, PA0 RST, PA1 DC, PA2 CS.
//! Draws the board once and then idles.

#![no_std]
#![no_main]

use bluepill_common::config::{
    OLED_CS_PIN,
    OLED_DC_PIN,
    OLED_RST_PIN,
    SPI1_MISO_PIN,
    SPI1_MOSI_PIN,
    SPI1_SCK_PIN,
};
use bluepill_common::peripherals::{GpioPin, PinMode, RCC_APB2ENR_IOPAEN, RCC_APB2ENR_SPI1EN};
use bluepill_common::{NopDelay, SpiConfig, SpiMaster, Ssd1306};
use bluepill_firmware::board::{Port, Spi1, enable_apb2_clocks};
use bluepill_firmware::pac;
use cortex_m_rt::entry;
use defmt::info;
use {defmt_rtt as _, panic_probe as _};

#[entry]
fn main() -> ! {
    let dp = pac::Peripherals::take().unwrap();
    info!("oled-chessboard starting");

    enable_apb2_clocks(&dp.RCC, RCC_APB2ENR_IOPAEN | RCC_APB2ENR_SPI1EN);
    let gpioa = Port::new(dp.GPIOA);

    // SPI1 pins are driven by the peripheral once configured
    let _sck = GpioPin::new(&gpioa, SPI1_SCK_PIN, PinMode::AltPushPull50MHz);
    let _miso = GpioPin::new(&gpioa, SPI1_MISO_PIN, PinMode::FloatingInput);
    let _mosi = GpioPin::new(&gpioa, SPI1_MOSI_PIN, PinMode::AltPushPull50MHz);

    let rst = GpioPin::new(&gpioa, OLED_RST_PIN, PinMode::PushPull10MHz);
    let dc = GpioPin::new(&gpioa, OLED_DC_PIN, PinMode::PushPull10MHz);
    let cs = GpioPin::new(&gpioa, OLED_CS_PIN, PinMode::PushPull10MHz);

    let spi = SpiMaster::new(Spi1::new(dp.SPI1), SpiConfig::new());
    let mut oled = Ssd1306::new(spi, rst, dc, cs);
    let mut delay = NopDelay::new();

    defmt::unwrap!(oled.initialize(&mut delay));
    defmt::unwrap!(oled.show_chessboard());
    info!("chessboard drawn");

    loop {
        cortex_m::asm::nop();
    }
}
