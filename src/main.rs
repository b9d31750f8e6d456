//! duckpad firmware entry point (nRF52840).
//!
//! Wires the hardware implementations onto the navigation controller
//! and drives it from a fixed-rate ticker. The USB device runs as its
//! own task; everything else happens inline in the UI loop.

#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_probe as _;

use embassy_executor::Spawner;
use embassy_nrf::gpio::{Level, Output, OutputDrive, Pin};
use embassy_nrf::{bind_interrupts, peripherals, spim, twim};
use embassy_time::{Duration, Ticker};
use embassy_usb::UsbDevice;

use duckpad::board::battery::VddGauge;
use duckpad::board::buttons::Buttons;
use duckpad::board::display::Oled;
use duckpad::board::sdcard::SdStorage;
use duckpad::board::usb::{self, UsbKeySink};
use duckpad::config::TICK_INTERVAL_MS;
use duckpad::controller::NavigationController;

bind_interrupts!(struct Irqs {
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
    SPI3 => spim::InterruptHandler<peripherals::SPI3>;
});

#[embassy_executor::task]
async fn usb_task(mut device: UsbDevice<'static, usb::UsbDriver>) -> ! {
    device.run().await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    defmt::info!("duckpad booting");

    let usb_parts = usb::init(p.USBD);
    defmt::unwrap!(spawner.spawn(usb_task(usb_parts.device)));
    let sink = UsbKeySink::new(usb_parts.keyboard);

    let mut twim_config = twim::Config::default();
    twim_config.frequency = twim::Frequency::K400;
    let i2c = twim::Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim_config);
    let renderer = Oled::new(i2c);

    let buttons = Buttons::new(p.P0_11.degrade(), p.P0_12.degrade(), p.P0_24.degrade());

    let mut spim_config = spim::Config::default();
    spim_config.frequency = spim::Frequency::M8;
    let spi = spim::Spim::new(p.SPI3, Irqs, p.P0_19, p.P0_21, p.P0_20, spim_config);
    let cs = Output::new(p.P0_17.degrade(), Level::High, OutputDrive::Standard);
    let storage = SdStorage::new(spi, cs);

    let gauge = VddGauge::new(p.SAADC);

    let mut controller = NavigationController::new(buttons, storage, sink, renderer, gauge);
    defmt::info!("duckpad ready");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));
    loop {
        controller.tick();
        ticker.next().await;
    }
}
