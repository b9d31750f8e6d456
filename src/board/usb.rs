//! USB HID keyboard device and the keystroke sink on top of it.
//!
//! The device side runs as its own task; the sink performs bounded
//! blocking writes from the UI loop. Endpoint writes complete from the
//! USB interrupt, so a `block_on` with a timeout cannot wedge the
//! controller: if the host stops reading, the report is dropped.

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_futures::block_on;
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{bind_interrupts, peripherals, usb};
use embassy_time::{with_timeout, Duration, Timer};
use embassy_usb::class::hid::{Config as HidConfig, HidWriter, State};
use embassy_usb::{Builder, Config, Handler, UsbDevice};
use static_cell::StaticCell;

use crate::config::{
    USB_HID_POLL_MS, USB_MANUFACTURER, USB_PID, USB_PRODUCT, USB_SERIAL_NUMBER, USB_VID,
    USB_WRITE_TIMEOUT_MS,
};
use crate::hid::keyboard::{KeyboardReport, KEYBOARD_REPORT_DESCRIPTOR, KEYBOARD_REPORT_SIZE};
use crate::hid::{keymap, Chord, KeystrokeSink};

bind_interrupts!(struct Irqs {
    USBD => usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => usb::vbus_detect::InterruptHandler;
});

pub type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;

static SUSPENDED: AtomicBool = AtomicBool::new(false);
static CONFIGURED: AtomicBool = AtomicBool::new(false);

/// Tracks bus state so the sink knows when the host is listening.
struct BusHandler;

impl Handler for BusHandler {
    fn suspended(&mut self, suspended: bool) {
        SUSPENDED.store(suspended, Ordering::Relaxed);
    }

    fn configured(&mut self, configured: bool) {
        CONFIGURED.store(configured, Ordering::Relaxed);
    }
}

pub struct UsbParts {
    pub device: UsbDevice<'static, UsbDriver>,
    pub keyboard: HidWriter<'static, UsbDriver, KEYBOARD_REPORT_SIZE>,
}

/// Build the USB device with a single HID keyboard endpoint.
pub fn init(usbd: peripherals::USBD) -> UsbParts {
    let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));

    let mut config = Config::new(USB_VID, USB_PID);
    config.manufacturer = Some(USB_MANUFACTURER);
    config.product = Some(USB_PRODUCT);
    config.serial_number = Some(USB_SERIAL_NUMBER);
    config.max_power = 100;
    config.max_packet_size_0 = 64;

    static CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
    static BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
    static MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
    static CONTROL_BUF: StaticCell<[u8; 128]> = StaticCell::new();
    static STATE: StaticCell<State> = StaticCell::new();
    static HANDLER: StaticCell<BusHandler> = StaticCell::new();

    let mut builder = Builder::new(
        driver,
        config,
        CONFIG_DESC.init([0; 256]),
        BOS_DESC.init([0; 256]),
        MSOS_DESC.init([0; 256]),
        CONTROL_BUF.init([0; 128]),
    );
    builder.handler(HANDLER.init(BusHandler));

    let hid_config = HidConfig {
        report_descriptor: KEYBOARD_REPORT_DESCRIPTOR,
        request_handler: None,
        poll_ms: USB_HID_POLL_MS,
        max_packet_size: 8,
    };
    let keyboard = HidWriter::new(&mut builder, STATE.init(State::new()), hid_config);

    UsbParts {
        device: builder.build(),
        keyboard,
    }
}

/// [`KeystrokeSink`] that types through the HID endpoint.
pub struct UsbKeySink {
    writer: HidWriter<'static, UsbDriver, KEYBOARD_REPORT_SIZE>,
}

impl UsbKeySink {
    pub fn new(writer: HidWriter<'static, UsbDriver, KEYBOARD_REPORT_SIZE>) -> Self {
        Self { writer }
    }

    fn write(&mut self, report: &KeyboardReport) {
        if SUSPENDED.load(Ordering::Relaxed) || !CONFIGURED.load(Ordering::Relaxed) {
            warn!("USB not ready, dropping report");
            return;
        }
        let bytes = report.to_bytes();
        match block_on(with_timeout(
            Duration::from_millis(USB_WRITE_TIMEOUT_MS),
            self.writer.write(&bytes),
        )) {
            Ok(Ok(())) => {}
            Ok(Err(_)) => warn!("USB write failed"),
            Err(_) => warn!("USB write timed out, report dropped"),
        }
    }

    /// Press and release.
    fn stroke(&mut self, report: &KeyboardReport) {
        self.write(report);
        self.write(&KeyboardReport::empty());
    }
}

impl KeystrokeSink for UsbKeySink {
    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            match keymap::ascii(c) {
                Some((modifier, usage)) => self.stroke(&KeyboardReport::press(modifier, usage)),
                None => warn!("untypeable character skipped"),
            }
        }
    }

    fn combo(&mut self, chord: &Chord) {
        self.stroke(&chord.report());
    }

    fn delay_ms(&mut self, ms: u32) {
        block_on(Timer::after(Duration::from_millis(u64::from(ms))));
    }
}
