//! nRF52840 hardware bindings.
//!
//! Each submodule implements one of the core trait seams on top of the
//! Embassy HAL: GPIO buttons, the SSD1306 OLED, the SPI SD card, the
//! USB HID keyboard, and the SAADC battery gauge.

pub mod battery;
pub mod buttons;
pub mod display;
pub mod sdcard;
pub mod usb;
