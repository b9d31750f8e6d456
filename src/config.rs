//! Application-wide constants and compile-time configuration.
//!
//! Capacity limits, timing parameters, pin assignments and the USB
//! identity all live here so they can be tuned in one place.

// Menus & navigation

/// Maximum number of rows a single menu can hold.
pub const MENU_MAX_ITEMS: usize = 32;

/// Number of menu rows visible on screen at once.
pub const MENU_PAGE_SIZE: usize = 5;

/// Maximum depth of the view stack (main menu plus nested directories).
pub const NAV_STACK_DEPTH: usize = 8;

/// Longest label one menu row can carry; excess is truncated.
pub const LABEL_MAX: usize = 20;

/// Capacity of a full-screen notice body.
pub const NOTICE_MAX: usize = 64;

// Script library (SD card)

/// Directory on the card that holds the script library.
pub const SCRIPTS_ROOT: &str = "/scripts";

/// Longest absolute path on the card.
pub const PATH_MAX: usize = 128;

/// Longest single file or directory name.
pub const NAME_MAX: usize = 32;

/// Upper bound on entries returned by one directory listing.
pub const DIR_MAX_ENTRIES: usize = 32;

/// Names starting with this never become menu rows.
pub const HIDDEN_PREFIX: char = '.';

/// Folder litter various operating systems drop onto removable media.
pub const OS_ARTIFACT_NAMES: &[&str] = &[
    "System Volume Information",
    "SYSTEM~1",
    "Thumbs.db",
    "desktop.ini",
    "__MACOSX",
    "$RECYCLE.BIN",
    "RECYCLER",
];

// Script playback

/// Longest script line kept in memory; longer lines are truncated.
pub const LINE_MAX: usize = 256;

/// Hard ceiling on playback steps for a single script.
pub const SCRIPT_STEP_LIMIT: u32 = 10_000;

/// Largest replay count honoured by a REPEAT directive.
pub const REPEAT_MAX: u32 = 128;

// Timing

/// Control loop period (ms).
pub const TICK_INTERVAL_MS: u64 = 10;

/// Ticks between battery gauge reads.
pub const BATTERY_POLL_TICKS: u32 = 500;

/// Ticks between keep-awake key taps while the toggle is on.
pub const KEEP_AWAKE_PERIOD_TICKS: u32 = 3_000;

/// Upper bound on one blocking HID report write (ms).
pub const USB_WRITE_TIMEOUT_MS: u64 = 25;

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0001;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "duckpad";
pub const USB_PRODUCT: &str = "duckpad script keyboard";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// USB HID polling interval (ms). 1 ms = 1000 Hz for lowest latency.
pub const USB_HID_POLL_MS: u8 = 1;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Button UP      → P0.11 (active low, internal pull-up)
//   Button DOWN    → P0.12 (active low, internal pull-up)
//   Button SELECT  → P0.24 (active low, internal pull-up)
//   OLED I²C SDA   → P0.26
//   OLED I²C SCL   → P0.27
//   SD SPI SCK     → P0.19
//   SD SPI MOSI    → P0.20
//   SD SPI MISO    → P0.21
//   SD chip select → P0.17
