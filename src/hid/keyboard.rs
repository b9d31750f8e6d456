//! Boot-protocol keyboard report and its descriptor.
//!
//! The wire format is the classic 8-byte boot report: a modifier
//! bitfield, one reserved byte, then six usage slots. Playback only
//! ever sends two shapes of it, a single usage with modifiers and the
//! all-zero release; anything wider goes through [`crate::hid::Chord`].

/// Size of one report on the wire.
pub const KEYBOARD_REPORT_SIZE: usize = 8;

/// One boot-protocol keyboard report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    /// Modifier bitfield, bit 0 = Left Ctrl through bit 7 = Right GUI.
    pub modifier: u8,
    /// Always zero on the wire.
    pub reserved: u8,
    /// Usage codes of the held keys, zero-padded.
    pub keycodes: [u8; 6],
}

impl KeyboardReport {
    /// The all-keys-released report.
    pub const fn empty() -> Self {
        Self {
            modifier: 0,
            reserved: 0,
            keycodes: [0; 6],
        }
    }

    /// A press of a single key with the given modifiers.
    pub const fn press(modifier: u8, usage: u8) -> Self {
        Self {
            modifier,
            reserved: 0,
            keycodes: [usage, 0, 0, 0, 0, 0],
        }
    }

    /// Wire form of the report.
    pub fn to_bytes(&self) -> [u8; KEYBOARD_REPORT_SIZE] {
        let mut bytes = [0u8; KEYBOARD_REPORT_SIZE];
        bytes[0] = self.modifier;
        bytes[1] = self.reserved;
        bytes[2..].copy_from_slice(&self.keycodes);
        bytes
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.modifier == 0 && self.keycodes.iter().all(|&k| k == 0)
    }
}

/// Report descriptor for a boot-compatible keyboard.
///
/// Declares the layout hosts special-case: eight modifier bits, a
/// padding byte, five LED outputs and six key-array slots. The LED
/// output report is declared but ignored; we only ever transmit.
pub const KEYBOARD_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // usage page: generic desktop
    0x09, 0x06, // usage: keyboard
    0xA1, 0x01, // collection: application
    // modifiers, one bit each
    0x05, 0x07, // usage page: keyboard/keypad
    0x19, 0xE0, // usage min: LeftControl
    0x29, 0xE7, // usage max: RightGUI
    0x15, 0x00, // logical min: 0
    0x25, 0x01, // logical max: 1
    0x75, 0x01, // report size: 1
    0x95, 0x08, // report count: 8
    0x81, 0x02, // input: data, variable, absolute
    // reserved byte
    0x95, 0x01, // report count: 1
    0x75, 0x08, // report size: 8
    0x81, 0x01, // input: constant
    // LED states from the host, five bits plus pad
    0x05, 0x08, // usage page: LEDs
    0x19, 0x01, // usage min: NumLock
    0x29, 0x05, // usage max: Kana
    0x95, 0x05, // report count: 5
    0x75, 0x01, // report size: 1
    0x91, 0x02, // output: data, variable, absolute
    0x95, 0x01, // report count: 1
    0x75, 0x03, // report size: 3
    0x91, 0x01, // output: constant
    // six-slot key array
    0x05, 0x07, // usage page: keyboard/keypad
    0x19, 0x00, // usage min: 0
    0x29, 0xFF, // usage max: 255
    0x15, 0x00, // logical min: 0
    0x26, 0xFF, 0x00, // logical max: 255
    0x95, 0x06, // report count: 6
    0x75, 0x08, // report size: 8
    0x81, 0x00, // input: data, array
    0xC0, // end collection
];
