//! HID keyboard output: usage tables, chords, boot-protocol reports.

pub mod keyboard;
pub mod keymap;

#[cfg(test)]
mod tests;

use keyboard::KeyboardReport;

/// One simultaneous key press: OR'd modifier bits plus up to six usages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Chord {
    modifier: u8,
    keycodes: [u8; 6],
    len: usize,
}

impl Chord {
    pub const fn new() -> Self {
        Self {
            modifier: 0,
            keycodes: [0; 6],
            len: 0,
        }
    }

    /// OR a modifier mask into the chord.
    pub fn add_modifier(&mut self, mask: u8) {
        self.modifier |= mask;
    }

    /// Append a key usage; silently dropped past six keys (the boot
    /// report limit).
    pub fn add_key(&mut self, usage: u8) {
        if self.len < self.keycodes.len() {
            self.keycodes[self.len] = usage;
            self.len += 1;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.modifier == 0 && self.len == 0
    }

    pub fn modifier(&self) -> u8 {
        self.modifier
    }

    pub fn keys(&self) -> &[u8] {
        &self.keycodes[..self.len]
    }

    /// Boot-protocol press report for this chord.
    pub fn report(&self) -> KeyboardReport {
        KeyboardReport {
            modifier: self.modifier,
            reserved: 0,
            keycodes: self.keycodes,
        }
    }
}

/// Keystroke output seam.  Implementations are best-effort: delivery
/// failures are handled internally and never abort playback.
pub trait KeystrokeSink {
    /// Type printable text verbatim (US layout).
    fn type_text(&mut self, text: &str);

    /// Press a chord and release it.
    fn combo(&mut self, chord: &Chord);

    /// Pause between directives.
    fn delay_ms(&mut self, ms: u32);
}
