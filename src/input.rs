//! Button input: raw level polling seam plus the latched debouncer.
//!
//! Buttons are sampled as levels once per tick.  The `Debouncer` turns
//! those levels into single-fire press events: a press latches until a
//! poll observes every button released, so holding a button (or rolling
//! from one to another) can never auto-repeat.

/// Physical buttons, highest priority first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Up,
    Down,
    Select,
}

/// Number of physical buttons.
pub const BUTTON_COUNT: usize = 3;

/// All buttons in priority order; indexes match `Button as usize`.
pub const BUTTONS: [Button; BUTTON_COUNT] = [Button::Up, Button::Down, Button::Select];

/// Raw button level source.  `true` while the button is physically held.
pub trait InputSource {
    fn is_pressed(&mut self, button: Button) -> bool;
}

/// Per-button latch.  Set from the poll that first observes the press,
/// cleared only when every button reads released.
#[derive(Clone, Copy, Debug, Default)]
struct ButtonChannel {
    latched: bool,
}

/// Converts level polls into debounced single-fire press events.
#[derive(Debug, Default)]
pub struct Debouncer {
    channels: [ButtonChannel; BUTTON_COUNT],
}

impl Debouncer {
    pub const fn new() -> Self {
        Self {
            channels: [ButtonChannel { latched: false }; BUTTON_COUNT],
        }
    }

    /// Sample `source` once and feed the levels through the latch.
    pub fn poll(&mut self, source: &mut impl InputSource) -> Option<Button> {
        let mut levels = [false; BUTTON_COUNT];
        for (level, button) in levels.iter_mut().zip(BUTTONS) {
            *level = source.is_pressed(button);
        }
        self.feed(levels)
    }

    /// Advance the latch with pre-sampled levels (indexed like [`BUTTONS`]).
    ///
    /// Returns the button that fired this poll, if any.  At most one
    /// button fires; on a simultaneous press the earliest in [`BUTTONS`]
    /// wins and the rest are swallowed by the latch.
    pub fn feed(&mut self, levels: [bool; BUTTON_COUNT]) -> Option<Button> {
        if levels.iter().all(|&held| !held) {
            for channel in &mut self.channels {
                channel.latched = false;
            }
            return None;
        }

        let suppressed = self.channels.iter().any(|c| c.latched);
        for (channel, &held) in self.channels.iter_mut().zip(&levels) {
            if held {
                channel.latched = true;
            }
        }
        if suppressed {
            return None;
        }

        BUTTONS
            .iter()
            .zip(levels)
            .find(|(_, held)| *held)
            .map(|(button, _)| *button)
    }
}
