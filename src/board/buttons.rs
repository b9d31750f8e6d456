//! Front-panel buttons.
//!
//! Three tactile switches to ground with internal pull-ups, so a
//! pressed button reads low.

use embassy_nrf::gpio::{AnyPin, Input, Pull};

use crate::input::{Button, InputSource};

pub struct Buttons<'d> {
    up: Input<'d>,
    down: Input<'d>,
    select: Input<'d>,
}

impl<'d> Buttons<'d> {
    pub fn new(up: AnyPin, down: AnyPin, select: AnyPin) -> Self {
        Self {
            up: Input::new(up, Pull::Up),
            down: Input::new(down, Pull::Up),
            select: Input::new(select, Pull::Up),
        }
    }
}

impl InputSource for Buttons<'_> {
    fn is_pressed(&mut self, button: Button) -> bool {
        match button {
            Button::Up => self.up.is_low(),
            Button::Down => self.down.is_low(),
            Button::Select => self.select.is_low(),
        }
    }
}
