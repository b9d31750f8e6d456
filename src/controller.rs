//! Top-level navigation state machine.
//!
//! One [`NavigationController::tick`] call per timer interval: poll the
//! buttons through the debouncer, run background work (battery polling,
//! keep-awake pulses), and redraw when anything changed. All hardware
//! access goes through the trait seams, so the whole state machine runs
//! under host tests with in-memory collaborators.

use heapless::Vec;

use crate::config::{BATTERY_POLL_TICKS, KEEP_AWAKE_PERIOD_TICKS, NAV_STACK_DEPTH, SCRIPTS_ROOT};
use crate::dispatch::{self, Notice, Outcome};
use crate::hid::keymap::KEY_F15;
use crate::hid::{Chord, KeystrokeSink};
use crate::input::{Button, Debouncer, InputSource};
use crate::menu::{Action, Menu, MenuItem, Payload};
use crate::power::BatteryGauge;
use crate::render::{Hud, Renderer};
use crate::storage::Storage;

const ABOUT_TEXT: &str = concat!("duckpad v", env!("CARGO_PKG_VERSION"), "\nDuckyScript over USB");

pub struct NavigationController<I, S, K, R, B> {
    input: I,
    storage: S,
    sink: K,
    renderer: R,
    gauge: B,
    debouncer: Debouncer,
    stack: Vec<Menu, NAV_STACK_DEPTH>,
    notice: Option<Notice>,
    hud: Hud,
    dirty: bool,
    keep_awake: bool,
    keep_awake_ticks: u32,
    battery_ticks: u32,
}

impl<I, S, K, R, B> NavigationController<I, S, K, R, B>
where
    I: InputSource,
    S: Storage,
    K: KeystrokeSink,
    R: Renderer,
    B: BatteryGauge,
{
    pub fn new(input: I, storage: S, sink: K, renderer: R, gauge: B) -> Self {
        let mut stack = Vec::new();
        let _ = stack.push(main_menu(false));
        Self {
            input,
            storage,
            sink,
            renderer,
            gauge,
            debouncer: Debouncer::new(),
            stack,
            notice: None,
            hud: Hud::default(),
            dirty: true,
            keep_awake: false,
            keep_awake_ticks: 0,
            // Starts saturated so the first tick reads the gauge.
            battery_ticks: BATTERY_POLL_TICKS,
        }
    }

    /// Advance the UI by one timer interval.
    pub fn tick(&mut self) {
        if let Some(button) = self.debouncer.poll(&mut self.input) {
            self.handle(button);
        }
        self.background();
        if self.dirty {
            self.draw();
            self.dirty = false;
        }
    }

    fn handle(&mut self, button: Button) {
        // A visible notice swallows the press that dismisses it.
        if self.notice.take().is_some() {
            self.dirty = true;
            return;
        }
        match button {
            Button::Up => {
                if let Some(menu) = self.stack.last_mut() {
                    menu.select_prev();
                    self.dirty = true;
                }
            }
            Button::Down => {
                if let Some(menu) = self.stack.last_mut() {
                    menu.select_next();
                    self.dirty = true;
                }
            }
            Button::Select => self.activate(),
        }
    }

    fn activate(&mut self) {
        let Some(menu) = self.stack.last() else {
            return;
        };
        let outcome = dispatch::execute(menu, &mut self.storage, &mut self.sink, &mut self.renderer);
        self.apply(outcome);
    }

    fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Push(menu) => self.push(menu),
            Outcome::Replace(menu) => {
                if let Some(top) = self.stack.last_mut() {
                    *top = menu;
                }
                self.dirty = true;
            }
            Outcome::Pop => {
                if self.stack.len() > 1 {
                    self.stack.pop();
                    self.dirty = true;
                }
            }
            Outcome::ToggleKeepAwake => self.toggle_keep_awake(),
            Outcome::Notice(notice) => {
                self.notice = Some(notice);
                self.dirty = true;
            }
            Outcome::None => {}
        }
    }

    fn push(&mut self, menu: Menu) {
        if let Err(menu) = self.stack.push(menu) {
            warn!("navigation stack full, replacing top");
            if let Some(top) = self.stack.last_mut() {
                *top = menu;
            }
        }
        self.dirty = true;
    }

    fn toggle_keep_awake(&mut self) {
        self.keep_awake = !self.keep_awake;
        self.keep_awake_ticks = 0;
        self.hud.keep_awake = self.keep_awake;
        info!("keep-awake set to {}", self.keep_awake);
        if let Some(root) = self.stack.first_mut() {
            root.relabel(Action::ToggleKeepAwake, keep_awake_label(self.keep_awake));
        }
        self.dirty = true;
    }

    fn background(&mut self) {
        self.poll_battery();
        self.keep_awake_pulse();
    }

    fn poll_battery(&mut self) {
        self.battery_ticks += 1;
        if self.battery_ticks < BATTERY_POLL_TICKS {
            return;
        }
        self.battery_ticks = 0;
        let percent = self
            .gauge
            .percent()
            .map(|p| p.clamp(0.0, 100.0) as u8);
        if percent != self.hud.battery_percent {
            self.hud.battery_percent = percent;
            self.dirty = true;
        }
    }

    fn keep_awake_pulse(&mut self) {
        if !self.keep_awake {
            return;
        }
        self.keep_awake_ticks += 1;
        if self.keep_awake_ticks < KEEP_AWAKE_PERIOD_TICKS {
            return;
        }
        self.keep_awake_ticks = 0;
        // F15 registers as activity on every major OS without any
        // visible side effect.
        let mut chord = Chord::new();
        chord.add_key(KEY_F15);
        self.sink.combo(&chord);
        debug!("keep-awake pulse sent");
    }

    fn draw(&mut self) {
        if let Some(notice) = &self.notice {
            self.renderer.draw_notice(notice.title, &notice.body);
        } else if let Some(menu) = self.stack.last() {
            self.renderer.draw_menu(menu, &self.hud);
        }
    }
}

fn main_menu(keep_awake: bool) -> Menu {
    let mut menu = Menu::new("duckpad");
    let _ = menu.push(MenuItem::new(
        "Scripts",
        Action::OpenDir,
        Payload::path(SCRIPTS_ROOT),
    ));
    let _ = menu.push(MenuItem::new(
        keep_awake_label(keep_awake),
        Action::ToggleKeepAwake,
        Payload::None,
    ));
    let _ = menu.push(MenuItem::new(
        "About",
        Action::About,
        Payload::text(ABOUT_TEXT),
    ));
    menu
}

fn keep_awake_label(on: bool) -> &'static str {
    if on {
        "Keep awake  [ON]"
    } else {
        "Keep awake [OFF]"
    }
}
