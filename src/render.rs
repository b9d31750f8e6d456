//! Display output seam.
//!
//! Implementations are best-effort: draw failures are handled internally
//! and never surface to the navigation core.

use crate::menu::Menu;

/// Header strip state shown above the menu.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Hud {
    /// Last battery estimate, rounded to whole percent.  `None` until the
    /// gauge has answered once.
    pub battery_percent: Option<u8>,
    /// Keep-awake pulse currently enabled.
    pub keep_awake: bool,
}

/// Draw surface for the navigation core.
pub trait Renderer {
    /// Render one menu page: title, HUD, visible rows, selection marker.
    fn draw_menu(&mut self, menu: &Menu, hud: &Hud);

    /// Render playback progress (0-100) for the named script.
    fn draw_progress(&mut self, name: &str, percent: u8);

    /// Render a full-screen notice held until the next button press.
    fn draw_notice(&mut self, title: &str, body: &str);
}
