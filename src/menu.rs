//! Menu model: labelled rows, wrapping selection, minimal-scroll viewport.
//!
//! A `Menu` is pure state - no drawing, no input.  The controller mutates
//! the selection, the renderer reads the visible window.

use heapless::{String, Vec};

use crate::config::{LABEL_MAX, MENU_MAX_ITEMS, MENU_PAGE_SIZE, NOTICE_MAX, PATH_MAX};

/// Label of the synthetic parent-menu row.
pub const BACK_LABEL: &str = "< Back";

/// What a menu row does when selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Enter the directory named by the payload path.
    OpenDir,
    /// Play the script named by the payload path.
    RunScript,
    /// Leave this menu for the one below it.
    Back,
    /// Flip the keep-awake pulse on or off.
    ToggleKeepAwake,
    /// Show the firmware notice carried in the payload.
    About,
    /// Placeholder row, selecting it does nothing.
    Inert,
}

/// Data carried by a menu row, matched against its action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Payload {
    None,
    /// Free text (notice bodies).
    Text(String<NOTICE_MAX>),
    /// Absolute path on the removable media.
    Path(String<PATH_MAX>),
}

impl Payload {
    /// Path payload, truncated to the path capacity.
    pub fn path(p: &str) -> Self {
        let mut s: String<PATH_MAX> = String::new();
        for c in p.chars().take(PATH_MAX) {
            let _ = s.push(c);
        }
        Payload::Path(s)
    }

    /// Text payload, truncated to the notice capacity.
    pub fn text(t: &str) -> Self {
        let mut s: String<NOTICE_MAX> = String::new();
        for c in t.chars().take(NOTICE_MAX) {
            let _ = s.push(c);
        }
        Payload::Text(s)
    }
}

/// One selectable row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem {
    label: String<LABEL_MAX>,
    action: Action,
    payload: Payload,
}

impl MenuItem {
    /// Build a row, truncating the label to the row capacity.
    pub fn new(label: &str, action: Action, payload: Payload) -> Self {
        Self {
            label: clip(label),
            action,
            payload,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }
}

/// A titled, ordered list of rows plus selection and viewport state.
#[derive(Clone, Debug)]
pub struct Menu {
    title: String<LABEL_MAX>,
    items: Vec<MenuItem, MENU_MAX_ITEMS>,
    selected: usize,
    view_start: usize,
    page_size: usize,
    /// Directory this menu was listed from, if any.
    origin: Option<String<PATH_MAX>>,
    /// Set when the menu is the single-row product of a failed listing.
    degraded: bool,
}

impl Menu {
    pub fn new(title: &str) -> Self {
        Self {
            title: clip(title),
            items: Vec::new(),
            selected: 0,
            view_start: 0,
            page_size: MENU_PAGE_SIZE,
            origin: None,
            degraded: false,
        }
    }

    /// Append a row; hands the row back if the menu is full.
    pub fn push(&mut self, item: MenuItem) -> Result<(), MenuItem> {
        self.items.push(item)
    }

    /// Insert a back row at the top (no-op if the menu is full).
    pub fn prepend_back_entry(&mut self) {
        let _ = self
            .items
            .insert(0, MenuItem::new(BACK_LABEL, Action::Back, Payload::None));
    }

    /// Whether the first row already leads back out of this menu.
    pub fn has_back_entry(&self) -> bool {
        matches!(self.items.first().map(MenuItem::action), Some(Action::Back))
    }

    /// Move the selection up one row, wrapping to the bottom at the top.
    pub fn select_prev(&mut self) {
        self.step(-1);
    }

    /// Move the selection down one row, wrapping to the top at the bottom.
    pub fn select_next(&mut self) {
        self.step(1);
    }

    fn step(&mut self, delta: isize) {
        if self.items.is_empty() {
            return;
        }
        let count = self.items.len() as isize;
        self.selected = (self.selected as isize + delta).rem_euclid(count) as usize;
        self.adjust_viewport();
    }

    /// Scroll just far enough to keep the selection on screen.
    fn adjust_viewport(&mut self) {
        if self.selected < self.view_start {
            self.view_start = self.selected;
        } else if self.selected >= self.view_start + self.page_size {
            self.view_start = self.selected + 1 - self.page_size;
        }
    }

    /// Replace the label of the first row bound to `action`.
    pub fn relabel(&mut self, action: Action, label: &str) {
        if let Some(item) = self.items.iter_mut().find(|i| i.action == action) {
            item.label = clip(label);
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&MenuItem> {
        self.items.get(self.selected)
    }

    pub fn view_start(&self) -> usize {
        self.view_start
    }

    /// The window of rows currently on screen.
    pub fn visible(&self) -> &[MenuItem] {
        let end = (self.view_start + self.page_size).min(self.items.len());
        &self.items[self.view_start..end]
    }

    pub fn set_origin(&mut self, path: &str) {
        let mut s: String<PATH_MAX> = String::new();
        for c in path.chars().take(PATH_MAX) {
            let _ = s.push(c);
        }
        self.origin = Some(s);
    }

    /// Directory this menu was built from, if it came from a listing.
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    pub fn mark_degraded(&mut self) {
        self.degraded = true;
    }

    /// True when this menu stands in for a listing that failed.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }
}

fn clip(text: &str) -> String<LABEL_MAX> {
    let mut s: String<LABEL_MAX> = String::new();
    for c in text.chars().take(LABEL_MAX) {
        let _ = s.push(c);
    }
    s
}
