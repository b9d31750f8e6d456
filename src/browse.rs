//! Script library browsing.
//!
//! Turns a directory listing into a navigable [`Menu`]: subdirectories
//! open deeper menus, files run as scripts, and storage failures
//! degrade to a single inert row instead of crashing the UI.

use heapless::String;

use crate::config::{HIDDEN_PREFIX, NAME_MAX, OS_ARTIFACT_NAMES, PATH_MAX, SCRIPTS_ROOT};
use crate::menu::{Action, Menu, MenuItem, Payload};
use crate::storage::{EntryKind, Storage};

/// Placeholder row for a directory with nothing selectable in it.
const EMPTY_LABEL: &str = "(empty)";
/// Placeholder row shown when the listing itself failed.
const ERROR_LABEL: &str = "No SD Card found :/";

/// Build the menu for the directory at `path`.
///
/// The returned menu always has at least one row. When the listing
/// fails it is marked degraded and carries only the error row; the
/// caller decides whether to add an escape route.
pub fn build(storage: &mut impl Storage, path: &str) -> Menu {
    let mut menu = Menu::new(dir_title(path));
    menu.set_origin(path);

    let listing = match storage.list(path) {
        Ok(listing) => listing,
        Err(e) => {
            warn!("directory listing failed: {}", e);
            menu.mark_degraded();
            let _ = menu.push(MenuItem::new(ERROR_LABEL, Action::Inert, Payload::None));
            return menu;
        }
    };

    if path != SCRIPTS_ROOT {
        menu.prepend_back_entry();
    }

    let mut visible = 0;
    for entry in &listing {
        if is_hidden(&entry.name) {
            continue;
        }
        let Some(joined) = join(path, &entry.name) else {
            warn!("entry path too long, skipping");
            continue;
        };
        let item = match entry.kind {
            EntryKind::Directory => {
                let mut label: String<{ NAME_MAX + 1 }> = String::new();
                let _ = label.push_str(&entry.name);
                let _ = label.push('/');
                MenuItem::new(&label, Action::OpenDir, Payload::Path(joined))
            }
            EntryKind::File => MenuItem::new(&entry.name, Action::RunScript, Payload::Path(joined)),
        };
        if menu.push(item).is_err() {
            warn!("menu full, dropping remaining entries");
            break;
        }
        visible += 1;
    }

    if visible == 0 {
        let _ = menu.push(MenuItem::new(EMPTY_LABEL, Action::Inert, Payload::None));
    }
    menu
}

/// Dotfiles and well-known OS litter stay out of the menu.
fn is_hidden(name: &str) -> bool {
    name.starts_with(HIDDEN_PREFIX)
        || OS_ARTIFACT_NAMES
            .iter()
            .any(|artifact| artifact.eq_ignore_ascii_case(name))
}

fn join(dir: &str, name: &str) -> Option<String<PATH_MAX>> {
    let mut path: String<PATH_MAX> = String::new();
    path.push_str(dir).ok()?;
    if !dir.ends_with('/') {
        path.push('/').ok()?;
    }
    path.push_str(name).ok()?;
    Some(path)
}

/// Last path component, used as the menu title.
fn dir_title(path: &str) -> &str {
    path.rsplit('/').find(|s| !s.is_empty()).unwrap_or(path)
}
