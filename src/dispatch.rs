//! Menu action dispatch.
//!
//! [`execute`] activates the selected item of a menu and reports what
//! the navigation stack should do about it. Script failures degrade to
//! an on-screen notice; nothing in here panics the UI loop.

use heapless::String;

use crate::browse;
use crate::config::{NOTICE_MAX, SCRIPTS_ROOT};
use crate::error::{Error, ScriptError};
use crate::hid::KeystrokeSink;
use crate::menu::{Action, Menu, Payload};
use crate::render::Renderer;
use crate::script::ScriptRunner;
use crate::storage::Storage;

/// Stack operation requested by an activated menu item.
#[derive(Debug)]
pub enum Outcome {
    /// Push a new menu on top of the current one.
    Push(Menu),
    /// Replace the current top of the stack.
    Replace(Menu),
    /// Drop the top of the stack, returning to the parent menu.
    Pop,
    /// Flip the keep-awake setting.
    ToggleKeepAwake,
    /// Show a full-screen notice until the next button press.
    Notice(Notice),
    /// Nothing to do.
    None,
}

/// Full-screen message that blocks navigation until dismissed.
#[derive(Debug, Clone)]
pub struct Notice {
    pub title: &'static str,
    pub body: String<NOTICE_MAX>,
}

/// Activate the selected item of `menu`.
pub fn execute<S, K, R>(menu: &Menu, storage: &mut S, sink: &mut K, renderer: &mut R) -> Outcome
where
    S: Storage,
    K: KeystrokeSink,
    R: Renderer,
{
    let Some(item) = menu.selected_item() else {
        return Outcome::None;
    };
    match run(menu, storage, sink, renderer) {
        Ok(outcome) => outcome,
        Err(Error::Script(e)) => {
            warn!("script aborted: {}", e);
            let mut body: String<NOTICE_MAX> = String::new();
            let _ = body.push_str("Script failed:\n");
            let _ = body.push_str(item.label());
            Outcome::Notice(Notice {
                title: "Error",
                body,
            })
        }
        Err(e) => {
            warn!("dispatch failed: {}", e);
            Outcome::None
        }
    }
}

fn run<S, K, R>(
    menu: &Menu,
    storage: &mut S,
    sink: &mut K,
    renderer: &mut R,
) -> Result<Outcome, Error>
where
    S: Storage,
    K: KeystrokeSink,
    R: Renderer,
{
    let Some(item) = menu.selected_item() else {
        return Ok(Outcome::None);
    };
    match (item.action(), item.payload()) {
        (Action::OpenDir, Payload::Path(path)) => {
            Ok(Outcome::Push(escapable(browse::build(storage, path))))
        }
        (Action::RunScript, Payload::Path(path)) => {
            play(path, storage, sink, renderer)?;
            // Rebuild the listing we came from; the card may have
            // changed while the script ran.
            let resume = menu.origin().unwrap_or(SCRIPTS_ROOT);
            Ok(Outcome::Replace(escapable(browse::build(storage, resume))))
        }
        (Action::Back, _) => Ok(Outcome::Pop),
        (Action::ToggleKeepAwake, _) => Ok(Outcome::ToggleKeepAwake),
        (Action::About, Payload::Text(body)) => Ok(Outcome::Notice(Notice {
            title: "About",
            body: body.clone(),
        })),
        (Action::Inert, _) => Ok(Outcome::None),
        _ => Err(Error::Dispatch),
    }
}

fn play<S, K, R>(
    path: &str,
    storage: &mut S,
    sink: &mut K,
    renderer: &mut R,
) -> Result<(), ScriptError>
where
    S: Storage,
    K: KeystrokeSink,
    R: Renderer,
{
    let name = file_name(path);
    info!("script playback started");
    let mut runner = ScriptRunner::start(storage, path)?;
    renderer.draw_progress(name, 0);
    let mut progress = 0;
    while progress < 100 {
        progress = runner.step(storage, sink)?;
        renderer.draw_progress(name, progress.min(100));
    }
    Ok(())
}

/// Every menu that lands on the stack needs a way back out, including
/// degraded ones whose listing failed.
fn escapable(mut menu: Menu) -> Menu {
    if !menu.has_back_entry() {
        menu.prepend_back_entry();
    }
    menu
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
