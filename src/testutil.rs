//! In-memory collaborators shared by the unit test suites.

use crate::error::StorageError;
use crate::hid::{Chord, KeystrokeSink};
use crate::menu::Menu;
use crate::render::{Hud, Renderer};
use crate::storage::{DirEntry, DirListing, EntryKind, LineRead, Storage};

/// Scriptable in-memory [`Storage`] backend.
///
/// Directories and files are registered up front with the builder
/// methods; failures can be injected per call site.
pub struct MemStorage {
    dirs: Vec<(String, Vec<(String, EntryKind)>)>,
    files: Vec<(String, Vec<u8>)>,
    fail_listing: Option<StorageError>,
    fail_read_at: Option<u32>,
    cursor: Option<(usize, usize)>,
    /// Number of `read_line` calls observed.
    pub reads: u32,
    /// Number of times an open file was actually closed.
    pub closes: u32,
}

impl MemStorage {
    pub fn new() -> Self {
        Self {
            dirs: Vec::new(),
            files: Vec::new(),
            fail_listing: None,
            fail_read_at: None,
            cursor: None,
            reads: 0,
            closes: 0,
        }
    }

    pub fn dir(mut self, path: &str, entries: &[(&str, EntryKind)]) -> Self {
        let entries = entries
            .iter()
            .map(|(name, kind)| ((*name).to_string(), *kind))
            .collect();
        self.dirs.push((path.to_string(), entries));
        self
    }

    pub fn file(mut self, path: &str, content: &[u8]) -> Self {
        self.files.push((path.to_string(), content.to_vec()));
        self
    }

    /// Make every `list` call fail with `err`.
    pub fn listing_error(mut self, err: StorageError) -> Self {
        self.fail_listing = Some(err);
        self
    }

    /// Make the nth `read_line` call (1-based) fail.
    pub fn read_error_at(mut self, nth: u32) -> Self {
        self.fail_read_at = Some(nth);
        self
    }
}

impl Storage for MemStorage {
    fn list(&mut self, path: &str) -> Result<DirListing, StorageError> {
        if let Some(err) = self.fail_listing {
            return Err(err);
        }
        let (_, entries) = self
            .dirs
            .iter()
            .find(|(p, _)| p == path)
            .ok_or(StorageError::NotFound)?;
        let mut listing = DirListing::new();
        for (name, kind) in entries {
            let _ = listing.push(DirEntry::new(name, *kind));
        }
        Ok(listing)
    }

    fn open(&mut self, path: &str) -> Result<u32, StorageError> {
        self.close();
        let idx = self
            .files
            .iter()
            .position(|(p, _)| p == path)
            .ok_or(StorageError::NotFound)?;
        let len = self.files[idx].1.len() as u32;
        self.cursor = Some((idx, 0));
        Ok(len)
    }

    fn read_line(&mut self, out: &mut [u8]) -> Result<Option<LineRead>, StorageError> {
        self.reads += 1;
        if self.fail_read_at == Some(self.reads) {
            return Err(StorageError::Read);
        }
        let Some((idx, pos)) = self.cursor else {
            return Err(StorageError::Read);
        };
        let content = &self.files[idx].1;
        if pos >= content.len() {
            return Ok(None);
        }
        let rest = &content[pos..];
        let (line, consumed) = match rest.iter().position(|&b| b == b'\n') {
            Some(nl) => (&rest[..nl], nl + 1),
            None => (rest, rest.len()),
        };
        let len = line.len().min(out.len());
        out[..len].copy_from_slice(&line[..len]);
        self.cursor = Some((idx, pos + consumed));
        Ok(Some(LineRead {
            len,
            consumed: consumed as u32,
        }))
    }

    fn close(&mut self) {
        if self.cursor.take().is_some() {
            self.closes += 1;
        }
    }
}

/// Keystroke sink that records every event in order.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<SinkEvent>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Text(String),
    Combo(Chord),
    Delay(u32),
}

impl KeystrokeSink for RecordingSink {
    fn type_text(&mut self, text: &str) {
        self.events.push(SinkEvent::Text(text.to_string()));
    }

    fn combo(&mut self, chord: &Chord) {
        self.events.push(SinkEvent::Combo(*chord));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.events.push(SinkEvent::Delay(ms));
    }
}

/// Renderer that records every frame it is asked to draw.
#[derive(Default)]
pub struct RecordingRenderer {
    pub frames: Vec<Frame>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Menu {
        title: String,
        labels: Vec<String>,
        selected: usize,
    },
    Progress {
        name: String,
        percent: u8,
    },
    Notice {
        title: String,
        body: String,
    },
}

impl Renderer for RecordingRenderer {
    fn draw_menu(&mut self, menu: &Menu, _hud: &Hud) {
        self.frames.push(Frame::Menu {
            title: menu.title().to_string(),
            labels: menu.items().iter().map(|i| i.label().to_string()).collect(),
            selected: menu.selected(),
        });
    }

    fn draw_progress(&mut self, name: &str, percent: u8) {
        self.frames.push(Frame::Progress {
            name: name.to_string(),
            percent,
        });
    }

    fn draw_notice(&mut self, title: &str, body: &str) {
        self.frames.push(Frame::Notice {
            title: title.to_string(),
            body: body.to_string(),
        });
    }
}
