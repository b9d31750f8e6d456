//! Removable-media access seam.
//!
//! The navigation core reads the script library through this trait so it
//! can be exercised on the host against an in-memory tree; the SD card
//! implementation lives in `board::sdcard`.
//!
//! Reading is line-oriented and byte-accounted: `read_line` reports how
//! many raw bytes one line consumed (terminator and truncated overflow
//! included) so playback progress can be derived from consumption.

use heapless::{String, Vec};

use crate::config::{DIR_MAX_ENTRIES, NAME_MAX};
use crate::error::StorageError;

/// Classification of one directory entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EntryKind {
    File,
    Directory,
}

/// One entry from a directory listing, in media order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String<NAME_MAX>,
    pub kind: EntryKind,
}

impl DirEntry {
    /// Build an entry, truncating the name to capacity.
    pub fn new(name: &str, kind: EntryKind) -> Self {
        let mut n: String<NAME_MAX> = String::new();
        for c in name.chars().take(NAME_MAX) {
            let _ = n.push(c);
        }
        Self { name: n, kind }
    }
}

/// Bounded directory listing.
pub type DirListing = Vec<DirEntry, DIR_MAX_ENTRIES>;

/// Result of reading one line from the open script.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineRead {
    /// Bytes of line content placed in the caller's buffer.
    pub len: usize,
    /// Raw bytes consumed from the resource, terminator and any
    /// truncated overflow included.  Always at least 1.
    pub consumed: u32,
}

/// Script library access.  At most one script is open at a time; a second
/// `open` implicitly closes the first.
pub trait Storage {
    /// List the entries of the directory at `path`, preserving media order.
    fn list(&mut self, path: &str) -> Result<DirListing, StorageError>;

    /// Open the script at `path` for reading; returns its size in bytes.
    fn open(&mut self, path: &str) -> Result<u32, StorageError>;

    /// Read the next line of the open script into `buf`, truncating the
    /// content to fit.  `None` means end of input.
    fn read_line(&mut self, buf: &mut [u8]) -> Result<Option<LineRead>, StorageError>;

    /// Close the open script, releasing its handle.  Idempotent.
    fn close(&mut self);
}
