//! Unified error types for duckpad.
//!
//! We avoid `alloc` - all variants carry only fixed-size data, and every
//! enum is `Copy`.  On-target builds derive `defmt::Format` for efficient
//! logging; host test builds fall back to plain `Debug`.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A menu action could not run with the payload it carried.
    Dispatch,

    /// Script playback aborted.
    Script(ScriptError),
}

/// Removable-media failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Card missing, unformatted, or the volume would not mount.
    Unavailable,

    /// Directory enumeration failed partway through.
    DirectoryRead,

    /// The requested path does not exist on the card.
    NotFound,

    /// Read from an open script failed.
    Read,
}

/// Script playback failures (fatal for the current execution).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScriptError {
    /// The backing resource failed mid-run.
    Source(StorageError),

    /// Step budget exhausted - the resource never reached its end.
    StepLimit,
}

// Convenience conversions

impl From<ScriptError> for Error {
    fn from(e: ScriptError) -> Self {
        Error::Script(e)
    }
}

impl From<StorageError> for ScriptError {
    fn from(e: StorageError) -> Self {
        ScriptError::Source(e)
    }
}
