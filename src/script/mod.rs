//! Script playback.
//!
//! A [`ScriptRunner`] executes one script line per [`ScriptRunner::step`]
//! call, so the caller stays in control of the loop and can redraw the
//! progress bar between lines. Progress is derived from bytes consumed
//! out of the file's total length and never moves backwards; 100 is
//! returned exactly once the file is exhausted and closed.

pub mod engine;

#[cfg(test)]
mod tests;

use heapless::Vec;

use crate::config::{LINE_MAX, REPEAT_MAX, SCRIPT_STEP_LIMIT};
use crate::error::ScriptError;
use crate::hid::KeystrokeSink;
use crate::storage::Storage;

use engine::Directive;

/// Line-at-a-time script executor with monotonic progress reporting.
pub struct ScriptRunner {
    total: u32,
    consumed: u32,
    progress: u8,
    steps: u32,
    default_delay_ms: u32,
    last_line: Vec<u8, LINE_MAX>,
    done: bool,
}

impl ScriptRunner {
    /// Open the script at `path` and prepare for playback.
    pub fn start(storage: &mut impl Storage, path: &str) -> Result<Self, ScriptError> {
        let total = storage.open(path)?;
        Ok(Self {
            total,
            consumed: 0,
            progress: 0,
            steps: 0,
            default_delay_ms: 0,
            last_line: Vec::new(),
            done: false,
        })
    }

    /// Execute the next line and return the updated progress.
    ///
    /// A return of 100 means the script has completed and the file is
    /// closed; further calls keep returning 100 without touching
    /// storage. On error the file is closed and the runner is finished.
    pub fn step(
        &mut self,
        storage: &mut impl Storage,
        sink: &mut impl KeystrokeSink,
    ) -> Result<u8, ScriptError> {
        if self.done {
            return Ok(100);
        }
        self.steps += 1;
        if self.steps > SCRIPT_STEP_LIMIT {
            storage.close();
            self.done = true;
            return Err(ScriptError::StepLimit);
        }

        let mut buf = [0u8; LINE_MAX];
        let read = match storage.read_line(&mut buf) {
            Ok(read) => read,
            Err(e) => {
                storage.close();
                self.done = true;
                return Err(ScriptError::Source(e));
            }
        };
        let Some(line) = read else {
            return Ok(self.finish(storage));
        };
        self.consumed = self.consumed.saturating_add(line.consumed);

        let text = core::str::from_utf8(&buf[..line.len]).unwrap_or("");
        self.execute(text, sink);

        if self.consumed >= self.total {
            return Ok(self.finish(storage));
        }
        let pct = (u64::from(self.consumed) * 100 / u64::from(self.total)) as u8;
        self.progress = self.progress.max(pct);
        Ok(self.progress)
    }

    /// Progress reported so far (0-100).
    pub fn progress(&self) -> u8 {
        self.progress
    }

    fn finish(&mut self, storage: &mut impl Storage) -> u8 {
        storage.close();
        self.done = true;
        self.progress = 100;
        info!("script playback finished");
        100
    }

    fn execute(&mut self, line: &str, sink: &mut impl KeystrokeSink) {
        match engine::parse(line) {
            Directive::Rem => {}
            Directive::Text(text) => {
                self.remember(line);
                self.pace(sink);
                sink.type_text(text);
            }
            Directive::Delay(ms) => sink.delay_ms(ms),
            Directive::DefaultDelay(ms) => self.default_delay_ms = ms,
            Directive::Repeat(n) => {
                let last = self.last_line.clone();
                let Ok(text) = core::str::from_utf8(&last) else {
                    return;
                };
                if text.is_empty() {
                    return;
                }
                for _ in 0..n.min(REPEAT_MAX) {
                    self.pace(sink);
                    Self::replay(text, sink);
                }
            }
            Directive::Chord(_) => {
                self.remember(line);
                self.pace(sink);
                let chord = engine::chord(line);
                if !chord.is_empty() {
                    sink.combo(&chord);
                }
            }
        }
    }

    // REPEAT replays only keystroke lines; a remembered line is never a
    // command, so the other arms are unreachable here.
    fn replay(line: &str, sink: &mut impl KeystrokeSink) {
        match engine::parse(line) {
            Directive::Text(text) => sink.type_text(text),
            Directive::Chord(_) => {
                let chord = engine::chord(line);
                if !chord.is_empty() {
                    sink.combo(&chord);
                }
            }
            _ => {}
        }
    }

    fn remember(&mut self, line: &str) {
        self.last_line.clear();
        let _ = self.last_line.extend_from_slice(line.as_bytes());
    }

    fn pace(&self, sink: &mut impl KeystrokeSink) {
        if self.default_delay_ms > 0 {
            sink.delay_ms(self.default_delay_ms);
        }
    }
}
