//! DuckyScript line parsing.
//!
//! Each line of a script maps to exactly one [`Directive`]. Commands are
//! recognised by their first whitespace-separated word; any line that is
//! not a known command is treated as a chord of key tokens pressed
//! together (`GUI r`, `CTRL ALT DELETE`, ...).

use crate::hid::keymap::{self, Token};
use crate::hid::Chord;

/// One parsed script line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive<'a> {
    /// Comment or blank line; produces no keystrokes.
    Rem,
    /// `STRING <text>`: type the text verbatim.
    Text(&'a str),
    /// `DELAY <ms>`: one-shot pause.
    Delay(u32),
    /// `DEFAULT_DELAY <ms>`: pause applied before every later keystroke line.
    DefaultDelay(u32),
    /// `REPEAT <n>`: replay the previous keystroke line n more times.
    Repeat(u32),
    /// Whitespace-separated key tokens pressed as one combination.
    Chord(&'a str),
}

/// Parse a raw script line into a directive.
///
/// Leading and trailing whitespace (including a CR left over from CRLF
/// line endings) is stripped before matching. Malformed numeric
/// arguments fall back to 0.
pub fn parse(line: &str) -> Directive<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Directive::Rem;
    }
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest),
        None => (line, ""),
    };
    match command {
        "REM" => Directive::Rem,
        "STRING" => Directive::Text(rest),
        "DELAY" => Directive::Delay(parse_num(rest)),
        "DEFAULT_DELAY" | "DEFAULTDELAY" => Directive::DefaultDelay(parse_num(rest)),
        "REPEAT" => Directive::Repeat(parse_num(rest)),
        _ => Directive::Chord(line),
    }
}

/// Build the key combination for a chord line.
///
/// Unknown tokens are skipped with a warning rather than aborting the
/// script; a line of nothing but unknown tokens yields an empty chord.
pub fn chord(line: &str) -> Chord {
    let mut chord = Chord::new();
    for tok in line.split_whitespace() {
        match keymap::token(tok) {
            Some(Token::Modifier(bits)) => chord.add_modifier(bits),
            Some(Token::Key { modifier, usage }) => {
                chord.add_modifier(modifier);
                chord.add_key(usage);
            }
            None => warn!("unknown key token in script line"),
        }
    }
    chord
}

fn parse_num(s: &str) -> u32 {
    s.trim().parse().unwrap_or(0)
}
