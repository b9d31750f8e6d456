//! US-layout usage tables for the boot keyboard (HID usage page 0x07).

// Modifier bit masks (byte 0 of the boot report).

pub const MOD_LCTRL: u8 = 0x01;
pub const MOD_LSHIFT: u8 = 0x02;
pub const MOD_LALT: u8 = 0x04;
pub const MOD_LGUI: u8 = 0x08;

// Named key usages reachable from the script dialect.

pub const KEY_ENTER: u8 = 0x28;
pub const KEY_ESC: u8 = 0x29;
pub const KEY_BACKSPACE: u8 = 0x2A;
pub const KEY_TAB: u8 = 0x2B;
pub const KEY_SPACE: u8 = 0x2C;
pub const KEY_CAPS_LOCK: u8 = 0x39;
pub const KEY_PRINT_SCREEN: u8 = 0x46;
pub const KEY_INSERT: u8 = 0x49;
pub const KEY_HOME: u8 = 0x4A;
pub const KEY_PAGE_UP: u8 = 0x4B;
pub const KEY_DELETE: u8 = 0x4C;
pub const KEY_END: u8 = 0x4D;
pub const KEY_PAGE_DOWN: u8 = 0x4E;
pub const KEY_RIGHT: u8 = 0x4F;
pub const KEY_LEFT: u8 = 0x50;
pub const KEY_DOWN: u8 = 0x51;
pub const KEY_UP: u8 = 0x52;
pub const KEY_APP: u8 = 0x65;

/// F15 - delivered by the keep-awake pulse; hosts register the press
/// but no desktop binds it to anything.
pub const KEY_F15: u8 = 0x6A;

/// A resolved script key token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    /// OR'd into the chord's modifier byte.
    Modifier(u8),
    /// Key usage plus the modifier the character itself needs
    /// ('%' is Shift+5 on the US layout).
    Key { modifier: u8, usage: u8 },
}

/// Map a printable ASCII character to (modifier, usage).  `None` for
/// characters the US layout cannot produce.
pub fn ascii(c: char) -> Option<(u8, u8)> {
    let pair = match c {
        'a'..='z' => (0, 0x04 + (c as u8 - b'a')),
        'A'..='Z' => (MOD_LSHIFT, 0x04 + (c as u8 - b'A')),
        '1'..='9' => (0, 0x1E + (c as u8 - b'1')),
        '0' => (0, 0x27),
        ' ' => (0, KEY_SPACE),
        '\t' => (0, KEY_TAB),
        '\n' => (0, KEY_ENTER),
        '!' => (MOD_LSHIFT, 0x1E),
        '@' => (MOD_LSHIFT, 0x1F),
        '#' => (MOD_LSHIFT, 0x20),
        '$' => (MOD_LSHIFT, 0x21),
        '%' => (MOD_LSHIFT, 0x22),
        '^' => (MOD_LSHIFT, 0x23),
        '&' => (MOD_LSHIFT, 0x24),
        '*' => (MOD_LSHIFT, 0x25),
        '(' => (MOD_LSHIFT, 0x26),
        ')' => (MOD_LSHIFT, 0x27),
        '-' => (0, 0x2D),
        '_' => (MOD_LSHIFT, 0x2D),
        '=' => (0, 0x2E),
        '+' => (MOD_LSHIFT, 0x2E),
        '[' => (0, 0x2F),
        '{' => (MOD_LSHIFT, 0x2F),
        ']' => (0, 0x30),
        '}' => (MOD_LSHIFT, 0x30),
        '\\' => (0, 0x31),
        '|' => (MOD_LSHIFT, 0x31),
        ';' => (0, 0x33),
        ':' => (MOD_LSHIFT, 0x33),
        '\'' => (0, 0x34),
        '"' => (MOD_LSHIFT, 0x34),
        '`' => (0, 0x35),
        '~' => (MOD_LSHIFT, 0x35),
        ',' => (0, 0x36),
        '<' => (MOD_LSHIFT, 0x36),
        '.' => (0, 0x37),
        '>' => (MOD_LSHIFT, 0x37),
        '/' => (0, 0x38),
        '?' => (MOD_LSHIFT, 0x38),
        _ => return None,
    };
    Some(pair)
}

/// Resolve one whitespace-separated script token.
///
/// Named tokens use the classic upper-case spellings; a single printable
/// character falls back to the US layout table.  `None` for anything
/// unrecognised (callers skip those).
pub fn token(tok: &str) -> Option<Token> {
    let named = match tok {
        "CTRL" | "CONTROL" => Token::Modifier(MOD_LCTRL),
        "SHIFT" => Token::Modifier(MOD_LSHIFT),
        "ALT" => Token::Modifier(MOD_LALT),
        "GUI" | "WINDOWS" | "COMMAND" => Token::Modifier(MOD_LGUI),
        "ENTER" | "RETURN" => key(KEY_ENTER),
        "ESC" | "ESCAPE" => key(KEY_ESC),
        "BACKSPACE" => key(KEY_BACKSPACE),
        "TAB" => key(KEY_TAB),
        "SPACE" => key(KEY_SPACE),
        "CAPSLOCK" => key(KEY_CAPS_LOCK),
        "PRINTSCREEN" => key(KEY_PRINT_SCREEN),
        "INSERT" => key(KEY_INSERT),
        "HOME" => key(KEY_HOME),
        "PAGEUP" => key(KEY_PAGE_UP),
        "DELETE" | "DEL" => key(KEY_DELETE),
        "END" => key(KEY_END),
        "PAGEDOWN" => key(KEY_PAGE_DOWN),
        "RIGHT" | "RIGHTARROW" => key(KEY_RIGHT),
        "LEFT" | "LEFTARROW" => key(KEY_LEFT),
        "DOWN" | "DOWNARROW" => key(KEY_DOWN),
        "UP" | "UPARROW" => key(KEY_UP),
        "APP" | "MENU" => key(KEY_APP),
        _ => return function_key(tok).map(key).or_else(|| single_char(tok)),
    };
    Some(named)
}

fn key(usage: u8) -> Token {
    Token::Key { modifier: 0, usage }
}

/// "F1" through "F15".
fn function_key(tok: &str) -> Option<u8> {
    let n: u8 = tok.strip_prefix('F')?.parse().ok()?;
    match n {
        1..=12 => Some(0x3A + n - 1),
        13..=15 => Some(0x68 + n - 13),
        _ => None,
    }
}

fn single_char(tok: &str) -> Option<Token> {
    let mut chars = tok.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    let (modifier, usage) = ascii(c)?;
    Some(Token::Key { modifier, usage })
}
