//! Unit tests for HID report building and key mapping.

use super::keyboard::{KeyboardReport, KEYBOARD_REPORT_SIZE};
use super::keymap::{self, Token, KEY_ENTER, MOD_LGUI, MOD_LSHIFT};
use super::Chord;

// ═══════════════════════════════════════════════════════════════════════════
// ASCII key mapping
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn lowercase_letters_map_without_shift() {
    assert_eq!(keymap::ascii('a'), Some((0, 0x04)));
    assert_eq!(keymap::ascii('z'), Some((0, 0x1D)));
}

#[test]
fn uppercase_letters_carry_shift() {
    assert_eq!(keymap::ascii('A'), Some((MOD_LSHIFT, 0x04)));
    assert_eq!(keymap::ascii('Z'), Some((MOD_LSHIFT, 0x1D)));
}

#[test]
fn digits_map_to_top_row() {
    assert_eq!(keymap::ascii('1'), Some((0, 0x1E)));
    assert_eq!(keymap::ascii('9'), Some((0, 0x26)));
    assert_eq!(keymap::ascii('0'), Some((0, 0x27)));
}

#[test]
fn shifted_symbols_share_the_base_key() {
    // '!' lives on the '1' key, '?' on '/', '~' on '`'
    assert_eq!(keymap::ascii('!'), Some((MOD_LSHIFT, 0x1E)));
    assert_eq!(keymap::ascii('?'), Some((MOD_LSHIFT, 0x38)));
    assert_eq!(keymap::ascii('~'), Some((MOD_LSHIFT, 0x35)));
}

#[test]
fn whitespace_has_dedicated_usages() {
    assert_eq!(keymap::ascii(' '), Some((0, 0x2C)));
    assert_eq!(keymap::ascii('\t'), Some((0, 0x2B)));
    assert_eq!(keymap::ascii('\n'), Some((0, KEY_ENTER)));
}

#[test]
fn non_ascii_characters_are_unmapped() {
    assert_eq!(keymap::ascii('é'), None);
    assert_eq!(keymap::ascii('\u{1F600}'), None);
}

// ═══════════════════════════════════════════════════════════════════════════
// Named token lookup
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn modifier_tokens_and_aliases_resolve() {
    assert_eq!(keymap::token("CTRL"), Some(Token::Modifier(0x01)));
    assert_eq!(keymap::token("CONTROL"), Some(Token::Modifier(0x01)));
    assert_eq!(keymap::token("SHIFT"), Some(Token::Modifier(0x02)));
    assert_eq!(keymap::token("ALT"), Some(Token::Modifier(0x04)));
    assert_eq!(keymap::token("GUI"), Some(Token::Modifier(0x08)));
    assert_eq!(keymap::token("WINDOWS"), Some(Token::Modifier(0x08)));
    assert_eq!(keymap::token("COMMAND"), Some(Token::Modifier(0x08)));
}

#[test]
fn named_keys_resolve_to_usages() {
    assert_eq!(
        keymap::token("ENTER"),
        Some(Token::Key {
            modifier: 0,
            usage: KEY_ENTER
        })
    );
    assert_eq!(
        keymap::token("ESC"),
        Some(Token::Key {
            modifier: 0,
            usage: 0x29
        })
    );
    assert_eq!(
        keymap::token("DELETE"),
        Some(Token::Key {
            modifier: 0,
            usage: 0x4C
        })
    );
    assert_eq!(
        keymap::token("UPARROW"),
        Some(Token::Key {
            modifier: 0,
            usage: 0x52
        })
    );
}

#[test]
fn function_keys_span_both_usage_banks() {
    assert_eq!(
        keymap::token("F1"),
        Some(Token::Key {
            modifier: 0,
            usage: 0x3A
        })
    );
    assert_eq!(
        keymap::token("F12"),
        Some(Token::Key {
            modifier: 0,
            usage: 0x45
        })
    );
    assert_eq!(
        keymap::token("F15"),
        Some(Token::Key {
            modifier: 0,
            usage: 0x6A
        })
    );
    assert_eq!(keymap::token("F16"), None);
    assert_eq!(keymap::token("F0"), None);
}

#[test]
fn single_characters_fall_through_to_ascii() {
    assert_eq!(
        keymap::token("r"),
        Some(Token::Key {
            modifier: 0,
            usage: 0x15
        })
    );
    assert_eq!(
        keymap::token("R"),
        Some(Token::Key {
            modifier: MOD_LSHIFT,
            usage: 0x15
        })
    );
    assert_eq!(
        keymap::token("%"),
        Some(Token::Key {
            modifier: MOD_LSHIFT,
            usage: 0x22
        })
    );
}

#[test]
fn unknown_tokens_are_rejected() {
    // Token names are case sensitive; multi-char garbage is not a key.
    assert_eq!(keymap::token("ctrl"), None);
    assert_eq!(keymap::token("XYZ"), None);
    assert_eq!(keymap::token(""), None);
}

// ═══════════════════════════════════════════════════════════════════════════
// Chord building
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn chord_accumulates_modifiers_and_keys() {
    let mut chord = Chord::new();
    chord.add_modifier(MOD_LGUI);
    chord.add_key(0x15); // 'r'
    assert_eq!(chord.modifier(), MOD_LGUI);
    assert_eq!(chord.keys(), &[0x15]);
    assert!(!chord.is_empty());
}

#[test]
fn chord_drops_keys_past_six() {
    let mut chord = Chord::new();
    for usage in 0x04..0x0C {
        chord.add_key(usage);
    }
    assert_eq!(chord.keys(), &[0x04, 0x05, 0x06, 0x07, 0x08, 0x09]);
}

#[test]
fn empty_chord_reports_empty() {
    assert!(Chord::new().is_empty());
    let mut modifier_only = Chord::new();
    modifier_only.add_modifier(MOD_LSHIFT);
    assert!(!modifier_only.is_empty());
}

#[test]
fn chord_converts_to_report() {
    let mut chord = Chord::new();
    chord.add_modifier(MOD_LGUI);
    chord.add_key(0x15);
    let report = chord.report();
    assert_eq!(report.modifier, MOD_LGUI);
    assert_eq!(report.keycodes, [0x15, 0, 0, 0, 0, 0]);
}

// ═══════════════════════════════════════════════════════════════════════════
// Report serialisation
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn report_bytes_are_in_wire_order() {
    let report = KeyboardReport {
        modifier: 0x02,
        reserved: 0,
        keycodes: [0x04, 0x05, 0, 0, 0, 0],
    };
    let bytes = report.to_bytes();
    assert_eq!(bytes.len(), KEYBOARD_REPORT_SIZE);
    assert_eq!(bytes, [0x02, 0x00, 0x04, 0x05, 0, 0, 0, 0]);
}

#[test]
fn empty_report_is_all_zeroes() {
    let report = KeyboardReport::empty();
    assert!(report.is_empty());
    assert_eq!(report.to_bytes(), [0u8; 8]);
}

#[test]
fn single_press_fills_first_slot() {
    let report = KeyboardReport::press(MOD_LSHIFT, 0x04);
    assert_eq!(report.modifier, MOD_LSHIFT);
    assert_eq!(report.keycodes, [0x04, 0, 0, 0, 0, 0]);
    assert!(!report.is_empty());
}
