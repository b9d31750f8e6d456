//! Unit tests for script parsing and playback.

use super::engine::{self, Directive};
use super::ScriptRunner;
use crate::config::{REPEAT_MAX, SCRIPT_STEP_LIMIT};
use crate::error::{ScriptError, StorageError};
use crate::hid::keymap::{MOD_LALT, MOD_LCTRL, MOD_LGUI};
use crate::testutil::{MemStorage, RecordingSink, SinkEvent};

// ═══════════════════════════════════════════════════════════════════════════
// Line parsing
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn comments_and_blank_lines_are_inert() {
    assert_eq!(engine::parse("REM set up the payload"), Directive::Rem);
    assert_eq!(engine::parse(""), Directive::Rem);
    assert_eq!(engine::parse("   "), Directive::Rem);
}

#[test]
fn string_keeps_payload_verbatim_past_first_space() {
    assert_eq!(engine::parse("STRING hello world"), Directive::Text("hello world"));
    assert_eq!(engine::parse("STRING  indented"), Directive::Text(" indented"));
    assert_eq!(engine::parse("STRING"), Directive::Text(""));
}

#[test]
fn crlf_line_endings_are_stripped_before_matching() {
    assert_eq!(engine::parse("STRING hi\r"), Directive::Text("hi"));
    assert_eq!(engine::parse("DELAY 500\r"), Directive::Delay(500));
}

#[test]
fn delay_parses_milliseconds() {
    assert_eq!(engine::parse("DELAY 500"), Directive::Delay(500));
    assert_eq!(engine::parse("DELAY abc"), Directive::Delay(0));
    assert_eq!(engine::parse("DELAY"), Directive::Delay(0));
}

#[test]
fn default_delay_accepts_both_spellings() {
    assert_eq!(engine::parse("DEFAULT_DELAY 100"), Directive::DefaultDelay(100));
    assert_eq!(engine::parse("DEFAULTDELAY 100"), Directive::DefaultDelay(100));
}

#[test]
fn repeat_parses_count() {
    assert_eq!(engine::parse("REPEAT 5"), Directive::Repeat(5));
}

#[test]
fn unrecognised_lines_fall_through_to_chords() {
    assert_eq!(engine::parse("GUI r"), Directive::Chord("GUI r"));
    assert_eq!(engine::parse("ENTER"), Directive::Chord("ENTER"));
}

// ═══════════════════════════════════════════════════════════════════════════
// Chord lines
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn chord_line_combines_modifiers_and_key() {
    let chord = engine::chord("CTRL ALT DELETE");
    assert_eq!(chord.modifier(), MOD_LCTRL | MOD_LALT);
    assert_eq!(chord.keys(), &[0x4C]);
}

#[test]
fn chord_line_skips_unknown_tokens() {
    let chord = engine::chord("GUI BOGUS r");
    assert_eq!(chord.modifier(), MOD_LGUI);
    assert_eq!(chord.keys(), &[0x15]);

    assert!(engine::chord("BOGUS NONSENSE").is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// Playback progress
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn one_byte_lines_walk_progress_from_one_to_a_hundred() {
    // 100 blank lines of one byte each: step k reports exactly k percent.
    let mut storage = MemStorage::new().file("/scripts/blank.txt", &[b'\n'; 100]);
    let mut sink = RecordingSink::default();
    let mut runner = ScriptRunner::start(&mut storage, "/scripts/blank.txt").unwrap();

    let mut reported = Vec::new();
    loop {
        let pct = runner.step(&mut storage, &mut sink).unwrap();
        reported.push(pct);
        if pct >= 100 {
            break;
        }
    }

    let expected: Vec<u8> = (1..=100).collect();
    assert_eq!(reported, expected);
    assert_eq!(storage.closes, 1);
    assert!(sink.events.is_empty());
}

#[test]
fn progress_never_moves_backwards() {
    let script = b"REM a long comment line that eats much of the file\nGUI r\nSTRING x\n";
    let mut storage = MemStorage::new().file("/scripts/mixed.txt", script);
    let mut sink = RecordingSink::default();
    let mut runner = ScriptRunner::start(&mut storage, "/scripts/mixed.txt").unwrap();

    let mut last = 0;
    loop {
        let pct = runner.step(&mut storage, &mut sink).unwrap();
        assert!(pct >= last);
        assert_eq!(runner.progress(), pct);
        last = pct;
        if pct >= 100 {
            break;
        }
    }
    assert_eq!(last, 100);
}

#[test]
fn empty_file_completes_on_first_step() {
    let mut storage = MemStorage::new().file("/scripts/empty.txt", b"");
    let mut sink = RecordingSink::default();
    let mut runner = ScriptRunner::start(&mut storage, "/scripts/empty.txt").unwrap();

    assert_eq!(runner.step(&mut storage, &mut sink).unwrap(), 100);
    assert_eq!(storage.closes, 1);
}

#[test]
fn missing_trailing_newline_still_reaches_a_hundred() {
    let mut storage = MemStorage::new().file("/scripts/bare.txt", b"STRING hi");
    let mut sink = RecordingSink::default();
    let mut runner = ScriptRunner::start(&mut storage, "/scripts/bare.txt").unwrap();

    assert_eq!(runner.step(&mut storage, &mut sink).unwrap(), 100);
    assert_eq!(sink.events, vec![SinkEvent::Text("hi".into())]);
}

#[test]
fn finished_runner_stays_at_a_hundred_without_reading() {
    let mut storage = MemStorage::new().file("/scripts/tiny.txt", b"REM done\n");
    let mut sink = RecordingSink::default();
    let mut runner = ScriptRunner::start(&mut storage, "/scripts/tiny.txt").unwrap();

    assert_eq!(runner.step(&mut storage, &mut sink).unwrap(), 100);
    let reads_after_finish = storage.reads;
    assert_eq!(runner.step(&mut storage, &mut sink).unwrap(), 100);
    assert_eq!(storage.reads, reads_after_finish);
    assert_eq!(storage.closes, 1);
}

// ═══════════════════════════════════════════════════════════════════════════
// Directive execution
// ═══════════════════════════════════════════════════════════════════════════

fn run_to_end(script: &[u8]) -> RecordingSink {
    let mut storage = MemStorage::new().file("/scripts/run.txt", script);
    let mut sink = RecordingSink::default();
    let mut runner = ScriptRunner::start(&mut storage, "/scripts/run.txt").unwrap();
    while runner.step(&mut storage, &mut sink).unwrap() < 100 {}
    sink
}

#[test]
fn string_lines_type_their_payload() {
    let sink = run_to_end(b"STRING echo pwned > /tmp/x\n");
    assert_eq!(sink.events, vec![SinkEvent::Text("echo pwned > /tmp/x".into())]);
}

#[test]
fn delay_lines_forward_to_the_sink() {
    let sink = run_to_end(b"DELAY 750\n");
    assert_eq!(sink.events, vec![SinkEvent::Delay(750)]);
}

#[test]
fn default_delay_paces_later_keystroke_lines_only() {
    let sink = run_to_end(b"DEFAULTDELAY 50\nSTRING a\nDELAY 10\nSTRING b\n");
    assert_eq!(
        sink.events,
        vec![
            SinkEvent::Delay(50),
            SinkEvent::Text("a".into()),
            SinkEvent::Delay(10),
            SinkEvent::Delay(50),
            SinkEvent::Text("b".into()),
        ]
    );
}

#[test]
fn chord_lines_press_the_combination() {
    let sink = run_to_end(b"GUI r\n");
    assert_eq!(sink.events.len(), 1);
    match &sink.events[0] {
        SinkEvent::Combo(chord) => {
            assert_eq!(chord.modifier(), MOD_LGUI);
            assert_eq!(chord.keys(), &[0x15]);
        }
        other => panic!("expected a combo, got {other:?}"),
    }
}

#[test]
fn fully_unknown_chord_line_presses_nothing() {
    let sink = run_to_end(b"BOGUS NONSENSE\n");
    assert!(sink.events.is_empty());
}

#[test]
fn repeat_replays_the_previous_keystroke_line() {
    let sink = run_to_end(b"STRING x\nREPEAT 3\n");
    assert_eq!(
        sink.events,
        vec![
            SinkEvent::Text("x".into()),
            SinkEvent::Text("x".into()),
            SinkEvent::Text("x".into()),
            SinkEvent::Text("x".into()),
        ]
    );
}

#[test]
fn repeat_count_is_capped() {
    let sink = run_to_end(b"ENTER\nREPEAT 100000\n");
    assert_eq!(sink.events.len(), 1 + REPEAT_MAX as usize);
}

#[test]
fn repeat_without_a_prior_keystroke_line_is_ignored() {
    let sink = run_to_end(b"REM nothing yet\nREPEAT 5\n");
    assert!(sink.events.is_empty());
}

#[test]
fn repeat_skips_over_intervening_commands() {
    // DELAY is a command, not a keystroke line; REPEAT reaches past it.
    let sink = run_to_end(b"STRING x\nDELAY 5\nREPEAT 1\n");
    assert_eq!(
        sink.events,
        vec![
            SinkEvent::Text("x".into()),
            SinkEvent::Delay(5),
            SinkEvent::Text("x".into()),
        ]
    );
}

#[test]
fn overlong_lines_are_truncated_but_fully_consumed() {
    let mut script = Vec::from(&b"REM "[..]);
    script.extend(std::iter::repeat(b'x').take(400));
    script.extend(b"\nSTRING ok\n");

    let mut storage = MemStorage::new().file("/scripts/long.txt", &script);
    let mut sink = RecordingSink::default();
    let mut runner = ScriptRunner::start(&mut storage, "/scripts/long.txt").unwrap();

    let first = runner.step(&mut storage, &mut sink).unwrap();
    assert!(first > 0 && first < 100);
    assert_eq!(runner.step(&mut storage, &mut sink).unwrap(), 100);
    assert_eq!(sink.events, vec![SinkEvent::Text("ok".into())]);
}

// ═══════════════════════════════════════════════════════════════════════════
// Failure paths
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn runaway_scripts_hit_the_step_budget() {
    let content = vec![b'\n'; SCRIPT_STEP_LIMIT as usize + 10];
    let mut storage = MemStorage::new().file("/scripts/runaway.txt", &content);
    let mut sink = RecordingSink::default();
    let mut runner = ScriptRunner::start(&mut storage, "/scripts/runaway.txt").unwrap();

    for _ in 0..SCRIPT_STEP_LIMIT {
        assert!(runner.step(&mut storage, &mut sink).is_ok());
    }
    assert_eq!(
        runner.step(&mut storage, &mut sink),
        Err(ScriptError::StepLimit)
    );
    assert_eq!(storage.closes, 1);
}

#[test]
fn read_errors_abort_and_close_the_file() {
    let mut storage = MemStorage::new()
        .file("/scripts/flaky.txt", b"STRING a\nSTRING b\nSTRING c\n")
        .read_error_at(2);
    let mut sink = RecordingSink::default();
    let mut runner = ScriptRunner::start(&mut storage, "/scripts/flaky.txt").unwrap();

    assert!(runner.step(&mut storage, &mut sink).is_ok());
    assert_eq!(
        runner.step(&mut storage, &mut sink),
        Err(ScriptError::Source(StorageError::Read))
    );
    assert_eq!(storage.closes, 1);
    assert_eq!(sink.events, vec![SinkEvent::Text("a".into())]);
}

#[test]
fn opening_a_missing_script_fails() {
    let mut storage = MemStorage::new();
    assert_eq!(
        ScriptRunner::start(&mut storage, "/scripts/ghost.txt").err(),
        Some(ScriptError::Source(StorageError::NotFound))
    );
}
