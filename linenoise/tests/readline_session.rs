// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Complete editing sessions driven through the public API with a scripted terminal.

use pretty_assertions::assert_eq;
use r3bl_linenoise::{Editor, EditorConfig, Hint, History, MockTerminal, PrefixCompleter,
                     ReadlineError, ReadlineEvent, ScriptItem, SafeHistory, lock_history,
                     rows_needed};
use std::{sync::{Arc, atomic::{AtomicUsize, Ordering}},
          time::Duration};

fn quick_config() -> EditorConfig {
    EditorConfig {
        escape_timeout: Duration::from_millis(1),
        would_block_backoff: Duration::from_millis(1),
        ..EditorConfig::default()
    }
}

fn editor_with(history: SafeHistory) -> Editor {
    Editor::with_config(quick_config()).with_history(history)
}

fn read(editor: &mut Editor, input: &[u8]) -> (ReadlineEvent, MockTerminal) {
    let mut terminal = MockTerminal::new(input);
    let event = editor.read_line_with(&mut terminal, "> ").unwrap();
    (event, terminal)
}

#[test]
fn test_hint_is_shown_but_not_returned() {
    let mut editor = editor_with(History::new_safe());
    editor.set_hint_provider(|line: &str| -> miette::Result<Option<Hint>> {
        Ok((line == "ab").then(|| Hint::new("cd").with_color(35)))
    });

    let (event, terminal) = read(&mut editor, b"ab\r");

    assert_eq!(event, ReadlineEvent::Line("ab".to_owned()));
    assert!(terminal.output().contains("\x1b[0;35;49mcd\x1b[0m"));
    assert!(lock_history(&editor.history()).is_empty());
}

#[test]
fn test_completion_cycles_and_wraps_to_original() {
    let mut editor = editor_with(History::new_safe());
    editor.set_completion_provider(PrefixCompleter::new(["foo", "foobar", "foobaz"]));

    let shown: Vec<String> = (1..=4)
        .map(|tabs| {
            let mut input = vec![b'\t'; tabs];
            input.push(b'\r');
            let (event, _) = read(&mut editor, &input);
            match event {
                ReadlineEvent::Line(line) => line,
                other => panic!("unexpected {other:?}"),
            }
        })
        .collect();

    assert_eq!(shown, vec!["foo", "foobar", "foobaz", ""]);
}

#[test]
fn test_completion_keeps_text_after_cursor() {
    let mut editor = editor_with(History::new_safe());
    editor.set_completion_provider(PrefixCompleter::new(["status"]));

    // "st --all", then Ctrl-A and 2 x Ctrl-F to put the cursor after "st".
    let (event, _) = read(&mut editor, b"st --all\x01\x06\x06\t\r");
    assert_eq!(event, ReadlineEvent::Line("status --all".to_owned()));
}

#[test]
fn test_provider_failure_restores_raw_mode_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut editor = editor_with(History::new_safe());
    {
        let calls = calls.clone();
        editor.set_hint_provider(move |_: &str| -> miette::Result<Option<Hint>> {
            // Fail on the second repaint, mid-session.
            if calls.fetch_add(1, Ordering::SeqCst) == 1 {
                miette::bail!("hint backend is down");
            }
            Ok(None)
        });
    }

    let mut terminal = MockTerminal::new(b"abc\r");
    let result = editor.read_line_with(&mut terminal, "> ");

    let Err(ReadlineError::Provider(report)) = result else {
        panic!("expected a provider error");
    };
    assert!(report.to_string().contains("hint backend is down"));
    assert_eq!(terminal.enable_raw_mode_calls(), 1);
    assert_eq!(terminal.disable_raw_mode_calls(), 1);
    assert!(!terminal.is_raw_mode());
}

#[test]
fn test_completion_provider_failure_restores_raw_mode() {
    let mut editor = editor_with(History::new_safe());
    editor.set_completion_provider(|_: &str| -> miette::Result<Vec<String>> {
        Err(miette::miette!("no candidates today"))
    });

    let mut terminal = MockTerminal::new(b"x\t\r");
    let result = editor.read_line_with(&mut terminal, "> ");

    assert!(matches!(result, Err(ReadlineError::Provider(_))));
    assert_eq!(terminal.disable_raw_mode_calls(), 1);
}

#[test]
fn test_non_interactive_input_reads_plain_lines() {
    let mut editor = editor_with(History::new_safe());
    let mut terminal = MockTerminal::new(b"first\r\nsecond\n").non_interactive();

    let mut lines = vec![];
    loop {
        match editor.read_line_with(&mut terminal, "> ").unwrap() {
            ReadlineEvent::Line(line) => lines.push(line),
            ReadlineEvent::Eof => break,
            ReadlineEvent::Interrupted => unreachable!(),
        }
    }

    assert_eq!(lines, vec!["first", "second"]);
    assert_eq!(terminal.enable_raw_mode_calls(), 0);
    assert_eq!(terminal.output(), "");
}

#[test]
fn test_ctrl_c_and_ctrl_d() {
    let mut editor = editor_with(History::new_safe());

    let (event, _) = read(&mut editor, b"half typed\x03");
    assert_eq!(event, ReadlineEvent::Interrupted);

    let (event, _) = read(&mut editor, b"\x04");
    assert_eq!(event, ReadlineEvent::Eof);
}

#[test]
fn test_history_navigation_with_arrows() {
    let history = History::new_safe();
    let mut editor = editor_with(history.clone());

    for line in ["ls", "cd /tmp", "make"] {
        let (event, _) = read(&mut editor, format!("{line}\r").as_bytes());
        if let ReadlineEvent::Line(line) = event {
            lock_history(&history).add(&line);
        }
    }
    assert_eq!(lock_history(&history).len(), 3);

    // Up, Up, Enter.
    let (event, _) = read(&mut editor, b"\x1b[A\x1b[A\r");
    assert_eq!(event, ReadlineEvent::Line("cd /tmp".to_owned()));

    // Typed text survives a trip into history and back.
    let (event, _) = read(&mut editor, b"dra\x1b[A\x1b[Bft\r");
    assert_eq!(event, ReadlineEvent::Line("draft".to_owned()));

    // Editing a recalled entry doesn't change the stored one.
    let (event, _) = read(&mut editor, b"\x1b[A!\r");
    assert_eq!(event, ReadlineEvent::Line("make!".to_owned()));
    assert_eq!(lock_history(&history).get(2), Some("make"));
}

#[test]
fn test_multi_line_wraps_long_input() {
    let mut editor = editor_with(History::new_safe());
    editor.set_multi_line(true);

    let input: Vec<u8> = std::iter::repeat_n(b'x', 77).chain([b'\r']).collect();
    let mut terminal = MockTerminal::new(&input).with_columns(40);
    let event = editor.read_line_with(&mut terminal, "> ").unwrap();

    assert_eq!(event, ReadlineEvent::Line("x".repeat(77)));
    assert_eq!(rows_needed(2, 77, 40), 2);
    // Once the line spans two rows, each repaint clears the lower row and moves up.
    assert!(terminal.output().contains("\x1b[1A"));
}

#[test]
fn test_script_with_resize_and_would_block() {
    let mut editor = editor_with(History::new_safe());
    let mut terminal = MockTerminal::from_script(vec![
        ScriptItem::Byte(b'h'),
        ScriptItem::WouldBlock,
        ScriptItem::Resize { columns: 12 },
        ScriptItem::Byte(b'i'),
        ScriptItem::Byte(b'\r'),
    ]);

    let event = editor.read_line_with(&mut terminal, "> ").unwrap();
    assert_eq!(event, ReadlineEvent::Line("hi".to_owned()));
}
