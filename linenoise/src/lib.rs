// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words linenoise termios SIGWINCH

//! # r3bl_linenoise
//!
//! A small line editor for ANSI terminals. It reads one line of text from the user and
//! gives them in-place editing, single or multi-line rendering, history navigation, tab
//! completion, and inline hints. It does not need a curses-like library: everything is
//! done with a handful of CSI sequences written to a terminal in raw mode.
//!
//! # Table of contents
//!
//! <!-- TOC -->
//! - [Quick start](#quick-start)
//! - [Architecture](#architecture)
//! - [Session state machine](#session-state-machine)
//! - [Non interactive input](#non-interactive-input)
//! - [Process wide history](#process-wide-history)
//! - [Testing with a mock terminal](#testing-with-a-mock-terminal)
//! <!-- /TOC -->
//!
//! # Quick start
//!
//! ```no_run
//! use r3bl_linenoise::{Editor, Hint, ReadlineEvent, history_add};
//!
//! # fn main() -> miette::Result<()> {
//! let mut editor = Editor::new();
//! editor.set_completion_provider(|partial: &str| -> miette::Result<Vec<String>> {
//!     Ok(["help", "history", "hello"]
//!         .iter()
//!         .filter(|it| it.starts_with(partial))
//!         .map(ToString::to_string)
//!         .collect())
//! });
//! editor.set_hint_provider(|line: &str| -> miette::Result<Option<Hint>> {
//!     Ok((line == "hel").then(|| Hint::new(" <topic>").with_color(35)))
//! });
//!
//! loop {
//!     match editor.read_line("> ")? {
//!         ReadlineEvent::Line(line) => {
//!             history_add(&line);
//!             println!("echo: {line}");
//!         }
//!         ReadlineEvent::Eof | ReadlineEvent::Interrupted => break,
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐ bytes ┌─────────────┐ KeyEvent ┌───────────────────┐
//! │ terminal_io  ├──────►│ key_decoder ├─────────►│ readline (Editor) │
//! └──────▲───────┘       └─────────────┘          └─┬───────┬───────┬─┘
//!        │                                          │       │       │
//!        │            ┌────────────┐   ┌────────────▼┐ ┌────▼────┐ ┌▼───────────┐
//!        └────────────┤   render   │◄──┤ line_state  │ │ history │ │ completion │
//!         one write   └────────────┘   └─────────────┘ └─────────┘ └────────────┘
//!         per refresh
//! ```
//!
//! | Module          | Responsibility                                                 |
//! |-----------------|----------------------------------------------------------------|
//! | `terminal_io`   | [`Terminal`] trait, raw mode, window size, abnormal exit hooks |
//! | `key_decoder`   | Byte at a time escape sequence decoding into [`KeyEvent`]s     |
//! | `line_state`    | [`EditState`] buffer, byte cursor, and edit primitives         |
//! | `render`        | Single and multi-line refresh, hint styling                    |
//! | `history`       | [`History`] ring, navigation, escaped file persistence         |
//! | `completion`    | Completion cycling and the provider traits                     |
//! | `readline`      | [`Editor`] session controller and key bindings                 |
//! | `ansi`          | CSI and SGR sequence generation                                |
//! | `log`           | [`tracing`] setup                                              |
//!
//! # Session state machine
//!
//! ```text
//! Init ──► RawMode ──► Editing ──┬──► Submitted ─┐
//!  │                             ├──► Cancelled ─┼──► Cleanup ──► Done
//!  │ (not a tty)                 └──► Failed ────┘
//!  └──► plain line read ──────────────────────────────────────► Done
//! ```
//!
//! `Cleanup` is a [`RawModeGuard`] being dropped, so it runs on every path out of
//! `Editing`, including early returns via `?` when a provider fails.
//!
//! # Non interactive input
//!
//! When stdin is not a terminal, [`Editor::read_line`] skips raw mode entirely and
//! reads one line verbatim (up to `\n` or end of input). When `TERM` names a terminal
//! that can't handle the CSI sequences used for redraw (`dumb`, `cons25`, `emacs`), the
//! prompt is printed and a plain line is read.
//!
//! # Process wide history
//!
//! History is shared by every editing session in the process, so it lives behind
//! [`global_history()`]. The free functions [`history_add`], [`history_set_max_len`],
//! [`history_save`], and [`history_load`] operate on it. An [`Editor`] can be given its
//! own [`SafeHistory`] instead, which is what the tests do.
//!
//! # Testing with a mock terminal
//!
//! [`Editor::read_line_with`] takes any [`Terminal`]. The [`MockTerminal`] in
//! [`test_fixtures`] plays back scripted bytes and records everything written.
//!
//! [`tracing`]: tracing

// Enforce strict error handling in production library code only. Tests and examples are
// allowed to use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules (re-exported below to provide clean public API).
pub mod ansi;
pub mod completion;
pub mod history;
pub mod key_decoder;
pub mod line_state;
pub mod log;
pub mod readline;
pub mod render;
pub mod terminal_io;
pub mod test_fixtures;

// Re-export stable public API using glob imports for ergonomic, flat API surface.
pub use ansi::*;
pub use completion::*;
pub use history::*;
pub use key_decoder::*;
pub use line_state::*;
pub use log::*;
pub use readline::*;
pub use render::*;
pub use terminal_io::*;
pub use test_fixtures::*;

/// Type alias so it is clear at the use site that this is the blocking [`std`] mutex.
pub type StdMutex<T> = std::sync::Mutex<T>;

/// Simple macro to create a [`Result`] with an [`Ok`] variant. It is just syntactic sugar
/// that helps having to write `Ok(())`.
/// - If no arg is passed in then it will return `Ok(())`.
/// - If an arg is passed in then it will return `Ok($arg)`.
#[macro_export]
macro_rules! ok {
    // No args.
    () => {
        Ok(())
    };
    // With arg.
    ($value:expr) => {
        Ok($value)
    };
}
