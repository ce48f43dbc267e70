// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The session controller. [`Editor::read_line`] wires the other modules together:
//!
//! ```text
//! Init ─► RawMode ─► Editing ─┬─► Submitted ─┐
//!  │                          ├─► Cancelled ─┼─► Cleanup ─► Done
//!  │ not a tty                └─► Failed ────┘
//!  └─► plain line read ─────────────────────────────────► Done
//! ```
//!
//! | Module           | Responsibility                                          |
//! |------------------|---------------------------------------------------------|
//! | `editor`         | [`Editor`], the session loop, completion and hints      |
//! | `editor_config`  | [`EditorConfig`]                                        |
//! | `key_bindings`   | [`EditCommand`] and the [`KeyBindings`] table           |
//! | `event_handlers` | Apply an [`EditCommand`] to the line, history, clipboard|
//! | `fallback`       | Plain line read for pipes and dumb terminals            |
//! | `key_codes`      | [`print_key_codes`] diagnostic loop                     |
//! | `readline_error` | [`ReadlineError`], [`ReadlineEvent`]                    |

// Attach.
pub mod editor;
pub mod editor_config;
pub mod event_handlers;
pub mod fallback;
pub mod key_bindings;
pub mod key_codes;
pub mod readline_error;

// Re-export.
pub use editor::*;
pub use editor_config::*;
pub use event_handlers::*;
pub use fallback::*;
pub use key_bindings::*;
pub use key_codes::*;
pub use readline_error::*;
