// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The line being edited and the primitives that change it.
//!
//! | Module            | Responsibility                                          |
//! |-------------------|---------------------------------------------------------|
//! | `edit_state`      | [`EditState`] struct, prompt width, accessors           |
//! | `edit_ops`        | Insert, delete, move, kill, yank, transpose, case edits |
//! | `word_boundaries` | Grapheme and word stepping over byte offsets            |
//!
//! The cursor is a byte offset into the buffer that always sits on a grapheme boundary.
//! Every primitive returns `true` if it changed the buffer or the cursor, so the caller
//! can skip a refresh for no-ops at the ends of the line.

// Attach.
pub mod edit_ops;
pub mod edit_state;
pub mod word_boundaries;

// Re-export.
pub use edit_ops::*;
pub use edit_state::*;
pub use word_boundaries::*;
