// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Turn an [`crate::EditState`] into the bytes that repaint it. Functions here only
//! build strings; the caller writes each one with a single
//! [`crate::Terminal::write_raw`] so a refresh never shows up half drawn.

// Attach.
pub mod glyphs;
pub mod hint_render;
pub mod refresh;

// Re-export.
pub use glyphs::*;
pub use hint_render::*;
pub use refresh::*;
