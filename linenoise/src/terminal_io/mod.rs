// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Everything that touches the real terminal lives behind the [`Terminal`] trait, so the
//! rest of the crate can be driven by a scripted terminal in tests.

// Attach.
pub mod raw_mode_guard;
pub mod terminal;
pub mod terminal_error;
#[cfg(unix)]
pub mod raw_mode_unix;
#[cfg(unix)]
pub mod std_terminal;

// Re-export.
pub use raw_mode_guard::*;
pub use terminal::*;
pub use terminal_error::*;
#[cfg(unix)]
pub use raw_mode_unix::*;
#[cfg(unix)]
pub use std_terminal::*;
