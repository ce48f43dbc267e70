// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Lines entered earlier, for Up/Down navigation. History is process wide on purpose:
//! every editing session in a process shares the ring returned by [`global_history()`],
//! just like a shell's history. Tests and embedders that want isolation hand an
//! [`crate::Editor`] its own [`SafeHistory`].

// Attach.
pub mod global;
pub mod history_file;
pub mod history_ring;

// Re-export.
pub use global::*;
pub use history_file::*;
pub use history_ring::*;
