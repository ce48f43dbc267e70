// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod decoder;
pub mod key_event;
pub mod key_reader;

// Re-export.
pub use decoder::*;
pub use key_event::*;
pub use key_reader::*;
