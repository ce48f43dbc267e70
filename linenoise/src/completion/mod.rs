// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Tab completion and inline hints. Both are driven by host supplied providers that the
//! editor calls synchronously: the completion provider on Tab, the hint provider on
//! every repaint.

// Attach.
pub mod completion_state;
pub mod hint;
pub mod providers;

// Re-export.
pub use completion_state::*;
pub use hint::*;
pub use providers::*;
