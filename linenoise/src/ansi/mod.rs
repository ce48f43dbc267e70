// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The small subset of ANSI output sequences needed to redraw an input line. No other
//! terminal features are emitted.

// Attach.
pub mod constants;
pub mod csi_sequence;
pub mod sgr_sequence;

// Re-export.
pub use constants::*;
pub use csi_sequence::*;
pub use sgr_sequence::*;
