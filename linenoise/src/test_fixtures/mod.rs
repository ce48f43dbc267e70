// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Fixtures for driving an [`crate::Editor`] without a real terminal. Public so the
//! integration tests and downstream crates can use them too.

// Attach sources.
pub mod mock_terminal;

// Re-export.
pub use mock_terminal::*;
