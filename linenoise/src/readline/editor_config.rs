// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::DEFAULT_ESCAPE_TIMEOUT;
use std::time::Duration;

/// How long to wait for input before retrying a read that reported
/// [`crate::TerminalError::WouldBlock`].
pub const DEFAULT_WOULD_BLOCK_BACKOFF: Duration = Duration::from_millis(50);

/// Per [`crate::Editor`] settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Wrap long lines over several rows instead of scrolling one row sideways.
    pub multi_line: bool,
    /// Draw every character as `*`, for passwords. Hints are not shown.
    pub mask_mode: bool,
    /// How long a lone `ESC` waits for the rest of an escape sequence.
    pub escape_timeout: Duration,
    /// Poll interval while a non-blocking input has nothing to read.
    pub would_block_backoff: Duration,
    /// Ring the bell when Tab finds no candidates.
    pub beep_on_no_completion: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            multi_line: false,
            mask_mode: false,
            escape_timeout: DEFAULT_ESCAPE_TIMEOUT,
            would_block_backoff: DEFAULT_WOULD_BLOCK_BACKOFF,
            beep_on_no_completion: true,
        }
    }
}
