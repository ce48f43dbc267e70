// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Failures reported by a [`crate::Terminal`]. [`TerminalError::WouldBlock`] and
/// [`TerminalError::Eof`] are not really failures; the session controller turns them into
/// a retry and an end of input respectively.
#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    #[error("input is not an interactive terminal")]
    NotATerminal,

    #[error("no input is ready on a non-blocking descriptor")]
    WouldBlock,

    #[error("end of input")]
    Eof,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<rustix::io::Errno> for TerminalError {
    fn from(errno: rustix::io::Errno) -> Self {
        if errno == rustix::io::Errno::AGAIN || errno == rustix::io::Errno::WOULDBLOCK {
            TerminalError::WouldBlock
        } else if errno == rustix::io::Errno::NOTTY {
            TerminalError::NotATerminal
        } else {
            TerminalError::Io(errno.into())
        }
    }
}
