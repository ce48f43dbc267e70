// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::TerminalError;
use std::io;

/// Error returned from [`crate::Editor::read_line`] and the history operations. Raw
/// mode has always been restored by the time one of these reaches the caller.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ReadlineError {
    /// Input is not interactive. [`crate::Editor::read_line`] handles this itself by
    /// reading a plain line, so callers only see it from lower level APIs.
    #[error("input is not an interactive terminal")]
    NotATerminal,

    /// Input is non-blocking and nothing was ready. Retry later.
    #[error("no input is ready on a non-blocking descriptor")]
    WouldBlock,

    /// An internal I/O error occurred.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A configuration value was rejected before it took effect.
    #[error("invalid {what}: {value}")]
    #[diagnostic(code(r3bl_linenoise::invalid_argument))]
    InvalidArgument { what: &'static str, value: String },

    /// The line buffer or a completion candidate couldn't be allocated.
    #[error("out of memory while growing the line buffer")]
    OutOfMemory,

    /// A completion or hint provider returned an error.
    #[error("provider failed: {0}")]
    #[diagnostic(code(r3bl_linenoise::provider))]
    Provider(miette::Report),
}

impl From<TerminalError> for ReadlineError {
    fn from(error: TerminalError) -> Self {
        match error {
            TerminalError::NotATerminal => ReadlineError::NotATerminal,
            TerminalError::WouldBlock => ReadlineError::WouldBlock,
            TerminalError::Eof => {
                ReadlineError::Io(io::Error::from(io::ErrorKind::UnexpectedEof))
            }
            TerminalError::Io(err) => ReadlineError::Io(err),
        }
    }
}

/// Events emitted by [`crate::Editor::read_line`].
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ReadlineEvent {
    /// The user entered a line of text.
    Line(String),

    /// The user pressed `Ctrl+D` on an empty line, or input ended with nothing typed.
    Eof,

    /// The user pressed `Ctrl+C`.
    Interrupted,
}

impl ReadlineEvent {
    /// Variant name without the line, for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ReadlineEvent::Line(_) => "line",
            ReadlineEvent::Eof => "eof",
            ReadlineEvent::Interrupted => "interrupted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_terminal_error() {
        assert!(matches!(
            ReadlineError::from(TerminalError::WouldBlock),
            ReadlineError::WouldBlock
        ));
        assert!(matches!(
            ReadlineError::from(TerminalError::NotATerminal),
            ReadlineError::NotATerminal
        ));
        assert!(matches!(
            ReadlineError::from(TerminalError::Io(io::Error::other("boom"))),
            ReadlineError::Io(_)
        ));
    }

    #[test]
    fn test_display() {
        let err = ReadlineError::InvalidArgument {
            what: "history max length",
            value: "0".into(),
        };
        assert_eq!(err.to_string(), "invalid history max length: 0");
        let err = ReadlineError::Provider(miette::miette!("no network"));
        assert_eq!(err.to_string(), "provider failed: no network");
    }
}
