// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ReadlineError, ReadlineEvent, Terminal, TerminalError};
use std::time::Duration;

/// Read one line with no editing, for input that is not a terminal or a terminal that
/// can't be redrawn.
///
/// Reads up to `\n` or end of input and drops a trailing `\r`. Invalid UTF-8 is replaced
/// rather than rejected. Returns [`ReadlineEvent::Eof`] only when input ends before any
/// byte arrives.
///
/// # Errors
///
/// - [`ReadlineError::Io`] if a read fails.
/// - [`ReadlineError::OutOfMemory`] if the line can't be buffered.
pub fn read_plain_line<T: Terminal + ?Sized>(
    terminal: &mut T,
    would_block_backoff: Duration,
) -> Result<ReadlineEvent, ReadlineError> {
    let mut bytes: Vec<u8> = Vec::new();
    loop {
        match terminal.read_byte() {
            Ok(b'\n') => break,
            Ok(byte) => {
                bytes.try_reserve(1).map_err(|_| ReadlineError::OutOfMemory)?;
                bytes.push(byte);
            }
            Err(TerminalError::WouldBlock) => {
                terminal.poll_input(would_block_backoff)?;
            }
            Err(TerminalError::Eof) if bytes.is_empty() => return Ok(ReadlineEvent::Eof),
            Err(TerminalError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    if bytes.last() == Some(&b'\r') {
        bytes.pop();
    }
    tracing::trace!(message = "plain line read", len = bytes.len());
    Ok(ReadlineEvent::Line(String::from_utf8_lossy(&bytes).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MockTerminal, ScriptItem};
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    const BACKOFF: Duration = Duration::from_millis(1);

    #[test_case(b"hello\nworld\n", "hello" ; "stops at newline")]
    #[test_case(b"crlf\r\n", "crlf" ; "drops carriage return")]
    #[test_case(b"no newline", "no newline" ; "eof ends the line")]
    #[test_case(b"\n", "" ; "empty line")]
    #[test_case(b"\x1b[A raw\n", "\x1b[A raw" ; "escape bytes are kept")]
    fn test_read_plain_line(input: &[u8], expected: &str) {
        let mut terminal = MockTerminal::new(input).non_interactive();
        let event = read_plain_line(&mut terminal, BACKOFF).unwrap();
        assert_eq!(event, ReadlineEvent::Line(expected.to_owned()));
    }

    #[test]
    fn test_eof_with_nothing_read() {
        let mut terminal = MockTerminal::new(b"").non_interactive();
        let event = read_plain_line(&mut terminal, BACKOFF).unwrap();
        assert_eq!(event, ReadlineEvent::Eof);
    }

    #[test]
    fn test_second_read_gets_the_next_line() {
        let mut terminal = MockTerminal::new(b"one\ntwo\n").non_interactive();
        read_plain_line(&mut terminal, BACKOFF).unwrap();
        let event = read_plain_line(&mut terminal, BACKOFF).unwrap();
        assert_eq!(event, ReadlineEvent::Line("two".to_owned()));
    }

    #[test]
    fn test_would_block_is_retried() {
        let mut terminal = MockTerminal::from_script(vec![
            ScriptItem::Byte(b'o'),
            ScriptItem::WouldBlock,
            ScriptItem::Byte(b'k'),
            ScriptItem::Byte(b'\n'),
        ])
        .non_interactive();
        let event = read_plain_line(&mut terminal, BACKOFF).unwrap();
        assert_eq!(event, ReadlineEvent::Line("ok".to_owned()));
    }

    #[test]
    fn test_io_error_is_reported() {
        let mut terminal =
            MockTerminal::from_script(vec![ScriptItem::Byte(b'x'), ScriptItem::IoError])
                .non_interactive();
        let result = read_plain_line(&mut terminal, BACKOFF);
        assert!(matches!(result, Err(ReadlineError::Io(_))));
    }
}
