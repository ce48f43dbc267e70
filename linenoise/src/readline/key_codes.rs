// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{CRLF, DEFAULT_ESCAPE_TIMEOUT, DEFAULT_WOULD_BLOCK_BACKOFF, DecodedKeys,
            KeyDecoder, KeyEvent, RawModeGuard, ReadlineError, Terminal, TerminalError};
use std::fmt::Write;

const QUIT_WORD: &[u8; 4] = b"quit";

/// Banner printed before [`print_key_codes_with`] starts echoing.
pub const KEY_CODES_BANNER: &str = "Key codes debugging mode.\r\n\
    Press keys to see the bytes they send and the keys they decode to.\r\n\
    Type 'quit' or press Ctrl-C to exit.\r\n";

/// One line of key codes output: the byte as a character (or `?`), in hex and decimal,
/// and whatever keys it completed.
#[must_use]
pub fn format_key_code_line(byte: u8, keys: &[KeyEvent]) -> String {
    let shown = if byte.is_ascii_graphic() || byte == b' ' {
        char::from(byte)
    } else {
        '?'
    };
    let mut line = format!("'{shown}' {byte:#04x} ({byte:>3})");
    if !keys.is_empty() {
        // Writing to a String can't fail.
        _ = write!(line, " -> {keys:?}");
    }
    line.push_str(CRLF);
    line
}

/// Put the terminal in raw mode and echo every byte read along with the keys it decodes
/// to, until `quit` is typed, Ctrl-C is pressed, or input ends. For finding out what a
/// terminal sends for a key.
///
/// # Errors
///
/// - [`ReadlineError::NotATerminal`] when input is not a terminal.
/// - [`ReadlineError::Io`] if a read or write fails.
pub fn print_key_codes_with<T: Terminal + ?Sized>(
    terminal: &mut T,
) -> Result<(), ReadlineError> {
    let mut terminal = RawModeGuard::new(terminal)?;
    terminal.write_raw(KEY_CODES_BANNER.as_bytes())?;
    let mut decoder = KeyDecoder::new();
    let mut last_four = [0_u8; 4];

    loop {
        if decoder.is_pending() && !terminal.poll_input(DEFAULT_ESCAPE_TIMEOUT)? {
            let keys = decoder.flush();
            terminal.write_raw(format!("(timeout) -> {keys:?}{CRLF}").as_bytes())?;
            continue;
        }

        let byte = match terminal.read_byte() {
            Ok(byte) => byte,
            Err(TerminalError::WouldBlock) => {
                terminal.poll_input(DEFAULT_WOULD_BLOCK_BACKOFF)?;
                continue;
            }
            Err(TerminalError::Eof) => break,
            Err(err) => return Err(err.into()),
        };

        let keys: DecodedKeys = decoder.advance(byte);
        terminal.write_raw(format_key_code_line(byte, &keys).as_bytes())?;

        last_four.rotate_left(1);
        last_four[3] = byte;
        if &last_four == QUIT_WORD || keys.contains(&KeyEvent::CtrlC) {
            break;
        }
    }

    tracing::debug!(message = "key codes mode ended");
    Ok(())
}

/// [`print_key_codes_with`] on the process's terminal.
///
/// # Errors
///
/// See [`print_key_codes_with`].
#[cfg(unix)]
pub fn print_key_codes() -> Result<(), ReadlineError> {
    print_key_codes_with(&mut crate::StdTerminal::default())
}
