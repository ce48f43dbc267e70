// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{KeyDecoder, KeyEvent};
use crate::{Terminal, TerminalError};
use std::{collections::VecDeque, time::Duration};

/// How long to wait for the rest of an escape sequence before treating `ESC` as a key.
pub const DEFAULT_ESCAPE_TIMEOUT: Duration = Duration::from_millis(150);

/// Pulls bytes from a [`Terminal`] and hands out one [`KeyEvent`] at a time.
///
/// [`TerminalError::WouldBlock`] is returned to the caller untouched, with the decoder
/// state kept, so the caller can poll and call [`KeyReader::next_key`] again.
#[derive(Debug)]
pub struct KeyReader {
    decoder: KeyDecoder,
    ready: VecDeque<KeyEvent>,
    escape_timeout: Duration,
}

impl Default for KeyReader {
    fn default() -> Self { Self::new(DEFAULT_ESCAPE_TIMEOUT) }
}

impl KeyReader {
    #[must_use]
    pub fn new(escape_timeout: Duration) -> Self {
        Self {
            decoder: KeyDecoder::new(),
            ready: VecDeque::new(),
            escape_timeout,
        }
    }

    /// Blocks until a key is decoded. A pending resize is reported before any more input
    /// is read. End of input flushes any partial sequence first and then yields
    /// [`KeyEvent::Eof`].
    ///
    /// # Errors
    ///
    /// - [`TerminalError::WouldBlock`] when the terminal is non-blocking and has no data.
    /// - [`TerminalError::Io`] on read or poll failure.
    pub fn next_key<T: Terminal + ?Sized>(
        &mut self,
        terminal: &mut T,
    ) -> Result<KeyEvent, TerminalError> {
        loop {
            if let Some(event) = self.ready.pop_front() {
                return Ok(event);
            }

            if terminal.take_resize() {
                return Ok(KeyEvent::Resize);
            }

            if self.decoder.is_pending() && !terminal.poll_input(self.escape_timeout)? {
                self.ready.extend(self.decoder.flush());
                continue;
            }

            match terminal.read_byte() {
                Ok(byte) => self.ready.extend(self.decoder.advance(byte)),
                Err(TerminalError::Eof) => {
                    self.ready.extend(self.decoder.flush());
                    self.ready.push_back(KeyEvent::Eof);
                }
                Err(err) => return Err(err),
            }
        }
    }
}
