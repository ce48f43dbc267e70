// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::TerminalError;
use std::time::Duration;

/// Width used when the terminal can't be asked for its size.
pub const DEFAULT_WIDTH: u16 = 80;

/// The handful of primitives the editor needs from a terminal. The real implementation
/// is [`crate::StdTerminal`]; tests use [`crate::MockTerminal`].
///
/// Every method is blocking except [`Terminal::poll_input`], which waits at most
/// `timeout`.
pub trait Terminal {
    /// `false` when input is piped or redirected. The editor then reads a plain line.
    fn is_interactive(&self) -> bool;

    /// `true` when the terminal is interactive but can't handle the CSI sequences used
    /// for redraw.
    fn is_unsupported(&self) -> bool { false }

    /// Disable canonical mode, echo and signal generation, saving the prior settings.
    /// Also arms the abnormal exit cleanup and the resize notification.
    ///
    /// # Errors
    ///
    /// [`TerminalError::NotATerminal`] when input is not a tty.
    fn enable_raw_mode(&mut self) -> Result<(), TerminalError>;

    /// Restore the settings saved by [`Terminal::enable_raw_mode`] and disarm the
    /// abnormal exit cleanup. No-op if raw mode isn't active.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal attributes can't be written back.
    fn disable_raw_mode(&mut self) -> Result<(), TerminalError>;

    /// Current width in columns, [`DEFAULT_WIDTH`] if it can't be queried.
    fn columns(&mut self) -> u16;

    /// Read exactly one byte.
    ///
    /// # Errors
    ///
    /// - [`TerminalError::WouldBlock`] when input is non-blocking and nothing is ready.
    /// - [`TerminalError::Eof`] at end of input.
    /// - [`TerminalError::Io`] for anything else.
    fn read_byte(&mut self) -> Result<u8, TerminalError>;

    /// Wait up to `timeout` for input to become readable. Returns `false` on timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying poll fails.
    fn poll_input(&mut self, timeout: Duration) -> Result<bool, TerminalError>;

    /// Consume the pending resize flag. Multiple resizes since the last call are
    /// coalesced into one `true`.
    fn take_resize(&mut self) -> bool;

    /// Write all of `bytes` and flush.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn write_raw(&mut self, bytes: &[u8]) -> Result<(), TerminalError>;
}

impl<T: Terminal + ?Sized> Terminal for &mut T {
    fn is_interactive(&self) -> bool { (**self).is_interactive() }

    fn is_unsupported(&self) -> bool { (**self).is_unsupported() }

    fn enable_raw_mode(&mut self) -> Result<(), TerminalError> {
        (**self).enable_raw_mode()
    }

    fn disable_raw_mode(&mut self) -> Result<(), TerminalError> {
        (**self).disable_raw_mode()
    }

    fn columns(&mut self) -> u16 { (**self).columns() }

    fn read_byte(&mut self) -> Result<u8, TerminalError> { (**self).read_byte() }

    fn poll_input(&mut self, timeout: Duration) -> Result<bool, TerminalError> {
        (**self).poll_input(timeout)
    }

    fn take_resize(&mut self) -> bool { (**self).take_resize() }

    fn write_raw(&mut self, bytes: &[u8]) -> Result<(), TerminalError> {
        (**self).write_raw(bytes)
    }
}
