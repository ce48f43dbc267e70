// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{Terminal, TerminalError};
use std::ops::{Deref, DerefMut};

/// RAII guard that holds a terminal in raw mode. Dropping it restores the terminal, so
/// every way out of an editing session (including `?` on a provider error) runs the
/// restore exactly once.
///
/// ```no_run
/// # use r3bl_linenoise::{RawModeGuard, StdTerminal, Terminal};
/// # fn main() -> Result<(), r3bl_linenoise::TerminalError> {
/// let mut terminal = StdTerminal::default();
/// {
///     let mut guard = RawModeGuard::new(&mut terminal)?;
///     guard.write_raw(b"raw\r\n")?;
/// } // Raw mode is disabled here.
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RawModeGuard<'a, T: Terminal + ?Sized> {
    terminal: &'a mut T,
}

impl<'a, T: Terminal + ?Sized> RawModeGuard<'a, T> {
    /// Enables raw mode and returns the guard.
    ///
    /// # Errors
    ///
    /// Propagates the error from [`Terminal::enable_raw_mode`]. No guard is created, so
    /// nothing is restored.
    pub fn new(terminal: &'a mut T) -> Result<Self, TerminalError> {
        terminal.enable_raw_mode()?;
        tracing::debug!(message = "raw mode enabled");
        Ok(Self { terminal })
    }
}

impl<T: Terminal + ?Sized> Deref for RawModeGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target { self.terminal }
}

impl<T: Terminal + ?Sized> DerefMut for RawModeGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target { self.terminal }
}

impl<T: Terminal + ?Sized> Drop for RawModeGuard<'_, T> {
    fn drop(&mut self) {
        if let Err(err) = self.terminal.disable_raw_mode() {
            tracing::warn!(message = "failed to restore terminal mode", error = %err);
        } else {
            tracing::debug!(message = "raw mode disabled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockTerminal;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_guard_restores_on_drop() {
        let mut terminal = MockTerminal::new(b"");
        {
            let _guard = RawModeGuard::new(&mut terminal).unwrap();
        }
        assert_eq!(terminal.enable_raw_mode_calls(), 1);
        assert_eq!(terminal.disable_raw_mode_calls(), 1);
    }

    #[test]
    fn test_guard_restores_on_early_return() {
        fn fails(terminal: &mut MockTerminal) -> Result<(), TerminalError> {
            let mut guard = RawModeGuard::new(terminal)?;
            guard.write_raw(b"x")?;
            Err(TerminalError::Eof)
        }

        let mut terminal = MockTerminal::new(b"");
        assert!(fails(&mut terminal).is_err());
        assert_eq!(terminal.disable_raw_mode_calls(), 1);
    }

    #[test]
    fn test_not_a_terminal_creates_no_guard() {
        let mut terminal = MockTerminal::new(b"").non_interactive();
        assert!(matches!(
            RawModeGuard::new(&mut terminal),
            Err(TerminalError::NotATerminal)
        ));
        assert_eq!(terminal.disable_raw_mode_calls(), 0);
    }
}
