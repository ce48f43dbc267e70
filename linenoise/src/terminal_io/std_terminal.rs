// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{DEFAULT_WIDTH, Terminal, TerminalError, raw_mode_unix};
use rustix::{event::{PollFd, PollFlags, Timespec},
             termios};
use signal_hook::{SigId, consts::SIGWINCH};
use std::{io::Write,
          sync::{Arc,
                 atomic::{AtomicBool, Ordering}},
          time::Duration};

/// `TERM` values that can't handle the CSI sequences used for redraw.
pub const UNSUPPORTED_TERMS: [&str; 3] = ["dumb", "cons25", "emacs"];

/// The process's stdin and stdout.
///
/// Window size changes are delivered by a `SIGWINCH` handler that sets a flag, which
/// [`Terminal::take_resize`] consumes. The handler is only installed while raw mode is
/// on.
#[derive(Debug, Default)]
pub struct StdTerminal {
    resize_pending: Arc<AtomicBool>,
    resize_sig_id: Option<SigId>,
}

/// `true` if the `TERM` environment variable names one of [`UNSUPPORTED_TERMS`].
#[must_use]
pub fn is_unsupported_term(term: Option<&str>) -> bool {
    term.is_some_and(|term| {
        UNSUPPORTED_TERMS
            .iter()
            .any(|it| it.eq_ignore_ascii_case(term))
    })
}

impl Terminal for StdTerminal {
    fn is_interactive(&self) -> bool { termios::isatty(std::io::stdin()) }

    fn is_unsupported(&self) -> bool {
        is_unsupported_term(std::env::var("TERM").ok().as_deref())
    }

    fn enable_raw_mode(&mut self) -> Result<(), TerminalError> {
        raw_mode_unix::enable_raw_mode()?;
        if self.resize_sig_id.is_none() {
            match signal_hook::flag::register(SIGWINCH, self.resize_pending.clone()) {
                Ok(id) => self.resize_sig_id = Some(id),
                // Editing still works without resize notifications.
                Err(err) => {
                    tracing::warn!(message = "SIGWINCH handler not installed", error = %err);
                }
            }
        }
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<(), TerminalError> {
        if let Some(id) = self.resize_sig_id.take() {
            signal_hook::low_level::unregister(id);
        }
        raw_mode_unix::disable_raw_mode()
    }

    fn columns(&mut self) -> u16 {
        match termios::tcgetwinsize(std::io::stdout()) {
            Ok(winsize) if winsize.ws_col > 0 => winsize.ws_col,
            _ => DEFAULT_WIDTH,
        }
    }

    fn read_byte(&mut self) -> Result<u8, TerminalError> {
        let mut buf = [0_u8; 1];
        loop {
            match rustix::io::read(std::io::stdin(), &mut buf[..]) {
                Ok(0) => return Err(TerminalError::Eof),
                Ok(_) => return Ok(buf[0]),
                Err(rustix::io::Errno::INTR) => {}
                Err(errno) => return Err(errno.into()),
            }
        }
    }

    fn poll_input(&mut self, timeout: Duration) -> Result<bool, TerminalError> {
        let stdin = std::io::stdin();
        let mut fds = [PollFd::new(&stdin, PollFlags::IN)];
        let timeout = Timespec {
            tv_sec: timeout.as_secs().try_into().unwrap_or(i64::MAX),
            tv_nsec: timeout.subsec_nanos().into(),
        };
        loop {
            match rustix::event::poll(&mut fds, Some(&timeout)) {
                Ok(ready) => return Ok(ready > 0),
                Err(rustix::io::Errno::INTR) => {}
                Err(errno) => return Err(errno.into()),
            }
        }
    }

    fn take_resize(&mut self) -> bool { self.resize_pending.swap(false, Ordering::AcqRel) }

    fn write_raw(&mut self, bytes: &[u8]) -> Result<(), TerminalError> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(bytes)?;
        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Some("dumb"), true)]
    #[test_case(Some("DUMB"), true)]
    #[test_case(Some("cons25"), true)]
    #[test_case(Some("emacs"), true)]
    #[test_case(Some("xterm-256color"), false)]
    #[test_case(None, false)]
    fn test_is_unsupported_term(term: Option<&str>, expected: bool) {
        assert_eq!(is_unsupported_term(term), expected);
    }

    #[test]
    fn test_columns_never_zero() {
        let mut terminal = StdTerminal::default();
        assert!(terminal.columns() > 0);
    }

    #[test]
    fn test_take_resize_coalesces() {
        let mut terminal = StdTerminal::default();
        terminal.resize_pending.store(true, Ordering::Release);
        terminal.resize_pending.store(true, Ordering::Release);
        assert!(terminal.take_resize());
        assert!(!terminal.take_resize());
    }
}
