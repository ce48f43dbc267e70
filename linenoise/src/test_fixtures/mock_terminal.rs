// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DEFAULT_WIDTH, Terminal, TerminalError};
use std::{collections::VecDeque, io, time::Duration};

/// One step of scripted input for a [`MockTerminal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptItem {
    Byte(u8),
    /// The next read reports [`TerminalError::WouldBlock`]. A poll that reaches it
    /// consumes it and times out instead.
    WouldBlock,
    /// The terminal is resized to `columns` before the next read.
    Resize { columns: u16 },
    /// The next read fails with [`TerminalError::Io`].
    IoError,
}

/// [`Terminal`] that plays back a script of input and records everything written to
/// it. Reads past the end of the script report [`TerminalError::Eof`]. Polls never
/// wait.
#[derive(Debug, Clone)]
pub struct MockTerminal {
    script: VecDeque<ScriptItem>,
    output: Vec<u8>,
    columns: u16,
    interactive: bool,
    unsupported: bool,
    refuse_raw_mode: bool,
    raw_mode: bool,
    enable_raw_mode_calls: usize,
    disable_raw_mode_calls: usize,
}

impl MockTerminal {
    /// Interactive, 80 columns wide, with `input` as the bytes to read.
    #[must_use]
    pub fn new(input: &[u8]) -> Self {
        Self::from_script(input.iter().copied().map(ScriptItem::Byte).collect())
    }

    #[must_use]
    pub fn from_script(script: Vec<ScriptItem>) -> Self {
        Self {
            script: script.into(),
            output: Vec::new(),
            columns: DEFAULT_WIDTH,
            interactive: true,
            unsupported: false,
            refuse_raw_mode: false,
            raw_mode: false,
            enable_raw_mode_calls: 0,
            disable_raw_mode_calls: 0,
        }
    }

    /// Behave like a pipe.
    #[must_use]
    pub fn non_interactive(mut self) -> Self {
        self.interactive = false;
        self
    }

    /// Behave like a `TERM=dumb` terminal.
    #[must_use]
    pub fn unsupported(mut self) -> Self {
        self.unsupported = true;
        self
    }

    /// Claim to be interactive but fail to enter raw mode with
    /// [`TerminalError::NotATerminal`], like a tty that goes away between the check and
    /// the `tcsetattr`.
    #[must_use]
    pub fn raw_mode_refused(mut self) -> Self {
        self.refuse_raw_mode = true;
        self
    }

    #[must_use]
    pub fn with_columns(mut self, columns: u16) -> Self {
        self.columns = columns;
        self
    }

    /// Everything written so far, lossily decoded.
    #[must_use]
    pub fn output(&self) -> String { String::from_utf8_lossy(&self.output).into_owned() }

    /// [`MockTerminal::output`] with escape sequences removed.
    #[must_use]
    pub fn output_stripped(&self) -> String {
        strip_ansi_escapes::strip_str(self.output())
    }

    pub fn clear_output(&mut self) { self.output.clear(); }

    #[must_use]
    pub fn enable_raw_mode_calls(&self) -> usize { self.enable_raw_mode_calls }

    /// Only calls that actually left raw mode are counted.
    #[must_use]
    pub fn disable_raw_mode_calls(&self) -> usize { self.disable_raw_mode_calls }

    #[must_use]
    pub fn is_raw_mode(&self) -> bool { self.raw_mode }

    /// Script items not read yet.
    #[must_use]
    pub fn remaining(&self) -> usize { self.script.len() }
}

impl Terminal for MockTerminal {
    fn is_interactive(&self) -> bool { self.interactive }

    fn is_unsupported(&self) -> bool { self.unsupported }

    fn enable_raw_mode(&mut self) -> Result<(), TerminalError> {
        if !self.interactive || self.refuse_raw_mode {
            return Err(TerminalError::NotATerminal);
        }
        self.enable_raw_mode_calls += 1;
        self.raw_mode = true;
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<(), TerminalError> {
        if self.raw_mode {
            self.disable_raw_mode_calls += 1;
            self.raw_mode = false;
        }
        Ok(())
    }

    fn columns(&mut self) -> u16 { self.columns }

    fn read_byte(&mut self) -> Result<u8, TerminalError> {
        loop {
            match self.script.pop_front() {
                None => return Err(TerminalError::Eof),
                Some(ScriptItem::Byte(byte)) => return Ok(byte),
                Some(ScriptItem::WouldBlock) => return Err(TerminalError::WouldBlock),
                Some(ScriptItem::IoError) => {
                    return Err(TerminalError::Io(io::Error::other("scripted failure")));
                }
                Some(ScriptItem::Resize { columns }) => self.columns = columns,
            }
        }
    }

    fn poll_input(&mut self, _timeout: Duration) -> Result<bool, TerminalError> {
        match self.script.front() {
            None => Ok(false),
            Some(ScriptItem::WouldBlock) => {
                self.script.pop_front();
                Ok(false)
            }
            Some(_) => Ok(true),
        }
    }

    fn take_resize(&mut self) -> bool {
        if let Some(ScriptItem::Resize { columns }) = self.script.front().copied() {
            self.script.pop_front();
            self.columns = columns;
            return true;
        }
        false
    }

    fn write_raw(&mut self, bytes: &[u8]) -> Result<(), TerminalError> {
        self.output.extend_from_slice(bytes);
        Ok(())
    }
}
