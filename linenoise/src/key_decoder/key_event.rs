// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// A logical key produced by [`crate::KeyDecoder`].
///
/// I/O failures are not a variant; they travel as the `Err` side of
/// [`crate::KeyReader::next_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    /// Printable character, possibly multi-byte.
    Char(char),
    /// Ctrl + lowercase letter, for the bytes `0x01..=0x1A` that have no dedicated
    /// variant.
    Ctrl(char),
    /// `ESC` followed by a printable character.
    Alt(char),
    /// `ESC` followed by `DEL` or `BS`.
    AltBackspace,
    Enter,
    Backspace,
    Delete,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    CtrlLeft,
    CtrlRight,
    Home,
    End,
    Tab,
    CtrlC,
    CtrlD,
    /// A lone `ESC` with nothing following it before the timeout.
    Escape,
    /// The terminal changed size since the last key.
    Resize,
    /// End of input.
    Eof,
}

impl KeyEvent {
    /// Map a byte in `0x01..=0x1A` to its control key. Bytes with a dedicated event win
    /// over the generic [`KeyEvent::Ctrl`].
    #[must_use]
    pub fn from_control_byte(byte: u8) -> Option<Self> {
        match byte {
            0x03 => Some(KeyEvent::CtrlC),
            0x04 => Some(KeyEvent::CtrlD),
            0x08 => Some(KeyEvent::Backspace),
            0x09 => Some(KeyEvent::Tab),
            0x0D => Some(KeyEvent::Enter),
            0x01..=0x1A => Some(KeyEvent::Ctrl(char::from(b'a' + byte - 1))),
            _ => None,
        }
    }
}
