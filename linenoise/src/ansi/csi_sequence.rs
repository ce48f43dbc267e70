// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{CSI_PARAM_SEPARATOR, CSI_START, CUD_CURSOR_DOWN, CUF_CURSOR_FORWARD,
            CUP_CURSOR_POSITION, CUU_CURSOR_UP, ED_ERASE_DISPLAY, EL_ERASE_LINE};
use std::fmt::{Display, Formatter, Result};

/// Parameter for [`CsiSequence::EraseLine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseLineMode {
    /// `EL 0`.
    FromCursorToEnd,
}

/// Parameter for [`CsiSequence::EraseDisplay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseDisplayMode {
    /// `ED 2`.
    EntireScreen,
}

/// CSI sequences used by the renderer. Movement counts are passed through as is; a
/// count of `0` is treated as `1` by terminals, so callers must not emit a movement when
/// they mean "don't move".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsiSequence {
    /// Cursor Up (CUU) - ESC [ n A
    CursorUp(u16),
    /// Cursor Down (CUD) - ESC [ n B
    CursorDown(u16),
    /// Cursor Forward (CUF) - ESC [ n C
    CursorForward(u16),
    /// Cursor Position (CUP) - ESC [ row ; col H, 1-based.
    CursorPosition { row: u16, col: u16 },
    /// Erase Line (EL) - ESC [ n K
    EraseLine(EraseLineMode),
    /// Erase Display (ED) - ESC [ n J
    EraseDisplay(EraseDisplayMode),
}

impl CsiSequence {
    /// Cursor movement that is skipped entirely when `n` is `0`. Saturates at
    /// [`u16::MAX`], which is far beyond any real terminal size.
    #[must_use]
    pub fn cursor_up(n: usize) -> Option<Self> {
        nonzero_u16(n).map(CsiSequence::CursorUp)
    }

    #[must_use]
    pub fn cursor_down(n: usize) -> Option<Self> {
        nonzero_u16(n).map(CsiSequence::CursorDown)
    }

    #[must_use]
    pub fn cursor_forward(n: usize) -> Option<Self> {
        nonzero_u16(n).map(CsiSequence::CursorForward)
    }
}

fn nonzero_u16(n: usize) -> Option<u16> {
    (n > 0).then(|| u16::try_from(n).unwrap_or(u16::MAX))
}

impl Display for CsiSequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(CSI_START)?;
        match self {
            CsiSequence::CursorUp(n) => write!(f, "{n}{CUU_CURSOR_UP}"),
            CsiSequence::CursorDown(n) => write!(f, "{n}{CUD_CURSOR_DOWN}"),
            CsiSequence::CursorForward(n) => write!(f, "{n}{CUF_CURSOR_FORWARD}"),
            CsiSequence::CursorPosition { row, col } => {
                write!(f, "{row}{CSI_PARAM_SEPARATOR}{col}{CUP_CURSOR_POSITION}")
            }
            CsiSequence::EraseLine(mode) => {
                let n = match mode {
                    EraseLineMode::FromCursorToEnd => 0,
                };
                write!(f, "{n}{EL_ERASE_LINE}")
            }
            CsiSequence::EraseDisplay(mode) => {
                let n = match mode {
                    EraseDisplayMode::EntireScreen => 2,
                };
                write!(f, "{n}{ED_ERASE_DISPLAY}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(CsiSequence::CursorUp(3), "\x1b[3A")]
    #[test_case(CsiSequence::CursorDown(1), "\x1b[1B")]
    #[test_case(CsiSequence::CursorForward(12), "\x1b[12C")]
    #[test_case(CsiSequence::CursorPosition { row: 1, col: 1 }, "\x1b[1;1H")]
    #[test_case(CsiSequence::EraseLine(EraseLineMode::FromCursorToEnd), "\x1b[0K")]
    #[test_case(CsiSequence::EraseDisplay(EraseDisplayMode::EntireScreen), "\x1b[2J")]
    fn test_display(seq: CsiSequence, expected: &str) {
        assert_eq!(seq.to_string(), expected);
    }

    #[test]
    fn test_zero_movement_is_skipped() {
        assert_eq!(CsiSequence::cursor_up(0), None);
        assert_eq!(CsiSequence::cursor_forward(0), None);
        assert_eq!(CsiSequence::cursor_down(2), Some(CsiSequence::CursorDown(2)));
    }
}
