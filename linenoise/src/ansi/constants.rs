// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Control Sequence Introducer: `ESC [`.
pub const CSI_START: &str = "\x1b[";

/// Escape byte, which starts every escape sequence in either direction.
pub const ESC_BYTE: u8 = 0x1b;

pub const CUU_CURSOR_UP: char = 'A';
pub const CUD_CURSOR_DOWN: char = 'B';
pub const CUF_CURSOR_FORWARD: char = 'C';
pub const CUP_CURSOR_POSITION: char = 'H';
pub const ED_ERASE_DISPLAY: char = 'J';
pub const EL_ERASE_LINE: char = 'K';
pub const SGR_GRAPHIC_RENDITION: char = 'm';

pub const CSI_PARAM_SEPARATOR: char = ';';

/// Carriage return, moves the cursor to column 0 of the current row.
pub const CARRIAGE_RETURN: &str = "\r";

/// Output post processing is off in raw mode, so a new row needs both bytes.
pub const CRLF: &str = "\r\n";

/// Audible bell.
pub const BEL: &str = "\x07";

/// Reset all graphic attributes.
pub const SGR_RESET: &str = "\x1b[0m";

/// SGR "white" foreground. Used for a bold hint that didn't ask for a color.
pub const SGR_FG_WHITE: u8 = 37;

/// SGR "default" background.
pub const SGR_BG_DEFAULT: u8 = 49;
