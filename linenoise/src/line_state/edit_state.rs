// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::ReadlineError;
use unicode_width::UnicodeWidthStr;

/// Display width of `text` in terminal columns, ignoring any ANSI escape sequences in
/// it.
#[must_use]
pub fn display_width_strip_ansi(text: &str) -> usize {
    strip_ansi_escapes::strip_str(text).width()
}

/// State of one editing session. Created when a session starts and dropped when it ends.
#[derive(Debug, Clone)]
pub struct EditState {
    buffer: String,
    /// Byte offset into `buffer`, `0..=buffer.len()`, always on a grapheme boundary.
    cursor: usize,
    prompt: String,
    prompt_width: usize,

    /// First display column of the buffer that is visible in single-line mode.
    pub column_offset: usize,
    pub terminal_columns: usize,
    pub multi_line: bool,

    /// Rows used by the last multi-line refresh.
    pub rendered_rows: usize,
    /// Row, relative to the prompt row, where the last refresh left the cursor.
    pub rendered_cursor_row: usize,
}

impl EditState {
    #[must_use]
    pub fn new(prompt: impl Into<String>, terminal_columns: u16, multi_line: bool) -> Self {
        let prompt = prompt.into();
        let prompt_width = display_width_strip_ansi(&prompt);
        Self {
            buffer: String::new(),
            cursor: 0,
            prompt,
            prompt_width,
            column_offset: 0,
            terminal_columns: usize::from(terminal_columns.max(1)),
            multi_line,
            rendered_rows: 0,
            rendered_cursor_row: 0,
        }
    }

    #[must_use]
    pub fn buffer(&self) -> &str { &self.buffer }

    #[must_use]
    pub fn cursor(&self) -> usize { self.cursor }

    #[must_use]
    pub fn prompt(&self) -> &str { &self.prompt }

    #[must_use]
    pub fn prompt_width(&self) -> usize { self.prompt_width }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.buffer.is_empty() }

    /// Buffer content up to the cursor.
    #[must_use]
    pub fn before_cursor(&self) -> &str { &self.buffer[..self.cursor] }

    /// Buffer content from the cursor on.
    #[must_use]
    pub fn after_cursor(&self) -> &str { &self.buffer[self.cursor..] }

    /// Display columns used by the buffer before the cursor.
    #[must_use]
    pub fn cursor_width(&self) -> usize { self.before_cursor().width() }

    /// Display columns used by the whole buffer.
    #[must_use]
    pub fn buffer_width(&self) -> usize { self.buffer.width() }

    /// Replace the whole line and put the cursor at its end.
    ///
    /// # Errors
    ///
    /// [`ReadlineError::OutOfMemory`] if the buffer can't grow.
    pub fn set_line(&mut self, line: &str) -> Result<(), ReadlineError> {
        self.set_line_and_cursor(line, line.len())
    }

    /// Replace the whole line and put the cursor at `cursor`, clamped to the line and
    /// moved back to the nearest char boundary.
    ///
    /// # Errors
    ///
    /// [`ReadlineError::OutOfMemory`] if the buffer can't grow.
    pub fn set_line_and_cursor(
        &mut self,
        line: &str,
        cursor: usize,
    ) -> Result<(), ReadlineError> {
        self.buffer.clear();
        self.buffer
            .try_reserve(line.len())
            .map_err(|_| ReadlineError::OutOfMemory)?;
        self.buffer.push_str(line);
        let mut cursor = cursor.min(self.buffer.len());
        while !self.buffer.is_char_boundary(cursor) {
            cursor -= 1;
        }
        self.cursor = cursor;
        Ok(())
    }

    /// Take the buffer out, leaving an empty line.
    pub fn take_buffer(&mut self) -> String {
        self.cursor = 0;
        self.column_offset = 0;
        std::mem::take(&mut self.buffer)
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut String { &mut self.buffer }

    pub(crate) fn set_cursor(&mut self, cursor: usize) {
        debug_assert!(self.buffer.is_char_boundary(cursor));
        self.cursor = cursor.min(self.buffer.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_prompt_width_ignores_ansi() {
        let state = EditState::new("\x1b[1;32m>\x1b[0m ", 80, false);
        assert_eq!(state.prompt_width(), 2);
    }

    #[test]
    fn test_prompt_width_wide_chars() {
        let state = EditState::new("世> ", 80, false);
        assert_eq!(state.prompt_width(), 4);
    }

    #[test]
    fn test_set_line_and_cursor_clamps() {
        let mut state = EditState::new("> ", 80, false);
        state.set_line_and_cursor("héllo", 2).unwrap();
        // Byte 2 is inside 'é', back up to its start.
        assert_eq!(state.cursor(), 1);
        state.set_line_and_cursor("abc", 99).unwrap();
        assert_eq!(state.cursor(), 3);
        assert_eq!(state.before_cursor(), "abc");
        assert_eq!(state.after_cursor(), "");
    }

    #[test]
    fn test_take_buffer() {
        let mut state = EditState::new("> ", 80, false);
        state.set_line("abc").unwrap();
        assert_eq!(state.take_buffer(), "abc");
        assert!(state.is_empty());
        assert_eq!(state.cursor(), 0);
    }
}
