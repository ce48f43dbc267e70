// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{EditState, find_next_word_end, find_prev_word_start, next_grapheme_end,
            prev_grapheme_start};
use crate::ReadlineError;

/// Case change applied to the word after the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordCase {
    Upper,
    Lower,
    Capitalize,
}

impl EditState {
    /// Insert `text` at the cursor and move the cursor past it.
    ///
    /// # Errors
    ///
    /// [`ReadlineError::OutOfMemory`] if the buffer can't grow.
    pub fn insert_str(&mut self, text: &str) -> Result<bool, ReadlineError> {
        if text.is_empty() {
            return Ok(false);
        }
        let cursor = self.cursor();
        let buffer = self.buffer_mut();
        buffer
            .try_reserve(text.len())
            .map_err(|_| ReadlineError::OutOfMemory)?;
        buffer.insert_str(cursor, text);
        self.set_cursor(cursor + text.len());
        Ok(true)
    }

    /// # Errors
    ///
    /// [`ReadlineError::OutOfMemory`] if the buffer can't grow.
    pub fn insert_char(&mut self, ch: char) -> Result<bool, ReadlineError> {
        let mut bytes = [0_u8; 4];
        self.insert_str(ch.encode_utf8(&mut bytes))
    }

    /// Delete the grapheme under the cursor.
    pub fn delete_at_cursor(&mut self) -> bool {
        let start = self.cursor();
        let end = next_grapheme_end(self.buffer(), start);
        self.remove_range(start, end).is_some()
    }

    /// Delete the grapheme before the cursor.
    pub fn backspace(&mut self) -> bool {
        let end = self.cursor();
        let start = prev_grapheme_start(self.buffer(), end);
        self.remove_range(start, end).is_some()
    }

    pub fn move_left(&mut self) -> bool {
        self.move_to(prev_grapheme_start(self.buffer(), self.cursor()))
    }

    pub fn move_right(&mut self) -> bool {
        self.move_to(next_grapheme_end(self.buffer(), self.cursor()))
    }

    pub fn move_word_left(&mut self) -> bool {
        self.move_to(find_prev_word_start(self.buffer(), self.cursor()))
    }

    pub fn move_word_right(&mut self) -> bool {
        self.move_to(find_next_word_end(self.buffer(), self.cursor()))
    }

    pub fn move_home(&mut self) -> bool { self.move_to(0) }

    pub fn move_end(&mut self) -> bool { self.move_to(self.buffer().len()) }

    /// Cut from the cursor to the end of the line. Returns the cut text, which is empty
    /// when the cursor is already at the end.
    pub fn kill_to_end(&mut self) -> String {
        let (start, end) = (self.cursor(), self.buffer().len());
        self.remove_range(start, end).unwrap_or_default()
    }

    /// Cut from the start of the line to the cursor.
    pub fn kill_to_start(&mut self) -> String {
        let end = self.cursor();
        self.remove_range(0, end).unwrap_or_default()
    }

    /// Cut the word before the cursor, along with the whitespace between it and the
    /// cursor.
    pub fn kill_prev_word(&mut self) -> String {
        let end = self.cursor();
        let start = find_prev_word_start(self.buffer(), end);
        self.remove_range(start, end).unwrap_or_default()
    }

    /// Cut the word after the cursor, along with the whitespace before it.
    pub fn kill_next_word(&mut self) -> String {
        let start = self.cursor();
        let end = find_next_word_end(self.buffer(), start);
        self.remove_range(start, end).unwrap_or_default()
    }

    /// Insert previously cut text at the cursor.
    ///
    /// # Errors
    ///
    /// [`ReadlineError::OutOfMemory`] if the buffer can't grow.
    pub fn yank(&mut self, clipboard: &str) -> Result<bool, ReadlineError> {
        self.insert_str(clipboard)
    }

    /// Swap the grapheme before the cursor with the one under it and move the cursor
    /// forward. At the end of the line the last two graphemes are swapped.
    pub fn transpose_chars(&mut self) -> bool {
        let cursor = self.cursor();
        if cursor == 0 {
            return false;
        }
        let buffer = self.buffer();
        let (first_start, middle, second_end) = if cursor == buffer.len() {
            let middle = prev_grapheme_start(buffer, cursor);
            (prev_grapheme_start(buffer, middle), middle, cursor)
        } else {
            (prev_grapheme_start(buffer, cursor), cursor, next_grapheme_end(buffer, cursor))
        };
        if first_start == middle {
            return false;
        }

        let swapped = format!("{}{}", &buffer[middle..second_end], &buffer[first_start..middle]);
        self.buffer_mut().replace_range(first_start..second_end, &swapped);
        self.set_cursor(second_end);
        true
    }

    /// Change the case of the word after the cursor and move past it.
    pub fn change_word_case(&mut self, case: WordCase) -> bool {
        let start = self.cursor();
        let end = find_next_word_end(self.buffer(), start);
        if start == end {
            return false;
        }

        let word = &self.buffer()[start..end];
        let changed = match case {
            WordCase::Upper => word.to_uppercase(),
            WordCase::Lower => word.to_lowercase(),
            WordCase::Capitalize => {
                let mut seen_alphanumeric = false;
                word.chars()
                    .flat_map(|ch| {
                        let first = !seen_alphanumeric && ch.is_alphanumeric();
                        seen_alphanumeric |= ch.is_alphanumeric();
                        let mapped: Vec<char> = if first {
                            ch.to_uppercase().collect()
                        } else {
                            ch.to_lowercase().collect()
                        };
                        mapped
                    })
                    .collect()
            }
        };

        let new_end = start + changed.len();
        self.buffer_mut().replace_range(start..end, &changed);
        self.set_cursor(new_end);
        true
    }

    /// Swap the case of the grapheme under the cursor and move past it.
    pub fn swap_case(&mut self) -> bool {
        let start = self.cursor();
        let end = next_grapheme_end(self.buffer(), start);
        if start == end {
            return false;
        }

        let swapped: String = self.buffer()[start..end]
            .chars()
            .flat_map(|ch| -> Vec<char> {
                if ch.is_lowercase() {
                    ch.to_uppercase().collect()
                } else if ch.is_uppercase() {
                    ch.to_lowercase().collect()
                } else {
                    vec![ch]
                }
            })
            .collect();

        let new_end = start + swapped.len();
        self.buffer_mut().replace_range(start..end, &swapped);
        self.set_cursor(new_end);
        true
    }

    fn move_to(&mut self, cursor: usize) -> bool {
        if cursor == self.cursor() {
            return false;
        }
        self.set_cursor(cursor);
        true
    }

    /// Remove `start..end` and leave the cursor at `start`. [`None`] if the range is
    /// empty.
    fn remove_range(&mut self, start: usize, end: usize) -> Option<String> {
        if start >= end {
            return None;
        }
        let removed: String = self.buffer_mut().drain(start..end).collect();
        self.set_cursor(start);
        Some(removed)
    }
}
