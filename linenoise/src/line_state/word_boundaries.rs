// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Byte offset helpers for moving through a line. All of them take and return byte
//! offsets that are on a char boundary of `line`. Single steps move by grapheme cluster;
//! word steps use whitespace as the separator.

use unicode_segmentation::UnicodeSegmentation;

/// Start of the grapheme that ends at `byte_index`, or `0`.
#[must_use]
pub fn prev_grapheme_start(line: &str, byte_index: usize) -> usize {
    line[..byte_index]
        .grapheme_indices(true)
        .next_back()
        .map_or(0, |(index, _)| index)
}

/// End of the grapheme that starts at `byte_index`, or `byte_index` at end of line.
#[must_use]
pub fn next_grapheme_end(line: &str, byte_index: usize) -> usize {
    line[byte_index..]
        .graphemes(true)
        .next()
        .map_or(byte_index, |grapheme| byte_index + grapheme.len())
}

/// Skip whitespace to the left of `byte_index`, then the word before it. Returns the
/// offset of the first char of that word.
#[must_use]
pub fn find_prev_word_start(line: &str, byte_index: usize) -> usize {
    line[..byte_index]
        .trim_end()
        .char_indices()
        .rev()
        .find(|(_, ch)| ch.is_whitespace())
        .map_or(0, |(index, ch)| index + ch.len_utf8())
}

/// Skip whitespace to the right of `byte_index`, then the word after it. Returns the
/// offset just past the last char of that word.
#[must_use]
pub fn find_next_word_end(line: &str, byte_index: usize) -> usize {
    let after = &line[byte_index..];
    let rest = after.trim_start();
    let leading_whitespace = after.len() - rest.len();
    let word_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
    byte_index + leading_whitespace + word_len
}
