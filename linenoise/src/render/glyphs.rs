// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// What a masked grapheme is drawn as.
pub const MASK_CHAR: &str = "*";

/// One grapheme of the buffer as it appears on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph<'a> {
    pub byte_start: usize,
    pub width: usize,
    pub text: &'a str,
}

/// Split `buffer` into on-screen glyphs. In mask mode every grapheme is drawn as one
/// [`MASK_CHAR`].
#[must_use]
pub fn glyphs(buffer: &str, mask_mode: bool) -> Vec<Glyph<'_>> {
    buffer
        .grapheme_indices(true)
        .map(|(byte_start, grapheme)| {
            if mask_mode {
                Glyph { byte_start, width: 1, text: MASK_CHAR }
            } else {
                Glyph { byte_start, width: grapheme.width(), text: grapheme }
            }
        })
        .collect()
}

/// Display columns used by the glyphs that start before byte offset `cursor`.
#[must_use]
pub fn width_before(glyphs: &[Glyph<'_>], cursor: usize) -> usize {
    glyphs
        .iter()
        .take_while(|it| it.byte_start < cursor)
        .map(|it| it.width)
        .sum()
}

#[must_use]
pub fn total_width(glyphs: &[Glyph<'_>]) -> usize { glyphs.iter().map(|it| it.width).sum() }
