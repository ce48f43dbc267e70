// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{Glyph, glyphs, render_hint, total_width, width_before};
use crate::{CARRIAGE_RETURN, CRLF, CsiSequence, EditState, EraseDisplayMode,
            EraseLineMode, Hint};
use std::fmt::Write;

const ERASE_TO_END_OF_LINE: CsiSequence = CsiSequence::EraseLine(EraseLineMode::FromCursorToEnd);

/// Rows a multi-line refresh uses for a prompt and line of the given widths. The `+ 1`
/// is the cell the cursor occupies past the last character.
#[must_use]
pub fn rows_needed(prompt_width: usize, line_width: usize, columns: usize) -> usize {
    (prompt_width + line_width + 1).div_ceil(columns.max(1))
}

/// Build the bytes that repaint `state`, in single or multi-line mode depending on
/// [`EditState::multi_line`]. Updates the scroll offset and row bookkeeping in `state`.
///
/// The hint is skipped in mask mode.
pub fn refresh_line(state: &mut EditState, hint: Option<&Hint>, mask_mode: bool) -> String {
    let hint = hint.filter(|_| !mask_mode);
    if state.multi_line {
        refresh_multi_line(state, hint, mask_mode)
    } else {
        refresh_single_line(state, hint, mask_mode)
    }
}

/// Screen sequence for Ctrl-L: home the cursor and erase the display. The caller
/// repaints the line afterwards.
#[must_use]
pub fn clear_screen_sequence() -> String {
    format!(
        "{}{}",
        CsiSequence::CursorPosition { row: 1, col: 1 },
        CsiSequence::EraseDisplay(EraseDisplayMode::EntireScreen)
    )
}

/// Sequence that ends a session: the final repaint with the cursor at the end of the
/// line and no hint, then a new row for whatever the host prints next.
pub fn refresh_for_session_end(state: &mut EditState, mask_mode: bool) -> String {
    state.move_end();
    let mut output = refresh_line(state, None, mask_mode);
    output.push_str(CRLF);
    state.rendered_rows = 0;
    state.rendered_cursor_row = 0;
    output
}

/// One row. When the line is wider than the space after the prompt it scrolls
/// horizontally so the cursor stays in `[prompt_width, columns)`.
fn refresh_single_line(state: &mut EditState, hint: Option<&Hint>, mask_mode: bool) -> String {
    let columns = state.terminal_columns;
    let prompt_width = state.prompt_width();
    // Leave the last column free so writing never triggers an automatic wrap.
    let available = columns.saturating_sub(prompt_width + 1).max(1);

    let glyphs = glyphs(state.buffer(), mask_mode);
    let cursor_col = width_before(&glyphs, state.cursor());

    let mut column_offset = state.column_offset;
    if cursor_col < column_offset {
        column_offset = cursor_col;
    } else if cursor_col > column_offset + available {
        column_offset = cursor_col - available;
    }

    let (visible, first_col, shown_to_end) = visible_slice(&glyphs, column_offset, available);
    let visible_width: usize = visible.iter().map(|it| it.width).sum();

    let mut output = String::new();
    output.push_str(CARRIAGE_RETURN);
    output.push_str(state.prompt());
    for glyph in visible {
        output.push_str(glyph.text);
    }
    if let Some(hint) = hint
        && shown_to_end
    {
        output.push_str(&render_hint(hint, available.saturating_sub(visible_width)));
    }
    push_csi(&mut output, ERASE_TO_END_OF_LINE);
    output.push_str(CARRIAGE_RETURN);
    let cursor_screen_col = (prompt_width + cursor_col.saturating_sub(first_col))
        .min(columns.saturating_sub(1));
    push_opt_csi(&mut output, CsiSequence::cursor_forward(cursor_screen_col));

    state.column_offset = column_offset;
    state.rendered_rows = 1;
    state.rendered_cursor_row = 0;
    output
}

/// Glyphs that start at or after `offset` and end within `offset + width`. Also returns
/// the column where the first visible glyph starts, and whether the last glyph of the
/// line is visible.
fn visible_slice<'a, 'g>(
    glyphs: &'g [Glyph<'a>],
    offset: usize,
    width: usize,
) -> (&'g [Glyph<'a>], usize, bool) {
    let mut col = 0;
    let mut start = glyphs.len();
    let mut first_col = offset;
    for (index, glyph) in glyphs.iter().enumerate() {
        if col >= offset {
            start = index;
            first_col = col;
            break;
        }
        col += glyph.width;
    }
    if start == glyphs.len() {
        return (&[], first_col, true);
    }

    let mut end = start;
    let mut used = 0;
    while end < glyphs.len() && used + glyphs[end].width <= width {
        used += glyphs[end].width;
        end += 1;
    }
    (&glyphs[start..end], first_col, end == glyphs.len())
}

/// The line wraps over as many rows as it needs. The previous paint is erased bottom
/// up, the whole line is written again, and the cursor is moved back to its row and
/// column.
fn refresh_multi_line(state: &mut EditState, hint: Option<&Hint>, mask_mode: bool) -> String {
    let columns = state.terminal_columns.max(1);
    let prompt_width = state.prompt_width();

    let glyphs = glyphs(state.buffer(), mask_mode);
    let line_width = total_width(&glyphs);
    let cursor_col = width_before(&glyphs, state.cursor());
    let content_width = prompt_width + line_width;

    let mut output = String::new();

    // Go to the last row of the previous paint and clear upwards.
    let previous_last_row = state.rendered_rows.saturating_sub(1);
    push_opt_csi(
        &mut output,
        CsiSequence::cursor_down(previous_last_row.saturating_sub(state.rendered_cursor_row)),
    );
    for _ in 0..previous_last_row {
        output.push_str(CARRIAGE_RETURN);
        push_csi(&mut output, ERASE_TO_END_OF_LINE);
        push_csi(&mut output, CsiSequence::CursorUp(1));
    }
    output.push_str(CARRIAGE_RETURN);
    push_csi(&mut output, ERASE_TO_END_OF_LINE);

    output.push_str(state.prompt());
    for glyph in &glyphs {
        output.push_str(glyph.text);
    }

    // The terminal leaves the cursor on the last column after filling a row exactly.
    // Move it to the start of the next row so the row arithmetic holds.
    if content_width > 0 && content_width % columns == 0 {
        output.push_str(CRLF);
    }

    if let Some(hint) = hint {
        let last_row_used = content_width % columns;
        let room = columns.saturating_sub(last_row_used + 1);
        output.push_str(&render_hint(hint, room));
    }

    let rows = rows_needed(prompt_width, line_width, columns);
    let cursor_abs = prompt_width + cursor_col;
    let cursor_row = cursor_abs / columns;
    let cursor_screen_col = cursor_abs % columns;

    push_opt_csi(&mut output, CsiSequence::cursor_up(rows - 1 - cursor_row));
    output.push_str(CARRIAGE_RETURN);
    push_opt_csi(&mut output, CsiSequence::cursor_forward(cursor_screen_col));

    state.rendered_rows = rows;
    state.rendered_cursor_row = cursor_row;
    output
}

fn push_csi(output: &mut String, seq: CsiSequence) {
    // Writing to a String can't fail.
    _ = write!(output, "{seq}");
}

fn push_opt_csi(output: &mut String, seq: Option<CsiSequence>) {
    if let Some(seq) = seq {
        push_csi(output, seq);
    }
}
