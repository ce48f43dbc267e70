// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{Hint, HintStyle, SGR_RESET};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Hint text clipped to `max_width` columns and wrapped in its SGR style. Control
/// characters are dropped so a hint can't move the cursor. Returns an empty string if
/// nothing fits.
#[must_use]
pub fn render_hint(hint: &Hint, max_width: usize) -> String {
    let mut visible = String::new();
    let mut used = 0;
    for grapheme in hint.text.graphemes(true) {
        if grapheme.chars().any(char::is_control) {
            continue;
        }
        let width = grapheme.width();
        if used + width > max_width {
            break;
        }
        used += width;
        visible.push_str(grapheme);
    }

    if visible.is_empty() {
        return visible;
    }

    match HintStyle::new(hint.color, hint.bold) {
        Some(style) => format!("{style}{visible}{SGR_RESET}"),
        None => visible,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_hint() {
        assert_eq!(render_hint(&Hint::new(" world"), 80), " world");
    }

    #[test]
    fn test_truncated() {
        assert_eq!(render_hint(&Hint::new(" world"), 3), " wo");
        assert_eq!(render_hint(&Hint::new("世界"), 3), "世");
        assert_eq!(render_hint(&Hint::new("abc"), 0), "");
    }

    #[test]
    fn test_styled() {
        let hint = Hint::new("cd").with_color(35).bold();
        assert_eq!(render_hint(&hint, 80), "\x1b[1;35;49mcd\x1b[0m");
        let hint = Hint::new("cd").bold();
        assert_eq!(render_hint(&hint, 80), "\x1b[1;37;49mcd\x1b[0m");
    }

    #[test]
    fn test_control_chars_dropped() {
        assert_eq!(render_hint(&Hint::new("a\x1b[2Jb\n"), 80), "a[2Jb");
    }
}
