// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Inline suggestion drawn after the cursor. It is never part of the buffer, the
/// returned line, or history.
///
/// `color` is an SGR foreground code (for example `31` red, `35` magenta). A bold hint
/// without a color is drawn white.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Hint {
    pub text: String,
    pub color: Option<u8>,
    pub bold: bool,
}

impl Hint {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: u8) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

impl From<&str> for Hint {
    fn from(text: &str) -> Self { Hint::new(text) }
}

impl From<String> for Hint {
    fn from(text: String) -> Self { Hint::new(text) }
}
