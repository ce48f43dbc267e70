// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{CSI_PARAM_SEPARATOR, CSI_START, SGR_BG_DEFAULT, SGR_FG_WHITE,
            SGR_GRAPHIC_RENDITION};
use std::fmt::{Display, Formatter, Result};

/// Select Graphic Rendition used to paint a hint: `ESC [ bold ; color ; 49 m`.
///
/// A hint that is bold but didn't ask for a color is painted white, otherwise the bold
/// attribute would be invisible on some palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintStyle {
    pub bold: bool,
    pub color: u8,
}

impl HintStyle {
    /// Returns [`None`] when neither a color nor bold was requested; the hint is then
    /// written with the terminal's current attributes.
    #[must_use]
    pub fn new(color: Option<u8>, bold: bool) -> Option<Self> {
        match (color, bold) {
            (None, false) => None,
            (None, true) => Some(Self { bold, color: SGR_FG_WHITE }),
            (Some(color), _) => Some(Self { bold, color }),
        }
    }
}

impl Display for HintStyle {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "{CSI_START}{bold}{CSI_PARAM_SEPARATOR}{color}{CSI_PARAM_SEPARATOR}{SGR_BG_DEFAULT}{SGR_GRAPHIC_RENDITION}",
            bold = u8::from(self.bold),
            color = self.color,
        )
    }
}
