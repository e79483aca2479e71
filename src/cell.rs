// Copyright (c) 2026 rezky_nightky

use crossterm::style::Color;

/// One terminal cell. The timer paints with background colors, so most
/// cells hold a space and carry their look in `bg`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
}

impl Cell {
    pub fn blank_with_bg(bg: Option<Color>) -> Self {
        Self {
            ch: ' ',
            fg: None,
            bg,
            bold: false,
        }
    }

    pub fn glyph(ch: char, bg: Option<Color>) -> Self {
        Self {
            ch,
            fg: None,
            bg,
            bold: false,
        }
    }
}
