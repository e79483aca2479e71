// Copyright (c) 2026 rezky_nightky

use crossterm::style::Color;

use crate::cell::Cell;

pub const COLOR_COUNT: u8 = 8;

/// The eight classic terminal colors, indexed like curses' COLOR_* values.
const ANSI8: [Color; COLOR_COUNT as usize] = [
    Color::Black,
    Color::DarkRed,
    Color::DarkGreen,
    Color::DarkYellow,
    Color::DarkBlue,
    Color::DarkMagenta,
    Color::DarkCyan,
    Color::Grey,
];

pub fn ansi_color(index: u8) -> Color {
    ANSI8[(index % COLOR_COUNT) as usize]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pair {
    /// Background on background: an unlit cell.
    Off,
    /// A lit block in the timer color.
    On,
    /// Foreground in the timer color over the background. Spaces drawn with
    /// it look unlit; used for the hidden phase of a blinking colon.
    OnAlt,
    /// A lit block in the time-up color.
    TimeUp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub bg: Option<Color>,
    pub color: Color,
    pub time_up: Color,
}

impl Palette {
    pub fn new(color: u8, time_up: u8, bg: Option<Color>) -> Self {
        Self {
            bg,
            color: ansi_color(color),
            time_up: ansi_color(time_up),
        }
    }

    pub fn cell(&self, pair: Pair, bold: bool) -> Cell {
        let (fg, bg) = match pair {
            Pair::Off => (self.bg, self.bg),
            Pair::On => (self.bg, Some(self.color)),
            Pair::OnAlt => (Some(self.color), self.bg),
            Pair::TimeUp => (self.bg, Some(self.time_up)),
        };
        Cell {
            ch: ' ',
            fg,
            bg,
            bold,
        }
    }
}
