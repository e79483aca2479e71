// Copyright (c) 2026 rezky_nightky

use std::env;

use crate::cell::Cell;
use crate::countdown::{blink_phase, TimeState};
use crate::geometry::Rect;
use crate::glyph::{cell_offset, is_lit, GLYPH_CELLS};
use crate::palette::{Pair, Palette};
use crate::runtime::Options;
use crate::surface::Surface;

// Layout inside the window, relative to its top-left corner.
const DIGIT_ROW: i32 = 1;
const HOUR_COLS: [i32; 2] = [1, 8];
const MINUTE_COLS: [i32; 2] = [20, 27];
const SECOND_COLS: [i32; 2] = [39, 46];
const COLON_ROWS: [i32; 2] = [2, 4];
const MINUTE_COLON_COL: i32 = 16;
const SECOND_COLON_COL: i32 = 35;
const COLON_WIDTH: u16 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BorderChars {
    horizontal: char,
    vertical: char,
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
}

impl BorderChars {
    pub fn unicode() -> Self {
        Self {
            horizontal: '─',
            vertical: '│',
            top_left: '┌',
            top_right: '┐',
            bottom_left: '└',
            bottom_right: '┘',
        }
    }

    pub fn ascii() -> Self {
        Self {
            horizontal: '-',
            vertical: '|',
            top_left: '+',
            top_right: '+',
            bottom_left: '+',
            bottom_right: '+',
        }
    }

    /// Line drawing characters only when the locale says UTF-8.
    pub fn from_env() -> Self {
        let lang = env::var("LANG").unwrap_or_default();
        if lang.to_ascii_uppercase().contains("UTF") {
            Self::unicode()
        } else {
            Self::ascii()
        }
    }

    pub fn draw(&self, surface: &mut Surface, rect: Rect) {
        let bg = surface.blank().bg;
        stroke(surface, rect, |ch| Cell::glyph(ch, bg), *self);
    }

    pub fn erase(surface: &mut Surface, rect: Rect) {
        let blank = surface.blank();
        stroke(surface, rect, |_| blank, Self::ascii());
    }
}

fn stroke(surface: &mut Surface, r: Rect, cell: impl Fn(char) -> Cell, chars: BorderChars) {
    if r.width < 2 || r.height < 2 {
        return;
    }
    let (top, bottom) = (r.row, r.bottom() - 1);
    let (left, right) = (r.col, r.right() - 1);
    for c in left + 1..right {
        surface.put(top, c, cell(chars.horizontal));
        surface.put(bottom, c, cell(chars.horizontal));
    }
    for row in top + 1..bottom {
        surface.put(row, left, cell(chars.vertical));
        surface.put(row, right, cell(chars.vertical));
    }
    surface.put(top, left, cell(chars.top_left));
    surface.put(top, right, cell(chars.top_right));
    surface.put(bottom, left, cell(chars.bottom_left));
    surface.put(bottom, right, cell(chars.bottom_right));
}

/// Draws the countdown into the window described by a `Rect`.
#[derive(Clone, Copy, Debug)]
pub struct Renderer {
    border: BorderChars,
}

impl Renderer {
    pub fn new(border: BorderChars) -> Self {
        Self { border }
    }

    /// Border characters to use for the current box setting.
    pub fn border(&self, opts: &Options) -> Option<BorderChars> {
        opts.boxed.then_some(self.border)
    }

    /// Paint one block digit with its top-left corner at (`row`, `col`).
    /// Lit cells switch to the time-up color while `time_up_blink` is set.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_digit(
        &self,
        surface: &mut Surface,
        palette: &Palette,
        bold: bool,
        value: u8,
        row: i32,
        col: i32,
        time_up_blink: bool,
    ) {
        for i in 0..GLYPH_CELLS {
            let pair = match (is_lit(value, i), time_up_blink) {
                (true, true) => Pair::TimeUp,
                (true, false) => Pair::On,
                (false, _) => Pair::Off,
            };
            let (dr, dc) = cell_offset(i);
            surface.put(row + dr as i32, col + dc as i32, palette.cell(pair, bold));
        }
    }

    fn draw_colon(&self, surface: &mut Surface, rect: Rect, col: i32, cell: Cell) {
        for row in COLON_ROWS {
            surface.fill(rect.row + row, rect.col + col, COLON_WIDTH, 1, cell);
        }
    }

    /// Draw HH:MM, and :SS when seconds are shown, for the state at `now`.
    pub fn draw_frame(
        &self,
        surface: &mut Surface,
        rect: Rect,
        opts: &Options,
        time: &TimeState,
        now: u64,
    ) {
        let palette = opts.palette();
        let phase = blink_phase(now);
        let time_up_blink = time.is_time_up() && phase;
        let digits = time.digits();

        let colon = if time_up_blink {
            Pair::TimeUp
        } else if opts.blink_colon && phase {
            Pair::OnAlt
        } else {
            Pair::On
        };
        let colon = palette.cell(colon, false);

        let row = rect.row + DIGIT_ROW;
        let digit = |surface: &mut Surface, value: u8, col: i32| {
            self.draw_digit(
                surface,
                &palette,
                opts.bold,
                value,
                row,
                rect.col + col,
                time_up_blink,
            );
        };

        for (v, c) in digits.hour.into_iter().zip(HOUR_COLS) {
            digit(surface, v, c);
        }
        self.draw_colon(surface, rect, MINUTE_COLON_COL, colon);
        for (v, c) in digits.minute.into_iter().zip(MINUTE_COLS) {
            digit(surface, v, c);
        }

        if opts.show_seconds {
            self.draw_colon(surface, rect, SECOND_COLON_COL, colon);
            for (v, c) in digits.second.into_iter().zip(SECOND_COLS) {
                digit(surface, v, c);
            }
        }
    }

    /// Turn the border on or off. Borders do not clear themselves, so
    /// switching off overwrites the outline with blanks.
    pub fn set_box(&self, opts: &mut Options, on: bool, surface: &mut Surface, rect: Rect) {
        opts.boxed = on;
        if on {
            self.border.draw(surface, rect);
        } else {
            BorderChars::erase(surface, rect);
        }
    }
}
