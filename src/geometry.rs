// Copyright (c) 2026 rezky_nightky

use log::debug;

use crate::render::BorderChars;
use crate::runtime::Options;
use crate::surface::{Extent, Surface};

/// Window width when only HH:MM is shown.
pub const WIDTH_NO_SECONDS: u16 = 35;
/// Window width with the seconds pair and its colon.
pub const WIDTH_WITH_SECONDS: u16 = 54;
/// Five glyph rows plus a border row above and below.
pub const HEIGHT: u16 = 7;
/// Slack subtracted from the bottom edge in the bounce and nudge tests.
/// Nothing is drawn under the timer, so this matches the single cell of
/// slack used against the right edge.
pub const RESERVED_ROWS: i32 = 1;

pub fn width_for(show_seconds: bool) -> u16 {
    if show_seconds {
        WIDTH_WITH_SECONDS
    } else {
        WIDTH_NO_SECONDS
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub row: i32,
    pub col: i32,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn right(&self) -> i32 {
        self.col + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.row + self.height as i32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Position, size and bounce direction of the timer window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Geometry {
    rect: Rect,
    step_row: i32,
    step_col: i32,
}

impl Geometry {
    pub fn new(show_seconds: bool) -> Self {
        Self {
            rect: Rect {
                row: 0,
                col: 0,
                width: width_for(show_seconds),
                height: HEIGHT,
            },
            step_row: 1,
            step_col: 1,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[cfg(test)]
    pub fn steps(&self) -> (i32, i32) {
        (self.step_row, self.step_col)
    }

    fn max_row(&self, extent: Extent) -> i32 {
        extent.rows as i32 - self.rect.height as i32 - RESERVED_ROWS
    }

    fn max_col(&self, extent: Extent) -> i32 {
        extent.cols as i32 - self.rect.width as i32 - 1
    }

    /// The only way the window moves or changes size. The old area is
    /// blanked first so nothing is left behind, then the border is redrawn
    /// at the new bounds when `border` is set.
    pub fn move_resize(&mut self, surface: &mut Surface, to: Rect, border: Option<BorderChars>) {
        let old = self.rect;
        surface.fill(old.row, old.col, old.width, old.height, surface.blank());
        self.rect = to;
        if let Some(chars) = border {
            chars.draw(surface, to);
        }
        if old != to {
            debug!(
                "window moved to row {} col {} ({}x{})",
                to.row, to.col, to.width, to.height
            );
        }
    }

    /// Advance one cell per axis, bouncing off the terminal edges. A no-op
    /// unless rebound is on. An axis too small to hold the window pins the
    /// window to 0 on that axis.
    pub fn apply_rebound(
        &mut self,
        opts: &Options,
        extent: Extent,
        surface: &mut Surface,
        border: Option<BorderChars>,
    ) {
        if !opts.rebound() {
            return;
        }

        let r = self.rect;
        let max_row = self.max_row(extent);
        let max_col = self.max_col(extent);

        if r.row < 1 {
            self.step_row = 1;
        }
        if r.row > max_row {
            self.step_row = -1;
        }
        if r.col < 1 {
            self.step_col = 1;
        }
        if r.col > max_col {
            self.step_col = -1;
        }

        let row = if max_row < 0 { 0 } else { r.row + self.step_row };
        let col = if max_col < 0 { 0 } else { r.col + self.step_col };
        self.move_resize(surface, Rect { row, col, ..r }, border);
    }

    /// Re-center the window when center mode is on. Turns rebound off.
    pub fn apply_center(
        &mut self,
        opts: &mut Options,
        extent: Extent,
        surface: &mut Surface,
        border: Option<BorderChars>,
    ) {
        if !opts.center() {
            return;
        }
        opts.set_center(true);

        let r = self.rect;
        let row = extent.rows as i32 / 2 - r.height as i32 / 2;
        let col = extent.cols as i32 / 2 - r.width as i32 / 2;
        self.move_resize(surface, Rect { row, col, ..r }, border);
    }

    /// Flip the seconds display and resize to match. If the wider window
    /// would run off the right edge, shift it left just enough to fit.
    pub fn toggle_seconds_width(
        &mut self,
        opts: &mut Options,
        extent: Extent,
        surface: &mut Surface,
        border: Option<BorderChars>,
    ) {
        opts.show_seconds = !opts.show_seconds;
        let width = width_for(opts.show_seconds);

        let r = self.rect;
        let fit = (extent.cols as i32 - width as i32).max(0);
        let col = if r.col > fit { fit } else { r.col };

        self.move_resize(surface, Rect { col, width, ..r }, border);
        self.apply_center(opts, extent, surface, border);
    }

    /// Move one cell by hand. Ignored while centered or at the edge.
    pub fn nudge(
        &mut self,
        dir: Direction,
        opts: &Options,
        extent: Extent,
        surface: &mut Surface,
        border: Option<BorderChars>,
    ) {
        if opts.center() {
            return;
        }
        let r = self.rect;
        let (row, col) = match dir {
            Direction::Up if r.row >= 1 => (r.row - 1, r.col),
            Direction::Down if r.row <= self.max_row(extent) => (r.row + 1, r.col),
            Direction::Left if r.col >= 1 => (r.row, r.col - 1),
            Direction::Right if r.col <= self.max_col(extent) => (r.row, r.col + 1),
            _ => return,
        };
        self.move_resize(surface, Rect { row, col, ..r }, border);
    }
}
