// Copyright (c) 2026 rezky_nightky

use crossterm::style::Color;

use crate::cell::Cell;

/// Terminal extent in cells, queried fresh whenever a bound check needs it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Extent {
    pub rows: u16,
    pub cols: u16,
}

impl Extent {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { rows, cols }
    }
}

/// Full-screen cell grid the engine draws into. Writes are addressed with
/// signed coordinates and silently clipped, so a window hanging partly off
/// screen is fine.
#[derive(Clone, Debug)]
pub struct Surface {
    pub width: u16,
    pub height: u16,
    cells: Vec<Cell>,
    blank: Cell,
    dirty_all: bool,
    dirty_map: Vec<bool>,
    dirty: Vec<usize>,
}

impl Surface {
    pub fn new(extent: Extent, bg: Option<Color>) -> Self {
        let len = extent.cols as usize * extent.rows as usize;
        let blank = Cell::blank_with_bg(bg);
        Self {
            width: extent.cols,
            height: extent.rows,
            cells: vec![blank; len],
            blank,
            dirty_all: true,
            dirty_map: vec![false; len],
            dirty: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn extent(&self) -> Extent {
        Extent::new(self.width, self.height)
    }

    pub fn blank(&self) -> Cell {
        self.blank
    }

    pub fn is_dirty_all(&self) -> bool {
        self.dirty_all
    }

    pub fn dirty_indices(&self) -> &[usize] {
        &self.dirty
    }

    pub fn has_changes(&self) -> bool {
        self.dirty_all || !self.dirty.is_empty()
    }

    pub fn clear_dirty(&mut self) {
        if self.dirty_all {
            self.dirty_all = false;
            self.dirty_map.fill(false);
            self.dirty.clear();
            return;
        }

        for &i in &self.dirty {
            if let Some(v) = self.dirty_map.get_mut(i) {
                *v = false;
            }
        }
        self.dirty.clear();
    }

    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row >= self.height as i32 || col >= self.width as i32 {
            return None;
        }
        Some(row as usize * self.width as usize + col as usize)
    }

    #[allow(dead_code)]
    pub fn get(&self, row: i32, col: i32) -> Option<&Cell> {
        self.index(row, col).map(|i| &self.cells[i])
    }

    pub fn cell_at_index(&self, i: usize) -> Cell {
        self.cells.get(i).copied().unwrap_or(self.blank)
    }

    pub fn put(&mut self, row: i32, col: i32, cell: Cell) {
        let Some(i) = self.index(row, col) else {
            return;
        };
        if self.cells[i] == cell {
            return;
        }
        self.cells[i] = cell;
        if !self.dirty_all && !self.dirty_map[i] {
            self.dirty_map[i] = true;
            self.dirty.push(i);
        }
    }

    /// Fill a `height` x `width` block whose top-left corner is at (`row`, `col`).
    pub fn fill(&mut self, row: i32, col: i32, width: u16, height: u16, cell: Cell) {
        for r in row..row + height as i32 {
            for c in col..col + width as i32 {
                self.put(r, c, cell);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Cell {
        Cell::glyph('x', None)
    }

    #[test]
    fn put_outside_bounds_is_ignored() {
        let mut s = Surface::new(Extent::new(4, 3), None);
        s.clear_dirty();
        s.put(-1, 0, x());
        s.put(0, -1, x());
        s.put(3, 0, x());
        s.put(0, 4, x());
        assert!(!s.has_changes());
    }

    #[test]
    fn put_marks_each_changed_cell_once() {
        let mut s = Surface::new(Extent::new(4, 3), None);
        s.clear_dirty();
        s.put(1, 2, x());
        s.put(1, 2, x());
        assert_eq!(s.dirty_indices(), &[6]);
        assert_eq!(s.get(1, 2).map(|c| c.ch), Some('x'));

        s.clear_dirty();
        s.put(1, 2, x());
        assert!(!s.has_changes());
    }

    #[test]
    fn fill_clips_partially_offscreen_block() {
        let mut s = Surface::new(Extent::new(4, 3), None);
        s.clear_dirty();
        s.fill(-1, 2, 5, 2, x());
        assert_eq!(s.dirty_indices(), &[2, 3]);
    }
}
