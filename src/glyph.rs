// Copyright (c) 2026 rezky_nightky

//! Block digits. Each digit is a 3x5 grid of segments; every segment is
//! drawn two terminal columns wide so the numerals look roughly square.

/// Segments per glyph row.
pub const SEGMENT_COLS: usize = 3;
/// Glyph height in rows.
pub const GLYPH_ROWS: usize = 5;
/// Terminal columns per segment.
pub const SEGMENT_WIDTH: usize = 2;
/// Glyph width in terminal columns. Cell indices wrap to the next row
/// after this many columns.
pub const GLYPH_COLS: usize = SEGMENT_COLS * SEGMENT_WIDTH;
/// Terminal cells covered by one glyph.
pub const GLYPH_CELLS: usize = GLYPH_COLS * GLYPH_ROWS;

const SEGMENTS: usize = SEGMENT_COLS * GLYPH_ROWS;

#[rustfmt::skip]
const DIGITS: [[bool; SEGMENTS]; 10] = {
    const O: bool = false;
    const X: bool = true;
    [
        [X,X,X, X,O,X, X,O,X, X,O,X, X,X,X], // 0
        [O,O,X, O,O,X, O,O,X, O,O,X, O,O,X], // 1
        [X,X,X, O,O,X, X,X,X, X,O,O, X,X,X], // 2
        [X,X,X, O,O,X, X,X,X, O,O,X, X,X,X], // 3
        [X,O,X, X,O,X, X,X,X, O,O,X, O,O,X], // 4
        [X,X,X, X,O,O, X,X,X, O,O,X, X,X,X], // 5
        [X,X,X, X,O,O, X,X,X, X,O,X, X,X,X], // 6
        [X,X,X, O,O,X, O,O,X, O,O,X, O,O,X], // 7
        [X,X,X, X,O,X, X,X,X, X,O,X, X,X,X], // 8
        [X,X,X, X,O,X, X,X,X, O,O,X, X,X,X], // 9
    ]
};

/// Segment pattern of `digit`, row-major. Callers pass 0..=9.
pub fn segments(digit: u8) -> &'static [bool; SEGMENTS] {
    &DIGITS[digit as usize]
}

/// Maps a linear cell index in `0..GLYPH_CELLS` to its (row, column) offset
/// from the glyph's top-left corner.
pub fn cell_offset(i: usize) -> (usize, usize) {
    (i / GLYPH_COLS, i % GLYPH_COLS)
}

/// Whether cell `i` of `digit` is lit.
pub fn is_lit(digit: u8, i: usize) -> bool {
    segments(digit)[i / SEGMENT_WIDTH]
}
