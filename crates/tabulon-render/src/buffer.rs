#![forbid(unsafe_code)]

//! Row-major cell buffer.

use crate::cell::Cell;
use tabulon_core::geometry::Rect;
use tabulon_style::Style;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// A rectangular grid of [`Cell`]s.
///
/// All writes are clipped to the buffer bounds; out-of-range coordinates are
/// ignored rather than panicking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create a buffer filled with blank cells.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    /// Buffer width in cells.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Buffer height in cells.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The full buffer area as a rectangle.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Get the cell at a position.
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Get the cell at a position mutably.
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(move |i| &mut self.cells[i])
    }

    /// Write a cell, maintaining wide-glyph continuation invariants.
    ///
    /// Overwriting either half of an existing wide glyph blanks the other
    /// half; writing a wide cell claims the following cell as continuation.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        let Some(i) = self.index(x, y) else {
            return;
        };

        // Repair neighbors of any wide glyph we are about to clobber.
        if self.cells[i].is_continuation() && x > 0 {
            if let Some(head) = self.index(x - 1, y) {
                self.cells[head] = Cell::default();
            }
        } else if self.cells[i].width > 1 {
            if let Some(tail) = self.index(x + 1, y) {
                if self.cells[tail].is_continuation() {
                    self.cells[tail] = Cell::default();
                }
            }
        }

        let wide = cell.width > 1;
        self.cells[i] = cell;
        if wide {
            if let Some(tail) = self.index(x + 1, y) {
                self.cells[tail] = Cell::continuation();
            } else {
                // Wide glyph at the right edge cannot fit; blank it.
                self.cells[i] = Cell::default();
            }
        }
    }

    /// Fill a rectangle (clipped to bounds) with a cell.
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        let rect = rect.intersection(&self.bounds());
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                self.set(x, y, cell);
            }
        }
    }

    /// Reset every cell to blank.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Write a styled string starting at `(x, y)`, clipped at `max_x`
    /// (exclusive) and at the buffer edge.
    ///
    /// Width-aware: wide glyphs that would straddle the clip edge are not
    /// drawn. Returns the x position after the last drawn cell.
    pub fn set_string(&mut self, mut x: u16, y: u16, content: &str, style: Style, max_x: u16) -> u16 {
        let max_x = max_x.min(self.width);
        for grapheme in content.graphemes(true) {
            if x >= max_x {
                break;
            }
            let w = UnicodeWidthStr::width(grapheme);
            if w == 0 {
                continue;
            }
            if x + w as u16 > max_x {
                break;
            }
            if let Some(c) = grapheme.chars().next() {
                self.set(x, y, Cell::styled(c, style));
            }
            x = x.saturating_add(w as u16);
        }
        x
    }

    /// Apply a style to every cell in a rectangle, preserving content.
    pub fn set_style(&mut self, rect: Rect, style: Style) {
        if style.is_empty() {
            return;
        }
        let rect = rect.intersection(&self.bounds());
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                if let Some(cell) = self.get_mut(x, y) {
                    cell.apply(style);
                }
            }
        }
    }
}
