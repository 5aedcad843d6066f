#![forbid(unsafe_code)]

//! Terminal grid cells.

use tabulon_style::{Color, Style, StyleFlags};
use unicode_width::UnicodeWidthChar;

/// One cell of the terminal grid.
///
/// A glyph wider than one column occupies a head cell followed by
/// continuation cells (see [`Cell::continuation`]); presenters skip
/// continuations when emitting output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// The character displayed in this cell. `'\0'` marks a continuation.
    pub ch: char,
    /// Display width of the glyph (0 for continuation cells).
    pub width: u8,
    /// Foreground color, if set.
    pub fg: Option<Color>,
    /// Background color, if set.
    pub bg: Option<Color>,
    /// Attribute flags.
    pub attrs: StyleFlags,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            width: 1,
            fg: None,
            bg: None,
            attrs: StyleFlags::empty(),
        }
    }
}

impl Cell {
    /// Create a cell from a character with no styling.
    #[must_use]
    pub fn from_char(ch: char) -> Self {
        Self {
            ch,
            width: ch.width().unwrap_or(0) as u8,
            ..Self::default()
        }
    }

    /// Create a styled cell from a character.
    #[must_use]
    pub fn styled(ch: char, style: Style) -> Self {
        let mut cell = Self::from_char(ch);
        cell.apply(style);
        cell
    }

    /// The trailing cell of a wide glyph.
    #[must_use]
    pub const fn continuation() -> Self {
        Self {
            ch: '\0',
            width: 0,
            fg: None,
            bg: None,
            attrs: StyleFlags::empty(),
        }
    }

    /// Whether this cell is the trailing part of a wide glyph.
    #[must_use]
    pub const fn is_continuation(&self) -> bool {
        self.ch == '\0'
    }

    /// Whether this cell shows nothing (blank and unstyled).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ch == ' ' && self.fg.is_none() && self.bg.is_none() && self.attrs.is_empty()
    }

    /// Layer a style onto this cell. Unset style fields leave the cell's
    /// current values in place.
    pub fn apply(&mut self, style: Style) {
        if let Some(fg) = style.fg {
            self.fg = Some(fg);
        }
        if let Some(bg) = style.bg {
            self.bg = Some(bg);
        }
        self.attrs |= style.attrs;
    }
}
