#![forbid(unsafe_code)]

//! Cell styles.

use crate::color::Color;
use bitflags::bitflags;

bitflags! {
    /// Text attribute flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        const BOLD      = 0b0000_0001;
        const DIM       = 0b0000_0010;
        const ITALIC    = 0b0000_0100;
        const UNDERLINE = 0b0000_1000;
        const REVERSED  = 0b0001_0000;
    }
}

/// A style to apply to rendered cells.
///
/// `None` fields leave the underlying cell value untouched when the style
/// is applied, so styles compose by layering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color, if set.
    pub fg: Option<Color>,
    /// Background color, if set.
    pub bg: Option<Color>,
    /// Attribute flags to add.
    pub attrs: StyleFlags,
}

impl Style {
    /// Create an empty style.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: StyleFlags::empty(),
        }
    }

    /// Set the foreground color.
    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Add the bold attribute.
    #[must_use]
    pub const fn bold(self) -> Self {
        self.with_attr(StyleFlags::BOLD)
    }

    /// Add the dim attribute.
    #[must_use]
    pub const fn dim(self) -> Self {
        self.with_attr(StyleFlags::DIM)
    }

    /// Add the italic attribute.
    #[must_use]
    pub const fn italic(self) -> Self {
        self.with_attr(StyleFlags::ITALIC)
    }

    /// Add the underline attribute.
    #[must_use]
    pub const fn underline(self) -> Self {
        self.with_attr(StyleFlags::UNDERLINE)
    }

    /// Add the reversed attribute.
    #[must_use]
    pub const fn reversed(self) -> Self {
        self.with_attr(StyleFlags::REVERSED)
    }

    /// Add an attribute flag.
    #[must_use]
    pub const fn with_attr(mut self, flag: StyleFlags) -> Self {
        self.attrs = self.attrs.union(flag);
        self
    }

    /// Check whether an attribute flag is set.
    #[must_use]
    pub const fn has_attr(&self, flag: StyleFlags) -> bool {
        self.attrs.contains(flag)
    }

    /// Check whether the style sets nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attrs.is_empty()
    }

    /// Merge `other` over `self`: set fields of `other` win.
    #[must_use]
    pub fn patch(mut self, other: Style) -> Self {
        if other.fg.is_some() {
            self.fg = other.fg;
        }
        if other.bg.is_some() {
            self.bg = other.bg;
        }
        self.attrs |= other.attrs;
        self
    }
}
