#![forbid(unsafe_code)]

//! Bordered container.

use crate::Widget;
use tabulon_core::geometry::{Rect, Sides};
use tabulon_render::cell::Cell;
use tabulon_render::frame::Frame;
use tabulon_style::Style;
use unicode_width::UnicodeWidthStr;

/// Border character sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderType {
    /// Single-line box drawing characters.
    #[default]
    Plain,
    /// Single-line with rounded corners.
    Rounded,
}

struct BorderSet {
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    horizontal: char,
    vertical: char,
}

impl BorderType {
    fn charset(self) -> BorderSet {
        match self {
            BorderType::Plain => BorderSet {
                top_left: '┌',
                top_right: '┐',
                bottom_left: '└',
                bottom_right: '┘',
                horizontal: '─',
                vertical: '│',
            },
            BorderType::Rounded => BorderSet {
                top_left: '╭',
                top_right: '╮',
                bottom_left: '╰',
                bottom_right: '╯',
                horizontal: '─',
                vertical: '│',
            },
        }
    }
}

/// A bordered box with an optional title, used as chrome for tables,
/// modals, and sheets.
#[derive(Debug, Clone, Default)]
pub struct Block<'a> {
    border_type: BorderType,
    border_style: Style,
    title: Option<&'a str>,
    style: Style,
}

impl<'a> Block<'a> {
    /// Create a block with all four borders.
    pub fn bordered() -> Self {
        Self::default()
    }

    /// Set the border character set.
    pub fn border_type(mut self, border_type: BorderType) -> Self {
        self.border_type = border_type;
        self
    }

    /// Set the style applied to border characters.
    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    /// Set the title displayed on the top border.
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    /// Set the fill style for the block interior.
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// The area inside the borders.
    pub fn inner(&self, area: Rect) -> Rect {
        area.inner(Sides::all(1))
    }
}

impl Widget for Block<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.width < 2 || area.height < 2 {
            return;
        }

        let set = self.border_type.charset();
        let right = area.right() - 1;
        let bottom = area.bottom() - 1;

        // Interior fill first so borders and title draw over it.
        frame
            .buffer
            .fill(area, Cell::styled(' ', self.style));

        for x in (area.x + 1)..right {
            frame
                .buffer
                .set(x, area.y, Cell::styled(set.horizontal, self.border_style));
            frame
                .buffer
                .set(x, bottom, Cell::styled(set.horizontal, self.border_style));
        }
        for y in (area.y + 1)..bottom {
            frame
                .buffer
                .set(area.x, y, Cell::styled(set.vertical, self.border_style));
            frame
                .buffer
                .set(right, y, Cell::styled(set.vertical, self.border_style));
        }
        frame
            .buffer
            .set(area.x, area.y, Cell::styled(set.top_left, self.border_style));
        frame
            .buffer
            .set(right, area.y, Cell::styled(set.top_right, self.border_style));
        frame
            .buffer
            .set(area.x, bottom, Cell::styled(set.bottom_left, self.border_style));
        frame
            .buffer
            .set(right, bottom, Cell::styled(set.bottom_right, self.border_style));

        if let Some(title) = self.title {
            let max = right.saturating_sub(area.x + 2);
            if max > 0 && UnicodeWidthStr::width(title) > 0 {
                frame
                    .buffer
                    .set_string(area.x + 2, area.y, title, self.border_style, area.x + 2 + max);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ch(frame: &Frame, x: u16, y: u16) -> char {
        frame.buffer.get(x, y).map(|c| c.ch).unwrap_or('?')
    }

    #[test]
    fn draws_plain_corners() {
        let mut frame = Frame::new(6, 4);
        Block::bordered().render(Rect::new(0, 0, 6, 4), &mut frame);
        assert_eq!(ch(&frame, 0, 0), '┌');
        assert_eq!(ch(&frame, 5, 0), '┐');
        assert_eq!(ch(&frame, 0, 3), '└');
        assert_eq!(ch(&frame, 5, 3), '┘');
        assert_eq!(ch(&frame, 2, 0), '─');
        assert_eq!(ch(&frame, 0, 2), '│');
    }

    #[test]
    fn rounded_corners() {
        let mut frame = Frame::new(4, 3);
        Block::bordered()
            .border_type(BorderType::Rounded)
            .render(Rect::new(0, 0, 4, 3), &mut frame);
        assert_eq!(ch(&frame, 0, 0), '╭');
        assert_eq!(ch(&frame, 3, 2), '╯');
    }

    #[test]
    fn title_on_top_border() {
        let mut frame = Frame::new(12, 3);
        Block::bordered()
            .title("Hi")
            .render(Rect::new(0, 0, 12, 3), &mut frame);
        assert_eq!(ch(&frame, 2, 0), 'H');
        assert_eq!(ch(&frame, 3, 0), 'i');
    }

    #[test]
    fn inner_shrinks_by_one() {
        let block = Block::bordered();
        assert_eq!(block.inner(Rect::new(0, 0, 10, 5)), Rect::new(1, 1, 8, 3));
    }

    #[test]
    fn too_small_area_renders_nothing() {
        let mut frame = Frame::new(3, 3);
        Block::bordered().render(Rect::new(0, 0, 1, 1), &mut frame);
        assert!(frame.buffer.get(0, 0).unwrap().is_empty());
    }

    #[test]
    fn interior_is_filled_with_style() {
        let mut frame = Frame::new(5, 4);
        let style = Style::new().bg(tabulon_style::Color::DARK_GRAY);
        Block::bordered().style(style).render(Rect::new(0, 0, 5, 4), &mut frame);
        assert_eq!(
            frame.buffer.get(2, 1).unwrap().bg,
            Some(tabulon_style::Color::DARK_GRAY)
        );
    }
}
