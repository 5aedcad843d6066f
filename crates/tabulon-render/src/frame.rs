#![forbid(unsafe_code)]

//! Frames and hit testing.
//!
//! A [`Frame`] is the render target for one pass: a [`Buffer`] plus an
//! optional [`HitGrid`] mapping screen cells back to the widget that drew
//! them. Widgets register hit regions as they render; because later
//! registrations overwrite earlier ones, the topmost-drawn widget wins a
//! hit test. Overlays rely on this: the backdrop registers first, then the
//! content panel overwrites its own cells, so a click inside the panel
//! never reaches the backdrop handler.

use crate::buffer::Buffer;
use tabulon_core::geometry::Rect;

/// Identifier a widget instance uses to claim hit regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HitId(pub u32);

impl HitId {
    /// Create a new hit ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// What kind of surface a hit region covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitRegion {
    /// Regular widget content (table rows, panel interiors).
    Content,
    /// An activatable control (page tokens, prev/next).
    Button,
    /// An overlay backdrop; a hit here requests dismissal.
    Backdrop,
}

/// Per-cell hit ownership for one frame.
#[derive(Debug, Clone)]
pub struct HitGrid {
    width: u16,
    height: u16,
    cells: Vec<Option<(HitId, HitRegion, u64)>>,
}

impl HitGrid {
    /// Create an empty hit grid.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Claim a rectangle for a widget. Later registrations overwrite
    /// earlier ones (topmost wins).
    pub fn register(&mut self, rect: Rect, id: HitId, region: HitRegion, data: u64) {
        let bounds = Rect::from_size(self.width, self.height);
        let rect = rect.intersection(&bounds);
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                if let Some(i) = self.index(x, y) {
                    self.cells[i] = Some((id, region, data));
                }
            }
        }
    }

    /// Look up the owner of a cell.
    #[must_use]
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, u64)> {
        self.index(x, y).and_then(|i| self.cells[i])
    }

    /// Forget all registrations.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

/// The render target for one pass.
#[derive(Debug)]
pub struct Frame {
    /// The cell buffer widgets draw into.
    pub buffer: Buffer,
    hit_grid: Option<HitGrid>,
    cursor: Option<(u16, u16)>,
}

impl Frame {
    /// Create a frame without hit testing.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            hit_grid: None,
            cursor: None,
        }
    }

    /// Create a frame with hit testing enabled.
    pub fn with_hit_grid(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            hit_grid: Some(HitGrid::new(width, height)),
            cursor: None,
        }
    }

    /// Frame width in cells.
    #[must_use]
    pub fn width(&self) -> u16 {
        self.buffer.width()
    }

    /// Frame height in cells.
    #[must_use]
    pub fn height(&self) -> u16 {
        self.buffer.height()
    }

    /// The full frame area.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.buffer.bounds()
    }

    /// Register a hit region if hit testing is enabled; no-op otherwise.
    pub fn register_hit(&mut self, rect: Rect, id: HitId, region: HitRegion, data: u64) {
        if let Some(grid) = self.hit_grid.as_mut() {
            grid.register(rect, id, region, data);
        }
    }

    /// Look up the hit owner of a cell, if hit testing is enabled.
    #[must_use]
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, u64)> {
        self.hit_grid.as_ref().and_then(|grid| grid.hit_test(x, y))
    }

    /// Where the terminal cursor should be parked, if anywhere.
    ///
    /// Focused text inputs set this so the host can show a hardware cursor.
    pub fn set_cursor(&mut self, position: Option<(u16, u16)>) {
        self.cursor = position;
    }

    /// The requested cursor position.
    #[must_use]
    pub fn cursor(&self) -> Option<(u16, u16)> {
        self.cursor
    }

    /// Reset buffer, hit grid, and cursor for reuse on the next pass.
    pub fn reset(&mut self) {
        self.buffer.clear();
        if let Some(grid) = self.hit_grid.as_mut() {
            grid.clear();
        }
        self.cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_without_grid_is_none() {
        let frame = Frame::new(5, 5);
        assert!(frame.hit_test(2, 2).is_none());
    }

    #[test]
    fn register_and_hit() {
        let mut frame = Frame::with_hit_grid(10, 10);
        frame.register_hit(Rect::new(2, 2, 3, 3), HitId::new(7), HitRegion::Button, 42);
        assert_eq!(
            frame.hit_test(3, 3),
            Some((HitId::new(7), HitRegion::Button, 42))
        );
        assert!(frame.hit_test(0, 0).is_none());
        assert!(frame.hit_test(5, 2).is_none());
    }

    #[test]
    fn later_registration_wins() {
        let mut frame = Frame::with_hit_grid(10, 10);
        frame.register_hit(frame.bounds(), HitId::new(1), HitRegion::Backdrop, 0);
        frame.register_hit(Rect::new(2, 2, 4, 4), HitId::new(2), HitRegion::Content, 0);
        assert_eq!(
            frame.hit_test(3, 3),
            Some((HitId::new(2), HitRegion::Content, 0))
        );
        assert_eq!(
            frame.hit_test(0, 0),
            Some((HitId::new(1), HitRegion::Backdrop, 0))
        );
    }

    #[test]
    fn register_is_clipped_to_bounds() {
        let mut frame = Frame::with_hit_grid(4, 4);
        frame.register_hit(Rect::new(2, 2, 10, 10), HitId::new(1), HitRegion::Content, 0);
        assert!(frame.hit_test(3, 3).is_some());
        assert!(frame.hit_test(5, 5).is_none());
    }

    #[test]
    fn reset_clears_everything() {
        let mut frame = Frame::with_hit_grid(4, 4);
        frame
            .buffer
            .set_string(0, 0, "x", tabulon_style::Style::default(), 4);
        frame.register_hit(frame.bounds(), HitId::new(1), HitRegion::Content, 0);
        frame.set_cursor(Some((1, 1)));
        frame.reset();
        assert!(frame.buffer.get(0, 0).unwrap().is_empty());
        assert!(frame.hit_test(0, 0).is_none());
        assert!(frame.cursor().is_none());
    }
}
