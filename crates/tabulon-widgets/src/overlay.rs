#![forbid(unsafe_code)]

//! Overlay primitives: modal dialogs and edge-anchored sheets.
//!
//! Overlays are stateless about open/close — the page owns an
//! [`OverlayState`] and simply does not render a closed overlay, so a
//! closed overlay is absent from the frame entirely. While open, the state
//! holds a guard on a shared [`InputLock`]; the page consults
//! [`InputLock::is_locked`] to suppress its own scrolling and shortcuts.
//!
//! The lock is reference-counted: with two overlays open, closing one
//! keeps the page locked until the second closes too. Guards release on
//! every exit path — explicit close, Escape, backdrop click, or dropping
//! the state — so a lock can never leak past its overlay's lifetime.

use crate::Widget;
use crate::block::{Block, BorderType};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tabulon_core::event::{Event, KeyCode, KeyEventKind};
use tabulon_core::geometry::Rect;
use tabulon_render::frame::{Frame, HitId, HitRegion};
use tabulon_style::Style;

/// Named size presets mapped to maximum width constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlaySize {
    Small,
    #[default]
    Medium,
    Large,
    ExtraLarge,
    /// Span the whole available width.
    Full,
}

impl OverlaySize {
    /// The width this preset yields inside `available` cells.
    #[must_use]
    pub fn width(self, available: u16) -> u16 {
        let max = match self {
            OverlaySize::Small => 40,
            OverlaySize::Medium => 60,
            OverlaySize::Large => 80,
            OverlaySize::ExtraLarge => 100,
            OverlaySize::Full => u16::MAX,
        };
        available.min(max)
    }
}

/// Shared count of open overlays.
///
/// Clones share one counter. Locked iff at least one [`InputLockGuard`]
/// is alive.
#[derive(Debug, Clone, Default)]
pub struct InputLock {
    count: Arc<AtomicUsize>,
}

impl InputLock {
    /// Create an unlocked lock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a guard, locking until it is dropped.
    #[must_use]
    pub fn acquire(&self) -> InputLockGuard {
        self.count.fetch_add(1, Ordering::Relaxed);
        InputLockGuard {
            count: Arc::clone(&self.count),
        }
    }

    /// Whether any guard is currently alive.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.count.load(Ordering::Relaxed) > 0
    }
}

/// RAII guard decrementing the open-overlay count on drop.
#[derive(Debug)]
pub struct InputLockGuard {
    count: Arc<AtomicUsize>,
}

impl Drop for InputLockGuard {
    fn drop(&mut self) {
        self.count.fetch_sub(1, Ordering::Relaxed);
    }
}

/// Page-owned open/close state for one overlay.
#[derive(Debug)]
pub struct OverlayState {
    lock: InputLock,
    guard: Option<InputLockGuard>,
    hit_id: HitId,
}

impl OverlayState {
    /// Create a closed overlay state sharing the given lock.
    #[must_use]
    pub fn new(lock: InputLock, hit_id: HitId) -> Self {
        Self {
            lock,
            guard: None,
            hit_id,
        }
    }

    /// Whether the overlay is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.guard.is_some()
    }

    /// The hit ID this overlay's widgets register under.
    #[must_use]
    pub fn hit_id(&self) -> HitId {
        self.hit_id
    }

    /// Open the overlay, taking a lock guard. Idempotent.
    pub fn open(&mut self) {
        if self.guard.is_none() {
            self.guard = Some(self.lock.acquire());
        }
    }

    /// Close the overlay, releasing the lock guard. Idempotent.
    pub fn close(&mut self) {
        self.guard = None;
    }

    /// Handle an event while open. Escape closes the overlay and the event
    /// is reported consumed. Closed overlays consume nothing.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        if !self.is_open() {
            return false;
        }
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Press && key.code == KeyCode::Escape {
                self.close();
                return true;
            }
        }
        false
    }

    /// Route a hit-test result while open.
    ///
    /// A backdrop hit closes the overlay; a content hit is swallowed
    /// without closing (clicks inside do not reach the backdrop handler).
    /// Hits under other IDs, or while closed, are not consumed.
    pub fn handle_hit(&mut self, id: HitId, region: HitRegion) -> bool {
        if !self.is_open() || id != self.hit_id {
            return false;
        }
        match region {
            HitRegion::Backdrop => {
                self.close();
                true
            }
            _ => true,
        }
    }
}

/// A centered dialog over a dimmed backdrop.
///
/// Render only while the owning [`OverlayState`] is open; the widget
/// itself draws unconditionally.
#[derive(Debug, Clone)]
pub struct Modal<'a> {
    title: Option<&'a str>,
    size: OverlaySize,
    height: u16,
    backdrop_style: Style,
    panel_style: Style,
    hit_id: Option<HitId>,
}

impl<'a> Modal<'a> {
    /// Create a modal with the default (medium) size preset.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: None,
            size: OverlaySize::default(),
            height: 10,
            backdrop_style: Style::new().dim(),
            panel_style: Style::default(),
            hit_id: None,
        }
    }

    /// Set the panel title.
    #[must_use]
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    /// Set the size preset.
    #[must_use]
    pub fn size(mut self, size: OverlaySize) -> Self {
        self.size = size;
        self
    }

    /// Set the panel height in cells (clamped to the available area).
    #[must_use]
    pub fn height(mut self, height: u16) -> Self {
        self.height = height;
        self
    }

    /// Set the style washed over the backdrop.
    #[must_use]
    pub fn backdrop_style(mut self, style: Style) -> Self {
        self.backdrop_style = style;
        self
    }

    /// Set the panel fill style.
    #[must_use]
    pub fn panel_style(mut self, style: Style) -> Self {
        self.panel_style = style;
        self
    }

    /// Set the hit ID (usually [`OverlayState::hit_id`]) so backdrop and
    /// panel clicks can be routed through [`OverlayState::handle_hit`].
    #[must_use]
    pub fn hit_id(mut self, id: HitId) -> Self {
        self.hit_id = Some(id);
        self
    }

    /// The panel rectangle within `area`.
    #[must_use]
    pub fn panel_area(&self, area: Rect) -> Rect {
        area.centered(self.size.width(area.width), self.height.min(area.height))
    }

    /// The content rectangle (inside the panel borders) within `area`.
    #[must_use]
    pub fn content_area(&self, area: Rect) -> Rect {
        Block::bordered().inner(self.panel_area(area))
    }
}

impl Default for Modal<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Modal<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "Modal",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        if area.is_empty() {
            return;
        }

        frame.buffer.set_style(area, self.backdrop_style);
        if let Some(id) = self.hit_id {
            frame.register_hit(area, id, HitRegion::Backdrop, 0);
        }

        let panel = self.panel_area(area);
        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .style(self.panel_style);
        if let Some(title) = self.title {
            block = block.title(title);
        }
        block.render(panel, frame);

        // The panel overwrites the backdrop's hit cells, so clicks inside
        // never reach the backdrop handler.
        if let Some(id) = self.hit_id {
            frame.register_hit(panel, id, HitRegion::Content, 0);
        }
    }
}

/// Which edge a [`Sheet`] is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SheetSide {
    Left,
    #[default]
    Right,
}

/// A full-height panel sliding in from a screen edge, over a dimmed
/// backdrop. Same interaction contract as [`Modal`].
#[derive(Debug, Clone)]
pub struct Sheet<'a> {
    title: Option<&'a str>,
    size: OverlaySize,
    side: SheetSide,
    backdrop_style: Style,
    panel_style: Style,
    hit_id: Option<HitId>,
}

impl<'a> Sheet<'a> {
    /// Create a right-anchored sheet with the default size preset.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: None,
            size: OverlaySize::default(),
            side: SheetSide::default(),
            backdrop_style: Style::new().dim(),
            panel_style: Style::default(),
            hit_id: None,
        }
    }

    /// Set the panel title.
    #[must_use]
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    /// Set the size preset.
    #[must_use]
    pub fn size(mut self, size: OverlaySize) -> Self {
        self.size = size;
        self
    }

    /// Set the anchored edge.
    #[must_use]
    pub fn side(mut self, side: SheetSide) -> Self {
        self.side = side;
        self
    }

    /// Set the style washed over the backdrop.
    #[must_use]
    pub fn backdrop_style(mut self, style: Style) -> Self {
        self.backdrop_style = style;
        self
    }

    /// Set the panel fill style.
    #[must_use]
    pub fn panel_style(mut self, style: Style) -> Self {
        self.panel_style = style;
        self
    }

    /// Set the hit ID for backdrop/panel click routing.
    #[must_use]
    pub fn hit_id(mut self, id: HitId) -> Self {
        self.hit_id = Some(id);
        self
    }

    /// The panel rectangle within `area`.
    #[must_use]
    pub fn panel_area(&self, area: Rect) -> Rect {
        let width = self.size.width(area.width);
        let x = match self.side {
            SheetSide::Left => area.x,
            SheetSide::Right => area.right() - width,
        };
        Rect::new(x, area.y, width, area.height)
    }

    /// The content rectangle (inside the panel borders) within `area`.
    #[must_use]
    pub fn content_area(&self, area: Rect) -> Rect {
        Block::bordered().inner(self.panel_area(area))
    }
}

impl Default for Sheet<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Sheet<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "Sheet",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        if area.is_empty() {
            return;
        }

        frame.buffer.set_style(area, self.backdrop_style);
        if let Some(id) = self.hit_id {
            frame.register_hit(area, id, HitRegion::Backdrop, 0);
        }

        let panel = self.panel_area(area);
        let mut block = Block::bordered().style(self.panel_style);
        if let Some(title) = self.title {
            block = block.title(title);
        }
        block.render(panel, frame);

        if let Some(id) = self.hit_id {
            frame.register_hit(panel, id, HitRegion::Content, 0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabulon_core::event::KeyEvent;

    fn escape() -> Event {
        Event::Key(KeyEvent::new(KeyCode::Escape))
    }

    #[test]
    fn lock_counts_guards() {
        let lock = InputLock::new();
        assert!(!lock.is_locked());
        let a = lock.acquire();
        let b = lock.acquire();
        assert!(lock.is_locked());
        drop(a);
        assert!(lock.is_locked());
        drop(b);
        assert!(!lock.is_locked());
    }

    #[test]
    fn explicit_close_restores_lock() {
        let lock = InputLock::new();
        let mut state = OverlayState::new(lock.clone(), HitId::new(1));
        state.open();
        assert!(state.is_open());
        assert!(lock.is_locked());
        state.close();
        assert!(!state.is_open());
        assert!(!lock.is_locked());
    }

    #[test]
    fn escape_restores_lock() {
        let lock = InputLock::new();
        let mut state = OverlayState::new(lock.clone(), HitId::new(1));
        state.open();
        assert!(state.handle_event(&escape()));
        assert!(!state.is_open());
        assert!(!lock.is_locked());
    }

    #[test]
    fn backdrop_hit_restores_lock() {
        let lock = InputLock::new();
        let mut state = OverlayState::new(lock.clone(), HitId::new(1));
        state.open();
        assert!(state.handle_hit(HitId::new(1), HitRegion::Backdrop));
        assert!(!state.is_open());
        assert!(!lock.is_locked());
    }

    #[test]
    fn drop_while_open_restores_lock() {
        let lock = InputLock::new();
        let mut state = OverlayState::new(lock.clone(), HitId::new(1));
        state.open();
        drop(state);
        assert!(!lock.is_locked());
    }

    #[test]
    fn sibling_overlay_keeps_lock_alive() {
        let lock = InputLock::new();
        let mut a = OverlayState::new(lock.clone(), HitId::new(1));
        let mut b = OverlayState::new(lock.clone(), HitId::new(2));
        a.open();
        b.open();
        a.close();
        assert!(lock.is_locked());
        b.close();
        assert!(!lock.is_locked());
    }

    #[test]
    fn open_is_idempotent() {
        let lock = InputLock::new();
        let mut state = OverlayState::new(lock.clone(), HitId::new(1));
        state.open();
        state.open();
        state.close();
        assert!(!lock.is_locked());
    }

    #[test]
    fn content_hit_is_swallowed_without_closing() {
        let lock = InputLock::new();
        let mut state = OverlayState::new(lock.clone(), HitId::new(1));
        state.open();
        assert!(state.handle_hit(HitId::new(1), HitRegion::Content));
        assert!(state.is_open());
    }

    #[test]
    fn foreign_hits_and_closed_states_pass_through() {
        let lock = InputLock::new();
        let mut state = OverlayState::new(lock.clone(), HitId::new(1));
        assert!(!state.handle_hit(HitId::new(1), HitRegion::Backdrop));
        assert!(!state.handle_event(&escape()));
        state.open();
        assert!(!state.handle_hit(HitId::new(9), HitRegion::Backdrop));
        assert!(state.is_open());
    }

    #[test]
    fn escape_only_consumed_on_press() {
        let lock = InputLock::new();
        let mut state = OverlayState::new(lock.clone(), HitId::new(1));
        state.open();
        let release = Event::Key(KeyEvent {
            code: KeyCode::Escape,
            modifiers: tabulon_core::event::Modifiers::NONE,
            kind: KeyEventKind::Release,
        });
        assert!(!state.handle_event(&release));
        assert!(state.is_open());
    }

    #[test]
    fn size_presets_clamp_to_available() {
        assert_eq!(OverlaySize::Small.width(120), 40);
        assert_eq!(OverlaySize::Medium.width(120), 60);
        assert_eq!(OverlaySize::Large.width(120), 80);
        assert_eq!(OverlaySize::ExtraLarge.width(120), 100);
        assert_eq!(OverlaySize::Full.width(120), 120);
        assert_eq!(OverlaySize::Large.width(50), 50);
    }

    #[test]
    fn modal_centers_panel() {
        let modal = Modal::new().size(OverlaySize::Small).height(8);
        let panel = modal.panel_area(Rect::from_size(80, 24));
        assert_eq!(panel, Rect::new(20, 8, 40, 8));
        let content = modal.content_area(Rect::from_size(80, 24));
        assert_eq!(content, Rect::new(21, 9, 38, 6));
    }

    #[test]
    fn modal_hit_regions_backdrop_vs_content() {
        let mut frame = Frame::with_hit_grid(80, 24);
        Modal::new()
            .size(OverlaySize::Small)
            .height(8)
            .hit_id(HitId::new(3))
            .render(Rect::from_size(80, 24), &mut frame);

        // Outside the panel: backdrop.
        assert_eq!(
            frame.hit_test(1, 1),
            Some((HitId::new(3), HitRegion::Backdrop, 0))
        );
        // Inside the panel: content, not backdrop.
        assert_eq!(
            frame.hit_test(40, 12),
            Some((HitId::new(3), HitRegion::Content, 0))
        );
    }

    #[test]
    fn modal_dims_backdrop_and_draws_panel() {
        let mut frame = Frame::new(80, 24);
        Modal::new()
            .title("Detail")
            .height(8)
            .render(Rect::from_size(80, 24), &mut frame);
        assert!(
            frame
                .buffer
                .get(0, 0)
                .unwrap()
                .attrs
                .contains(tabulon_style::StyleFlags::DIM)
        );
        // Title appears on the panel border.
        let panel = Modal::new().height(8).panel_area(Rect::from_size(80, 24));
        let ch = frame.buffer.get(panel.x + 2, panel.y).unwrap().ch;
        assert_eq!(ch, 'D');
    }

    #[test]
    fn sheet_anchors_right_by_default() {
        let sheet = Sheet::new().size(OverlaySize::Small);
        let panel = sheet.panel_area(Rect::from_size(80, 24));
        assert_eq!(panel, Rect::new(40, 0, 40, 24));
    }

    #[test]
    fn sheet_anchors_left() {
        let sheet = Sheet::new().size(OverlaySize::Small).side(SheetSide::Left);
        let panel = sheet.panel_area(Rect::from_size(80, 24));
        assert_eq!(panel, Rect::new(0, 0, 40, 24));
    }

    #[test]
    fn sheet_hit_regions() {
        let mut frame = Frame::with_hit_grid(80, 24);
        Sheet::new()
            .size(OverlaySize::Small)
            .hit_id(HitId::new(4))
            .render(Rect::from_size(80, 24), &mut frame);
        assert_eq!(
            frame.hit_test(5, 5),
            Some((HitId::new(4), HitRegion::Backdrop, 0))
        );
        assert_eq!(
            frame.hit_test(60, 5),
            Some((HitId::new(4), HitRegion::Content, 0))
        );
    }
}
