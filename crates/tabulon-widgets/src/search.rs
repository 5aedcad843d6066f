#![forbid(unsafe_code)]

//! Search/filter input.
//!
//! A single-line query editor that notifies the page of text changes,
//! either immediately on every edit or debounced behind a deadline. Time
//! is always injected by the caller, never sampled here, so debounce
//! behavior is deterministic under test.

use crate::Widget;
use std::time::{Duration, Instant};
use tabulon_core::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use tabulon_core::geometry::Rect;
use tabulon_render::frame::Frame;
use tabulon_style::Style;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Notification that the query changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// The query text is now this value.
    Changed(String),
}

/// A single-line search input.
#[derive(Debug, Clone, Default)]
pub struct SearchInput {
    /// Query text.
    value: String,
    /// Cursor position (grapheme index).
    cursor: usize,
    /// Placeholder shown while empty.
    placeholder: String,
    /// Whether the input is focused (controls cursor output and editing).
    focused: bool,
    /// Debounce delay; `None` emits on every edit.
    debounce: Option<Duration>,
    /// Deadline for a pending debounced emission.
    deadline: Option<Instant>,
    style: Style,
    placeholder_style: Style,
}

const PROMPT: &str = "/ ";

impl SearchInput {
    /// Create an empty search input.
    #[must_use]
    pub fn new() -> Self {
        Self {
            placeholder_style: Style::new().dim(),
            ..Self::default()
        }
    }

    /// Set the placeholder text (builder).
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Debounce change notifications by `delay` (builder).
    #[must_use]
    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debounce = Some(delay);
        self
    }

    /// Set the text style (builder).
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the placeholder style (builder).
    #[must_use]
    pub fn with_placeholder_style(mut self, style: Style) -> Self {
        self.placeholder_style = style;
        self
    }

    /// Set whether the input is focused.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Whether the input is focused.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// The current query.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    fn grapheme_count(&self) -> usize {
        self.value.graphemes(true).count()
    }

    fn grapheme_byte_offset(&self, index: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Handle an event while focused.
    ///
    /// Editing keys mutate the query; with no debounce configured the
    /// change is reported immediately, otherwise a deadline of
    /// `now + delay` is armed and [`poll`](Self::poll) reports it later.
    pub fn handle_event(&mut self, event: &Event, now: Instant) -> Option<SearchEvent> {
        if !self.focused {
            return None;
        }
        let Event::Key(key) = event else {
            return None;
        };
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if self.handle_key(key) {
            return self.note_change(now);
        }
        None
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.ctrl() => {
                let at = self.grapheme_byte_offset(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                true
            }
            KeyCode::Char('u') if key.ctrl() => {
                let changed = !self.value.is_empty();
                self.value.clear();
                self.cursor = 0;
                changed
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    let start = self.grapheme_byte_offset(self.cursor - 1);
                    let end = self.grapheme_byte_offset(self.cursor);
                    self.value.drain(start..end);
                    self.cursor -= 1;
                    true
                } else {
                    false
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.grapheme_count() {
                    let start = self.grapheme_byte_offset(self.cursor);
                    let end = self.grapheme_byte_offset(self.cursor + 1);
                    self.value.drain(start..end);
                    true
                } else {
                    false
                }
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.grapheme_count());
                false
            }
            KeyCode::Home => {
                self.cursor = 0;
                false
            }
            KeyCode::End => {
                self.cursor = self.grapheme_count();
                false
            }
            _ => false,
        }
    }

    fn note_change(&mut self, now: Instant) -> Option<SearchEvent> {
        match self.debounce {
            None => Some(SearchEvent::Changed(self.value.clone())),
            Some(delay) => {
                self.deadline = Some(now + delay);
                None
            }
        }
    }

    /// Report a pending debounced change once its deadline has passed.
    ///
    /// Repeated edits push the deadline forward, so a burst of typing
    /// coalesces into one notification.
    pub fn poll(&mut self, now: Instant) -> Option<SearchEvent> {
        let deadline = self.deadline?;
        if now >= deadline {
            self.deadline = None;
            Some(SearchEvent::Changed(self.value.clone()))
        } else {
            None
        }
    }

    /// Clear the query. The change is notified like any edit.
    pub fn clear(&mut self, now: Instant) -> Option<SearchEvent> {
        if self.value.is_empty() {
            return None;
        }
        self.value.clear();
        self.cursor = 0;
        self.note_change(now)
    }
}

impl Widget for SearchInput {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }

        let max_x = area.right();
        let x = frame.buffer.set_string(area.x, area.y, PROMPT, self.style, max_x);

        if self.value.is_empty() {
            frame
                .buffer
                .set_string(x, area.y, &self.placeholder, self.placeholder_style, max_x);
        } else {
            frame.buffer.set_string(x, area.y, &self.value, self.style, max_x);
        }

        if self.focused {
            let before = self.grapheme_byte_offset(self.cursor);
            let width = UnicodeWidthStr::width(&self.value[..before]) as u16;
            let cx = x.saturating_add(width).min(max_x.saturating_sub(1));
            frame.set_cursor(Some((cx, area.y)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c)))
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code))
    }

    fn t0() -> Instant {
        Instant::now()
    }

    fn focused() -> SearchInput {
        let mut input = SearchInput::new();
        input.set_focused(true);
        input
    }

    #[test]
    fn unfocused_ignores_input() {
        let mut input = SearchInput::new();
        assert_eq!(input.handle_event(&press('a'), t0()), None);
        assert_eq!(input.value(), "");
    }

    #[test]
    fn immediate_mode_emits_every_edit() {
        let mut input = focused();
        let now = t0();
        assert_eq!(
            input.handle_event(&press('a'), now),
            Some(SearchEvent::Changed("a".into()))
        );
        assert_eq!(
            input.handle_event(&press('b'), now),
            Some(SearchEvent::Changed("ab".into()))
        );
    }

    #[test]
    fn backspace_emits_and_removes() {
        let mut input = focused();
        let now = t0();
        input.handle_event(&press('h'), now);
        input.handle_event(&press('i'), now);
        assert_eq!(
            input.handle_event(&key(KeyCode::Backspace), now),
            Some(SearchEvent::Changed("h".into()))
        );
    }

    #[test]
    fn backspace_at_start_is_silent() {
        let mut input = focused();
        assert_eq!(input.handle_event(&key(KeyCode::Backspace), t0()), None);
    }

    #[test]
    fn cursor_movement_does_not_emit() {
        let mut input = focused();
        let now = t0();
        input.handle_event(&press('a'), now);
        assert_eq!(input.handle_event(&key(KeyCode::Left), now), None);
        assert_eq!(input.handle_event(&key(KeyCode::Home), now), None);
        assert_eq!(input.handle_event(&key(KeyCode::End), now), None);
    }

    #[test]
    fn insert_at_cursor_after_move() {
        let mut input = focused();
        let now = t0();
        input.handle_event(&press('a'), now);
        input.handle_event(&press('c'), now);
        input.handle_event(&key(KeyCode::Left), now);
        assert_eq!(
            input.handle_event(&press('b'), now),
            Some(SearchEvent::Changed("abc".into()))
        );
    }

    #[test]
    fn delete_forward() {
        let mut input = focused();
        let now = t0();
        input.handle_event(&press('a'), now);
        input.handle_event(&press('b'), now);
        input.handle_event(&key(KeyCode::Home), now);
        assert_eq!(
            input.handle_event(&key(KeyCode::Delete), now),
            Some(SearchEvent::Changed("b".into()))
        );
    }

    #[test]
    fn ctrl_u_clears() {
        let mut input = focused();
        let now = t0();
        input.handle_event(&press('x'), now);
        let ev = Event::Key(
            KeyEvent::new(KeyCode::Char('u'))
                .with_modifiers(tabulon_core::event::Modifiers::CTRL),
        );
        assert_eq!(
            input.handle_event(&ev, now),
            Some(SearchEvent::Changed(String::new()))
        );
    }

    #[test]
    fn grapheme_aware_backspace() {
        let mut input = focused();
        let now = t0();
        input.handle_event(&press('é'), now);
        input.handle_event(&press('b'), now);
        input.handle_event(&key(KeyCode::Backspace), now);
        assert_eq!(
            input.handle_event(&key(KeyCode::Backspace), now),
            Some(SearchEvent::Changed(String::new()))
        );
    }

    #[test]
    fn debounce_arms_deadline_instead_of_emitting() {
        let mut input = focused().with_debounce(Duration::from_millis(200));
        let now = t0();
        assert_eq!(input.handle_event(&press('a'), now), None);
        assert_eq!(input.poll(now), None);
        assert_eq!(input.poll(now + Duration::from_millis(100)), None);
        assert_eq!(
            input.poll(now + Duration::from_millis(200)),
            Some(SearchEvent::Changed("a".into()))
        );
        // Fired once; nothing further pending.
        assert_eq!(input.poll(now + Duration::from_secs(1)), None);
    }

    #[test]
    fn debounce_coalesces_bursts() {
        let mut input = focused().with_debounce(Duration::from_millis(200));
        let now = t0();
        input.handle_event(&press('a'), now);
        input.handle_event(&press('b'), now + Duration::from_millis(150));
        // First deadline would have been now+200; the second edit pushed it.
        assert_eq!(input.poll(now + Duration::from_millis(250)), None);
        assert_eq!(
            input.poll(now + Duration::from_millis(350)),
            Some(SearchEvent::Changed("ab".into()))
        );
    }

    #[test]
    fn clear_notifies_like_an_edit() {
        let mut input = focused();
        let now = t0();
        input.handle_event(&press('q'), now);
        assert_eq!(
            input.clear(now),
            Some(SearchEvent::Changed(String::new()))
        );
        assert_eq!(input.clear(now), None);
    }

    fn row_text(frame: &Frame, y: u16) -> String {
        let mut out = String::new();
        for x in 0..frame.width() {
            if let Some(cell) = frame.buffer.get(x, y) {
                if !cell.is_continuation() {
                    out.push(cell.ch);
                }
            }
        }
        out.trim_end().to_string()
    }

    #[test]
    fn renders_prompt_and_value() {
        let mut input = focused();
        input.handle_event(&press('h'), t0());
        input.handle_event(&press('i'), t0());
        let mut frame = Frame::new(20, 1);
        input.render(Rect::new(0, 0, 20, 1), &mut frame);
        assert_eq!(row_text(&frame, 0), "/ hi");
    }

    #[test]
    fn renders_placeholder_when_empty() {
        let input = SearchInput::new().with_placeholder("Filter members");
        let mut frame = Frame::new(30, 1);
        input.render(Rect::new(0, 0, 30, 1), &mut frame);
        assert_eq!(row_text(&frame, 0), "/ Filter members");
    }

    #[test]
    fn focused_input_parks_cursor() {
        let mut input = focused();
        input.handle_event(&press('a'), t0());
        let mut frame = Frame::new(20, 1);
        input.render(Rect::new(0, 0, 20, 1), &mut frame);
        assert_eq!(frame.cursor(), Some((3, 0)));
    }

    #[test]
    fn unfocused_input_leaves_cursor_alone() {
        let input = SearchInput::new();
        let mut frame = Frame::new(20, 1);
        input.render(Rect::new(0, 0, 20, 1), &mut frame);
        assert_eq!(frame.cursor(), None);
    }
}
