#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! All events derive `Clone`, `PartialEq`, and `Eq` so tests can construct
//! and compare them directly. Mouse coordinates are 0-indexed.

use bitflags::bitflags;
#[cfg(not(target_arch = "wasm32"))]
use crossterm::event as cte;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A mouse event.
    Mouse(MouseEvent),

    /// Terminal was resized.
    Resize {
        /// New terminal width in columns.
        width: u16,
        /// New terminal height in rows.
        height: u16,
    },

    /// A periodic tick from the host loop, used for deadline-based work
    /// such as debounce polling.
    Tick,
}

impl Event {
    /// Convert a Crossterm event into a canonical [`Event`].
    ///
    /// Returns `None` for event kinds this kit does not consume
    /// (focus, bracketed paste).
    #[must_use]
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_crossterm(event: cte::Event) -> Option<Self> {
        match event {
            cte::Event::Key(key) => Some(Event::Key(KeyEvent {
                code: KeyCode::from_crossterm(key.code)?,
                modifiers: Modifiers::from_crossterm(key.modifiers),
                kind: match key.kind {
                    cte::KeyEventKind::Press => KeyEventKind::Press,
                    cte::KeyEventKind::Repeat => KeyEventKind::Repeat,
                    cte::KeyEventKind::Release => KeyEventKind::Release,
                },
            })),
            cte::Event::Mouse(mouse) => Some(Event::Mouse(MouseEvent {
                kind: MouseEventKind::from_crossterm(mouse.kind)?,
                x: mouse.column,
                y: mouse.row,
                modifiers: Modifiers::from_crossterm(mouse.modifiers),
            })),
            cte::Event::Resize(width, height) => Some(Event::Resize { width, height }),
            _ => None,
        }
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with no modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Check if Ctrl is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Shift is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Backspace key.
    Backspace,

    /// Tab key.
    Tab,

    /// Shift+Tab (back-tab).
    BackTab,

    /// Delete key.
    Delete,

    /// Home key.
    Home,

    /// End key.
    End,

    /// Page Up key.
    PageUp,

    /// Page Down key.
    PageDown,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,
}

impl KeyCode {
    #[cfg(not(target_arch = "wasm32"))]
    fn from_crossterm(code: cte::KeyCode) -> Option<Self> {
        Some(match code {
            cte::KeyCode::Char(c) => KeyCode::Char(c),
            cte::KeyCode::Enter => KeyCode::Enter,
            cte::KeyCode::Esc => KeyCode::Escape,
            cte::KeyCode::Backspace => KeyCode::Backspace,
            cte::KeyCode::Tab => KeyCode::Tab,
            cte::KeyCode::BackTab => KeyCode::BackTab,
            cte::KeyCode::Delete => KeyCode::Delete,
            cte::KeyCode::Home => KeyCode::Home,
            cte::KeyCode::End => KeyCode::End,
            cte::KeyCode::PageUp => KeyCode::PageUp,
            cte::KeyCode::PageDown => KeyCode::PageDown,
            cte::KeyCode::Up => KeyCode::Up,
            cte::KeyCode::Down => KeyCode::Down,
            cte::KeyCode::Left => KeyCode::Left,
            cte::KeyCode::Right => KeyCode::Right,
            _ => return None,
        })
    }
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

impl Modifiers {
    #[cfg(not(target_arch = "wasm32"))]
    fn from_crossterm(mods: cte::KeyModifiers) -> Self {
        let mut out = Modifiers::NONE;
        if mods.contains(cte::KeyModifiers::SHIFT) {
            out |= Modifiers::SHIFT;
        }
        if mods.contains(cte::KeyModifiers::ALT) {
            out |= Modifiers::ALT;
        }
        if mods.contains(cte::KeyModifiers::CONTROL) {
            out |= Modifiers::CTRL;
        }
        out
    }
}

/// A mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// The type of mouse event.
    pub kind: MouseEventKind,

    /// X coordinate (0-indexed, leftmost column is 0).
    pub x: u16,

    /// Y coordinate (0-indexed, topmost row is 0).
    pub y: u16,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// Create a new mouse event.
    #[must_use]
    pub const fn new(kind: MouseEventKind, x: u16, y: u16) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Get the position as a tuple.
    #[must_use]
    pub const fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }
}

/// The type of mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// Mouse button pressed down.
    Down(MouseButton),

    /// Mouse button released.
    Up(MouseButton),

    /// Mouse dragged while button held.
    Drag(MouseButton),

    /// Mouse moved (no button pressed).
    Moved,

    /// Mouse wheel scrolled up.
    ScrollUp,

    /// Mouse wheel scrolled down.
    ScrollDown,
}

impl MouseEventKind {
    #[cfg(not(target_arch = "wasm32"))]
    fn from_crossterm(kind: cte::MouseEventKind) -> Option<Self> {
        Some(match kind {
            cte::MouseEventKind::Down(b) => MouseEventKind::Down(MouseButton::from_crossterm(b)),
            cte::MouseEventKind::Up(b) => MouseEventKind::Up(MouseButton::from_crossterm(b)),
            cte::MouseEventKind::Drag(b) => MouseEventKind::Drag(MouseButton::from_crossterm(b)),
            cte::MouseEventKind::Moved => MouseEventKind::Moved,
            cte::MouseEventKind::ScrollUp => MouseEventKind::ScrollUp,
            cte::MouseEventKind::ScrollDown => MouseEventKind::ScrollDown,
            _ => return None,
        })
    }
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,

    /// Right mouse button.
    Right,

    /// Middle mouse button.
    Middle,
}

impl MouseButton {
    #[cfg(not(target_arch = "wasm32"))]
    fn from_crossterm(button: cte::MouseButton) -> Self {
        match button {
            cte::MouseButton::Left => MouseButton::Left,
            cte::MouseButton::Right => MouseButton::Right,
            cte::MouseButton::Middle => MouseButton::Middle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_builders() {
        let ev = KeyEvent::new(KeyCode::Char('a')).with_modifiers(Modifiers::CTRL);
        assert!(ev.is_char('a'));
        assert!(ev.ctrl());
        assert!(!ev.shift());
        assert_eq!(ev.kind, KeyEventKind::Press);
    }

    #[test]
    fn mouse_event_position() {
        let ev = MouseEvent::new(MouseEventKind::Down(MouseButton::Left), 3, 7);
        assert_eq!(ev.position(), (3, 7));
        assert_eq!(ev.modifiers, Modifiers::NONE);
    }

    #[test]
    fn modifiers_combine() {
        let m = Modifiers::SHIFT | Modifiers::CTRL;
        assert!(m.contains(Modifiers::SHIFT));
        assert!(m.contains(Modifiers::CTRL));
        assert!(!m.contains(Modifiers::ALT));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn crossterm_key_conversion() {
        let ct = cte::Event::Key(cte::KeyEvent::new(
            cte::KeyCode::Esc,
            cte::KeyModifiers::NONE,
        ));
        assert_eq!(
            Event::from_crossterm(ct),
            Some(Event::Key(KeyEvent::new(KeyCode::Escape)))
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn crossterm_unmapped_events_drop() {
        assert_eq!(Event::from_crossterm(cte::Event::FocusGained), None);
    }
}
