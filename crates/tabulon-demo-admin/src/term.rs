#![forbid(unsafe_code)]

//! Terminal plumbing: raw mode, event polling, and frame presentation.
//!
//! The demo repaints the whole frame each pass; good enough at dashboard
//! sizes and keeps the presenter trivial.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event as cte;
use crossterm::style::{
    Attribute, Color as CtColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use crossterm::terminal::{
    Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{execute, queue};

use tabulon::{Color, Event, Frame, StyleFlags};

/// RAII guard for raw mode + alternate screen. Restores the terminal on
/// drop, including the unwind path.
pub struct TerminalGuard {
    out: io::Stdout,
}

impl TerminalGuard {
    /// Enter raw mode, the alternate screen, and mouse capture.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, cte::EnableMouseCapture, Hide)?;
        Ok(Self { out })
    }

    /// Current terminal size in cells.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        crossterm::terminal::size()
    }

    /// Wait up to `timeout` for an input event; `None` means tick.
    pub fn poll_event(&self, timeout: Duration) -> io::Result<Option<Event>> {
        if cte::poll(timeout)? {
            return Ok(Event::from_crossterm(cte::read()?));
        }
        Ok(None)
    }

    /// Paint a frame to the terminal.
    pub fn present(&mut self, frame: &Frame) -> io::Result<()> {
        queue!(self.out, Hide, MoveTo(0, 0), Clear(ClearType::All))?;

        let mut current: Option<(Option<Color>, Option<Color>, StyleFlags)> = None;
        for y in 0..frame.height() {
            queue!(self.out, MoveTo(0, y))?;
            for x in 0..frame.width() {
                let Some(cell) = frame.buffer.get(x, y) else {
                    continue;
                };
                if cell.is_continuation() {
                    continue;
                }
                let wanted = (cell.fg, cell.bg, cell.attrs);
                if current != Some(wanted) {
                    apply_style(&mut self.out, cell.fg, cell.bg, cell.attrs)?;
                    current = Some(wanted);
                }
                queue!(self.out, Print(cell.ch))?;
            }
        }
        queue!(self.out, ResetColor, SetAttribute(Attribute::Reset))?;

        if let Some((x, y)) = frame.cursor() {
            queue!(self.out, MoveTo(x, y), Show)?;
        }
        self.out.flush()
    }
}

fn apply_style(
    out: &mut io::Stdout,
    fg: Option<Color>,
    bg: Option<Color>,
    attrs: StyleFlags,
) -> io::Result<()> {
    queue!(out, ResetColor, SetAttribute(Attribute::Reset))?;
    if let Some(c) = fg {
        queue!(out, SetForegroundColor(to_ct(c)))?;
    }
    if let Some(c) = bg {
        queue!(out, SetBackgroundColor(to_ct(c)))?;
    }
    if attrs.contains(StyleFlags::BOLD) {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if attrs.contains(StyleFlags::DIM) {
        queue!(out, SetAttribute(Attribute::Dim))?;
    }
    if attrs.contains(StyleFlags::ITALIC) {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    if attrs.contains(StyleFlags::UNDERLINE) {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    if attrs.contains(StyleFlags::REVERSED) {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    Ok(())
}

fn to_ct(color: Color) -> CtColor {
    CtColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(self.out, cte::DisableMouseCapture, LeaveAlternateScreen, Show);
        let _ = disable_raw_mode();
    }
}
