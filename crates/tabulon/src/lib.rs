#![forbid(unsafe_code)]

//! Tabulon public facade crate.
//!
//! Re-exports the component kit's common types and offers a lightweight
//! prelude for day-to-day usage.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use tabulon_core::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent, MouseEventKind,
};
pub use tabulon_core::geometry::{Rect, Sides};

// --- Layout re-exports -----------------------------------------------------

pub use tabulon_layout::{Constraint, Direction, Flex};

// --- Render re-exports -----------------------------------------------------

pub use tabulon_render::buffer::Buffer;
pub use tabulon_render::cell::Cell;
pub use tabulon_render::frame::{Frame, HitGrid, HitId, HitRegion};

// --- Style re-exports ------------------------------------------------------

pub use tabulon_style::{Color, Style, StyleFlags};

// --- Widget re-exports -----------------------------------------------------

pub use tabulon_widgets::block::{Block, BorderType};
pub use tabulon_widgets::overlay::{
    InputLock, InputLockGuard, Modal, OverlaySize, OverlayState, Sheet, SheetSide,
};
pub use tabulon_widgets::pagination::{PageControls, PageToken, Pagination, page_window};
pub use tabulon_widgets::search::{SearchEvent, SearchInput};
pub use tabulon_widgets::table::{CellValue, Column, DataTable, DataTableState, RowKey};
pub use tabulon_widgets::{StatefulWidget, Widget};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Tabulon apps.
#[derive(Debug)]
pub enum Error {
    /// I/O failure during terminal operations.
    Io(std::io::Error),
    /// Terminal error with message.
    Terminal(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Terminal(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Standard result type for Tabulon APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CellValue, Column, Constraint, DataTable, DataTableState, Error, Event, Frame, HitId,
        HitRegion, InputLock, KeyCode, KeyEvent, Modal, Modifiers, OverlaySize, OverlayState,
        PageControls, Pagination, Rect, Result, RowKey, SearchEvent, SearchInput, Sheet,
        StatefulWidget, Style, Widget, page_window,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn prelude_builds_a_table() {
        struct Count(u32);
        impl RowKey for Count {}

        let columns = vec![Column::new("N", |c: &Count| Some(CellValue::Uint(c.0 as u64)))];
        let rows = vec![Count(1), Count(2), Count(3)];
        let mut frame = Frame::new(10, 5);
        Widget::render(
            &DataTable::new(&columns, &rows).pagination(Pagination::new(1, 1).total(3)),
            Rect::from_size(10, 5),
            &mut frame,
        );
    }

    #[test]
    fn error_from_io() {
        let err: Error = std::io::Error::other("boom").into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "boom");
    }
}
