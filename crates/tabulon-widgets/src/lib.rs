#![forbid(unsafe_code)]

//! Tabulon's component set: data table, pagination, overlays, search.

pub mod block;
pub mod overlay;
pub mod pagination;
pub mod search;
pub mod table;

use tabulon_core::geometry::Rect;
use tabulon_render::frame::Frame;

/// A `Widget` is a renderable component.
///
/// Widgets render themselves into a [`Frame`] within a given [`Rect`] and
/// hold no mutable state of their own; anything that must survive a render
/// pass lives in a companion state type (see [`StatefulWidget`]).
pub trait Widget {
    /// Render the widget into the frame at the given area.
    fn render(&self, area: Rect, frame: &mut Frame);
}

/// A `Widget` that renders based on mutable state owned by the caller.
pub trait StatefulWidget {
    type State;

    /// Render the widget into the frame with mutable state.
    fn render(&self, area: Rect, frame: &mut Frame, state: &mut Self::State);
}
