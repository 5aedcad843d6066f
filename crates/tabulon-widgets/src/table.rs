#![forbid(unsafe_code)]

//! Generic data table.
//!
//! [`DataTable`] renders already-fetched records: a header row from column
//! labels, one line per record in input order, an empty-state message, a
//! loading overlay, and an optional pagination strip. It never sorts,
//! filters, or slices the rows it is given; paging and ordering belong to
//! the caller.

use crate::block::Block;
use crate::pagination::{PageControls, Pagination};
use crate::{StatefulWidget, Widget};
use std::borrow::Cow;
use std::fmt;
use tabulon_core::geometry::Rect;
use tabulon_layout::{Constraint, Flex};
use tabulon_render::frame::{Frame, HitId, HitRegion};
use tabulon_style::Style;
use unicode_width::UnicodeWidthStr;

/// A displayable cell value.
///
/// No implicit formatting happens here: dates, currencies, and locale
/// concerns stay at the call site, inside the column accessor.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Str(s) => f.write_str(s),
            CellValue::Int(n) => write!(f, "{n}"),
            CellValue::Uint(n) => write!(f, "{n}"),
            CellValue::Float(n) => write!(f, "{n}"),
            CellValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Str(s.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Str(s)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Int(n)
    }
}

impl From<u64> for CellValue {
    fn from(n: u64) -> Self {
        CellValue::Uint(n)
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        CellValue::Uint(n as u64)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Float(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

enum Accessor<R> {
    /// Plain value lookup; `None` renders as the empty string.
    Value(Box<dyn Fn(&R) -> Option<CellValue>>),
    /// Caller-controlled content and style, given the row and its index.
    Styled(Box<dyn Fn(&R, usize) -> (String, Style)>),
}

/// Describes one table column: a header label, a width constraint, and an
/// accessor resolving a row to cell content.
///
/// The accessor function replaces a stringly-typed field lookup: the
/// compiler checks that the column reads fields the row type actually has.
pub struct Column<R> {
    label: String,
    width: Constraint,
    accessor: Accessor<R>,
}

impl<R> Column<R> {
    /// A column rendering a plain value.
    ///
    /// `None` renders as the empty string. A present-but-zero value is not
    /// treated as absent: `Some(CellValue::Uint(0))` renders `"0"`.
    pub fn new(
        label: impl Into<String>,
        accessor: impl Fn(&R) -> Option<CellValue> + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            width: Constraint::Fill,
            accessor: Accessor::Value(Box::new(accessor)),
        }
    }

    /// A column with caller-controlled content and style (status badges,
    /// emphasis, row numbering).
    pub fn styled(
        label: impl Into<String>,
        accessor: impl Fn(&R, usize) -> (String, Style) + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            width: Constraint::Fill,
            accessor: Accessor::Styled(Box::new(accessor)),
        }
    }

    /// Set the column width constraint (default: share leftover space).
    #[must_use]
    pub fn width(mut self, width: Constraint) -> Self {
        self.width = width;
        self
    }

    /// The header label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    fn resolve(&self, row: &R, index: usize) -> (String, Style) {
        match &self.accessor {
            Accessor::Value(f) => {
                let text = f(row).map(|v| v.to_string()).unwrap_or_default();
                (text, Style::default())
            }
            Accessor::Styled(f) => f(row, index),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("label", &self.label)
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

/// Row identity for selection stability.
///
/// Rows with a stable identifier return it here; selection then follows
/// the record across reorders and refetches. The default (`None`) falls
/// back to positional identity, which does NOT survive reordering or
/// filtering — acceptable for static lists, wrong for anything that
/// re-sorts. Tests characterize both behaviors.
pub trait RowKey {
    /// A stable identifier for this row, if it has one.
    fn row_key(&self) -> Option<Cow<'_, str>> {
        None
    }
}

/// Mutable state for a [`DataTable`].
#[derive(Debug, Clone, Default)]
pub struct DataTableState {
    /// First visible row index.
    pub offset: usize,
    /// Index of the currently selected row, if any.
    pub selected: Option<usize>,
    /// Identity key of the selected row, when the row type provides one.
    /// Maintained by the render pass; used to re-attach selection after
    /// the row slice is reordered or replaced.
    selected_key: Option<String>,
}

impl DataTableState {
    /// Set the selected row index, resetting offset on deselect.
    ///
    /// The identity key is recomputed on the next render pass.
    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index;
        self.selected_key = None;
        if index.is_none() {
            self.offset = 0;
        }
    }

    /// Move the selection down by one, saturating at `len - 1`.
    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let next = match self.selected {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        self.select(Some(next));
    }

    /// Move the selection up by one, saturating at 0.
    pub fn select_prev(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let prev = match self.selected {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.select(Some(prev));
    }
}

/// A generic paginated data table widget.
///
/// Rows and columns are borrowed for the duration of the render pass and
/// never mutated. Interaction is callback-free: when a [`HitId`] is set,
/// each row registers a [`HitRegion::Content`] region carrying its index
/// and the pagination strip registers [`HitRegion::Button`] regions
/// carrying target pages; the caller routes hit tests back into its own
/// handlers. Without a hit ID the rows are inert.
pub struct DataTable<'a, R> {
    columns: &'a [Column<R>],
    rows: &'a [R],
    empty_message: &'a str,
    loading: bool,
    pagination: Option<Pagination>,
    block: Option<Block<'a>>,
    hit_id: Option<HitId>,
    style: Style,
    header_style: Style,
    selected_style: Style,
    alt_row_style: Option<Style>,
    column_spacing: u16,
}

const LOADING_LABEL: &str = "Loading…";

impl<'a, R> DataTable<'a, R> {
    /// Create a table over borrowed columns and rows.
    pub fn new(columns: &'a [Column<R>], rows: &'a [R]) -> Self {
        Self {
            columns,
            rows,
            empty_message: "No data available",
            loading: false,
            pagination: None,
            block: None,
            hit_id: None,
            style: Style::default(),
            header_style: Style::new().bold(),
            selected_style: Style::new().reversed(),
            alt_row_style: None,
            column_spacing: 1,
        }
    }

    /// Message shown when `rows` is empty.
    #[must_use]
    pub fn empty_message(mut self, message: &'a str) -> Self {
        self.empty_message = message;
        self
    }

    /// Dim the table and show a loading label over the (possibly stale)
    /// content. Content is kept underneath so a refetch does not collapse
    /// the layout.
    #[must_use]
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Show a pagination strip on the bottom line.
    ///
    /// Display-only: the table does not slice `rows`; pass the current
    /// server page as `rows` and describe the whole set here.
    #[must_use]
    pub fn pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    /// Wrap the table in a block.
    #[must_use]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Set a hit ID to make rows and pagination clickable.
    #[must_use]
    pub fn hit_id(mut self, id: HitId) -> Self {
        self.hit_id = Some(id);
        self
    }

    /// Set the base style for the table area.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the header row style.
    #[must_use]
    pub fn header_style(mut self, style: Style) -> Self {
        self.header_style = style;
        self
    }

    /// Set the style for the selected row.
    #[must_use]
    pub fn selected_style(mut self, style: Style) -> Self {
        self.selected_style = style;
        self
    }

    /// Apply a zebra style to every other row.
    #[must_use]
    pub fn alt_row_style(mut self, style: Style) -> Self {
        self.alt_row_style = Some(style);
        self
    }

    /// Set the spacing between columns.
    #[must_use]
    pub fn column_spacing(mut self, spacing: u16) -> Self {
        self.column_spacing = spacing;
        self
    }

    fn column_rects(&self, area: Rect) -> Vec<Rect> {
        Flex::horizontal()
            .constraints(self.columns.iter().map(|c| c.width))
            .gap(self.column_spacing)
            .split(Rect::new(area.x, area.y, area.width, 1))
    }
}

impl<R: RowKey> StatefulWidget for DataTable<'_, R> {
    type State = DataTableState;

    fn render(&self, area: Rect, frame: &mut Frame, state: &mut Self::State) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "DataTable",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height,
            rows = self.rows.len()
        )
        .entered();

        if area.is_empty() {
            return;
        }

        let table_area = match &self.block {
            Some(block) => {
                block.render(area, frame);
                block.inner(area)
            }
            None => area,
        };
        if table_area.is_empty() {
            return;
        }

        frame.buffer.set_style(table_area, self.style);

        // Reserve the bottom line for the pagination strip. An empty page
        // set suppresses the strip and returns the line to the body.
        let strip = self
            .pagination
            .filter(|p| p.total_pages > 0 && table_area.height > 1);
        let body_bottom = match strip {
            Some(_) => table_area.bottom() - 1,
            None => table_area.bottom(),
        };

        let column_rects = self.column_rects(table_area);
        let mut y = table_area.y;

        // Header.
        if y < body_bottom {
            for (col, rect) in self.columns.iter().zip(&column_rects) {
                if rect.width > 0 {
                    frame
                        .buffer
                        .set_string(rect.x, y, &col.label, self.header_style, rect.right());
                }
            }
            y += 1;
        }

        let body = Rect::new(
            table_area.x,
            y,
            table_area.width,
            body_bottom.saturating_sub(y),
        );

        self.reconcile_selection(state);

        if self.rows.is_empty() {
            state.offset = 0;
            // One full-width line with the message; never a blank body.
            if !body.is_empty() {
                let width = UnicodeWidthStr::width(self.empty_message) as u16;
                let x = body.x + body.width.saturating_sub(width) / 2;
                frame.buffer.set_string(
                    x,
                    body.y,
                    self.empty_message,
                    self.style.patch(Style::new().dim()),
                    body.right(),
                );
            }
        } else {
            self.clamp_viewport(state, body.height as usize);
            self.render_rows(body, frame, state);
        }

        if self.loading {
            let overlay = Rect::new(
                table_area.x,
                table_area.y,
                table_area.width,
                body_bottom.saturating_sub(table_area.y),
            );
            frame.buffer.set_style(overlay, Style::new().dim());
            let width = UnicodeWidthStr::width(LOADING_LABEL) as u16;
            let cx = overlay.x + overlay.width.saturating_sub(width) / 2;
            let cy = overlay.y + overlay.height / 2;
            frame
                .buffer
                .set_string(cx, cy, LOADING_LABEL, Style::new().bold(), overlay.right());
        }

        if let Some(pagination) = strip {
            let strip_area = Rect::new(table_area.x, body_bottom, table_area.width, 1);
            let mut controls = PageControls::new(pagination).style(self.style);
            if let Some(id) = self.hit_id {
                controls = controls.hit_id(id);
            }
            controls.render(strip_area, frame);
        }
    }
}

impl<R: RowKey> DataTable<'_, R> {
    /// Re-attach the selection to the row carrying the remembered identity
    /// key. Rows without keys keep positional selection, which is unstable
    /// across reorders.
    fn reconcile_selection(&self, state: &mut DataTableState) {
        if let Some(key) = state.selected_key.as_deref() {
            if let Some(found) = self
                .rows
                .iter()
                .position(|row| row.row_key().is_some_and(|k| k == key))
            {
                state.selected = Some(found);
            }
        }

        if let Some(selected) = state.selected {
            if self.rows.is_empty() {
                state.selected = None;
            } else if selected >= self.rows.len() {
                state.selected = Some(self.rows.len() - 1);
            }
        }

        state.selected_key = state
            .selected
            .and_then(|i| self.rows[i].row_key())
            .map(Cow::into_owned);
    }

    fn clamp_viewport(&self, state: &mut DataTableState, visible: usize) {
        state.offset = state.offset.min(self.rows.len().saturating_sub(1));
        if visible == 0 {
            return;
        }
        if let Some(selected) = state.selected {
            if selected < state.offset {
                state.offset = selected;
            } else if selected >= state.offset + visible {
                state.offset = selected + 1 - visible;
            }
        }
    }

    fn render_rows(&self, body: Rect, frame: &mut Frame, state: &DataTableState) {
        let column_rects = self.column_rects(body);
        let mut y = body.y;

        for (i, row) in self.rows.iter().enumerate().skip(state.offset) {
            if y >= body.bottom() {
                break;
            }

            let row_area = Rect::new(body.x, y, body.width, 1);
            let base = if state.selected == Some(i) {
                self.selected_style
            } else if i % 2 == 1 {
                self.alt_row_style.unwrap_or_default()
            } else {
                Style::default()
            };
            if !base.is_empty() {
                frame.buffer.set_style(row_area, base);
            }

            for (col, rect) in self.columns.iter().zip(&column_rects) {
                if rect.width == 0 {
                    continue;
                }
                let (text, style) = col.resolve(row, i);
                frame
                    .buffer
                    .set_string(rect.x, y, &text, style.patch(base), rect.right());
            }

            if let Some(id) = self.hit_id {
                frame.register_hit(row_area, id, HitRegion::Content, i as u64);
            }

            y += 1;
        }
    }
}

impl<R: RowKey> Widget for DataTable<'_, R> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        let mut state = DataTableState::default();
        StatefulWidget::render(self, area, frame, &mut state);
    }
}
