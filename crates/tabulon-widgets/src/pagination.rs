#![forbid(unsafe_code)]

//! Pagination: window calculator and page controls.
//!
//! [`page_window`] is a pure function deciding which page-number tokens to
//! show for a given position in a paged result set, bounding the number of
//! controls no matter how many pages exist. [`PageControls`] renders the
//! window as a clickable strip with previous/next buttons and a
//! "Showing X to Y of Z" caption.

use crate::Widget;
use tabulon_core::geometry::Rect;
use tabulon_render::frame::{Frame, HitId, HitRegion};
use tabulon_style::Style;
use unicode_width::UnicodeWidthStr;

/// One token of the page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    /// A clickable page number.
    Page(u32),
    /// A gap in the sequence; not clickable.
    Ellipsis,
}

/// The number of pages below which every page is shown without ellipses.
const MAX_VISIBLE_PAGES: u32 = 7;

/// Compute the page-number tokens to render for `page` of `total_pages`.
///
/// The result is bounded: at most seven tokens regardless of
/// `total_pages`. The first and last pages are always present, with the
/// neighborhood around the current page; ellipses mark the gaps.
///
/// `total_pages == 0` yields an empty window and the caller must suppress
/// the whole control strip. A `page` outside `[1, total_pages]` is clamped
/// before windowing.
///
/// The boundary `page == total_pages - 2` belongs to the end-loaded window
/// (the comparison is `>=`); tests pin this tie-break because the control
/// layout depends on it.
pub fn page_window(page: u32, total_pages: u32) -> Vec<PageToken> {
    if total_pages == 0 {
        return Vec::new();
    }
    let page = page.clamp(1, total_pages);

    if total_pages <= MAX_VISIBLE_PAGES {
        return (1..=total_pages).map(PageToken::Page).collect();
    }

    if page <= 3 {
        let mut out: Vec<PageToken> = (1..=4).map(PageToken::Page).collect();
        out.push(PageToken::Ellipsis);
        out.push(PageToken::Page(total_pages));
        return out;
    }

    if page >= total_pages - 2 {
        let mut out = vec![PageToken::Page(1), PageToken::Ellipsis];
        out.extend((total_pages - 3..=total_pages).map(PageToken::Page));
        return out;
    }

    vec![
        PageToken::Page(1),
        PageToken::Ellipsis,
        PageToken::Page(page - 1),
        PageToken::Page(page),
        PageToken::Page(page + 1),
        PageToken::Ellipsis,
        PageToken::Page(total_pages),
    ]
}

/// Pagination state for a paged result set.
///
/// `page_size` is explicit configuration: the caption is computed from it,
/// so a caller paging by something other than the default keeps a correct
/// "Showing X to Y of Z" line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page, 1-based.
    pub page: u32,
    /// Total number of pages; 0 suppresses the strip entirely.
    pub total_pages: u32,
    /// Total record count across all pages, for the caption.
    pub total: Option<u64>,
    /// Records per page.
    pub page_size: u32,
}

impl Pagination {
    /// Default records per page.
    pub const DEFAULT_PAGE_SIZE: u32 = 15;

    /// Create pagination state for `page` of `total_pages`.
    #[must_use]
    pub const fn new(page: u32, total_pages: u32) -> Self {
        Self {
            page,
            total_pages,
            total: None,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }

    /// Set the total record count (enables the caption).
    #[must_use]
    pub const fn total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }

    /// Set the records-per-page used by the caption.
    #[must_use]
    pub const fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Whether a previous page exists.
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Whether a next page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// The caption range: "Showing `start` to `end` of `total`".
    ///
    /// `start = (page - 1) * page_size + 1`, `end = min(page * page_size,
    /// total)`. Returns `None` when no total is configured or the set is
    /// empty.
    #[must_use]
    pub fn caption_range(&self) -> Option<(u64, u64, u64)> {
        let total = self.total?;
        if total == 0 || self.total_pages == 0 {
            return None;
        }
        let page = self.page.clamp(1, self.total_pages) as u64;
        let size = self.page_size as u64;
        let start = (page - 1) * size + 1;
        let end = (page * size).min(total);
        Some((start, end, total))
    }
}

/// A one-line pagination strip: previous/next controls, the page-number
/// window, and an optional caption.
///
/// Clickable controls register [`HitRegion::Button`] regions whose data is
/// the target page; the caller routes a hit on this widget's [`HitId`]
/// into its page-change handler. Ellipsis tokens and disabled controls
/// register nothing.
#[derive(Debug, Clone)]
pub struct PageControls {
    pagination: Pagination,
    hit_id: Option<HitId>,
    style: Style,
    active_style: Style,
    disabled_style: Style,
}

impl PageControls {
    const PREV_LABEL: &'static str = "‹ Prev";
    const NEXT_LABEL: &'static str = "Next ›";

    /// Create page controls for the given pagination state.
    #[must_use]
    pub fn new(pagination: Pagination) -> Self {
        Self {
            pagination,
            hit_id: None,
            style: Style::default(),
            active_style: Style::new().bold().reversed(),
            disabled_style: Style::new().dim(),
        }
    }

    /// Set a hit ID so the controls are clickable.
    #[must_use]
    pub fn hit_id(mut self, id: HitId) -> Self {
        self.hit_id = Some(id);
        self
    }

    /// Set the base text style.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the style for the current page token.
    #[must_use]
    pub fn active_style(mut self, style: Style) -> Self {
        self.active_style = style;
        self
    }

    /// Set the style for disabled previous/next controls.
    #[must_use]
    pub fn disabled_style(mut self, style: Style) -> Self {
        self.disabled_style = style;
        self
    }

    fn draw_control(
        &self,
        frame: &mut Frame,
        x: u16,
        y: u16,
        max_x: u16,
        label: &str,
        style: Style,
        target: Option<u32>,
    ) -> u16 {
        let end = frame.buffer.set_string(x, y, label, style, max_x);
        if let (Some(id), Some(page)) = (self.hit_id, target) {
            if end > x {
                frame.register_hit(
                    Rect::new(x, y, end - x, 1),
                    id,
                    HitRegion::Button,
                    page as u64,
                );
            }
        }
        end
    }
}

impl Widget for PageControls {
    fn render(&self, area: Rect, frame: &mut Frame) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "PageControls",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        let p = &self.pagination;
        // No pages: the entire strip is suppressed, caption included.
        if area.is_empty() || p.total_pages == 0 {
            return;
        }

        let y = area.y;
        let max_x = area.right();
        let mut x = area.x;

        let prev_style = if p.has_prev() {
            self.style
        } else {
            self.disabled_style
        };
        x = self.draw_control(
            frame,
            x,
            y,
            max_x,
            Self::PREV_LABEL,
            prev_style,
            p.has_prev().then(|| p.page - 1),
        );
        x = x.saturating_add(2);

        for token in page_window(p.page, p.total_pages) {
            match token {
                PageToken::Page(n) => {
                    let label = n.to_string();
                    let style = if n == p.page {
                        self.style.patch(self.active_style)
                    } else {
                        self.style
                    };
                    // The current page is shown but not a navigation target.
                    let target = (n != p.page).then_some(n);
                    x = self.draw_control(frame, x, y, max_x, &label, style, target);
                }
                PageToken::Ellipsis => {
                    x = frame.buffer.set_string(x, y, "…", self.style, max_x);
                }
            }
            x = x.saturating_add(1);
        }
        x = x.saturating_add(1);

        let next_style = if p.has_next() {
            self.style
        } else {
            self.disabled_style
        };
        x = self.draw_control(
            frame,
            x,
            y,
            max_x,
            Self::NEXT_LABEL,
            next_style,
            p.has_next().then(|| p.page + 1),
        );

        if let Some((start, end, total)) = p.caption_range() {
            let caption = format!("Showing {start} to {end} of {total}");
            let width = UnicodeWidthStr::width(caption.as_str()) as u16;
            // Right-aligned when it fits after the controls.
            let caption_x = max_x.saturating_sub(width);
            if caption_x > x.saturating_add(2) {
                frame.buffer.set_string(caption_x, y, &caption, self.style, max_x);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pages(tokens: &[PageToken]) -> Vec<Option<u32>> {
        tokens
            .iter()
            .map(|t| match t {
                PageToken::Page(n) => Some(*n),
                PageToken::Ellipsis => None,
            })
            .collect()
    }

    // --- page_window ---

    #[test]
    fn small_case_shows_every_page() {
        for page in 1..=5 {
            assert_eq!(
                pages(&page_window(page, 5)),
                vec![Some(1), Some(2), Some(3), Some(4), Some(5)],
                "page {page}"
            );
        }
    }

    #[test]
    fn exactly_seven_pages_has_no_ellipsis() {
        assert_eq!(
            pages(&page_window(4, 7)),
            (1..=7).map(Some).collect::<Vec<_>>()
        );
    }

    #[test]
    fn front_loaded_window() {
        assert_eq!(
            pages(&page_window(2, 20)),
            vec![Some(1), Some(2), Some(3), Some(4), None, Some(20)]
        );
    }

    #[test]
    fn front_loaded_boundary_page_three() {
        assert_eq!(
            pages(&page_window(3, 20)),
            vec![Some(1), Some(2), Some(3), Some(4), None, Some(20)]
        );
    }

    #[test]
    fn end_loaded_window() {
        assert_eq!(
            pages(&page_window(19, 20)),
            vec![Some(1), None, Some(17), Some(18), Some(19), Some(20)]
        );
    }

    #[test]
    fn end_loaded_tie_break_at_total_minus_two() {
        // page == total_pages - 2 is end-loaded per the >= rule.
        assert_eq!(
            pages(&page_window(18, 20)),
            vec![Some(1), None, Some(17), Some(18), Some(19), Some(20)]
        );
    }

    #[test]
    fn middle_window() {
        assert_eq!(
            pages(&page_window(10, 20)),
            vec![Some(1), None, Some(9), Some(10), Some(11), None, Some(20)]
        );
    }

    #[test]
    fn middle_window_last_non_end_loaded_page() {
        // page == total_pages - 3 is the last middle window.
        assert_eq!(
            pages(&page_window(17, 20)),
            vec![Some(1), None, Some(16), Some(17), Some(18), None, Some(20)]
        );
    }

    #[test]
    fn zero_total_pages_is_empty() {
        assert!(page_window(1, 0).is_empty());
        assert!(page_window(0, 0).is_empty());
    }

    #[test]
    fn out_of_range_page_is_clamped() {
        assert_eq!(page_window(99, 5), page_window(5, 5));
        assert_eq!(page_window(0, 5), page_window(1, 5));
        assert_eq!(page_window(99, 20), page_window(20, 20));
    }

    #[test]
    fn single_page() {
        assert_eq!(pages(&page_window(1, 1)), vec![Some(1)]);
    }

    proptest! {
        #[test]
        fn window_invariants(page in 0u32..10_000, total in 1u32..10_000) {
            let window = page_window(page, total);

            // Bounded regardless of total.
            prop_assert!(window.len() <= 7);

            // First and last tokens are the first and last pages.
            prop_assert_eq!(window.first(), Some(&PageToken::Page(1)));
            prop_assert_eq!(window.last(), Some(&PageToken::Page(total)));

            // Numeric tokens strictly increase and stay in range.
            let nums: Vec<u32> = window
                .iter()
                .filter_map(|t| match t {
                    PageToken::Page(n) => Some(*n),
                    PageToken::Ellipsis => None,
                })
                .collect();
            prop_assert!(nums.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(nums.iter().all(|&n| n >= 1 && n <= total));

            // The clamped current page is always present.
            let current = page.clamp(1, total);
            prop_assert!(nums.contains(&current));

            // No adjacent ellipses.
            prop_assert!(
                window
                    .windows(2)
                    .all(|w| !(w[0] == PageToken::Ellipsis && w[1] == PageToken::Ellipsis))
            );
        }
    }

    // --- Pagination ---

    #[test]
    fn caption_middle_page() {
        let p = Pagination::new(2, 3).total(40);
        assert_eq!(p.caption_range(), Some((16, 30, 40)));
    }

    #[test]
    fn caption_last_page_clamps_end() {
        let p = Pagination::new(3, 3).total(40);
        assert_eq!(p.caption_range(), Some((31, 40, 40)));
    }

    #[test]
    fn caption_honors_page_size() {
        let p = Pagination::new(2, 4).total(40).page_size(10);
        assert_eq!(p.caption_range(), Some((11, 20, 40)));
    }

    #[test]
    fn caption_absent_without_total() {
        assert_eq!(Pagination::new(1, 3).caption_range(), None);
    }

    #[test]
    fn caption_absent_when_empty() {
        assert_eq!(Pagination::new(1, 0).total(0).caption_range(), None);
    }

    #[test]
    fn prev_next_availability() {
        let p = Pagination::new(1, 3);
        assert!(!p.has_prev());
        assert!(p.has_next());
        let p = Pagination::new(3, 3);
        assert!(p.has_prev());
        assert!(!p.has_next());
    }

    // --- PageControls rendering ---

    fn row_text(frame: &Frame, y: u16) -> String {
        let mut out = String::new();
        for x in 0..frame.width() {
            if let Some(cell) = frame.buffer.get(x, y) {
                if !cell.is_continuation() {
                    out.push(cell.ch);
                }
            }
        }
        out
    }

    #[test]
    fn zero_pages_renders_nothing() {
        let mut frame = Frame::new(60, 1);
        PageControls::new(Pagination::new(1, 0).total(0))
            .render(Rect::new(0, 0, 60, 1), &mut frame);
        assert!(row_text(&frame, 0).trim().is_empty());
    }

    #[test]
    fn renders_window_and_caption() {
        let mut frame = Frame::new(80, 1);
        PageControls::new(Pagination::new(2, 3).total(40))
            .render(Rect::new(0, 0, 80, 1), &mut frame);
        let text = row_text(&frame, 0);
        assert!(text.contains("1 2 3"), "got: {text}");
        assert!(text.contains("Showing 16 to 30 of 40"), "got: {text}");
    }

    #[test]
    fn numeric_tokens_are_clickable_ellipsis_is_not() {
        let mut frame = Frame::with_hit_grid(80, 1);
        PageControls::new(Pagination::new(10, 20))
            .hit_id(HitId::new(5))
            .render(Rect::new(0, 0, 80, 1), &mut frame);

        let mut targets = Vec::new();
        for x in 0..80 {
            if let Some((id, region, data)) = frame.hit_test(x, 0) {
                assert_eq!(id, HitId::new(5));
                assert_eq!(region, HitRegion::Button);
                if targets.last() != Some(&data) {
                    targets.push(data);
                }
            }
        }
        // prev(9), 1, 9, 11, 20, next(11): the current page and the
        // ellipses register nothing.
        assert_eq!(targets, vec![9, 1, 9, 11, 20, 11]);
    }

    #[test]
    fn prev_disabled_on_first_page() {
        let mut frame = Frame::with_hit_grid(80, 1);
        PageControls::new(Pagination::new(1, 3))
            .hit_id(HitId::new(1))
            .render(Rect::new(0, 0, 80, 1), &mut frame);
        // No control targets page 0.
        for x in 0..80 {
            if let Some((_, _, data)) = frame.hit_test(x, 0) {
                assert_ne!(data, 0);
            }
        }
    }

    #[test]
    fn next_disabled_on_last_page() {
        let mut frame = Frame::with_hit_grid(80, 1);
        PageControls::new(Pagination::new(3, 3))
            .hit_id(HitId::new(1))
            .render(Rect::new(0, 0, 80, 1), &mut frame);
        for x in 0..80 {
            if let Some((_, _, data)) = frame.hit_test(x, 0) {
                assert_ne!(data, 4);
            }
        }
    }

    #[test]
    fn no_hits_without_hit_id() {
        let mut frame = Frame::with_hit_grid(80, 1);
        PageControls::new(Pagination::new(2, 3)).render(Rect::new(0, 0, 80, 1), &mut frame);
        for x in 0..80 {
            assert!(frame.hit_test(x, 0).is_none());
        }
    }
}
