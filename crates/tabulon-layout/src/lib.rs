#![forbid(unsafe_code)]

//! 1-D constraint layout.
//!
//! [`Flex`] splits a rectangle into rows or columns according to a list of
//! [`Constraint`]s. Tabulon uses it for table column widths and for stacking
//! page regions; it is deliberately a subset of a full layout system.

pub use tabulon_core::geometry::{Rect, Sides};

/// A constraint on the size of a layout slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    /// An exact size in cells.
    Fixed(u16),
    /// A percentage of the total available size (0.0 to 100.0).
    Percentage(f32),
    /// At least this many cells; grows to share leftover space.
    Min(u16),
    /// Shares leftover space but never exceeds this many cells.
    Max(u16),
    /// Share of the remaining space.
    Fill,
}

/// The direction to lay out slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Top to bottom.
    #[default]
    Vertical,
    /// Left to right.
    Horizontal,
}

/// A 1-D constraint-based splitter.
#[derive(Debug, Clone, Default)]
pub struct Flex {
    direction: Direction,
    constraints: Vec<Constraint>,
    gap: u16,
}

impl Flex {
    /// Create a new vertical flex layout.
    pub fn vertical() -> Self {
        Self {
            direction: Direction::Vertical,
            ..Default::default()
        }
    }

    /// Create a new horizontal flex layout.
    pub fn horizontal() -> Self {
        Self {
            direction: Direction::Horizontal,
            ..Default::default()
        }
    }

    /// Set the constraints.
    pub fn constraints(mut self, constraints: impl IntoIterator<Item = Constraint>) -> Self {
        self.constraints = constraints.into_iter().collect();
        self
    }

    /// Set the gap between slots.
    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    /// Split the area into one rectangle per constraint.
    ///
    /// Output order matches constraint order. An empty input area yields
    /// empty rectangles so callers can index unconditionally.
    pub fn split(&self, area: Rect) -> Vec<Rect> {
        let count = self.constraints.len();
        if count == 0 {
            return Vec::new();
        }
        if area.is_empty() {
            return vec![Rect::default(); count];
        }

        let total = match self.direction {
            Direction::Horizontal => area.width,
            Direction::Vertical => area.height,
        };
        let total_gap = (self.gap as u64 * (count as u64 - 1)).min(u16::MAX as u64) as u16;
        let sizes = solve(&self.constraints, total.saturating_sub(total_gap));

        let mut rects = Vec::with_capacity(count);
        let mut pos = match self.direction {
            Direction::Horizontal => area.x,
            Direction::Vertical => area.y,
        };
        for &size in &sizes {
            let rect = match self.direction {
                Direction::Horizontal => Rect::new(pos, area.y, size, area.height),
                Direction::Vertical => Rect::new(area.x, pos, area.width, size),
            };
            rects.push(rect);
            pos = pos.saturating_add(size).saturating_add(self.gap);
        }
        rects
    }
}

/// Solve 1-D constraints to sizes summing to at most `available`.
fn solve(constraints: &[Constraint], available: u16) -> Vec<u16> {
    let mut sizes = vec![0u16; constraints.len()];
    let mut remaining = available;
    let mut grow = Vec::new();

    // First pass: fixed-ish constraints take their size, flexible ones queue.
    for (i, &constraint) in constraints.iter().enumerate() {
        match constraint {
            Constraint::Fixed(size) => {
                let size = size.min(remaining);
                sizes[i] = size;
                remaining -= size;
            }
            Constraint::Percentage(p) => {
                let size = ((available as f32 * p / 100.0).round() as u16).min(remaining);
                sizes[i] = size;
                remaining -= size;
            }
            Constraint::Min(min_size) => {
                let size = min_size.min(remaining);
                sizes[i] = size;
                remaining -= size;
                grow.push(i);
            }
            Constraint::Max(_) | Constraint::Fill => {
                grow.push(i);
            }
        }
    }

    // Second pass: split leftover space evenly across flexible slots.
    // Earlier slots absorb the remainder so the sum is exact; Max slots are
    // capped and their unused share returns to the pool.
    while remaining > 0 && !grow.is_empty() {
        let share = remaining / grow.len() as u16;
        let mut rem = remaining % grow.len() as u16;
        let mut distributed = false;
        let mut still_growable = Vec::with_capacity(grow.len());

        for &i in &grow {
            let mut add = share;
            if rem > 0 {
                add += 1;
                rem -= 1;
            }
            if add == 0 {
                continue;
            }
            let add = match constraints[i] {
                Constraint::Max(cap) => add.min(cap.saturating_sub(sizes[i])),
                _ => add,
            };
            if add > 0 {
                sizes[i] += add;
                remaining -= add;
                distributed = true;
            }
            let capped = matches!(constraints[i], Constraint::Max(cap) if sizes[i] >= cap);
            if !capped {
                still_growable.push(i);
            }
        }

        if !distributed {
            break;
        }
        grow = still_growable;
    }

    sizes
}
