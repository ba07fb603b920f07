//! # Grid Layout
//!
//! Placement records for the dashboard grid and the positioner that picks
//! the row for appended items.
//!
//! Coordinates are in grid units. The default grid is 12 columns wide.
//! Items appended by this crate always start at `x = 0` on a fresh row below
//! everything already in the group, so they cannot overlap existing items.
//!
//! ## Example
//!
//! ```rust
//! use dash_core::layout::{next_row_y, LayoutItem};
//!
//! let items = vec![
//!     LayoutItem::new("a", 0, 0, 12, 6),
//!     LayoutItem::new("b", 0, 6, 6, 8),
//! ];
//! assert_eq!(next_row_y(&items), 14);
//! ```

use serde::{Deserialize, Serialize};

use crate::ids::LayoutItemId;

/// Width of the default dashboard grid, in columns
pub const GRID_COLUMNS: u32 = 12;

/// Placement of one panel inside its group's grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutItem {
    /// Item id, unique within the owning group
    pub i: LayoutItemId,
    pub x: u32,
    pub y: u32,
    /// Width in columns
    pub w: u32,
    /// Height in rows
    pub h: u32,
}

impl LayoutItem {
    pub fn new(i: impl Into<LayoutItemId>, x: u32, y: u32, w: u32, h: u32) -> Self {
        LayoutItem {
            i: i.into(),
            x,
            y,
            w,
            h,
        }
    }

    /// First row below this item, saturating at `u32::MAX`
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    /// Clamp the item horizontally into a grid of `columns` columns.
    ///
    /// Width is capped at the grid width first, then `x` is pulled left so
    /// that `x + w <= columns`.
    pub fn fit_to_grid(mut self, columns: u32) -> Self {
        self.w = self.w.min(columns);
        if self.x.saturating_add(self.w) > columns {
            self.x = columns - self.w;
        }
        self
    }

    /// Whether the vertical extents of two items intersect
    pub fn overlaps_rows(&self, other: &LayoutItem) -> bool {
        self.y < other.bottom() && other.y < self.bottom()
    }
}

/// Y coordinate for a new item appended below `items`: the largest
/// `y + h`, or 0 when there are none.
pub fn next_row_y(items: &[LayoutItem]) -> u32 {
    items.iter().map(LayoutItem::bottom).max().unwrap_or(0)
}
