//! # Identifiers
//!
//! String newtypes for the three kinds of identity in a dashboard, plus the
//! generator that mints ids for new layout items and panel groups.
//!
//! | Type | Scope of uniqueness |
//! |------|---------------------|
//! | [`PanelKey`] | all panels of the dashboard |
//! | [`PanelGroupId`] | all panel groups of the dashboard |
//! | [`LayoutItemId`] | the owning panel group only |
//!
//! ## Example
//!
//! ```rust
//! use dash_core::ids::{IdGenerator, SequentialIdGenerator};
//!
//! let mut ids = SequentialIdGenerator::new();
//! assert_eq!(ids.generate_id(), "0");
//! assert_eq!(ids.generate_id(), "1");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Identifier Newtypes
// ============================================================================

/// Unique key of a panel, derived from its display name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelKey(pub String);

/// Stable id of a panel group
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelGroupId(pub String);

/// Id of a layout item (`i` in the grid), unique within its group
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutItemId(pub String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            /// Borrow the underlying string
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name(s)
            }
        }
    };
}

string_id!(PanelKey);
string_id!(PanelGroupId);
string_id!(LayoutItemId);

/// Location of one panel on the dashboard: a layout item inside a group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PanelGroupItemId {
    pub panel_group_id: PanelGroupId,
    pub layout_item_id: LayoutItemId,
}

impl PanelGroupItemId {
    pub fn new(panel_group_id: impl Into<PanelGroupId>, layout_item_id: impl Into<LayoutItemId>) -> Self {
        PanelGroupItemId {
            panel_group_id: panel_group_id.into(),
            layout_item_id: layout_item_id.into(),
        }
    }
}

impl fmt::Display for PanelGroupItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.panel_group_id, self.layout_item_id)
    }
}

// ============================================================================
// Generators
// ============================================================================

/// Source of fresh identifiers.
///
/// Implementations must never hand out the same token twice for the
/// lifetime of a dashboard session.
pub trait IdGenerator: Send + fmt::Debug {
    fn generate_id(&mut self) -> String;
}

/// Random v4 UUIDs. The default for interactive use.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn generate_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Monotonic counter starting at 0. Deterministic, so tests and scripted
/// runs produce reproducible ids.
#[derive(Debug, Clone, Default)]
pub struct SequentialIdGenerator {
    next: u64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        SequentialIdGenerator { next: 0 }
    }

    /// Start counting from `next`, e.g. past the ids of a loaded dashboard
    pub fn starting_at(next: u64) -> Self {
        SequentialIdGenerator { next }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate_id(&mut self) -> String {
        let id = self.next;
        self.next += 1;
        id.to_string()
    }
}
