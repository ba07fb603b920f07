//! # Panel Groups
//!
//! A panel group is one collapsible section of the dashboard. It owns an
//! ordered list of layout items and a map from layout item id to panel key.
//!
//! The two collections move in lockstep: every layout item has exactly one
//! panel key entry and every panel key entry has exactly one layout item.
//! Only [`PanelGroup::add_item`] and [`PanelGroup::remove_item`] touch them,
//! and each touches both or neither.
//!
//! ## Structure
//!
//! ```text
//! PanelGroupStore
//! ├── panel_groups: BTreeMap<PanelGroupId, PanelGroup>
//! │   └── PanelGroup
//! │       ├── item_layouts: Vec<LayoutItem>        (grid order)
//! │       └── item_panel_keys: LayoutItemId -> PanelKey
//! └── panel_group_order: Vec<PanelGroupId>           (display order)
//! ```

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::errors::{DashboardError, DashboardResult};
use crate::ids::{IdGenerator, LayoutItemId, PanelGroupId, PanelKey};
use crate::layout::{next_row_y, LayoutItem};

/// One section of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelGroup {
    pub id: PanelGroupId,
    pub title: String,
    #[serde(default)]
    pub is_collapsed: bool,
    item_layouts: Vec<LayoutItem>,
    item_panel_keys: BTreeMap<LayoutItemId, PanelKey>,
}

impl PanelGroup {
    /// Create an empty group.
    pub fn new(id: impl Into<PanelGroupId>, title: impl Into<String>) -> Self {
        PanelGroup {
            id: id.into(),
            title: title.into(),
            is_collapsed: false,
            item_layouts: Vec::new(),
            item_panel_keys: BTreeMap::new(),
        }
    }

    pub fn item_layouts(&self) -> &[LayoutItem] {
        &self.item_layouts
    }

    pub fn item_panel_keys(&self) -> &BTreeMap<LayoutItemId, PanelKey> {
        &self.item_panel_keys
    }

    pub fn item(&self, id: &LayoutItemId) -> Option<&LayoutItem> {
        self.item_layouts.iter().find(|layout| &layout.i == id)
    }

    pub fn panel_key(&self, id: &LayoutItemId) -> Option<&PanelKey> {
        self.item_panel_keys.get(id)
    }

    pub fn contains_item(&self, id: &LayoutItemId) -> bool {
        self.item_panel_keys.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.item_layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_layouts.is_empty()
    }

    /// Row where the next appended item goes
    pub fn next_row_y(&self) -> u32 {
        next_row_y(&self.item_layouts)
    }

    /// Insert a layout item and its panel key together.
    pub fn add_item(&mut self, layout: LayoutItem, panel_key: PanelKey) -> DashboardResult<()> {
        if self.contains_item(&layout.i) || self.item(&layout.i).is_some() {
            return Err(DashboardError::corrupt_model(format!(
                "layout item '{}' already exists in group '{}'",
                layout.i, self.id
            )));
        }
        self.item_panel_keys.insert(layout.i.clone(), panel_key);
        self.item_layouts.push(layout);
        Ok(())
    }

    /// Remove a layout item and its panel key together.
    pub fn remove_item(&mut self, id: &LayoutItemId) -> DashboardResult<(LayoutItem, PanelKey)> {
        let index = self
            .item_layouts
            .iter()
            .position(|layout| &layout.i == id)
            .filter(|_| self.item_panel_keys.contains_key(id))
            .ok_or_else(|| DashboardError::item_not_found(self.id.as_str(), id.as_str()))?;

        let layout = self.item_layouts.remove(index);
        let panel_key = self
            .item_panel_keys
            .remove(id)
            .ok_or_else(|| DashboardError::item_not_found(self.id.as_str(), id.as_str()))?;
        Ok((layout, panel_key))
    }

    /// An item id not yet used in this group. Prefers `preferred` when free.
    pub fn free_item_id(&self, preferred: Option<&LayoutItemId>, ids: &mut dyn IdGenerator) -> LayoutItemId {
        if let Some(id) = preferred {
            if !self.contains_item(id) {
                return id.clone();
            }
        }
        loop {
            let id = LayoutItemId(ids.generate_id());
            if !self.contains_item(&id) {
                return id;
            }
        }
    }

    /// Check the lockstep and uniqueness invariants of this group.
    pub fn validate(&self) -> DashboardResult<()> {
        let mut seen = HashSet::new();
        for layout in &self.item_layouts {
            if !seen.insert(&layout.i) {
                return Err(DashboardError::corrupt_model(format!(
                    "group '{}' has duplicate layout item '{}'",
                    self.id, layout.i
                )));
            }
            if !self.item_panel_keys.contains_key(&layout.i) {
                return Err(DashboardError::corrupt_model(format!(
                    "group '{}' layout item '{}' has no panel key",
                    self.id, layout.i
                )));
            }
        }
        if let Some(dangling) = self.item_panel_keys.keys().find(|id| !seen.contains(id)) {
            return Err(DashboardError::corrupt_model(format!(
                "group '{}' maps '{}' to a panel but has no layout for it",
                self.id, dangling
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Panel Group Store
// ============================================================================

/// All panel groups plus their display order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelGroupStore {
    panel_groups: BTreeMap<PanelGroupId, PanelGroup>,
    panel_group_order: Vec<PanelGroupId>,
}

impl PanelGroupStore {
    pub fn new() -> Self {
        PanelGroupStore::default()
    }

    /// A fresh, unregistered group with a generated id and empty title.
    pub fn create_empty_panel_group(ids: &mut dyn IdGenerator) -> PanelGroup {
        PanelGroup::new(PanelGroupId(ids.generate_id()), "")
    }

    /// Register a group and append it to the display order.
    pub fn add_panel_group(&mut self, group: PanelGroup) -> DashboardResult<()> {
        if self.panel_groups.contains_key(&group.id) {
            return Err(DashboardError::duplicate_group(group.id.as_str()));
        }
        self.panel_group_order.push(group.id.clone());
        self.panel_groups.insert(group.id.clone(), group);
        Ok(())
    }

    /// Unregister a group. Its layout items go with it; the caller decides
    /// what happens to the panels they referenced.
    pub fn remove_panel_group(&mut self, id: &PanelGroupId) -> DashboardResult<PanelGroup> {
        let group = self
            .panel_groups
            .remove(id)
            .ok_or_else(|| DashboardError::group_not_found(id.as_str()))?;
        self.panel_group_order.retain(|existing| existing != id);
        Ok(group)
    }

    /// Move a group to `to_index` in the display order (clamped to the end).
    pub fn move_panel_group(&mut self, id: &PanelGroupId, to_index: usize) -> DashboardResult<()> {
        let from = self
            .panel_group_order
            .iter()
            .position(|existing| existing == id)
            .ok_or_else(|| DashboardError::group_not_found(id.as_str()))?;
        let moved = self.panel_group_order.remove(from);
        let to = to_index.min(self.panel_group_order.len());
        self.panel_group_order.insert(to, moved);
        Ok(())
    }

    pub fn get(&self, id: &PanelGroupId) -> DashboardResult<&PanelGroup> {
        self.panel_groups
            .get(id)
            .ok_or_else(|| DashboardError::group_not_found(id.as_str()))
    }

    pub fn get_mut(&mut self, id: &PanelGroupId) -> DashboardResult<&mut PanelGroup> {
        self.panel_groups
            .get_mut(id)
            .ok_or_else(|| DashboardError::group_not_found(id.as_str()))
    }

    pub fn contains(&self, id: &PanelGroupId) -> bool {
        self.panel_groups.contains_key(id)
    }

    /// Group ids in display order
    pub fn order(&self) -> &[PanelGroupId] {
        &self.panel_group_order
    }

    pub fn first_group_id(&self) -> Option<&PanelGroupId> {
        self.panel_group_order.first()
    }

    /// Groups in display order
    pub fn iter_ordered(&self) -> impl Iterator<Item = &PanelGroup> {
        self.panel_group_order
            .iter()
            .filter_map(|id| self.panel_groups.get(id))
    }

    pub fn groups(&self) -> &BTreeMap<PanelGroupId, PanelGroup> {
        &self.panel_groups
    }

    pub fn len(&self) -> usize {
        self.panel_groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panel_groups.is_empty()
    }

    /// Move a layout item (and its panel key) to the end of another group.
    ///
    /// The new item keeps its width, height and id (a fresh id is drawn only
    /// if the destination already uses it), starts at `x = 0` and sits on the
    /// next free row of the destination. Returns the item's id in the
    /// destination group. Moving within the same group does nothing.
    pub fn move_item(
        &mut self,
        from: &PanelGroupId,
        layout_item_id: &LayoutItemId,
        to: &PanelGroupId,
        ids: &mut dyn IdGenerator,
    ) -> DashboardResult<LayoutItemId> {
        if from == to {
            return Ok(layout_item_id.clone());
        }

        let source = self.get(from)?;
        let destination = self.get(to)?;
        let existing = source
            .item(layout_item_id)
            .ok_or_else(|| DashboardError::item_not_found(from.as_str(), layout_item_id.as_str()))?;

        let moved = LayoutItem {
            i: destination.free_item_id(Some(layout_item_id), ids),
            x: 0,
            y: destination.next_row_y(),
            w: existing.w,
            h: existing.h,
        };
        let moved_id = moved.i.clone();

        let (_, panel_key) = self.get_mut(from)?.remove_item(layout_item_id)?;
        self.get_mut(to)?.add_item(moved, panel_key)?;
        Ok(moved_id)
    }

    /// Apply positions reported by the grid widget to existing items.
    ///
    /// Every reported id must already exist in the group; otherwise nothing
    /// is changed. Geometry is taken as reported.
    pub fn update_item_layouts(&mut self, id: &PanelGroupId, reports: &[LayoutItem]) -> DashboardResult<()> {
        let group = self.get(id)?;
        if let Some(unknown) = reports.iter().find(|report| group.item(&report.i).is_none()) {
            return Err(DashboardError::item_not_found(id.as_str(), unknown.i.as_str()));
        }

        let group = self.get_mut(id)?;
        for report in reports {
            if let Some(layout) = group.item_layouts.iter_mut().find(|layout| layout.i == report.i) {
                layout.x = report.x;
                layout.y = report.y;
                layout.w = report.w;
                layout.h = report.h;
            }
        }
        Ok(())
    }

    /// Check order consistency and every group's own invariants.
    pub fn validate(&self) -> DashboardResult<()> {
        let mut seen = HashSet::new();
        for id in &self.panel_group_order {
            if !seen.insert(id) {
                return Err(DashboardError::corrupt_model(format!(
                    "group '{}' appears twice in the display order",
                    id
                )));
            }
            if !self.panel_groups.contains_key(id) {
                return Err(DashboardError::corrupt_model(format!(
                    "display order references missing group '{}'",
                    id
                )));
            }
        }
        for (id, group) in &self.panel_groups {
            if &group.id != id {
                return Err(DashboardError::corrupt_model(format!(
                    "group stored under '{}' carries id '{}'",
                    id, group.id
                )));
            }
            if !seen.contains(id) {
                return Err(DashboardError::corrupt_model(format!(
                    "group '{}' is missing from the display order",
                    id
                )));
            }
            group.validate()?;
        }
        Ok(())
    }
}
