//! # Dashboard State Container
//!
//! `Dashboard` is the root container for the editable dashboard model. It
//! exclusively owns the panel store, the panel group store, the editor slot,
//! the settings and the id generator. All mutation goes through `&mut self`
//! methods, so a reader never sees a half-applied change.
//!
//! ## Structure
//!
//! ```text
//! Dashboard
//! ├── meta: DashboardMetadata (version, name, timestamps)
//! ├── settings: DashboardSettings (grid width, default panel size, ...)
//! ├── model: DashboardModel
//! │   ├── panels: PanelKey -> PanelDefinition
//! │   ├── panelGroups: PanelGroupId -> PanelGroup
//! │   └── panelGroupOrder: [PanelGroupId]
//! └── editor: PanelEditor (Closed | OpenCreate | OpenUpdate)
//! ```
//!
//! The panel editor commands live in [`crate::editor`].
//!
//! ## Example
//!
//! ```rust
//! use dash_core::dashboard::Dashboard;
//!
//! let mut dashboard = Dashboard::new("Node overview");
//! let group = dashboard.add_panel_group("System")?;
//!
//! assert_eq!(dashboard.panel_group_order(), &[group]);
//! # Ok::<(), dash_core::errors::DashboardError>(())
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::editor::{PanelEditor, SessionId};
use crate::errors::{DashboardError, DashboardResult};
use crate::ids::{IdGenerator, PanelGroupId, PanelGroupItemId, PanelKey, UuidIdGenerator};
use crate::layout::LayoutItem;
use crate::panel::PanelStore;
use crate::panel_group::{PanelGroup, PanelGroupStore};
use crate::settings::DashboardSettings;

/// Current schema version of the dashboard model
pub const SCHEMA_VERSION: &str = "0.1.0";

/// The canonical dashboard model: panels, groups and group order.
///
/// This is what hosts persist and what equality checks compare; editor
/// state and metadata are not part of it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardModel {
    pub panels: PanelStore,
    #[serde(flatten)]
    pub groups: PanelGroupStore,
}

impl DashboardModel {
    /// Check every structural invariant.
    ///
    /// - each group keeps layouts and panel keys in lockstep
    /// - the display order lists every group exactly once
    /// - every layout item references a stored panel
    /// - every stored panel is referenced by exactly one layout item
    pub fn validate(&self) -> DashboardResult<()> {
        self.groups.validate()?;

        let mut references: HashMap<&PanelKey, usize> = HashMap::new();
        for group in self.groups.groups().values() {
            for (item, key) in group.item_panel_keys() {
                if !self.panels.contains(key) {
                    return Err(DashboardError::corrupt_model(format!(
                        "item '{}' in group '{}' references missing panel '{}'",
                        item, group.id, key
                    )));
                }
                *references.entry(key).or_insert(0) += 1;
            }
        }
        for key in self.panels.keys() {
            match references.get(key) {
                Some(1) => {}
                Some(n) => {
                    return Err(DashboardError::corrupt_model(format!(
                        "panel '{}' is referenced by {} layout items",
                        key, n
                    )))
                }
                None => {
                    return Err(DashboardError::corrupt_model(format!(
                        "panel '{}' is not placed in any group",
                        key
                    )))
                }
            }
        }
        Ok(())
    }
}

/// Dashboard metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Display name of the dashboard
    pub name: String,

    /// When the dashboard was created
    pub created: DateTime<Utc>,

    /// When the model was last changed
    pub modified: DateTime<Utc>,
}

/// Root dashboard state container.
#[derive(Debug)]
pub struct Dashboard {
    pub(crate) meta: DashboardMetadata,
    pub(crate) settings: DashboardSettings,
    pub(crate) model: DashboardModel,
    pub(crate) editor: PanelEditor,
    pub(crate) ids: Box<dyn IdGenerator>,
    next_session: u64,
}

impl Dashboard {
    /// Create an empty dashboard with default settings and UUID ids.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dash_core::dashboard::Dashboard;
    ///
    /// let dashboard = Dashboard::new("Node overview");
    /// assert_eq!(dashboard.metadata().name, "Node overview");
    /// assert!(dashboard.panels().is_empty());
    /// ```
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Dashboard {
            meta: DashboardMetadata {
                version: SCHEMA_VERSION.to_string(),
                name: name.into(),
                created: now,
                modified: now,
            },
            settings: DashboardSettings::default(),
            model: DashboardModel::default(),
            editor: PanelEditor::Closed,
            ids: Box::new(UuidIdGenerator),
            next_session: 1,
        }
    }

    /// Adopt an externally loaded model after checking its invariants.
    pub fn from_model(name: impl Into<String>, model: DashboardModel) -> DashboardResult<Self> {
        model.validate()?;
        let mut dashboard = Dashboard::new(name);
        dashboard.model = model;
        Ok(dashboard)
    }

    /// Builder: replace the settings
    pub fn with_settings(mut self, settings: DashboardSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Builder: replace the id generator
    pub fn with_id_generator(mut self, ids: Box<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn panels(&self) -> &PanelStore {
        &self.model.panels
    }

    pub fn panel_groups(&self) -> &PanelGroupStore {
        &self.model.groups
    }

    pub fn panel_group_order(&self) -> &[PanelGroupId] {
        self.model.groups.order()
    }

    pub fn panel_editor(&self) -> &PanelEditor {
        &self.editor
    }

    pub fn model(&self) -> &DashboardModel {
        &self.model
    }

    pub fn metadata(&self) -> &DashboardMetadata {
        &self.meta
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    pub fn validate(&self) -> DashboardResult<()> {
        self.model.validate()
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub(crate) fn next_session_id(&mut self) -> SessionId {
        let id = SessionId(self.next_session);
        self.next_session += 1;
        id
    }

    // ------------------------------------------------------------------
    // Group commands
    // ------------------------------------------------------------------

    /// Create and register an empty group at the end of the display order.
    pub fn add_panel_group(&mut self, title: impl Into<String>) -> DashboardResult<PanelGroupId> {
        let mut group = PanelGroupStore::create_empty_panel_group(self.ids.as_mut());
        group.title = title.into();
        let id = group.id.clone();
        self.model.groups.add_panel_group(group)?;
        self.touch();
        debug!(group_id = %id, "panel group added");
        Ok(id)
    }

    pub fn rename_panel_group(&mut self, id: &PanelGroupId, title: impl Into<String>) -> DashboardResult<()> {
        self.model.groups.get_mut(id)?.title = title.into();
        self.touch();
        Ok(())
    }

    pub fn set_panel_group_collapsed(&mut self, id: &PanelGroupId, collapsed: bool) -> DashboardResult<()> {
        self.model.groups.get_mut(id)?.is_collapsed = collapsed;
        self.touch();
        Ok(())
    }

    /// Move a group to `to_index` in the display order.
    pub fn move_panel_group(&mut self, id: &PanelGroupId, to_index: usize) -> DashboardResult<()> {
        self.model.groups.move_panel_group(id, to_index)?;
        self.touch();
        debug!(group_id = %id, to_index, "panel group reordered");
        Ok(())
    }

    /// Delete a group together with every panel placed in it.
    pub fn delete_panel_group(&mut self, id: &PanelGroupId) -> DashboardResult<PanelGroup> {
        let group = self.model.groups.remove_panel_group(id)?;
        for key in group.item_panel_keys().values() {
            self.model.panels.remove(key);
        }
        self.touch();
        debug!(group_id = %id, panels = group.len(), "panel group deleted");
        Ok(group)
    }

    // ------------------------------------------------------------------
    // Item commands
    // ------------------------------------------------------------------

    /// Delete the panel at `location`: its layout item, its key mapping and
    /// the panel definition go together.
    pub fn delete_panel(&mut self, location: &PanelGroupItemId) -> DashboardResult<()> {
        let (_, panel_key) = self
            .model
            .groups
            .get_mut(&location.panel_group_id)?
            .remove_item(&location.layout_item_id)?;
        self.model.panels.remove(&panel_key);
        self.touch();
        debug!(%location, panel_key = %panel_key, "panel deleted");
        Ok(())
    }

    /// Apply positions reported by the grid widget for one group.
    pub fn update_item_layouts(&mut self, id: &PanelGroupId, reports: &[LayoutItem]) -> DashboardResult<()> {
        self.model.groups.update_item_layouts(id, reports)?;
        self.touch();
        debug!(group_id = %id, items = reports.len(), "item layouts updated");
        Ok(())
    }
}
