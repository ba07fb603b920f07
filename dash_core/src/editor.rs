//! # Panel Editor
//!
//! The panel editor stages the creation or modification of one panel. While
//! a session is open the canonical model is untouched; `apply_changes`
//! commits the staged values to the panel store and the panel group store in
//! one step, and `close_panel_editor` drops the session without touching
//! either store.
//!
//! ## States
//!
//! ```text
//!            open_add_panel                 open_edit_panel
//!   Closed ─────────────────> OpenCreate    Closed ─────────────> OpenUpdate
//!     ^                          │            ^                      │
//!     └──── close_panel_editor ──┘            └── close_panel_editor ┘
//! ```
//!
//! Opening a session while another one is open replaces it. Each session is
//! identified by a [`SessionId`]; calls made with the id of a replaced or
//! closed session fail with `SessionNotActive` and change nothing.
//!
//! Sessions hold plain identifiers (group id, layout item id, panel key),
//! never references into the stores.
//!
//! ## Example
//!
//! ```rust
//! use dash_core::dashboard::Dashboard;
//! use dash_core::editor::PanelEditorValues;
//! use dash_core::panel::PanelDefinition;
//!
//! let mut dashboard = Dashboard::new("Node overview");
//! let session = dashboard.open_add_panel(None)?;
//!
//! let group_id = dashboard.panel_editor().initial_values().unwrap().group_id.clone();
//! dashboard.apply_changes(session, PanelEditorValues::new(group_id, PanelDefinition::named("CPU")))?;
//! dashboard.close_panel_editor(session)?;
//!
//! assert_eq!(dashboard.panels().len(), 1);
//! # Ok::<(), dash_core::errors::DashboardError>(())
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::dashboard::Dashboard;
use crate::errors::{DashboardError, DashboardResult};
use crate::ids::{PanelGroupId, PanelGroupItemId, PanelKey};
use crate::keys::resolve_key;
use crate::layout::LayoutItem;
use crate::panel::PanelDefinition;
use crate::panel_group::PanelGroupStore;

/// Whether a session adds a new panel or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    Create,
    Update,
}

/// The editable values of a panel: where it lives and what it shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelEditorValues {
    pub group_id: PanelGroupId,
    pub panel_definition: PanelDefinition,
}

impl PanelEditorValues {
    pub fn new(group_id: impl Into<PanelGroupId>, panel_definition: PanelDefinition) -> Self {
        PanelEditorValues {
            group_id: group_id.into(),
            panel_definition,
        }
    }
}

/// Handle to one editor session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A session adding a new panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSession {
    pub id: SessionId,
    pub initial_values: PanelEditorValues,
}

/// A session editing the panel at `location`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateSession {
    pub id: SessionId,
    pub initial_values: PanelEditorValues,
    /// Current position of the edited item; follows the item when a commit
    /// moves it to another group
    pub location: PanelGroupItemId,
    pub panel_key: PanelKey,
}

/// The editor slot. At most one session is open at any time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum PanelEditor {
    #[default]
    Closed,
    OpenCreate(CreateSession),
    OpenUpdate(UpdateSession),
}

impl PanelEditor {
    pub fn is_open(&self) -> bool {
        !matches!(self, PanelEditor::Closed)
    }

    pub fn session_id(&self) -> Option<SessionId> {
        match self {
            PanelEditor::Closed => None,
            PanelEditor::OpenCreate(session) => Some(session.id),
            PanelEditor::OpenUpdate(session) => Some(session.id),
        }
    }

    pub fn mode(&self) -> Option<EditorMode> {
        match self {
            PanelEditor::Closed => None,
            PanelEditor::OpenCreate(_) => Some(EditorMode::Create),
            PanelEditor::OpenUpdate(_) => Some(EditorMode::Update),
        }
    }

    pub fn initial_values(&self) -> Option<&PanelEditorValues> {
        match self {
            PanelEditor::Closed => None,
            PanelEditor::OpenCreate(session) => Some(&session.initial_values),
            PanelEditor::OpenUpdate(session) => Some(&session.initial_values),
        }
    }
}

// ============================================================================
// Controller
// ============================================================================

impl Dashboard {
    /// Open the editor on the panel at `location`.
    ///
    /// Fails with `GroupNotFound`, `ItemNotFound` or `PanelNotFound` if the
    /// location does not resolve to a stored panel; the editor slot is left
    /// as it was.
    pub fn open_edit_panel(&mut self, location: &PanelGroupItemId) -> DashboardResult<SessionId> {
        let group = self.model.groups.get(&location.panel_group_id)?;
        let panel_key = group.panel_key(&location.layout_item_id).cloned().ok_or_else(|| {
            DashboardError::item_not_found(location.panel_group_id.as_str(), location.layout_item_id.as_str())
        })?;
        let panel = self.model.panels.get(&panel_key)?.clone();

        let session = UpdateSession {
            id: self.next_session_id(),
            initial_values: PanelEditorValues::new(location.panel_group_id.clone(), panel),
            location: location.clone(),
            panel_key,
        };
        let id = session.id;
        debug!(session = %id, %location, panel_key = %session.panel_key, "panel editor opened for update");
        self.editor = PanelEditor::OpenUpdate(session);
        Ok(id)
    }

    /// Open the editor for a new panel.
    ///
    /// Without a group id the first group in display order is targeted. If
    /// the dashboard has no groups, a new one titled after
    /// `default_group_title` is registered right away, so closing the
    /// session without applying leaves that empty group behind.
    pub fn open_add_panel(&mut self, group_id: Option<&PanelGroupId>) -> DashboardResult<SessionId> {
        self.open_add_panel_with(group_id, None)
    }

    /// Like [`open_add_panel`](Self::open_add_panel), staging `default` as the
    /// initial definition instead of the one from the settings.
    pub fn open_add_panel_with(
        &mut self,
        group_id: Option<&PanelGroupId>,
        default: Option<PanelDefinition>,
    ) -> DashboardResult<SessionId> {
        let target = match group_id {
            Some(id) => {
                self.model.groups.get(id)?;
                id.clone()
            }
            None => match self.model.groups.first_group_id() {
                Some(first) => first.clone(),
                None => {
                    let mut group = PanelGroupStore::create_empty_panel_group(self.ids.as_mut());
                    group.title = self.settings.default_group_title.clone();
                    let id = group.id.clone();
                    self.model.groups.add_panel_group(group)?;
                    self.touch();
                    debug!(group_id = %id, "created panel group for new panel");
                    id
                }
            },
        };

        let session = CreateSession {
            id: self.next_session_id(),
            initial_values: PanelEditorValues::new(
                target,
                default.unwrap_or_else(|| self.settings.initial_panel_definition()),
            ),
        };
        let id = session.id;
        debug!(session = %id, group_id = %session.initial_values.group_id, "panel editor opened for create");
        self.editor = PanelEditor::OpenCreate(session);
        Ok(id)
    }

    /// Commit `next` through the session `session`. The session stays open.
    pub fn apply_changes(&mut self, session: SessionId, next: PanelEditorValues) -> DashboardResult<()> {
        self.ensure_live(session)?;
        match self.editor.clone() {
            PanelEditor::OpenCreate(_) => self.apply_create(session, next),
            PanelEditor::OpenUpdate(update) => self.apply_update(update, next),
            PanelEditor::Closed => Err(DashboardError::SessionNotActive { session: session.0 }),
        }
    }

    /// Close the session. Neither store is touched.
    pub fn close_panel_editor(&mut self, session: SessionId) -> DashboardResult<()> {
        self.ensure_live(session)?;
        self.editor = PanelEditor::Closed;
        debug!(session = %session, "panel editor closed");
        Ok(())
    }

    /// Id of the open session, if any
    pub fn active_session(&self) -> Option<SessionId> {
        self.editor.session_id()
    }

    fn ensure_live(&self, session: SessionId) -> DashboardResult<()> {
        if self.editor.session_id() == Some(session) {
            Ok(())
        } else {
            warn!(session = %session, live = ?self.editor.session_id(), "rejected call on inactive panel editor session");
            Err(DashboardError::SessionNotActive { session: session.0 })
        }
    }

    fn apply_create(&mut self, session: SessionId, next: PanelEditorValues) -> DashboardResult<()> {
        let panel_key = resolve_key(next.panel_definition.name(), &self.model.panels);
        if self.model.panels.contains(&panel_key) {
            return Err(DashboardError::duplicate_key(panel_key.as_str()));
        }

        let group = self.model.groups.get(&next.group_id)?;
        let layout = LayoutItem {
            i: group.free_item_id(None, self.ids.as_mut()),
            x: 0,
            y: group.next_row_y(),
            w: self.settings.default_panel_width,
            h: self.settings.default_panel_height,
        }
        .fit_to_grid(self.settings.grid_columns);

        let layout_item_id = layout.i.clone();
        self.model.groups.get_mut(&next.group_id)?.add_item(layout, panel_key.clone())?;
        self.model.panels.put(panel_key.clone(), next.panel_definition);
        self.touch();

        debug!(
            session = %session,
            group_id = %next.group_id,
            layout_item_id = %layout_item_id,
            panel_key = %panel_key,
            "panel created"
        );
        Ok(())
    }

    fn apply_update(&mut self, update: UpdateSession, next: PanelEditorValues) -> DashboardResult<()> {
        let UpdateSession {
            id,
            location,
            panel_key,
            ..
        } = update;

        let source = self.model.groups.get(&location.panel_group_id)?;
        if source.panel_key(&location.layout_item_id) != Some(&panel_key) {
            return Err(DashboardError::item_not_found(
                location.panel_group_id.as_str(),
                location.layout_item_id.as_str(),
            ));
        }
        self.model.panels.get(&panel_key)?;
        self.model.groups.get(&next.group_id)?;

        let layout_item_id = self.model.groups.move_item(
            &location.panel_group_id,
            &location.layout_item_id,
            &next.group_id,
            self.ids.as_mut(),
        )?;
        self.model.panels.put(panel_key.clone(), next.panel_definition);
        self.touch();

        if next.group_id != location.panel_group_id {
            debug!(
                session = %id,
                from = %location.panel_group_id,
                to = %next.group_id,
                panel_key = %panel_key,
                "panel moved to another group"
            );
        }
        debug!(session = %id, panel_key = %panel_key, "panel updated");

        if let PanelEditor::OpenUpdate(live) = &mut self.editor {
            live.location = PanelGroupItemId {
                panel_group_id: next.group_id,
                layout_item_id,
            };
        }
        Ok(())
    }
}
