//! # Commands
//!
//! The dashboard command surface as data. Front ends that speak JSON (the
//! CLI, a web bridge) deserialize [`Command`]s and hand them to
//! [`Dashboard::execute`].
//!
//! Editor commands act on the live session; with no session open,
//! `apply_changes` and `close_panel_editor` fail with `SessionNotActive`.
//!
//! ## JSON Format
//!
//! ```json
//! { "command": "open_add_panel" }
//! { "command": "apply_changes", "values": { "groupId": "0", "panelDefinition": { ... } } }
//! { "command": "close_panel_editor" }
//! ```

use serde::{Deserialize, Serialize};

use crate::dashboard::Dashboard;
use crate::editor::{PanelEditorValues, SessionId};
use crate::errors::{DashboardError, DashboardResult};
use crate::ids::{PanelGroupId, PanelGroupItemId};
use crate::layout::LayoutItem;
use crate::panel::PanelDefinition;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    OpenEditPanel {
        location: PanelGroupItemId,
    },
    OpenAddPanel {
        #[serde(default)]
        group_id: Option<PanelGroupId>,
        /// Initial definition to stage instead of the configured one
        #[serde(default)]
        default: Option<PanelDefinition>,
    },
    ApplyChanges {
        values: PanelEditorValues,
    },
    ClosePanelEditor,
    AddPanelGroup {
        title: String,
    },
    RenamePanelGroup {
        group_id: PanelGroupId,
        title: String,
    },
    SetPanelGroupCollapsed {
        group_id: PanelGroupId,
        collapsed: bool,
    },
    MovePanelGroup {
        group_id: PanelGroupId,
        to_index: usize,
    },
    DeletePanelGroup {
        group_id: PanelGroupId,
    },
    DeletePanel {
        location: PanelGroupItemId,
    },
    /// Positions reported by the grid widget
    UpdateItemLayouts {
        group_id: PanelGroupId,
        layouts: Vec<LayoutItem>,
    },
}

/// What a successful command produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "id", rename_all = "snake_case")]
pub enum CommandOutcome {
    Done,
    SessionOpened(SessionId),
    GroupAdded(PanelGroupId),
}

impl Dashboard {
    /// Run one command against the dashboard.
    pub fn execute(&mut self, command: Command) -> DashboardResult<CommandOutcome> {
        match command {
            Command::OpenEditPanel { location } => {
                self.open_edit_panel(&location).map(CommandOutcome::SessionOpened)
            }
            Command::OpenAddPanel { group_id, default } => self
                .open_add_panel_with(group_id.as_ref(), default)
                .map(CommandOutcome::SessionOpened),
            Command::ApplyChanges { values } => {
                let session = self.require_session()?;
                self.apply_changes(session, values)?;
                Ok(CommandOutcome::Done)
            }
            Command::ClosePanelEditor => {
                let session = self.require_session()?;
                self.close_panel_editor(session)?;
                Ok(CommandOutcome::Done)
            }
            Command::AddPanelGroup { title } => self.add_panel_group(title).map(CommandOutcome::GroupAdded),
            Command::RenamePanelGroup { group_id, title } => {
                self.rename_panel_group(&group_id, title)?;
                Ok(CommandOutcome::Done)
            }
            Command::SetPanelGroupCollapsed { group_id, collapsed } => {
                self.set_panel_group_collapsed(&group_id, collapsed)?;
                Ok(CommandOutcome::Done)
            }
            Command::MovePanelGroup { group_id, to_index } => {
                self.move_panel_group(&group_id, to_index)?;
                Ok(CommandOutcome::Done)
            }
            Command::DeletePanelGroup { group_id } => {
                self.delete_panel_group(&group_id)?;
                Ok(CommandOutcome::Done)
            }
            Command::DeletePanel { location } => {
                self.delete_panel(&location)?;
                Ok(CommandOutcome::Done)
            }
            Command::UpdateItemLayouts { group_id, layouts } => {
                self.update_item_layouts(&group_id, &layouts)?;
                Ok(CommandOutcome::Done)
            }
        }
    }

    fn require_session(&self) -> DashboardResult<SessionId> {
        // session ids start at 1, so 0 never names a real session
        self.active_session()
            .ok_or(DashboardError::SessionNotActive { session: 0 })
    }
}
