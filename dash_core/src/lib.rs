//! # dash_core - Dashboard Panel Model
//!
//! `dash_core` holds the editable in-memory model of a dashboard: panels,
//! the panel groups (rows) that place them on a grid, and a panel editor
//! that stages one create or edit at a time and commits it atomically.
//!
//! ## Design Philosophy
//!
//! - **One owner**: [`Dashboard`] owns every store; mutation needs `&mut`
//! - **All or nothing**: operations validate before they mutate
//! - **JSON-First**: model types implement Serialize/Deserialize
//! - **Rich Errors**: structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use dash_core::{Dashboard, PanelDefinition, PanelEditorValues};
//!
//! let mut dashboard = Dashboard::new("Node overview");
//!
//! // No groups yet: a "Panel Group" is created for the new panel
//! let session = dashboard.open_add_panel(None)?;
//! let group_id = dashboard.panel_group_order()[0].clone();
//! dashboard.apply_changes(session, PanelEditorValues::new(group_id, PanelDefinition::named("CPU")))?;
//! dashboard.close_panel_editor(session)?;
//!
//! let json = serde_json::to_string_pretty(dashboard.model()).unwrap();
//! assert!(json.contains("\"CPU\""));
//! # Ok::<(), dash_core::DashboardError>(())
//! ```
//!
//! ## Modules
//!
//! - [`dashboard`] - State container, queries and group/item commands
//! - [`editor`] - Panel editor sessions (create/update, apply, close)
//! - [`panel_group`] - Panel groups and the group store
//! - [`panel`] - Panel definitions and the panel store
//! - [`layout`] - Grid layout items and row placement
//! - [`keys`] - Panel key resolution
//! - [`ids`] - Identifier newtypes and generators
//! - [`commands`] - Serializable command surface
//! - [`axis`] - Value-axis options and the formatter seam
//! - [`settings`] - Dashboard defaults
//! - [`shared`] - Single-lock handle for multi-threaded hosts
//! - [`errors`] - Structured error types

pub mod axis;
pub mod commands;
pub mod dashboard;
pub mod editor;
pub mod errors;
pub mod ids;
pub mod keys;
pub mod layout;
pub mod panel;
pub mod panel_group;
pub mod settings;
pub mod shared;

// Re-export commonly used types at crate root for convenience
pub use commands::{Command, CommandOutcome};
pub use dashboard::{Dashboard, DashboardModel};
pub use editor::{EditorMode, PanelEditor, PanelEditorValues, SessionId};
pub use errors::{DashboardError, DashboardResult};
pub use ids::{LayoutItemId, PanelGroupId, PanelGroupItemId, PanelKey};
pub use layout::LayoutItem;
pub use panel::{PanelDefinition, PanelStore};
pub use panel_group::{PanelGroup, PanelGroupStore};
pub use settings::DashboardSettings;
pub use shared::SharedDashboard;
