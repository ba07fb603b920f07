//! # Dashboard Settings
//!
//! Defaults used when the core places or creates things on its own: grid
//! width, size of newly added panels, the title of an automatically created
//! group, and the definition a new panel starts from.
//!
//! Settings are plain JSON so a host can keep them next to its own config.
//!
//! ```rust
//! use dash_core::settings::DashboardSettings;
//!
//! let settings: DashboardSettings = serde_json::from_str(r#"{ "default_panel_height": 8 }"#).unwrap();
//! assert_eq!(settings.default_panel_height, 8);
//! assert_eq!(settings.grid_columns, 12);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{DashboardError, DashboardResult};
use crate::layout::GRID_COLUMNS;
use crate::panel::PanelDefinition;

/// Title given to a group created because the dashboard had none
pub const DEFAULT_GROUP_TITLE: &str = "Panel Group";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Number of grid columns
    pub grid_columns: u32,

    /// Width of a panel added through the editor
    pub default_panel_width: u32,

    /// Height of a panel added through the editor
    pub default_panel_height: u32,

    /// Title of a group synthesized for the first panel
    pub default_group_title: String,

    /// Starting definition for new panels (e.g. a preferred plugin kind).
    /// `None` starts from an empty definition.
    pub default_panel_definition: Option<PanelDefinition>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        DashboardSettings {
            grid_columns: GRID_COLUMNS,
            default_panel_width: GRID_COLUMNS,
            default_panel_height: 6,
            default_group_title: DEFAULT_GROUP_TITLE.to_string(),
            default_panel_definition: None,
        }
    }
}

impl DashboardSettings {
    /// Parse settings from JSON, filling omitted fields with defaults.
    pub fn from_json(json: &str) -> DashboardResult<Self> {
        let settings: DashboardSettings =
            serde_json::from_str(json).map_err(|e| DashboardError::invalid_settings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings that would place panels outside the grid.
    pub fn validate(&self) -> DashboardResult<()> {
        if self.grid_columns == 0 {
            return Err(DashboardError::invalid_settings("grid_columns must be positive"));
        }
        if self.default_panel_width == 0 || self.default_panel_width > self.grid_columns {
            return Err(DashboardError::invalid_settings(format!(
                "default_panel_width {} must be between 1 and {}",
                self.default_panel_width, self.grid_columns
            )));
        }
        if self.default_panel_height == 0 {
            return Err(DashboardError::invalid_settings("default_panel_height must be positive"));
        }
        Ok(())
    }

    /// Definition a new panel editor session starts from
    pub fn initial_panel_definition(&self) -> PanelDefinition {
        self.default_panel_definition
            .clone()
            .unwrap_or_else(PanelDefinition::empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = DashboardSettings::default();
        assert_eq!(settings.grid_columns, 12);
        assert_eq!(settings.default_panel_width, 12);
        assert_eq!(settings.default_panel_height, 6);
        assert_eq!(settings.default_group_title, "Panel Group");
        assert_eq!(settings.initial_panel_definition(), PanelDefinition::empty());
        settings.validate().unwrap();
    }

    #[test]
    fn test_from_json_partial() {
        let settings = DashboardSettings::from_json(
            r#"{ "default_group_title": "Row", "default_panel_definition":
                { "kind": "Panel", "spec": { "display": { "name": "" }, "plugin": { "kind": "TimeSeriesChart" } } } }"#,
        )
        .unwrap();
        assert_eq!(settings.default_group_title, "Row");
        assert_eq!(settings.initial_panel_definition().spec.plugin.kind, "TimeSeriesChart");
        assert_eq!(settings.default_panel_height, 6);
    }

    #[test]
    fn test_from_json_rejects_oversized_width() {
        let err = DashboardSettings::from_json(r#"{ "default_panel_width": 13 }"#).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SETTINGS");
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(DashboardSettings::from_json("not json").is_err());
    }
}
