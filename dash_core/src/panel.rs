//! # Panels
//!
//! A panel is one visualization on the dashboard. Its plugin payload is
//! opaque to this crate and carried as raw JSON.
//!
//! ## JSON Shape
//!
//! ```json
//! {
//!   "kind": "Panel",
//!   "spec": {
//!     "display": { "name": "CPU" },
//!     "plugin": { "kind": "TimeSeriesChart", "spec": { "queries": [] } }
//!   }
//! }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use dash_core::ids::PanelKey;
//! use dash_core::panel::{PanelDefinition, PanelStore};
//!
//! let mut panels = PanelStore::new();
//! panels.put(PanelKey::from("CPU"), PanelDefinition::named("CPU"));
//! assert_eq!(panels.get(&PanelKey::from("CPU")).unwrap().name(), "CPU");
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{DashboardError, DashboardResult};
use crate::ids::PanelKey;

/// Resource kind written into every panel definition
pub const PANEL_KIND: &str = "Panel";

/// A panel definition as stored on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelDefinition {
    pub kind: String,
    pub spec: PanelSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSpec {
    pub display: PanelDisplay,
    pub plugin: PluginSpec,
}

/// Display metadata shown in the panel header
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PanelDisplay {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Visualization plugin selection and its configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginSpec {
    pub kind: String,
    #[serde(default = "empty_object")]
    pub spec: Value,
}

impl Default for PluginSpec {
    fn default() -> Self {
        PluginSpec {
            kind: String::new(),
            spec: empty_object(),
        }
    }
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

impl PanelDefinition {
    /// An empty definition: no name, no plugin selected.
    pub fn empty() -> Self {
        PanelDefinition {
            kind: PANEL_KIND.to_string(),
            spec: PanelSpec {
                display: PanelDisplay::default(),
                plugin: PluginSpec::default(),
            },
        }
    }

    /// An empty definition with the given display name
    pub fn named(name: impl Into<String>) -> Self {
        let mut panel = PanelDefinition::empty();
        panel.spec.display.name = name.into();
        panel
    }

    /// Builder: select a plugin and its configuration
    pub fn with_plugin(mut self, kind: impl Into<String>, spec: Value) -> Self {
        self.spec.plugin = PluginSpec {
            kind: kind.into(),
            spec,
        };
        self
    }

    /// Display name of the panel
    pub fn name(&self) -> &str {
        &self.spec.display.name
    }
}

impl Default for PanelDefinition {
    fn default() -> Self {
        PanelDefinition::empty()
    }
}

// ============================================================================
// Panel Store
// ============================================================================

/// Mapping from panel key to panel definition.
///
/// Backed by a `BTreeMap` so iteration and serialized output are ordered.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelStore {
    panels: BTreeMap<PanelKey, PanelDefinition>,
}

impl PanelStore {
    pub fn new() -> Self {
        PanelStore::default()
    }

    /// Insert or overwrite. Returns the previous definition, if any.
    pub fn put(&mut self, key: PanelKey, panel: PanelDefinition) -> Option<PanelDefinition> {
        self.panels.insert(key, panel)
    }

    pub fn get(&self, key: &PanelKey) -> DashboardResult<&PanelDefinition> {
        self.panels
            .get(key)
            .ok_or_else(|| DashboardError::panel_not_found(key.as_str()))
    }

    pub fn contains(&self, key: &PanelKey) -> bool {
        self.panels.contains_key(key)
    }

    pub fn remove(&mut self, key: &PanelKey) -> Option<PanelDefinition> {
        self.panels.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &PanelKey> {
        self.panels.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PanelKey, &PanelDefinition)> {
        self.panels.iter()
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_put_overwrites() {
        let mut panels = PanelStore::new();
        let key = PanelKey::from("CPU");
        assert!(panels.put(key.clone(), PanelDefinition::named("CPU")).is_none());

        let previous = panels.put(key.clone(), PanelDefinition::named("CPU usage"));
        assert_eq!(previous.unwrap().name(), "CPU");
        assert_eq!(panels.get(&key).unwrap().name(), "CPU usage");
        assert_eq!(panels.len(), 1);
    }

    #[test]
    fn test_get_missing_panel() {
        let panels = PanelStore::new();
        let err = panels.get(&PanelKey::from("nope")).unwrap_err();
        assert_eq!(err, DashboardError::panel_not_found("nope"));
    }

    #[test]
    fn test_panel_json_shape() {
        let panel = PanelDefinition::named("Memory")
            .with_plugin("TimeSeriesChart", json!({ "legend": { "position": "bottom" } }));
        let value = serde_json::to_value(&panel).unwrap();
        assert_eq!(value["kind"], "Panel");
        assert_eq!(value["spec"]["display"]["name"], "Memory");
        assert_eq!(value["spec"]["plugin"]["kind"], "TimeSeriesChart");
        assert_eq!(value["spec"]["plugin"]["spec"]["legend"]["position"], "bottom");
        assert!(value["spec"]["display"].get("description").is_none());
    }

    #[test]
    fn test_plugin_spec_defaults_to_empty_object() {
        let panel: PanelDefinition = serde_json::from_value(json!({
            "kind": "Panel",
            "spec": { "display": { "name": "x" }, "plugin": { "kind": "" } }
        }))
        .unwrap();
        assert_eq!(panel, PanelDefinition::named("x"));
    }
}
