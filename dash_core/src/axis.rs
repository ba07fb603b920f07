//! # Axis Formatting
//!
//! Builds value-axis options for chart panels. Number formatting itself is
//! done by the host through [`ValueFormatter`]; this module only carries the
//! caller's [`FormatOptions`] through untouched and merges axis overrides
//! onto the defaults.
//!
//! ## Example
//!
//! ```rust
//! use dash_core::axis::{formatted_axis, FormatOptions, ValueFormatter};
//! use serde_json::json;
//!
//! struct Percent;
//!
//! impl ValueFormatter for Percent {
//!     fn format_value(&self, value: f64, _options: Option<&FormatOptions>) -> String {
//!         format!("{:.0}%", value * 100.0)
//!     }
//! }
//!
//! let unit = FormatOptions(json!({ "unit": "percent-decimal" }));
//! let axes = formatted_axis(Some(json!({ "min": 0 })), Some(unit));
//!
//! assert_eq!(axes[0].options["type"], "value");
//! assert_eq!(axes[0].options["min"], 0);
//! assert_eq!(axes[0].format_label(&Percent, 0.25), "25%");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Opaque formatting options handed to the formatter as-is
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormatOptions(pub Value);

/// Turns a number into an axis label. Implemented by the host.
pub trait ValueFormatter {
    fn format_value(&self, value: f64, options: Option<&FormatOptions>) -> String;
}

impl<F> ValueFormatter for F
where
    F: Fn(f64, Option<&FormatOptions>) -> String,
{
    fn format_value(&self, value: f64, options: Option<&FormatOptions>) -> String {
        self(value, options)
    }
}

/// A value axis: its chart options and the unit its labels are formatted with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisOptions {
    pub options: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<FormatOptions>,
}

impl AxisOptions {
    /// Label for a tick at `value`
    pub fn format_label(&self, formatter: &dyn ValueFormatter, value: f64) -> String {
        formatter.format_value(value, self.unit.as_ref())
    }
}

/// Default options of a value axis
pub fn default_axis_options() -> Value {
    json!({
        "type": "value",
        "boundaryGap": [0, "10%"],
    })
}

/// Value-axis options with `overrides` deep-merged onto the defaults.
///
/// Returned as a list because charts may carry several value axes; today
/// there is always exactly one.
pub fn formatted_axis(overrides: Option<Value>, unit: Option<FormatOptions>) -> Vec<AxisOptions> {
    let mut options = default_axis_options();
    if let Some(overrides) = overrides {
        merge(&mut options, overrides);
    }
    vec![AxisOptions { options, unit }]
}

/// Recursively merge `patch` into `target`.
///
/// Objects merge key by key, arrays merge index by index, and `null` in the
/// patch leaves the target value alone. Any other value replaces the target.
pub fn merge(target: &mut Value, patch: Value) {
    match (target, patch) {
        (_, Value::Null) => {}
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                match target.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        if !value.is_null() {
                            target.insert(key, value);
                        }
                    }
                }
            }
        }
        (Value::Array(target), Value::Array(patch)) => {
            for (index, value) in patch.into_iter().enumerate() {
                match target.get_mut(index) {
                    Some(existing) => merge(existing, value),
                    None => target.push(value),
                }
            }
        }
        (target, patch) => *target = patch,
    }
}
