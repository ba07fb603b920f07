//! # Error Types
//!
//! Structured error types for dash_core. Every error here means the caller
//! passed a stale or invalid identifier; the operation that produced it left
//! the dashboard unmodified.
//!
//! ## Example
//!
//! ```rust
//! use dash_core::errors::{DashboardError, DashboardResult};
//!
//! fn require_title(title: &str) -> DashboardResult<()> {
//!     if title.is_empty() {
//!         return Err(DashboardError::corrupt_model("group title is empty"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_title("").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for dash_core operations
pub type DashboardResult<T> = Result<T, DashboardError>;

/// Structured error type for dashboard operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum DashboardError {
    /// No panel group with this id
    #[error("Panel group not found: {group_id}")]
    GroupNotFound { group_id: String },

    /// No layout item with this id in the named group
    #[error("Panel group item not found: '{layout_item_id}' in group '{group_id}'")]
    ItemNotFound {
        group_id: String,
        layout_item_id: String,
    },

    /// No panel stored under this key
    #[error("Panel not found: '{panel_key}'")]
    PanelNotFound { panel_key: String },

    /// A group with this id is already registered
    #[error("Duplicate panel group: {group_id}")]
    DuplicateGroup { group_id: String },

    /// A panel with this key is already stored
    #[error("Duplicate panel key: '{panel_key}'")]
    DuplicateKey { panel_key: String },

    /// The editor session handle is closed or was replaced by a newer session
    #[error("Panel editor session {session} is not active")]
    SessionNotActive { session: u64 },

    /// The model breaks one of its structural invariants
    #[error("Corrupt dashboard model: {reason}")]
    CorruptModel { reason: String },

    /// Settings are unparseable or describe an impossible grid
    #[error("Invalid settings: {reason}")]
    InvalidSettings { reason: String },
}

impl DashboardError {
    /// Create a GroupNotFound error
    pub fn group_not_found(group_id: impl Into<String>) -> Self {
        DashboardError::GroupNotFound {
            group_id: group_id.into(),
        }
    }

    /// Create an ItemNotFound error
    pub fn item_not_found(group_id: impl Into<String>, layout_item_id: impl Into<String>) -> Self {
        DashboardError::ItemNotFound {
            group_id: group_id.into(),
            layout_item_id: layout_item_id.into(),
        }
    }

    /// Create a PanelNotFound error
    pub fn panel_not_found(panel_key: impl Into<String>) -> Self {
        DashboardError::PanelNotFound {
            panel_key: panel_key.into(),
        }
    }

    /// Create a DuplicateGroup error
    pub fn duplicate_group(group_id: impl Into<String>) -> Self {
        DashboardError::DuplicateGroup {
            group_id: group_id.into(),
        }
    }

    /// Create a DuplicateKey error
    pub fn duplicate_key(panel_key: impl Into<String>) -> Self {
        DashboardError::DuplicateKey {
            panel_key: panel_key.into(),
        }
    }

    /// Create a CorruptModel error
    pub fn corrupt_model(reason: impl Into<String>) -> Self {
        DashboardError::CorruptModel {
            reason: reason.into(),
        }
    }

    /// Create an InvalidSettings error
    pub fn invalid_settings(reason: impl Into<String>) -> Self {
        DashboardError::InvalidSettings {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            DashboardError::GroupNotFound { .. } => "GROUP_NOT_FOUND",
            DashboardError::ItemNotFound { .. } => "ITEM_NOT_FOUND",
            DashboardError::PanelNotFound { .. } => "PANEL_NOT_FOUND",
            DashboardError::DuplicateGroup { .. } => "DUPLICATE_GROUP",
            DashboardError::DuplicateKey { .. } => "DUPLICATE_KEY",
            DashboardError::SessionNotActive { .. } => "SESSION_NOT_ACTIVE",
            DashboardError::CorruptModel { .. } => "CORRUPT_MODEL",
            DashboardError::InvalidSettings { .. } => "INVALID_SETTINGS",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = DashboardError::item_not_found("g-1", "7");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("ItemNotFound"));
        let roundtrip: DashboardError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(DashboardError::group_not_found("g").error_code(), "GROUP_NOT_FOUND");
        assert_eq!(DashboardError::panel_not_found("cpu").error_code(), "PANEL_NOT_FOUND");
        assert_eq!(
            DashboardError::SessionNotActive { session: 3 }.error_code(),
            "SESSION_NOT_ACTIVE"
        );
    }

    #[test]
    fn test_error_display() {
        let error = DashboardError::duplicate_key("CPU");
        assert_eq!(error.to_string(), "Duplicate panel key: 'CPU'");
    }
}
