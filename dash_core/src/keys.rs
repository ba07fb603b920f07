//! # Panel Key Resolution
//!
//! Derives a panel key from a display name. Whitespace is stripped; if the
//! result is already taken, `-1`, `-2`, ... are tried in order and the first
//! free suffix wins.
//!
//! ```rust
//! use dash_core::ids::PanelKey;
//! use dash_core::keys::resolve_key;
//! use dash_core::panel::{PanelDefinition, PanelStore};
//!
//! let mut panels = PanelStore::new();
//! panels.put(PanelKey::from("a"), PanelDefinition::named("a"));
//! panels.put(PanelKey::from("a-1"), PanelDefinition::named("a"));
//!
//! assert_eq!(resolve_key("a", &panels), PanelKey::from("a-2"));
//! ```

use crate::ids::PanelKey;
use crate::panel::PanelStore;

/// Key used when a display name normalizes to nothing
pub const FALLBACK_PANEL_KEY: &str = "Panel";

/// Strip all whitespace from a display name.
pub fn normalize_name(name: &str) -> String {
    let key: String = name.chars().filter(|c| !c.is_whitespace()).collect();
    if key.is_empty() {
        FALLBACK_PANEL_KEY.to_string()
    } else {
        key
    }
}

/// Resolve a key for `candidate_name` that no panel in `existing` uses.
pub fn resolve_key(candidate_name: &str, existing: &PanelStore) -> PanelKey {
    let base = normalize_name(candidate_name);
    let key = PanelKey(base.clone());
    if !existing.contains(&key) {
        return key;
    }

    let mut suffix: u64 = 1;
    loop {
        let key = PanelKey(format!("{}-{}", base, suffix));
        if !existing.contains(&key) {
            return key;
        }
        suffix += 1;
    }
}
