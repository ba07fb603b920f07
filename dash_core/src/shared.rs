//! Shared dashboard handle for multi-threaded hosts.
//!
//! A commit through the panel editor touches both stores, so both stores and
//! the editor slot sit behind one mutex.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::dashboard::{Dashboard, DashboardModel};

/// Cloneable handle to a dashboard guarded by a single lock.
#[derive(Debug, Clone)]
pub struct SharedDashboard {
    inner: Arc<Mutex<Dashboard>>,
}

impl SharedDashboard {
    pub fn new(dashboard: Dashboard) -> Self {
        SharedDashboard {
            inner: Arc::new(Mutex::new(dashboard)),
        }
    }

    /// Run `f` with exclusive access to the dashboard.
    pub fn with<R>(&self, f: impl FnOnce(&mut Dashboard) -> R) -> R {
        let mut dashboard = self.inner.lock();
        f(&mut dashboard)
    }

    /// Copy of the current model
    pub fn snapshot(&self) -> DashboardModel {
        self.inner.lock().model().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::PanelEditorValues;
    use crate::panel::PanelDefinition;
    use std::thread;

    #[test]
    fn test_concurrent_commits_keep_invariants() {
        let shared = SharedDashboard::new(Dashboard::new("shared"));
        let group = shared.with(|d| d.add_panel_group("All")).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|n| {
                let shared = shared.clone();
                let group = group.clone();
                thread::spawn(move || {
                    shared.with(|d| {
                        let session = d.open_add_panel(Some(&group))?;
                        d.apply_changes(
                            session,
                            PanelEditorValues::new(group.clone(), PanelDefinition::named(format!("P{}", n))),
                        )?;
                        d.close_panel_editor(session)
                    })
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        let model = shared.snapshot();
        assert_eq!(model.panels.len(), 8);
        model.validate().unwrap();

        let group = model.groups.get(&group).unwrap();
        let mut rows: Vec<u32> = group.item_layouts().iter().map(|item| item.y).collect();
        rows.sort_unstable();
        assert_eq!(rows, (0..8).map(|n| n * 6).collect::<Vec<u32>>());
    }
}
