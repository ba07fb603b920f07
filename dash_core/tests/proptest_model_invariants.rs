//! Property-based tests for the dashboard model.
//!
//! Random sequences of group commands and panel editor sessions are replayed
//! against a dashboard. After every step:
//!
//! 1. **Consistency**: `validate()` passes, so layouts and panel keys stay in
//!    lockstep and every panel is placed exactly once.
//!
//! 2. **Atomicity**: a step that fails leaves the model exactly as it was.
//!
//! 3. **Placement**: a created or moved panel lands at `x = 0` below every
//!    item its destination group held before.

use dash_core::ids::SequentialIdGenerator;
use dash_core::{Dashboard, DashboardResult, PanelDefinition, PanelEditorValues, PanelGroupId, PanelGroupItemId};
use proptest::prelude::*;

// ── Operations ──────────────────────────────────────────────────────────
//
// Indices are taken modulo the current number of groups or items, so every
// generated sequence is meaningful whatever state the dashboard is in.

#[derive(Debug, Clone)]
enum Op {
    AddGroup,
    DeleteGroup(usize),
    MoveGroup(usize, usize),
    AddPanel { group: Option<usize>, name: usize },
    EditPanel { group: usize, item: usize, to_group: usize, name: Option<usize> },
    DeletePanel { group: usize, item: usize },
    Grow { group: usize, item: usize, h: u32 },
    AbandonSession,
}

const NAMES: &[&str] = &["cpu", "cpu-1", "memory", "", "  ", "disk io"];

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::AddGroup),
        any::<usize>().prop_map(Op::DeleteGroup),
        (any::<usize>(), 0usize..4).prop_map(|(g, to)| Op::MoveGroup(g, to)),
        (proptest::option::of(any::<usize>()), 0..NAMES.len())
            .prop_map(|(group, name)| Op::AddPanel { group, name }),
        (any::<usize>(), any::<usize>(), any::<usize>(), proptest::option::of(0..NAMES.len()))
            .prop_map(|(group, item, to_group, name)| Op::EditPanel { group, item, to_group, name }),
        (any::<usize>(), any::<usize>()).prop_map(|(group, item)| Op::DeletePanel { group, item }),
        (any::<usize>(), any::<usize>(), 1u32..10).prop_map(|(group, item, h)| Op::Grow { group, item, h }),
        Just(Op::AbandonSession),
    ]
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn group_at(dashboard: &Dashboard, index: usize) -> Option<PanelGroupId> {
    let order = dashboard.panel_group_order();
    if order.is_empty() {
        None
    } else {
        Some(order[index % order.len()].clone())
    }
}

fn item_at(dashboard: &Dashboard, group: usize, item: usize) -> Option<PanelGroupItemId> {
    let group_id = group_at(dashboard, group)?;
    let layouts = dashboard.panel_groups().get(&group_id).ok()?.item_layouts();
    if layouts.is_empty() {
        return None;
    }
    Some(PanelGroupItemId::new(group_id, layouts[item % layouts.len()].i.clone()))
}

fn bottom_of(dashboard: &Dashboard, group: &PanelGroupId) -> u32 {
    dashboard.panel_groups().get(group).map(|g| g.next_row_y()).unwrap_or(0)
}

/// Run one op. `Ok(Some((group, floor)))` means a panel was placed in
/// `group` and must sit at or below `floor`.
fn run(dashboard: &mut Dashboard, op: &Op) -> DashboardResult<Option<(PanelGroupId, u32)>> {
    match op {
        Op::AddGroup => dashboard.add_panel_group("group").map(|_| None),
        Op::DeleteGroup(g) => match group_at(dashboard, *g) {
            Some(id) => dashboard.delete_panel_group(&id).map(|_| None),
            None => Ok(None),
        },
        Op::MoveGroup(g, to) => match group_at(dashboard, *g) {
            Some(id) => dashboard.move_panel_group(&id, *to).map(|_| None),
            None => Ok(None),
        },
        Op::AddPanel { group, name } => {
            let target = group.and_then(|g| group_at(dashboard, g));
            let session = dashboard.open_add_panel(target.as_ref())?;
            let group_id = dashboard
                .panel_editor()
                .initial_values()
                .map(|values| values.group_id.clone())
                .unwrap();
            let floor = bottom_of(dashboard, &group_id);
            dashboard.apply_changes(
                session,
                PanelEditorValues::new(group_id.clone(), PanelDefinition::named(NAMES[*name])),
            )?;
            dashboard.close_panel_editor(session)?;
            Ok(Some((group_id, floor)))
        }
        Op::EditPanel { group, item, to_group, name } => {
            let (Some(location), Some(destination)) =
                (item_at(dashboard, *group, *item), group_at(dashboard, *to_group))
            else {
                return Ok(None);
            };
            let session = dashboard.open_edit_panel(&location)?;
            let mut values = dashboard.panel_editor().initial_values().cloned().unwrap();
            values.group_id = destination.clone();
            if let Some(name) = name {
                values.panel_definition.spec.display.name = NAMES[*name].to_string();
            }
            let floor = bottom_of(dashboard, &destination);
            dashboard.apply_changes(session, values)?;
            dashboard.close_panel_editor(session)?;
            if destination == location.panel_group_id {
                Ok(None)
            } else {
                Ok(Some((destination, floor)))
            }
        }
        Op::DeletePanel { group, item } => match item_at(dashboard, *group, *item) {
            Some(location) => dashboard.delete_panel(&location).map(|_| None),
            None => Ok(None),
        },
        Op::Grow { group, item, h } => {
            let Some(location) = item_at(dashboard, *group, *item) else {
                return Ok(None);
            };
            let mut layout = dashboard
                .panel_groups()
                .get(&location.panel_group_id)?
                .item(&location.layout_item_id)
                .cloned()
                .unwrap();
            layout.h = *h;
            dashboard
                .update_item_layouts(&location.panel_group_id, &[layout])
                .map(|_| None)
        }
        Op::AbandonSession => {
            let session = dashboard.open_add_panel(None)?;
            dashboard.close_panel_editor(session).map(|_| None)
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Properties
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn random_sessions_keep_model_consistent(ops in proptest::collection::vec(op_strategy(), 1..40)) {
        let mut dashboard = Dashboard::new("prop").with_id_generator(Box::new(SequentialIdGenerator::new()));

        for op in &ops {
            let before = dashboard.model().clone();
            match run(&mut dashboard, op) {
                Ok(Some((group, floor))) => {
                    let placed = dashboard.panel_groups().get(&group).unwrap();
                    let (last, earlier) = placed.item_layouts().split_last().unwrap();
                    prop_assert_eq!(last.x, 0);
                    prop_assert!(last.y >= floor, "{:?} placed at {} above {}", op, last.y, floor);
                    for existing in earlier {
                        prop_assert!(
                            !last.overlaps_rows(existing),
                            "{:?} placed {:?} over {:?}", op, last, existing
                        );
                    }
                }
                Ok(None) => {}
                Err(_) => {
                    prop_assert_eq!(dashboard.model(), &before, "failed {:?} mutated the model", op);
                }
            }
            prop_assert!(dashboard.validate().is_ok(), "{:?} broke the model: {:?}", op, dashboard.validate());
        }
    }

    #[test]
    fn closing_sessions_never_touches_panels(ops in proptest::collection::vec(op_strategy(), 1..20)) {
        let mut dashboard = Dashboard::new("prop").with_id_generator(Box::new(SequentialIdGenerator::new()));
        for op in &ops {
            let _ = run(&mut dashboard, op);
        }

        let before = dashboard.model().clone();
        if let Some(location) = item_at(&dashboard, 0, 0) {
            let session = dashboard.open_edit_panel(&location).unwrap();
            dashboard.close_panel_editor(session).unwrap();
            prop_assert_eq!(dashboard.model(), &before);
        }
        if let Some(group) = group_at(&dashboard, 0) {
            let session = dashboard.open_add_panel(Some(&group)).unwrap();
            dashboard.close_panel_editor(session).unwrap();
            prop_assert_eq!(dashboard.model(), &before);
        }
    }
}
