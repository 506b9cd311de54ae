mod common;

use common::*;
use kurbo::Point;
use playground_core::{
    Catalog, CatalogId, DragSource, GRID_CAPACITY, InstanceId, ItemKind, PlacementEngine, PlacementError,
    ReserveSlot, TraySelection,
};
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;

const PROMPTS: [CatalogId; 4] = [1, 2, 3, 4];
const WIDGETS: [CatalogId; 5] = [2, 4, 5, 9, 10];

fn engine() -> PlacementEngine {
    PlacementEngine::new(
        Arc::new(Catalog::builtin()),
        TraySelection::new(PROMPTS.to_vec(), WIDGETS.to_vec()),
        vec![ReserveSlot { kind: ItemKind::Widget, index: 4 }],
    )
}

type Members = BTreeSet<(u8, CatalogId)>;

fn membership(engine: &PlacementEngine) -> (Members, Members) {
    let tray = engine.tray().iter().map(|(kind, id)| (kind_key(kind), id)).collect();
    let grid = engine
        .grid()
        .iter()
        .map(|item| (kind_key(item.kind), item.original_id))
        .collect();
    (tray, grid)
}

fn kind_key(kind: ItemKind) -> u8 {
    match kind {
        ItemKind::Prompt => 0,
        ItemKind::Widget => 1,
    }
}

fn assert_partition(engine: &PlacementEngine) {
    let mut seen: Vec<(u8, CatalogId)> = engine
        .tray()
        .iter()
        .chain(engine.grid().iter().map(|item| (item.kind, item.original_id)))
        .map(|(kind, id)| (kind_key(kind), id))
        .collect();
    let total = seen.len();
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), total, "an id is in both zones or repeated");

    let mut expected: Vec<(u8, CatalogId)> = PROMPTS
        .iter()
        .map(|&id| (0, id))
        .chain(WIDGETS.iter().map(|&id| (1, id)))
        .collect();
    expected.sort_unstable();
    assert_eq!(seen, expected);
}

fn assert_capacity(engine: &PlacementEngine) {
    let grid = engine.grid();
    assert!(grid.len() <= GRID_CAPACITY);
    let positions: BTreeSet<usize> = grid.iter().map(|item| item.position).collect();
    assert_eq!(positions.len(), grid.len());
    assert!(positions.iter().all(|&p| p < GRID_CAPACITY));
}

#[derive(Debug, Clone)]
enum Op {
    ToGrid { widget: bool, id: CatalogId, preferred: Option<usize> },
    /// `None` names an instance that was never placed.
    ToTray(Option<usize>),
    ReorderTray { widget: bool, from: usize, to: usize },
    ReorderGrid(Option<usize>, Option<usize>),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let choice = || proptest::option::weighted(0.8, 0usize..GRID_CAPACITY);
    prop_oneof![
        (any::<bool>(), 1..=12u32, proptest::option::of(0..GRID_CAPACITY + 2))
            .prop_map(|(widget, id, preferred)| Op::ToGrid { widget, id, preferred }),
        choice().prop_map(Op::ToTray),
        (any::<bool>(), 0..6usize, 0..6usize).prop_map(|(widget, from, to)| Op::ReorderTray { widget, from, to }),
        (choice(), choice()).prop_map(|(from, to)| Op::ReorderGrid(from, to)),
    ]
}

fn kind(widget: bool) -> ItemKind {
    if widget { ItemKind::Widget } else { ItemKind::Prompt }
}

/// Resolve a choice against the instances currently on the grid.
fn pick(engine: &PlacementEngine, choice: Option<usize>) -> InstanceId {
    let ids: Vec<InstanceId> = engine.grid().iter().map(|item| item.instance_id).collect();
    match choice {
        Some(index) if !ids.is_empty() => ids[index % ids.len()],
        _ => InstanceId::new(),
    }
}

fn apply(engine: &mut PlacementEngine, op: &Op) {
    match *op {
        Op::ToGrid { widget, id, preferred } => {
            let _ = engine.move_to_grid(kind(widget), id, preferred);
        }
        Op::ToTray(choice) => {
            let id = pick(engine, choice);
            let _ = engine.move_to_tray(id);
        }
        Op::ReorderTray { widget, from, to } => {
            let before = membership(engine);
            let _ = engine.reorder_tray(kind(widget), from, to);
            assert_eq!(membership(engine), before);
        }
        Op::ReorderGrid(from, to) => {
            let from = pick(engine, from);
            let to = pick(engine, to);
            let before = membership(engine);
            let positions: Vec<_> = engine.grid().iter().map(|i| (i.instance_id, i.position)).collect();
            let _ = engine.reorder_grid(from, to);
            assert_eq!(membership(engine), before);
            for (id, position) in positions {
                assert_eq!(engine.grid().get(id).map(|i| i.position), Some(position));
            }
        }
    }
}

proptest! {
    #[test]
    fn test_random_sequences_keep_invariants(ops in prop::collection::vec(op_strategy(), 1..200)) {
        let mut engine = engine();
        for op in &ops {
            apply(&mut engine, op);
            assert_partition(&engine);
            assert_capacity(&engine);
            prop_assert!(engine.is_consistent(), "inconsistent after {:?}", op);
        }
    }
}

#[test]
fn test_second_move_to_tray_is_noop() {
    let mut engine = engine();
    let id = engine.move_to_grid(ItemKind::Widget, 2, None).unwrap().instance_id;
    assert!(engine.move_to_tray(id).is_ok());
    let tray = engine.tray().clone();
    let grid = engine.grid().clone();

    assert_eq!(engine.move_to_tray(id), Err(PlacementError::UnknownInstance(id)));
    assert_eq!(engine.tray(), &tray);
    assert_eq!(engine.grid(), &grid);
    assert_eq!(engine.tray().list(ItemKind::Widget), &[4, 5, 9, 10, 2]);
}

#[test]
fn test_instance_ids_never_reused() {
    let mut engine = engine();
    let mut seen = BTreeSet::new();
    for _ in 0..10 {
        let id = engine.move_to_grid(ItemKind::Widget, 2, None).unwrap().instance_id;
        assert!(seen.insert(id));
        engine.move_to_tray(id).unwrap();
    }
}

#[test]
fn test_no_drag_starts_while_focused() {
    let (mut c, page) = playground(PROMPTS.to_vec(), WIDGETS.to_vec());
    let focused = place(&mut c, widget(2), 0);
    place(&mut c, prompt(3), 2);
    c.toggle_focus(focused);

    let mut sources: Vec<DragSource> = c
        .engine()
        .tray()
        .iter()
        .map(|(kind, id)| DragSource::TrayEntry { kind, id })
        .collect();
    sources.extend(c.engine().grid().iter().map(|item| DragSource::Instance { id: item.instance_id }));

    for source in sources {
        assert!(!c.on_drag_start(source, Point::ZERO), "{:?} started while focused", source);
        assert!(!c.drag().is_dragging());
    }
    assert_eq!(page.suspended(), 0);
    assert!(c.is_consistent());
}
