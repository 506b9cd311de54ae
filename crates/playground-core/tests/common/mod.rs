//! Shared fixture: a fixed layout rebuilt the way a renderer would.

#![allow(dead_code)]

use kurbo::{Point, Rect};
use playground_core::{
    Catalog, DragSource, DropTarget, GRID_CAPACITY, InstanceId, ItemKind, PlaygroundConfig, PlaygroundController,
    RecordingPage, TraySelection,
};
use std::rc::Rc;
use std::sync::Arc;

pub const TRAY: Rect = Rect::new(0.0, 0.0, 200.0, 600.0);
pub const GRID: Rect = Rect::new(220.0, 0.0, 620.0, 400.0);
const ROW: f64 = 50.0;

pub fn slot_rect(position: usize) -> Rect {
    let x = GRID.x0 + (position % 2) as f64 * 200.0;
    let y = GRID.y0 + (position / 2) as f64 * 200.0;
    Rect::new(x + 5.0, y + 5.0, x + 195.0, y + 195.0)
}

pub fn entry_rect(row: usize) -> Rect {
    let y = TRAY.y0 + 10.0 + row as f64 * ROW;
    Rect::new(TRAY.x0 + 10.0, y, TRAY.x1 - 10.0, y + ROW - 10.0)
}

/// Re-register every droppable from the current state.
pub fn sync_layout(c: &mut PlaygroundController) {
    let view = c.view();
    let layout = c.layout_mut();
    layout.clear();
    layout.register(DropTarget::TrayArea, TRAY);
    layout.register(DropTarget::GridArea, GRID);
    let mut row = 0;
    for kind in ItemKind::ALL {
        for &id in view.tray.list(kind) {
            layout.register(DropTarget::TrayEntry { kind, id }, entry_rect(row));
            row += 1;
        }
    }
    for position in 0..GRID_CAPACITY {
        match &view.slots[position] {
            Some(slot) => layout.register(DropTarget::Instance { id: slot.item.instance_id }, slot_rect(position)),
            None => layout.register(DropTarget::EmptySlot { position }, slot_rect(position)),
        }
    }
}

pub fn playground(prompts: Vec<u32>, widgets: Vec<u32>) -> (PlaygroundController, Rc<RecordingPage>) {
    let page = Rc::new(RecordingPage::new());
    let mut c = PlaygroundController::new(
        Arc::new(Catalog::builtin()),
        TraySelection::new(prompts, widgets),
        PlaygroundConfig::default(),
        page.clone(),
    );
    sync_layout(&mut c);
    (c, page)
}

pub fn widget(id: u32) -> DragSource {
    DragSource::TrayEntry { kind: ItemKind::Widget, id }
}

pub fn prompt(id: u32) -> DragSource {
    DragSource::TrayEntry { kind: ItemKind::Prompt, id }
}

/// Drag `source` from `from` and release at `to`. Returns whether the
/// release changed anything; `None` if the drag was refused.
pub fn drag(c: &mut PlaygroundController, source: DragSource, from: Point, to: Point) -> Option<bool> {
    if !c.on_drag_start(source, from) {
        return None;
    }
    c.on_drag_over(to);
    let changed = c.on_drag_end(Some(to));
    sync_layout(c);
    Some(changed)
}

/// Drag a tray entry into the given slot and return the new instance.
pub fn place(c: &mut PlaygroundController, source: DragSource, position: usize) -> InstanceId {
    let changed = drag(c, source, Point::ZERO, slot_rect(position).center());
    assert_eq!(changed, Some(true), "placing {:?} at {}", source, position);
    c.engine()
        .grid()
        .at_position(position)
        .map(|item| item.instance_id)
        .expect("slot filled")
}
