//! Fixed screen layout for the headless playground.
//!
//! The tray is a column on the left, the grid a 2x2 block on the right. Every
//! step re-registers the droppables from the current view, the same way a
//! renderer refreshes them each frame.

use kurbo::{Point, Rect};
use playground_core::{DropTarget, GRID_CAPACITY, ItemKind, PlaygroundController};

/// Smallest tray column; it grows downwards with the number of entries.
pub const TRAY_AREA: Rect = Rect::new(0.0, 0.0, 240.0, 720.0);
pub const GRID_AREA: Rect = Rect::new(260.0, 0.0, 740.0, 480.0);

const ENTRY_HEIGHT: f64 = 60.0;
const SLOT_SIZE: f64 = 240.0;
const GAP: f64 = 6.0;

/// Rectangle of a grid slot.
pub fn slot_rect(position: usize) -> Rect {
    let x = GRID_AREA.x0 + (position % 2) as f64 * SLOT_SIZE;
    let y = GRID_AREA.y0 + (position / 2) as f64 * SLOT_SIZE;
    Rect::new(x + GAP, y + GAP, x + SLOT_SIZE - GAP, y + SLOT_SIZE - GAP)
}

/// Rectangle of the tray entry in `row` (prompts first, then widgets).
pub fn entry_rect(row: usize) -> Rect {
    let y = TRAY_AREA.y0 + row as f64 * ENTRY_HEIGHT;
    Rect::new(TRAY_AREA.x0 + GAP, y + GAP, TRAY_AREA.x1 - GAP, y + ENTRY_HEIGHT - GAP)
}

/// A point inside the grid area that is not inside any slot.
pub fn grid_gap_point() -> Point {
    GRID_AREA.center()
}

/// The tray column for `rows` entries, always one free row taller.
pub fn tray_area(rows: usize) -> Rect {
    let height = (rows + 1) as f64 * ENTRY_HEIGHT;
    Rect::new(TRAY_AREA.x0, TRAY_AREA.y0, TRAY_AREA.x1, TRAY_AREA.y1.max(TRAY_AREA.y0 + height))
}

/// A point inside the tray area just below the last of `rows` entries.
pub fn tray_gap_point(rows: usize) -> Point {
    entry_rect(rows).center()
}

/// Register every droppable of the current state.
pub fn sync(controller: &mut PlaygroundController) {
    let view = controller.view();
    let layout = controller.layout_mut();
    layout.clear();
    layout.register(DropTarget::TrayArea, tray_area(view.tray.len()));
    layout.register(DropTarget::GridArea, GRID_AREA);

    let entries = ItemKind::ALL
        .into_iter()
        .flat_map(|kind| view.tray.list(kind).iter().map(move |&id| DropTarget::TrayEntry { kind, id }));
    for (row, target) in entries.enumerate() {
        layout.register(target, entry_rect(row));
    }

    // The expanded view shows only the focused instance, over the whole grid.
    if let Some(focused) = view.focused {
        layout.register(DropTarget::Instance { id: focused }, GRID_AREA);
        return;
    }
    for (position, slot) in view.slots.iter().enumerate().take(GRID_CAPACITY) {
        let target = match slot {
            Some(slot) => DropTarget::Instance {
                id: slot.item.instance_id,
            },
            None => DropTarget::EmptySlot { position },
        };
        layout.register(target, slot_rect(position));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_inside_grid() {
        for position in 0..GRID_CAPACITY {
            let rect = slot_rect(position);
            assert!(GRID_AREA.contains(rect.origin()));
            assert!(!rect.contains(grid_gap_point()));
        }
    }

    #[test]
    fn test_tray_gap_clear_of_entries() {
        for rows in [0, 9, 11, 12, 20] {
            let point = tray_gap_point(rows);
            assert!(tray_area(rows).contains(point), "{} rows", rows);
            for row in 0..rows {
                assert!(!entry_rect(row).contains(point), "row {} of {}", row, rows);
            }
        }
    }

    #[test]
    fn test_tray_area_grows() {
        assert_eq!(tray_area(3), TRAY_AREA);
        let area = tray_area(20);
        assert!(area.contains(entry_rect(19).center()));
        assert_eq!(area.height(), 21.0 * ENTRY_HEIGHT);
    }
}
