//! Droppable regions and collision detection.
//!
//! The renderer registers a rectangle for every droppable each frame.
//! Detection first looks for area targets under the pointer (empty slot,
//! then grid, then tray) and otherwise falls back to the sortable sibling
//! whose center is closest to the dragged item's center.

use super::target::{DragSource, DropTarget};
use kurbo::{Point, Rect, Vec2};

/// A droppable region in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Droppable {
    pub target: DropTarget,
    pub rect: Rect,
}

/// Direction of a keyboard move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// All droppable regions of the current frame.
#[derive(Debug, Clone, Default)]
pub struct DroppableLayout {
    regions: Vec<Droppable>,
}

impl DroppableLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace the region of a target.
    pub fn register(&mut self, target: DropTarget, rect: Rect) {
        match self.regions.iter_mut().find(|r| r.target == target) {
            Some(region) => region.rect = rect,
            None => self.regions.push(Droppable { target, rect }),
        }
    }

    pub fn unregister(&mut self, target: &DropTarget) {
        self.regions.retain(|r| r.target != *target);
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn rect_of(&self, target: &DropTarget) -> Option<Rect> {
        self.regions.iter().find(|r| r.target == *target).map(|r| r.rect)
    }

    pub fn regions(&self) -> &[Droppable] {
        &self.regions
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// The topmost sortable item under `point` (last registered wins).
    pub fn draggable_at(&self, point: Point) -> Option<DragSource> {
        self.regions
            .iter()
            .rev()
            .filter(|r| r.rect.contains(point))
            .find_map(|r| r.target.as_source())
    }

    /// Resolve the target for a drag of `source`.
    ///
    /// `pointer` is the current pointer position; `center` is the center of
    /// the dragged item's rectangle, used for the sortable fallback.
    pub fn detect(&self, source: &DragSource, pointer: Point, center: Point) -> Option<DropTarget> {
        let area = self
            .regions
            .iter()
            .filter(|r| r.rect.contains(pointer))
            .filter_map(|r| r.target.area_rank().map(|rank| (rank, r.target)))
            .min_by_key(|(rank, _)| *rank)
            .map(|(_, target)| target);
        if area.is_some() {
            return area;
        }
        self.closest_sibling(source, center)
    }

    fn closest_sibling(&self, source: &DragSource, center: Point) -> Option<DropTarget> {
        self.regions
            .iter()
            .filter(|r| r.target.is_sibling_of(source))
            .map(|r| (r.rect.center().distance(center), r.target))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, target)| target)
    }

    /// Center of the nearest droppable lying in `direction` from `from`.
    ///
    /// Candidates are weighted so that targets straight ahead win over
    /// targets that are closer but off to the side.
    pub fn next_in_direction(&self, from: Point, direction: Direction) -> Option<Point> {
        let unit = direction.unit();
        self.regions
            .iter()
            .map(|r| r.rect.center())
            .filter_map(|center| {
                let offset = center - from;
                let along = offset.dot(unit);
                if along <= f64::EPSILON {
                    return None;
                }
                let across = (offset - unit * along).hypot();
                Some((along + across * 2.0, center))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, center)| center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemKind;
    use crate::placement::InstanceId;

    fn layout() -> DroppableLayout {
        let mut layout = DroppableLayout::new();
        layout.register(DropTarget::TrayArea, Rect::new(0.0, 0.0, 200.0, 400.0));
        layout.register(
            DropTarget::TrayEntry { kind: ItemKind::Widget, id: 2 },
            Rect::new(10.0, 10.0, 190.0, 60.0),
        );
        layout.register(
            DropTarget::TrayEntry { kind: ItemKind::Widget, id: 4 },
            Rect::new(10.0, 70.0, 190.0, 120.0),
        );
        layout.register(DropTarget::GridArea, Rect::new(220.0, 0.0, 620.0, 400.0));
        layout.register(DropTarget::EmptySlot { position: 1 }, Rect::new(420.0, 0.0, 620.0, 200.0));
        layout
    }

    fn widget(id: u32) -> DragSource {
        DragSource::TrayEntry { kind: ItemKind::Widget, id }
    }

    #[test]
    fn test_empty_slot_beats_grid_area() {
        let layout = layout();
        let pointer = Point::new(500.0, 100.0);
        assert_eq!(
            layout.detect(&widget(2), pointer, pointer),
            Some(DropTarget::EmptySlot { position: 1 })
        );
    }

    #[test]
    fn test_grid_area() {
        let layout = layout();
        let pointer = Point::new(300.0, 300.0);
        assert_eq!(layout.detect(&widget(2), pointer, pointer), Some(DropTarget::GridArea));
    }

    #[test]
    fn test_tray_area_beats_tray_entry() {
        let layout = layout();
        let pointer = Point::new(100.0, 90.0);
        assert_eq!(layout.detect(&widget(2), pointer, pointer), Some(DropTarget::TrayArea));
    }

    #[test]
    fn test_closest_sibling_outside_areas() {
        let layout = layout();
        let pointer = Point::new(100.0, 500.0);
        let center = Point::new(100.0, 100.0);
        assert_eq!(
            layout.detect(&widget(2), pointer, center),
            Some(DropTarget::TrayEntry { kind: ItemKind::Widget, id: 4 })
        );
    }

    #[test]
    fn test_no_sibling_for_other_kind() {
        let layout = layout();
        let source = DragSource::TrayEntry { kind: ItemKind::Prompt, id: 1 };
        let pointer = Point::new(100.0, 500.0);
        assert_eq!(layout.detect(&source, pointer, pointer), None);
    }

    #[test]
    fn test_instance_siblings() {
        let mut layout = DroppableLayout::new();
        let a = InstanceId::new();
        let b = InstanceId::new();
        layout.register(DropTarget::Instance { id: a }, Rect::new(0.0, 0.0, 100.0, 100.0));
        layout.register(DropTarget::Instance { id: b }, Rect::new(200.0, 0.0, 300.0, 100.0));

        let source = DragSource::Instance { id: a };
        let center = Point::new(240.0, 50.0);
        assert_eq!(layout.detect(&source, center, center), Some(DropTarget::Instance { id: b }));
    }

    #[test]
    fn test_register_replaces() {
        let mut layout = layout();
        let count = layout.regions().len();
        layout.register(DropTarget::GridArea, Rect::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(layout.regions().len(), count);
        assert_eq!(layout.rect_of(&DropTarget::GridArea), Some(Rect::new(0.0, 0.0, 1.0, 1.0)));

        layout.unregister(&DropTarget::GridArea);
        assert!(layout.rect_of(&DropTarget::GridArea).is_none());
    }

    #[test]
    fn test_draggable_at() {
        let layout = layout();
        assert_eq!(layout.draggable_at(Point::new(50.0, 30.0)), Some(widget(2)));
        assert_eq!(layout.draggable_at(Point::new(50.0, 300.0)), None);
    }

    #[test]
    fn test_next_in_direction() {
        let layout = layout();
        let from = Point::new(100.0, 35.0);
        let below = layout.next_in_direction(from, Direction::Down).unwrap();
        assert_eq!(below, Point::new(100.0, 95.0));
        let right = layout.next_in_direction(from, Direction::Right).unwrap();
        assert!(right.x > 200.0);
        assert!(layout.next_in_direction(Point::new(1000.0, 35.0), Direction::Right).is_none());
    }
}
