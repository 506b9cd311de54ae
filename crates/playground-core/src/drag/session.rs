//! The drag session state machine: `Idle -> Dragging -> Idle`.

use super::collision::DroppableLayout;
use super::target::{DragSource, DropAction, DropTarget, Zone};
use crate::error::{PlacementError, PlacementResult};
use crate::focus::FocusLock;
use crate::page::{InteractionGuard, PageEffects};
use crate::placement::PlacementEngine;
use kurbo::{Point, Rect, Vec2};
use std::rc::Rc;

/// An in-progress drag.
#[derive(Debug)]
pub struct DragSession {
    source: DragSource,
    hover: Option<DropTarget>,
    origin: Point,
    pointer: Point,
    /// Rectangle of the source when the drag started.
    source_rect: Option<Rect>,
    _interaction: InteractionGuard,
}

impl DragSession {
    pub fn source(&self) -> DragSource {
        self.source
    }

    pub fn hover(&self) -> Option<DropTarget> {
        self.hover
    }

    pub fn hover_zone(&self) -> Option<Zone> {
        self.hover.map(|target| target.zone())
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Pointer travel since the drag started.
    pub fn delta(&self) -> Vec2 {
        self.pointer - self.origin
    }

    /// Where the dragged item is drawn right now.
    pub fn overlay_rect(&self) -> Option<Rect> {
        self.source_rect.map(|rect| rect + self.delta())
    }

    fn collision_center(&self) -> Point {
        self.overlay_rect().map_or(self.pointer, |rect| rect.center())
    }
}

/// Tracks the active drag and decides what a release does.
pub struct DragCoordinator {
    page: Rc<dyn PageEffects>,
    session: Option<DragSession>,
}

impl DragCoordinator {
    pub fn new(page: Rc<dyn PageEffects>) -> Self {
        Self { page, session: None }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Start dragging `source`.
    ///
    /// Refused while an instance is focused, while another drag runs, when
    /// the source no longer exists, and when the source sits in a reserve
    /// slot of a full grid.
    pub fn begin(
        &mut self,
        source: DragSource,
        pointer: Point,
        layout: &DroppableLayout,
        engine: &PlacementEngine,
        focus: &FocusLock,
    ) -> PlacementResult<()> {
        if let Some(focused) = focus.focused() {
            return Err(PlacementError::Focused(focused));
        }
        if self.session.is_some() {
            return Err(PlacementError::DragInProgress);
        }
        match source {
            DragSource::TrayEntry { kind, id } => {
                if !engine.tray().contains(kind, id) {
                    return Err(PlacementError::UnknownEntry { kind, id });
                }
                if engine.is_reserve_blocked(kind, id) {
                    let index = engine.tray().index_of(kind, id).unwrap_or_default();
                    return Err(PlacementError::ReserveSlot { kind, index });
                }
            }
            DragSource::Instance { id } => {
                if !engine.grid().contains(id) {
                    return Err(PlacementError::UnknownInstance(id));
                }
            }
        }

        log::debug!("Drag started on {:?}", source);
        self.session = Some(DragSession {
            source,
            hover: None,
            origin: pointer,
            pointer,
            source_rect: layout.rect_of(&source.as_target()),
            _interaction: InteractionGuard::acquire(self.page.clone()),
        });
        Ok(())
    }

    /// Recompute the hover target for a pointer move.
    pub fn hover(&mut self, pointer: Point, layout: &DroppableLayout) -> Option<DropTarget> {
        let session = self.session.as_mut()?;
        session.pointer = pointer;
        session.hover = layout.detect(&session.source, pointer, session.collision_center());
        session.hover
    }

    /// End the drag and return the source together with the action the
    /// release resolves to. When `pointer` is given the target is
    /// recomputed at that position first.
    pub fn finish(&mut self, pointer: Option<Point>, layout: &DroppableLayout) -> Option<(DragSource, DropAction)> {
        if let Some(pointer) = pointer {
            self.hover(pointer, layout);
        }
        let session = self.session.take()?;
        let action = DropAction::resolve(session.source, session.hover);
        log::debug!("Drag of {:?} released over {:?}: {:?}", session.source, session.hover, action);
        Some((session.source, action))
    }

    /// Abandon the drag without any action.
    pub fn cancel(&mut self) -> Option<DragSource> {
        let session = self.session.take()?;
        log::debug!("Drag of {:?} cancelled", session.source);
        Some(session.source)
    }
}

impl std::fmt::Debug for DragCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragCoordinator")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
