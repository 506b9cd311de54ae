//! The playground controller.
//!
//! Composes placement, drag, focus, sensors and widget sessions, and exposes
//! the handlers a renderer wires to input together with a serializable view
//! of everything it needs to draw a frame.

use crate::catalog::{Catalog, CatalogEntry, CatalogId, ItemKind};
use crate::config::PlaygroundConfig;
use crate::drag::{DragCoordinator, DragSource, DropAction, DropTarget, DroppableLayout, Zone};
use crate::effects::EffectScheduler;
use crate::error::PlacementResult;
use crate::focus::{FocusChange, FocusLock, InstanceState};
use crate::input::{DragSensor, Key, PointerEvent, SensorAction};
use crate::page::{PageEffects, ViewportGuard};
use crate::placement::{InstanceId, PlacedItem, PlacementEngine, TraySelection};
use crate::widgets::{
    ContentRegistry, EventOutcome, WidgetContext, WidgetError, WidgetEvent, WidgetKind, WidgetSession,
};
use kurbo::{Point, Rect};
use serde::Serialize;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

/// Summary modal opened by a document widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryModal {
    pub file_name: String,
}

/// One occupied grid slot.
#[derive(Debug, Clone, Serialize)]
pub struct SlotView {
    pub item: PlacedItem,
    pub state: InstanceState,
    pub session: Option<WidgetSession>,
}

/// The item drawn under the pointer while dragging.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OverlayItem {
    Entry { entry: CatalogEntry },
    Instance { item: PlacedItem },
}

#[derive(Debug, Clone, Serialize)]
pub struct DragOverlay {
    pub item: OverlayItem,
    pub pointer: Point,
    pub rect: Option<Rect>,
}

/// A tray entry held back by a reserve slot guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockedEntry {
    pub kind: ItemKind,
    pub id: CatalogId,
}

/// Everything rendering needs for one frame.
#[derive(Debug, Clone, Serialize)]
pub struct PlaygroundView {
    pub tray: TraySelection,
    /// Grid contents indexed by position, with holes.
    pub slots: Vec<Option<SlotView>>,
    /// Drag-sortable order of the grid instances.
    pub sortable_order: Vec<InstanceId>,
    pub focused: Option<InstanceId>,
    pub hover: Option<DropTarget>,
    pub hover_zone: Option<Zone>,
    pub overlay: Option<DragOverlay>,
    pub reserve_blocked: Vec<BlockedEntry>,
    pub item_count: usize,
    pub chat_draft: String,
    /// Example prompts picked from any widget since the playground opened.
    pub examples_clicked: u32,
    pub widget_context: Option<WidgetContext>,
    pub summary: Option<SummaryModal>,
}

/// Output of rendering one visible instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedWidget {
    pub instance_id: InstanceId,
    pub position: usize,
    pub expanded: bool,
    pub body: Option<String>,
}

/// Root of the playground state.
pub struct PlaygroundController {
    config: PlaygroundConfig,
    engine: PlacementEngine,
    focus: FocusLock,
    drag: DragCoordinator,
    sensor: DragSensor,
    layout: DroppableLayout,
    sessions: HashMap<InstanceId, WidgetSession>,
    scheduler: EffectScheduler,
    chat_draft: String,
    examples_clicked: u32,
    summary: Option<SummaryModal>,
    _viewport: ViewportGuard,
}

impl PlaygroundController {
    pub fn new(
        catalog: Arc<Catalog>,
        selection: TraySelection,
        config: PlaygroundConfig,
        page: Rc<dyn PageEffects>,
    ) -> Self {
        let engine = PlacementEngine::new(catalog, selection, config.reserve_slots.clone());
        log::info!(
            "Playground opened with {} prompt(s) and {} widget(s)",
            engine.tray().list(ItemKind::Prompt).len(),
            engine.tray().list(ItemKind::Widget).len()
        );
        Self {
            sensor: DragSensor::new(config.activation),
            engine,
            focus: FocusLock::new(),
            drag: DragCoordinator::new(page.clone()),
            layout: DroppableLayout::new(),
            sessions: HashMap::new(),
            scheduler: EffectScheduler::new(),
            chat_draft: String::new(),
            examples_clicked: 0,
            summary: None,
            _viewport: ViewportGuard::attach(page),
            config,
        }
    }

    pub fn config(&self) -> &PlaygroundConfig {
        &self.config
    }

    pub fn engine(&self) -> &PlacementEngine {
        &self.engine
    }

    pub fn focus(&self) -> &FocusLock {
        &self.focus
    }

    pub fn drag(&self) -> &DragCoordinator {
        &self.drag
    }

    pub fn sensor(&self) -> &DragSensor {
        &self.sensor
    }

    pub fn layout(&self) -> &DroppableLayout {
        &self.layout
    }

    /// Droppable regions, refreshed by the renderer every frame.
    pub fn layout_mut(&mut self) -> &mut DroppableLayout {
        &mut self.layout
    }

    pub fn session(&self, id: InstanceId) -> Option<&WidgetSession> {
        self.sessions.get(&id)
    }

    pub fn scheduler(&self) -> &EffectScheduler {
        &self.scheduler
    }

    pub fn item_count(&self) -> usize {
        self.engine.grid().len()
    }

    pub fn chat_draft(&self) -> &str {
        &self.chat_draft
    }

    pub fn summary(&self) -> Option<&SummaryModal> {
        self.summary.as_ref()
    }

    // --- Drag handlers ---

    /// Start a drag. Returns false when the drag was refused.
    pub fn on_drag_start(&mut self, source: DragSource, pointer: Point) -> bool {
        match self
            .drag
            .begin(source, pointer, &self.layout, &self.engine, &self.focus)
        {
            Ok(()) => true,
            Err(err) => {
                log::debug!("Drag of {:?} refused: {}", source, err);
                false
            }
        }
    }

    /// Update the hover target.
    pub fn on_drag_over(&mut self, pointer: Point) -> Option<DropTarget> {
        self.drag.hover(pointer, &self.layout)
    }

    /// Release the drag. Returns true when the tray or grid changed.
    pub fn on_drag_end(&mut self, pointer: Option<Point>) -> bool {
        let Some((source, action)) = self.drag.finish(pointer, &self.layout) else {
            return false;
        };
        if action.is_none() {
            return false;
        }
        match self.apply_drop(action) {
            Ok(()) => true,
            Err(err) => {
                log::debug!("Release of {:?} rejected: {}", source, err);
                false
            }
        }
    }

    pub fn on_drag_cancel(&mut self) {
        self.drag.cancel();
    }

    fn apply_drop(&mut self, action: DropAction) -> PlacementResult<()> {
        match action {
            DropAction::ReorderTray { kind, from, to } => self.engine.reorder_tray_by_id(kind, from, to),
            DropAction::ReorderGrid { from, to } => self.engine.reorder_grid(from, to),
            DropAction::MoveToGrid { kind, id, position } => {
                let item = self.engine.move_to_grid(kind, id, position)?;
                let instance_id = item.instance_id;
                let session = WidgetSession::for_kind(WidgetKind::of(item));
                self.sessions.insert(instance_id, session);
                Ok(())
            }
            DropAction::MoveToTray { id } => {
                self.engine.move_to_tray(id)?;
                self.forget_instance(id);
                Ok(())
            }
            DropAction::None => Ok(()),
        }
    }

    // --- Raw input ---

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        let actions = self.sensor.handle_pointer(event, &self.layout);
        self.dispatch(actions);
    }

    pub fn handle_key(&mut self, key: &Key) {
        let actions = self.sensor.handle_key(key, &self.layout);
        self.dispatch(actions);
    }

    /// Let time-based activation (touch hold) fire.
    pub fn poll_sensor(&mut self, at: Duration) {
        let actions = self.sensor.tick(at);
        self.dispatch(actions);
    }

    pub fn set_keyboard_focus(&mut self, source: Option<DragSource>) {
        self.sensor.set_keyboard_focus(source);
    }

    fn dispatch(&mut self, actions: Vec<SensorAction>) {
        for action in actions {
            match action {
                SensorAction::Start { source, position } => {
                    if !self.on_drag_start(source, position) {
                        self.sensor.reset();
                    }
                }
                SensorAction::Move { position } => {
                    self.on_drag_over(position);
                }
                SensorAction::End { position } => {
                    self.on_drag_end(Some(position));
                }
                SensorAction::Cancel => self.on_drag_cancel(),
                SensorAction::Click { source } => match source {
                    DragSource::Instance { id } => self.activate_instance(id),
                    DragSource::TrayEntry { kind, id } => {
                        log::debug!("Click on tray {} #{} ignored", kind, id);
                    }
                },
            }
        }
    }

    // --- Focus ---

    /// Focus an instance, or clear focus if it holds it already.
    ///
    /// Returns `None` for unknown instances.
    pub fn toggle_focus(&mut self, id: InstanceId) -> Option<FocusChange> {
        if !self.engine.grid().contains(id) {
            log::debug!("Focus request for unknown instance {}", id);
            return None;
        }
        let change = self.focus.toggle(id);
        match change {
            FocusChange::Focused(id) => {
                if self.drag.cancel().is_some() {
                    self.sensor.reset();
                }
                self.reset_session(id);
                log::info!("Focused {}", id);
            }
            FocusChange::Cleared(id) => {
                self.reset_session(id);
                log::info!("Unfocused {}", id);
            }
            FocusChange::Refused { held_by } => {
                log::debug!("Focus on {} refused while {} is focused", id, held_by);
            }
        }
        self.sync_sensor();
        Some(change)
    }

    /// Clear focus unconditionally.
    pub fn unfocus(&mut self) -> Option<InstanceId> {
        let previous = self.focus.unfocus()?;
        self.reset_session(previous);
        self.sync_sensor();
        log::info!("Unfocused {}", previous);
        Some(previous)
    }

    /// Click or Enter on a grid instance.
    pub fn activate_instance(&mut self, id: InstanceId) {
        match self.focus.state_of(id) {
            InstanceState::Normal => {
                self.toggle_focus(id);
            }
            InstanceState::Focused | InstanceState::Disabled => {
                log::debug!("Activation of {} ignored", id);
            }
        }
    }

    /// Close button of a grid instance: collapses the focused instance,
    /// otherwise returns the instance to the tray.
    pub fn close_instance(&mut self, id: InstanceId) {
        if self.focus.focused() == Some(id) {
            self.toggle_focus(id);
        } else {
            self.remove_item(id);
        }
    }

    /// Return an instance to the tray. Not gated by the focus lock.
    pub fn remove_item(&mut self, id: InstanceId) -> Option<PlacedItem> {
        match self.engine.remove_from_grid(id) {
            Ok(item) => {
                self.forget_instance(id);
                Some(item)
            }
            Err(err) => {
                log::debug!("Remove rejected: {}", err);
                None
            }
        }
    }

    fn forget_instance(&mut self, id: InstanceId) {
        self.sessions.remove(&id);
        self.scheduler.cancel_owner(id);
        if self.focus.release(id) {
            log::info!("Focused instance {} left the grid", id);
            self.sync_sensor();
        }
        if self.sensor.keyboard_focus() == Some(DragSource::Instance { id }) {
            self.sensor.set_keyboard_focus(None);
        }
    }

    fn reset_session(&mut self, id: InstanceId) {
        if let Some(session) = self.sessions.get_mut(&id) {
            session.reset(&mut self.scheduler);
        }
    }

    fn sync_sensor(&mut self) {
        self.sensor.set_enabled(!self.focus.is_locked());
    }

    // --- Widgets and chat ---

    /// Chat context of the focused instance.
    pub fn widget_context(&self) -> Option<WidgetContext> {
        let id = self.focus.focused()?;
        self.engine.grid().get(id).map(WidgetContext::for_item)
    }

    pub fn set_chat_draft(&mut self, text: impl Into<String>) {
        self.chat_draft = text.into();
    }

    /// Submit chat input to the focused instance. Returns false when the
    /// text was empty or nothing is focused.
    pub fn submit_chat(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        let Some(context) = self.widget_context() else {
            log::debug!("Chat input ignored: nothing is focused");
            return false;
        };
        let Some(id) = self.focus.focused() else {
            return false;
        };
        let routed = match self.sessions.get_mut(&id) {
            Some(session) => session.submit_chat(text, id, &self.config.timings, &mut self.scheduler),
            None => false,
        };
        if !routed {
            log::info!("Chat message for {}: {}", context.title, text);
        }
        self.chat_draft.clear();
        true
    }

    /// Apply an event reported by an instance's content.
    pub fn widget_event(&mut self, id: InstanceId, event: WidgetEvent) -> Result<EventOutcome, WidgetError> {
        let session = self
            .sessions
            .get_mut(&id)
            .ok_or(WidgetError::UnknownInstance(id))?;
        let kind = session.kind();
        let example = match &event {
            WidgetEvent::ExampleClicked { prompt } => Some(prompt.clone()),
            _ => None,
        };
        let outcome = session.handle(id, event, &self.config.timings, &mut self.scheduler)?;

        if let Some(prompt) = example {
            self.examples_clicked += 1;
            self.chat_draft = prompt;
            if kind == Some(WidgetKind::ImageGenerator) {
                self.chat_draft.clear();
            }
        }
        if let EventOutcome::OpenSummary { file_name } = &outcome {
            self.summary = Some(SummaryModal {
                file_name: file_name.clone(),
            });
        }
        Ok(outcome)
    }

    pub fn examples_clicked(&self) -> u32 {
        self.examples_clicked
    }

    pub fn close_summary(&mut self) {
        self.summary = None;
    }

    fn visible_items(&self) -> Vec<&PlacedItem> {
        match self.focus.focused() {
            Some(id) => self.engine.grid().get(id).into_iter().collect(),
            None => self.engine.grid().slots().into_iter().flatten().collect(),
        }
    }

    /// Render every visible instance and route the events the renderers
    /// emitted back to their instances.
    pub fn render_widgets(&mut self, registry: &mut ContentRegistry) -> Vec<RenderedWidget> {
        let focused = self.focus.focused();
        let mut rendered = Vec::new();
        let mut events: Vec<(InstanceId, WidgetEvent)> = Vec::new();

        for item in self.visible_items() {
            let Some(session) = self.sessions.get(&item.instance_id) else {
                continue;
            };
            let id = item.instance_id;
            let expanded = focused == Some(id);
            let body = registry.render(item, session, expanded, &mut |event| events.push((id, event)));
            rendered.push(RenderedWidget {
                instance_id: id,
                position: item.position,
                expanded,
                body,
            });
        }

        for (id, event) in events {
            if let Err(err) = self.widget_event(id, event) {
                log::debug!("Widget event for {} rejected: {}", id, err);
            }
        }
        rendered
    }

    // --- Timers ---

    /// Advance virtual time and apply fired effects. Effects whose instance
    /// has left the grid are dropped.
    pub fn advance(&mut self, dt: Duration) -> usize {
        let mut applied = 0;
        for fired in self.scheduler.advance(dt) {
            match self.sessions.get_mut(&fired.owner) {
                Some(session) => {
                    if session.apply_effect(fired.handle, fired.effect) {
                        applied += 1;
                    }
                }
                None => log::debug!("Dropped {:?} for removed instance {}", fired.effect, fired.owner),
            }
        }
        applied
    }

    // --- View ---

    fn overlay(&self) -> Option<DragOverlay> {
        let session = self.drag.session()?;
        let item = match session.source() {
            DragSource::TrayEntry { kind, id } => OverlayItem::Entry {
                entry: self.engine.catalog().get(kind, id)?.clone(),
            },
            DragSource::Instance { id } => OverlayItem::Instance {
                item: self.engine.grid().get(id)?.clone(),
            },
        };
        Some(DragOverlay {
            item,
            pointer: session.pointer(),
            rect: session.overlay_rect(),
        })
    }

    pub fn view(&self) -> PlaygroundView {
        let slots = self
            .engine
            .grid()
            .slots()
            .into_iter()
            .map(|slot| {
                slot.map(|item| SlotView {
                    item: item.clone(),
                    state: self.focus.state_of(item.instance_id),
                    session: self.sessions.get(&item.instance_id).cloned(),
                })
            })
            .collect();
        let tray = self.engine.tray();
        let reserve_blocked = tray
            .iter()
            .filter(|(kind, id)| self.engine.is_reserve_blocked(*kind, *id))
            .map(|(kind, id)| BlockedEntry { kind, id })
            .collect();
        let session = self.drag.session();

        PlaygroundView {
            tray: tray.clone(),
            slots,
            sortable_order: self.engine.grid().iter().map(|item| item.instance_id).collect(),
            focused: self.focus.focused(),
            hover: session.and_then(|s| s.hover()),
            hover_zone: session.and_then(|s| s.hover_zone()),
            overlay: self.overlay(),
            reserve_blocked,
            item_count: self.item_count(),
            chat_draft: self.chat_draft.clone(),
            examples_clicked: self.examples_clicked,
            widget_context: self.widget_context(),
            summary: self.summary.clone(),
        }
    }

    /// Placement invariants hold, focus refers to a grid instance and every
    /// grid instance has exactly one session.
    pub fn is_consistent(&self) -> bool {
        let grid = self.engine.grid();
        self.engine.is_consistent()
            && self.focus.focused().is_none_or(|id| grid.contains(id))
            && self.sessions.len() == grid.len()
            && grid.iter().all(|item| self.sessions.contains_key(&item.instance_id))
    }
}

impl std::fmt::Debug for PlaygroundController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaygroundController")
            .field("engine", &self.engine)
            .field("focus", &self.focus)
            .field("drag", &self.drag)
            .field("sessions", &self.sessions.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::RecordingPage;

    fn controller(page: Rc<RecordingPage>) -> PlaygroundController {
        PlaygroundController::new(
            Arc::new(Catalog::builtin()),
            TraySelection::new(vec![1], vec![2, 4, 5, 9, 10]),
            PlaygroundConfig::default(),
            page,
        )
    }

    fn widget(id: CatalogId) -> DragSource {
        DragSource::TrayEntry { kind: ItemKind::Widget, id }
    }

    fn place(c: &mut PlaygroundController, id: CatalogId, position: usize) -> InstanceId {
        let target = DropTarget::EmptySlot { position };
        let rect = Rect::new(1000.0 + position as f64 * 100.0, 0.0, 1090.0 + position as f64 * 100.0, 90.0);
        c.layout_mut().register(target, rect);
        assert!(c.on_drag_start(widget(id), Point::ZERO));
        assert!(c.on_drag_end(Some(rect.center())));
        c.layout_mut().unregister(&target);
        c.engine().grid().at_position(position).map(|item| item.instance_id).unwrap()
    }

    #[test]
    fn test_viewport_listener_scoped() {
        let page = Rc::new(RecordingPage::new());
        let c = controller(page.clone());
        assert_eq!(page.listeners(), 1);
        drop(c);
        assert_eq!(page.listeners(), 0);
    }

    #[test]
    fn test_place_creates_session() {
        let mut c = controller(Rc::new(RecordingPage::new()));
        let id = place(&mut c, 5, 2);
        assert!(matches!(c.session(id), Some(WidgetSession::DocumentAi(_))));
        assert!(c.is_consistent());
    }

    #[test]
    fn test_focus_disables_sensor_and_resets_session() {
        let mut c = controller(Rc::new(RecordingPage::new()));
        let id = place(&mut c, 2, 0);
        c.widget_event(id, WidgetEvent::ExampleClicked { prompt: "a fox".into() }).unwrap();
        assert_eq!(c.scheduler().pending(), 1);

        c.activate_instance(id);
        assert_eq!(c.focus().focused(), Some(id));
        assert!(!c.sensor().is_enabled());
        assert_eq!(c.scheduler().pending(), 0);

        c.close_instance(id);
        assert_eq!(c.focus().focused(), None);
        assert!(c.sensor().is_enabled());
        assert!(c.engine().grid().contains(id));
    }

    #[test]
    fn test_remove_focused_clears_focus() {
        let mut c = controller(Rc::new(RecordingPage::new()));
        let id = place(&mut c, 10, 1);
        c.toggle_focus(id);
        assert!(c.remove_item(id).is_some());
        assert_eq!(c.focus().focused(), None);
        assert!(c.sensor().is_enabled());
        assert!(c.session(id).is_none());
        assert!(c.is_consistent());
    }

    #[test]
    fn test_chat_routing() {
        let mut c = controller(Rc::new(RecordingPage::new()));
        let id = place(&mut c, 10, 0);
        assert!(!c.submit_chat("hello"));

        c.toggle_focus(id);
        c.set_chat_draft("  quantum  ");
        assert!(!c.submit_chat("   "));
        assert!(c.submit_chat("  quantum  "));
        assert!(c.chat_draft().is_empty());
        let Some(WidgetSession::ResearchHelper(research)) = c.session(id) else {
            panic!("expected research session");
        };
        assert_eq!(research.echo, "quantum");

        c.advance(Duration::from_millis(100));
        let Some(WidgetSession::ResearchHelper(research)) = c.session(id) else {
            panic!("expected research session");
        };
        assert!(research.echo.is_empty());
    }

    #[test]
    fn test_timer_after_removal_is_dropped() {
        let mut c = controller(Rc::new(RecordingPage::new()));
        let id = place(&mut c, 2, 0);
        c.widget_event(id, WidgetEvent::ExampleClicked { prompt: "owl".into() }).unwrap();
        c.remove_item(id);
        assert_eq!(c.advance(Duration::from_secs(10)), 0);
        assert!(c.is_consistent());
    }

    #[test]
    fn test_examples_counted_for_every_kind() {
        let mut c = controller(Rc::new(RecordingPage::new()));
        let data = place(&mut c, 4, 0);
        let image = place(&mut c, 2, 1);

        c.widget_event(data, WidgetEvent::ExampleClicked { prompt: "monthly churn".into() })
            .unwrap();
        assert_eq!(c.examples_clicked(), 1);
        assert_eq!(c.chat_draft(), "monthly churn");

        c.widget_event(image, WidgetEvent::ExampleClicked { prompt: "a fox".into() })
            .unwrap();
        assert_eq!(c.examples_clicked(), 2);
        assert!(c.chat_draft().is_empty());

        c.activate_instance(image);
        assert_eq!(c.view().examples_clicked, 2);
    }

    #[test]
    fn test_summary_modal() {
        let mut c = controller(Rc::new(RecordingPage::new()));
        let id = place(&mut c, 5, 0);
        c.widget_event(
            id,
            WidgetEvent::FileUploaded { file: crate::widgets::UploadedFile::new("plan.md", 10) },
        )
        .unwrap();
        assert_eq!(c.widget_event(id, WidgetEvent::Summarize), Err(WidgetError::MissingFile));

        c.advance(Duration::from_millis(500));
        c.widget_event(id, WidgetEvent::Summarize).unwrap();
        assert_eq!(c.view().summary.map(|s| s.file_name), Some("plan.md".to_string()));
        c.close_summary();
        assert!(c.summary().is_none());
    }

    #[test]
    fn test_view_overlay_and_context() {
        let mut c = controller(Rc::new(RecordingPage::new()));
        c.layout_mut().register(
            DropTarget::TrayEntry { kind: ItemKind::Widget, id: 4 },
            Rect::new(0.0, 0.0, 100.0, 40.0),
        );
        assert!(c.on_drag_start(widget(4), Point::new(10.0, 10.0)));
        c.on_drag_over(Point::new(30.0, 20.0));

        let view = c.view();
        let overlay = view.overlay.unwrap();
        assert!(matches!(overlay.item, OverlayItem::Entry { ref entry } if entry.id == 4));
        assert_eq!(overlay.rect, Some(Rect::new(20.0, 10.0, 120.0, 50.0)));
        assert!(view.widget_context.is_none());
        c.on_drag_cancel();

        let id = place(&mut c, 9, 3);
        c.toggle_focus(id);
        let view = c.view();
        assert_eq!(view.widget_context.map(|ctx| ctx.title), Some("Music Composer".to_string()));
        assert_eq!(view.slots[3].as_ref().map(|s| s.state), Some(InstanceState::Focused));
        assert_eq!(view.item_count, 1);
    }
}
