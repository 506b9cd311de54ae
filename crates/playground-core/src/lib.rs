//! Widget Playground Core Library
//!
//! Platform-agnostic placement, drag-and-drop and focus state for the widget
//! playground: a tray of selected catalog entries, a four-slot grid they can
//! be dragged into, and a single expanded (focused) instance that locks out
//! dragging while it is open.

pub mod catalog;
pub mod config;
pub mod controller;
pub mod drag;
pub mod effects;
pub mod error;
pub mod focus;
pub mod input;
pub mod page;
pub mod picker;
pub mod placement;
pub mod stage;
pub mod widgets;

pub use catalog::{Catalog, CatalogEntry, CatalogId, ContentSnapshot, ItemKind};
pub use config::{ActivationConfig, ConfigError, EffectTimings, PlaygroundConfig, ReserveSlot, SelectionLimits};
pub use controller::{
    BlockedEntry, DragOverlay, OverlayItem, PlaygroundController, PlaygroundView, RenderedWidget, SlotView,
    SummaryModal,
};
pub use drag::{Direction, DragCoordinator, DragSource, DropAction, DropTarget, Droppable, DroppableLayout, Zone};
pub use effects::{Effect, EffectScheduler, TimerHandle, TimerState};
pub use error::{ErrorCategory, PlacementError, PlacementResult};
pub use focus::{FocusChange, FocusLock, InstanceState};
pub use input::{DragSensor, Key, PointerEvent, PointerKind, SensorAction};
pub use page::{InteractionGuard, NoPage, PageEffects, RecordingPage, ViewportGuard};
pub use picker::{CatalogPicker, PickOutcome, WIDGET_DISPLAY_COUNT};
pub use placement::{GRID_CAPACITY, Grid, InstanceId, PlacedItem, PlacementEngine, TraySelection};
pub use stage::{Stage, StageKind};
pub use widgets::{ContentRegistry, WidgetContent, WidgetContext, WidgetEvent, WidgetInvocation, WidgetKind, WidgetSession};
