//! Pointer, touch and keyboard sensors.
//!
//! Raw input is turned into drag handler calls. A press only becomes a drag
//! once its activation constraint is met (travel distance for mouse and
//! pen, a hold delay for touch); a press released before that is a click.

use crate::config::ActivationConfig;
use crate::drag::{Direction, DragSource, DroppableLayout};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Kind of pointing device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Mouse,
    Pen,
    Touch,
}

/// Pointer event with a timestamp relative to an arbitrary epoch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down {
        position: Point,
        kind: PointerKind,
        at: Duration,
    },
    Move {
        position: Point,
        at: Duration,
    },
    Up {
        position: Point,
        at: Duration,
    },
    Cancel,
}

/// Keys the sensors react to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Space,
    Enter,
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Other(String),
}

impl Key {
    fn direction(&self) -> Option<Direction> {
        match self {
            Key::ArrowUp => Some(Direction::Up),
            Key::ArrowDown => Some(Direction::Down),
            Key::ArrowLeft => Some(Direction::Left),
            Key::ArrowRight => Some(Direction::Right),
            _ => None,
        }
    }
}

/// What the sensor asks the playground to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorAction {
    Start { source: DragSource, position: Point },
    Move { position: Point },
    End { position: Point },
    Cancel,
    /// A press that never became a drag.
    Click { source: DragSource },
}

#[derive(Debug, Clone, Copy)]
struct PendingPress {
    source: DragSource,
    origin: Point,
    kind: PointerKind,
    pressed_at: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActiveDrag {
    Pointer,
    Keyboard,
}

/// Converts raw input into [`SensorAction`]s.
#[derive(Debug, Clone)]
pub struct DragSensor {
    activation: ActivationConfig,
    enabled: bool,
    pending: Option<PendingPress>,
    active: Option<ActiveDrag>,
    /// Draggable that currently has keyboard focus.
    keyboard_focus: Option<DragSource>,
    /// Virtual pointer moved by arrow keys during a keyboard drag.
    keyboard_pointer: Point,
}

impl DragSensor {
    pub fn new(activation: ActivationConfig) -> Self {
        Self {
            activation,
            enabled: true,
            pending: None,
            active: None,
            keyboard_focus: None,
            keyboard_pointer: Point::ZERO,
        }
    }

    /// Enable or disable drag activation. Clicks still go through while
    /// disabled.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn set_keyboard_focus(&mut self, source: Option<DragSource>) {
        self.keyboard_focus = source;
    }

    pub fn keyboard_focus(&self) -> Option<DragSource> {
        self.keyboard_focus
    }

    /// Forget any pending press or active drag without emitting anything.
    pub fn reset(&mut self) {
        self.pending = None;
        self.active = None;
    }

    /// Process a pointer event.
    pub fn handle_pointer(&mut self, event: PointerEvent, layout: &DroppableLayout) -> Vec<SensorAction> {
        match event {
            PointerEvent::Down { position, kind, at } => {
                if self.active.is_some() {
                    return Vec::new();
                }
                self.pending = layout.draggable_at(position).map(|source| PendingPress {
                    source,
                    origin: position,
                    kind,
                    pressed_at: at,
                });
                Vec::new()
            }
            PointerEvent::Move { position, at } => {
                if self.active == Some(ActiveDrag::Pointer) {
                    return vec![SensorAction::Move { position }];
                }
                let Some(press) = self.pending else {
                    return Vec::new();
                };
                if !self.enabled {
                    return Vec::new();
                }
                let travelled = press.origin.distance(position);
                let activated = match press.kind {
                    PointerKind::Mouse | PointerKind::Pen => travelled >= self.activation.pointer_distance,
                    PointerKind::Touch => {
                        let held = at.saturating_sub(press.pressed_at) >= self.activation.touch_delay();
                        if !held && travelled > self.activation.touch_tolerance {
                            log::debug!("Touch press moved before activation, abandoning");
                            self.pending = None;
                            return Vec::new();
                        }
                        held
                    }
                };
                if !activated {
                    return Vec::new();
                }
                let mut actions = self.activate_pointer(press);
                actions.push(SensorAction::Move { position });
                actions
            }
            PointerEvent::Up { position, .. } => {
                if self.active == Some(ActiveDrag::Pointer) {
                    self.active = None;
                    return vec![SensorAction::End { position }];
                }
                match self.pending.take() {
                    Some(press) => vec![SensorAction::Click { source: press.source }],
                    None => Vec::new(),
                }
            }
            PointerEvent::Cancel => {
                self.pending = None;
                if self.active == Some(ActiveDrag::Pointer) {
                    self.active = None;
                    return vec![SensorAction::Cancel];
                }
                Vec::new()
            }
        }
    }

    /// Advance time. Activates touch presses held past the delay.
    pub fn tick(&mut self, at: Duration) -> Vec<SensorAction> {
        let Some(press) = self.pending else {
            return Vec::new();
        };
        if !self.enabled || press.kind != PointerKind::Touch || self.active.is_some() {
            return Vec::new();
        }
        if at.saturating_sub(press.pressed_at) < self.activation.touch_delay() {
            return Vec::new();
        }
        self.activate_pointer(press)
    }

    fn activate_pointer(&mut self, press: PendingPress) -> Vec<SensorAction> {
        self.pending = None;
        self.active = Some(ActiveDrag::Pointer);
        vec![SensorAction::Start {
            source: press.source,
            position: press.origin,
        }]
    }

    /// Process a key press.
    ///
    /// Space picks up the keyboard-focused item, arrows move it between
    /// droppables, Space or Enter drops it and Escape cancels. Enter on an
    /// idle item is a click.
    pub fn handle_key(&mut self, key: &Key, layout: &DroppableLayout) -> Vec<SensorAction> {
        match self.active {
            Some(ActiveDrag::Keyboard) => match key {
                Key::Space | Key::Enter => {
                    self.active = None;
                    vec![SensorAction::End { position: self.keyboard_pointer }]
                }
                Key::Escape => {
                    self.active = None;
                    vec![SensorAction::Cancel]
                }
                _ => {
                    let Some(direction) = key.direction() else {
                        return Vec::new();
                    };
                    match layout.next_in_direction(self.keyboard_pointer, direction) {
                        Some(position) => {
                            self.keyboard_pointer = position;
                            vec![SensorAction::Move { position }]
                        }
                        None => Vec::new(),
                    }
                }
            },
            Some(ActiveDrag::Pointer) => {
                if *key == Key::Escape {
                    self.active = None;
                    return vec![SensorAction::Cancel];
                }
                Vec::new()
            }
            None => {
                let Some(source) = self.keyboard_focus else {
                    return Vec::new();
                };
                match key {
                    Key::Enter => vec![SensorAction::Click { source }],
                    Key::Space if self.enabled => {
                        let position = layout
                            .rect_of(&source.as_target())
                            .map_or(self.keyboard_pointer, |rect| rect.center());
                        self.keyboard_pointer = position;
                        self.pending = None;
                        self.active = Some(ActiveDrag::Keyboard);
                        vec![SensorAction::Start { source, position }]
                    }
                    _ => Vec::new(),
                }
            }
        }
    }
}
