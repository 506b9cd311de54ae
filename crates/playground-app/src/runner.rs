//! Replays a [`Script`] against a [`Stage`] and collects frames.

use crate::content::text_registry;
use crate::frame::{self, FrameFormat, PageStatus};
use crate::layout;
use crate::script::{Phase, Script, ScriptError, Step, Target};
use kurbo::Point;
use playground_core::{
    Catalog, CatalogPicker, ContentRegistry, DragSource, DropTarget, ItemKind, PickOutcome, PlaygroundConfig,
    PlaygroundController, PointerEvent, PointerKind, RecordingPage, Stage,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

/// Time that passes between two scripted pointer events.
const FRAME: Duration = Duration::from_millis(16);

pub struct Runner {
    stage: Stage,
    page: Rc<RecordingPage>,
    registry: ContentRegistry,
    touch_delay: Duration,
    clock: Duration,
    format: FrameFormat,
    frames: Vec<String>,
    /// Drives which widgets the selection stage offers.
    rng: StdRng,
}

impl Runner {
    pub fn new(config: PlaygroundConfig, format: FrameFormat) -> Self {
        Self::with_rng(config, format, StdRng::from_entropy())
    }

    /// Runner whose widget suggestions are reproducible.
    pub fn with_seed(config: PlaygroundConfig, format: FrameFormat, seed: u64) -> Self {
        Self::with_rng(config, format, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: PlaygroundConfig, format: FrameFormat, mut rng: StdRng) -> Self {
        let page = Rc::new(RecordingPage::new());
        let mut picker = CatalogPicker::new(Arc::new(Catalog::builtin()), &config);
        picker.shuffle(&mut rng);
        let touch_delay = config.activation.touch_delay();
        Self {
            stage: Stage::new(picker, config, page.clone()),
            page,
            registry: text_registry(),
            touch_delay,
            clock: Duration::ZERO,
            format,
            frames: Vec::new(),
            rng,
        }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn page(&self) -> &RecordingPage {
        &self.page
    }

    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    /// Pick the initial selection, launch, and replay every step. A final
    /// frame is captured when the script never asks for one.
    pub fn run(&mut self, script: &Script) -> Result<(), ScriptError> {
        self.select(script)?;
        for (index, step) in script.steps.iter().enumerate() {
            self.step(index + 1, step)?;
        }
        if !script.steps.contains(&Step::Frame) {
            self.capture()?;
        }
        Ok(())
    }

    fn select(&mut self, script: &Script) -> Result<(), ScriptError> {
        if script.prompts.is_empty() && script.widgets.is_empty() {
            return Ok(());
        }
        let picker = self.stage.picker_mut().ok_or(ScriptError::NotPicking {
            step: 0,
            action: "select",
        })?;
        let picks = script
            .prompts
            .iter()
            .map(|&id| (ItemKind::Prompt, id))
            .chain(script.widgets.iter().map(|&id| (ItemKind::Widget, id)));
        for (kind, id) in picks {
            let outcome = picker.toggle(kind, id);
            if outcome != PickOutcome::Selected {
                log::warn!("Initial selection of {} #{}: {:?}", kind, id, outcome);
            }
        }
        if !self.stage.launch() {
            log::warn!("Nothing selected, staying on the selection stage");
        }
        Ok(())
    }

    /// Apply one step. `index` is only used in errors and logs.
    pub fn step(&mut self, index: usize, step: &Step) -> Result<(), ScriptError> {
        log::debug!("Step {}: {}", index, step.name());
        if step.needs_playground() && self.stage.playground().is_none() {
            return Err(ScriptError::NotPlaying {
                step: index,
                action: step.name(),
            });
        }

        match step {
            Step::Pick { kind, id } => {
                let picker = self.stage.picker_mut().ok_or(ScriptError::NotPicking {
                    step: index,
                    action: step.name(),
                })?;
                let outcome = picker.toggle(*kind, *id);
                log::info!("Toggled {} #{}: {:?}", kind, id, outcome);
            }
            Step::Launch => {
                if !self.stage.launch() {
                    log::warn!("Step {}: launch refused", index);
                }
            }
            Step::Back => {
                if self.stage.back_to_selection() {
                    if let Some(picker) = self.stage.picker_mut() {
                        picker.shuffle(&mut self.rng);
                    }
                }
            }
            Step::Refresh => {
                let picker = self.stage.picker_mut().ok_or(ScriptError::NotPicking {
                    step: index,
                    action: step.name(),
                })?;
                picker.refresh(&mut self.rng);
                log::info!("Widget suggestions now {:?}", picker.displayed());
            }
            Step::Drag { from, to, pointer } => self.drag(index, from, to, *pointer)?,
            Step::Click { target, pointer } => {
                let point = self.resolve(index, target)?;
                self.pointer(Phase::Down, point, *pointer);
                self.pointer(Phase::Up, point, *pointer);
            }
            Step::Pointer { phase, at, pointer } => {
                let point = match at {
                    Some(target) => self.resolve(index, target)?,
                    None => Point::ZERO,
                };
                self.pointer(*phase, point, *pointer);
            }
            Step::Key { key } => {
                let controller = self.controller(index, step)?;
                controller.handle_key(key);
            }
            Step::KeyboardFocus { target } => {
                let source = match target {
                    Some(target) => self.source(index, target)?,
                    None => None,
                };
                self.controller(index, step)?.set_keyboard_focus(source);
            }
            Step::Chat { text } => {
                let controller = self.controller(index, step)?;
                controller.set_chat_draft(text.as_str());
                controller.submit_chat(text);
            }
            Step::Widget { position, event } => {
                let id = self.instance_at(index, *position)?;
                let controller = self.controller(index, step)?;
                if let Err(err) = controller.widget_event(id, event.clone()) {
                    log::warn!("Step {}: {}", index, err);
                }
            }
            Step::Close { position } => {
                let id = self.instance_at(index, *position)?;
                self.controller(index, step)?.close_instance(id);
            }
            Step::CloseSummary => self.controller(index, step)?.close_summary(),
            Step::Wait { ms } => self.wait(Duration::from_millis(*ms)),
            Step::Frame => self.capture()?,
        }
        Ok(())
    }

    fn controller(&mut self, index: usize, step: &Step) -> Result<&mut PlaygroundController, ScriptError> {
        let controller = self.stage.playground_mut().ok_or(ScriptError::NotPlaying {
            step: index,
            action: step.name(),
        })?;
        layout::sync(controller);
        Ok(controller)
    }

    fn instance_at(&mut self, index: usize, position: usize) -> Result<playground_core::InstanceId, ScriptError> {
        self.stage
            .playground()
            .and_then(|c| c.engine().grid().at_position(position))
            .map(|item| item.instance_id)
            .ok_or(ScriptError::EmptySlot { step: index, position })
    }

    /// Screen point of a target under the current layout.
    fn resolve(&mut self, index: usize, target: &Target) -> Result<Point, ScriptError> {
        let controller = self.controller(index, &Step::Frame)?;
        match *target {
            Target::Entry { kind, id } => controller
                .layout()
                .rect_of(&DropTarget::TrayEntry { kind, id })
                .map(|rect| rect.center())
                .ok_or(ScriptError::NotInTray { step: index, kind, id }),
            Target::Slot { position } => {
                let registered = controller
                    .engine()
                    .grid()
                    .at_position(position)
                    .and_then(|item| {
                        controller.layout().rect_of(&DropTarget::Instance {
                            id: item.instance_id,
                        })
                    });
                Ok(registered.unwrap_or_else(|| layout::slot_rect(position)).center())
            }
            Target::Grid => Ok(layout::grid_gap_point()),
            Target::Tray => Ok(layout::tray_gap_point(controller.engine().tray().len())),
            Target::Point { x, y } => Ok(Point::new(x, y)),
        }
    }

    /// Draggable a target refers to, if any.
    fn source(&mut self, index: usize, target: &Target) -> Result<Option<DragSource>, ScriptError> {
        match *target {
            Target::Entry { kind, id } => {
                let in_tray = self
                    .stage
                    .playground()
                    .is_some_and(|c| c.engine().tray().contains(kind, id));
                if !in_tray {
                    return Err(ScriptError::NotInTray { step: index, kind, id });
                }
                Ok(Some(DragSource::TrayEntry { kind, id }))
            }
            Target::Slot { position } => {
                let id = self.instance_at(index, position)?;
                Ok(Some(DragSource::Instance { id }))
            }
            _ => {
                let point = self.resolve(index, target)?;
                Ok(self
                    .stage
                    .playground()
                    .and_then(|c| c.layout().draggable_at(point)))
            }
        }
    }

    /// Press at `from`, move through the midpoint to `to` and release.
    /// Touch presses are held for the activation delay first.
    fn drag(&mut self, index: usize, from: &Target, to: &Target, kind: PointerKind) -> Result<(), ScriptError> {
        let start = self.resolve(index, from)?;
        let end = self.resolve(index, to)?;
        self.pointer(Phase::Down, start, kind);
        if kind == PointerKind::Touch {
            self.wait(self.touch_delay);
        }
        self.pointer(Phase::Move, start.midpoint(end), kind);
        self.pointer(Phase::Move, end, kind);
        self.pointer(Phase::Up, end, kind);
        Ok(())
    }

    fn pointer(&mut self, phase: Phase, position: Point, kind: PointerKind) {
        let at = self.clock;
        let event = match phase {
            Phase::Down => PointerEvent::Down { position, kind, at },
            Phase::Move => PointerEvent::Move { position, at },
            Phase::Up => PointerEvent::Up { position, at },
            Phase::Cancel => PointerEvent::Cancel,
        };
        if let Some(controller) = self.stage.playground_mut() {
            layout::sync(controller);
            controller.handle_pointer(event);
        }
        self.wait(FRAME);
    }

    /// Let virtual time pass: touch sensors may activate and widget timers
    /// may fire.
    fn wait(&mut self, dt: Duration) {
        self.clock += dt;
        if let Some(controller) = self.stage.playground_mut() {
            controller.poll_sensor(self.clock);
            let fired = controller.advance(dt);
            if fired > 0 {
                log::debug!("{} effect(s) fired at {:?}", fired, self.clock);
            }
        }
    }

    /// Render the current stage into a frame.
    pub fn capture(&mut self) -> Result<(), ScriptError> {
        let page = PageStatus {
            interaction_suspended: self.page.suspended() > 0,
            viewport_listeners: self.page.listeners(),
        };
        let frame = match self.stage.playground_mut() {
            Some(controller) => {
                let widgets = controller.render_widgets(&mut self.registry);
                let view = controller.view();
                match self.format {
                    FrameFormat::Text => frame::playing_text(&view, &widgets, controller.engine().catalog(), page),
                    FrameFormat::Json => {
                        frame::playing_json(&view, &widgets, page).map_err(ScriptError::Snapshot)?
                    }
                }
            }
            None => match self.format {
                FrameFormat::Text => frame::picking_text(self.stage.picker()),
                FrameFormat::Json => frame::picking_json(self.stage.picker()).map_err(ScriptError::Snapshot)?,
            },
        };
        self.frames.push(frame);
        Ok(())
    }
}

impl std::fmt::Debug for Runner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("stage", &self.stage)
            .field("clock", &self.clock)
            .field("frames", &self.frames.len())
            .finish_non_exhaustive()
    }
}
