//! Gesture scripts: a JSON description of what a user does in the playground.
//!
//! ```json
//! {
//!   "widgets": [2, 4],
//!   "steps": [
//!     { "action": "drag", "from": { "target": "entry", "kind": "widget", "id": 2 },
//!       "to": { "target": "slot", "position": 0 } },
//!     { "action": "click", "target": { "target": "slot", "position": 0 } },
//!     { "action": "frame" }
//!   ]
//! }
//! ```

use playground_core::{CatalogId, ConfigError, ItemKind, Key, PointerKind, WidgetEvent};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that stop a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid script: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("step {step} ({action}) needs the playground to be open")]
    NotPlaying { step: usize, action: &'static str },
    #[error("step {step} ({action}) needs the selection stage")]
    NotPicking { step: usize, action: &'static str },
    #[error("step {step}: grid slot {position} is empty")]
    EmptySlot { step: usize, position: usize },
    #[error("step {step}: {kind} #{id} is not in the tray")]
    NotInTray { step: usize, kind: ItemKind, id: CatalogId },
    #[error("failed to serialize frame: {0}")]
    Snapshot(#[source] serde_json::Error),
}

/// A place on screen a step refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum Target {
    /// A tray entry.
    Entry { kind: ItemKind, id: CatalogId },
    /// A grid slot, whether occupied or not.
    Slot { position: usize },
    /// Free space in the grid.
    Grid,
    /// Free space in the tray.
    Tray,
    /// Raw screen coordinates.
    Point { x: f64, y: f64 },
}

/// Phase of a low-level pointer step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Down,
    Move,
    Up,
    Cancel,
}

fn default_pointer() -> PointerKind {
    PointerKind::Mouse
}

/// One scripted user action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Toggle a catalog entry on the selection stage.
    Pick { kind: ItemKind, id: CatalogId },
    /// Drop the widget selection and offer a new set of widgets.
    Refresh,
    /// Open the playground with the current selection.
    Launch,
    /// Return to the selection stage.
    Back,
    /// Press, move and release.
    Drag {
        from: Target,
        to: Target,
        #[serde(default = "default_pointer")]
        pointer: PointerKind,
    },
    /// Press and release without moving.
    Click {
        target: Target,
        #[serde(default = "default_pointer")]
        pointer: PointerKind,
    },
    /// A single pointer event.
    Pointer {
        phase: Phase,
        #[serde(default)]
        at: Option<Target>,
        #[serde(default = "default_pointer")]
        pointer: PointerKind,
    },
    Key { key: Key },
    /// Move keyboard focus to a draggable, or clear it.
    KeyboardFocus {
        #[serde(default)]
        target: Option<Target>,
    },
    /// Type into the chat box and submit.
    Chat { text: String },
    /// Report a widget event from the instance in a slot.
    Widget { position: usize, event: WidgetEvent },
    /// Press the close button of the instance in a slot.
    Close { position: usize },
    CloseSummary,
    /// Let time pass.
    Wait { ms: u64 },
    /// Capture a frame.
    Frame,
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Pick { .. } => "pick",
            Step::Refresh => "refresh",
            Step::Launch => "launch",
            Step::Back => "back",
            Step::Drag { .. } => "drag",
            Step::Click { .. } => "click",
            Step::Pointer { .. } => "pointer",
            Step::Key { .. } => "key",
            Step::KeyboardFocus { .. } => "keyboard_focus",
            Step::Chat { .. } => "chat",
            Step::Widget { .. } => "widget",
            Step::Close { .. } => "close",
            Step::CloseSummary => "close_summary",
            Step::Wait { .. } => "wait",
            Step::Frame => "frame",
        }
    }

    /// Whether the step needs an open playground.
    pub fn needs_playground(&self) -> bool {
        !matches!(
            self,
            Step::Pick { .. } | Step::Refresh | Step::Launch | Step::Wait { .. } | Step::Frame
        )
    }
}

/// A complete script: the initial selection and the steps to replay.
///
/// A non-empty initial selection is picked and launched before the first
/// step runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub prompts: Vec<CatalogId>,
    #[serde(default)]
    pub widgets: Vec<CatalogId>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Short walkthrough used when no script is given.
    pub fn demo() -> Self {
        let slot = |position| Target::Slot { position };
        Self {
            prompts: vec![1],
            widgets: vec![2, 10],
            steps: vec![
                Step::Frame,
                Step::Drag {
                    from: Target::Entry {
                        kind: ItemKind::Widget,
                        id: 2,
                    },
                    to: slot(0),
                    pointer: PointerKind::Mouse,
                },
                Step::Drag {
                    from: Target::Entry {
                        kind: ItemKind::Widget,
                        id: 10,
                    },
                    to: Target::Grid,
                    pointer: PointerKind::Mouse,
                },
                Step::Frame,
                Step::Click {
                    target: slot(0),
                    pointer: PointerKind::Mouse,
                },
                Step::Chat {
                    text: "A lighthouse at dusk".to_string(),
                },
                Step::Frame,
                Step::Wait { ms: 5000 },
                Step::Frame,
                Step::Close { position: 0 },
                Step::Frame,
            ],
        }
    }
}
