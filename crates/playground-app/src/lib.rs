//! Headless driver for the widget playground.
//!
//! Lays the playground out on a fixed screen, replays scripted pointer and
//! keyboard gestures through the controller and prints what the screen
//! would show.

pub mod cli;
pub mod content;
pub mod frame;
pub mod layout;
pub mod runner;
pub mod script;
pub mod shortcuts;

pub use cli::CliArgs;
pub use content::{TextContent, text_registry};
pub use frame::{FrameFormat, PageStatus};
pub use runner::Runner;
pub use script::{Phase, Script, ScriptError, Step, Target};
pub use shortcuts::{Shortcut, ShortcutRegistry};
