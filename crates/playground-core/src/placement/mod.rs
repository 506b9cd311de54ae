//! Tray and grid membership.
//!
//! The tray holds catalog ids that are available to drag; the grid holds up
//! to [`GRID_CAPACITY`] placed instances. [`PlacementEngine`] is the only
//! place either zone is mutated.

mod engine;
mod grid;
mod tray;

pub use engine::PlacementEngine;
pub use grid::{GRID_CAPACITY, Grid, InstanceId, PlacedItem};
pub use tray::TraySelection;
