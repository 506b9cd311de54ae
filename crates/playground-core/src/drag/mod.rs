//! Drag sessions, drop targets and collision detection.

mod collision;
mod session;
mod target;

pub use collision::{Direction, Droppable, DroppableLayout};
pub use session::{DragCoordinator, DragSession};
pub use target::{DragSource, DropAction, DropTarget, Zone};
