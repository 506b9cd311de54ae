//! Widget content: kinds, per-instance sessions, uploads and renderers.

mod kind;
mod registry;
mod session;
mod upload;

pub use kind::{WidgetContext, WidgetKind};
pub use registry::{ContentRegistry, WidgetContent, WidgetInvocation};
pub use session::{
    DataSession, DocumentSession, DrillDown, EventOutcome, GeneratedTrack, ImageSession, MusicSession,
    MusicSettings, ResearchSession, UploadSlot, WidgetError, WidgetEvent, WidgetSession,
};
pub use upload::{UploadError, UploadPolicy, UploadedFile};
