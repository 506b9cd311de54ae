//! Per-instance widget state and the events that change it.

use super::kind::WidgetKind;
use super::upload::{UploadError, UploadPolicy, UploadedFile};
use crate::config::EffectTimings;
use crate::effects::{Effect, EffectScheduler, TimerHandle, TimerState};
use crate::placement::InstanceId;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Events a widget's content reports back to the playground.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetEvent {
    FileUploaded { file: UploadedFile },
    FileRemoved,
    Analyze,
    DrillDown {
        chart: String,
        #[serde(default)]
        data: Option<serde_json::Value>,
    },
    Summarize,
    ExampleClicked { prompt: String },
    SendMessage { message: String },
    GenerateMusic { settings: MusicSettings },
}

impl WidgetEvent {
    pub fn name(&self) -> &'static str {
        match self {
            WidgetEvent::FileUploaded { .. } => "file_uploaded",
            WidgetEvent::FileRemoved => "file_removed",
            WidgetEvent::Analyze => "analyze",
            WidgetEvent::DrillDown { .. } => "drill_down",
            WidgetEvent::Summarize => "summarize",
            WidgetEvent::ExampleClicked { .. } => "example_clicked",
            WidgetEvent::SendMessage { .. } => "send_message",
            WidgetEvent::GenerateMusic { .. } => "generate_music",
        }
    }
}

/// Why a widget event was not applied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WidgetError {
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error("{event} is not handled by {}", .kind.map_or("this widget", WidgetKind::title))]
    Unsupported {
        event: &'static str,
        kind: Option<WidgetKind>,
    },
    #[error("grid instance {0} does not exist")]
    UnknownInstance(InstanceId),
    #[error("no file has been uploaded")]
    MissingFile,
    #[error("genre, mood and at least one instrument are required")]
    IncompleteSettings,
}

/// What the playground should do after an event was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Applied,
    OpenSummary { file_name: String },
}

/// A file that is either being uploaded or visible to the widget.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadSlot {
    pub file: Option<UploadedFile>,
    pub staged: Option<UploadedFile>,
    pub timer: TimerState,
}

impl UploadSlot {
    fn stage(
        &mut self,
        file: UploadedFile,
        policy: UploadPolicy,
        owner: InstanceId,
        delay: Duration,
        scheduler: &mut EffectScheduler,
    ) -> Result<(), UploadError> {
        policy.validate(&file)?;
        cancel_pending(&mut self.timer, scheduler);
        self.staged = Some(file);
        self.timer = TimerState::Pending(scheduler.schedule(owner, delay, Effect::UploadReady));
        Ok(())
    }

    fn clear(&mut self, scheduler: &mut EffectScheduler) {
        cancel_pending(&mut self.timer, scheduler);
        *self = Self::default();
    }

    fn complete(&mut self, handle: TimerHandle) -> bool {
        if !self.timer.waits_on(handle) {
            return false;
        }
        self.file = self.staged.take();
        self.timer = TimerState::Done;
        true
    }

    pub fn is_uploading(&self) -> bool {
        self.timer.is_pending()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageSession {
    pub prompt: String,
    pub generation: TimerState,
}

impl ImageSession {
    pub fn is_generating(&self) -> bool {
        self.generation.is_pending()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillDown {
    pub chart: String,
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSession {
    pub upload: UploadSlot,
    pub analyzed: bool,
    pub drill_down: Option<DrillDown>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentSession {
    pub upload: UploadSlot,
}

/// Music generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicSettings {
    pub genre: String,
    pub mood: String,
    pub tempo: u32,
    pub instruments: Vec<String>,
    pub duration: String,
}

impl Default for MusicSettings {
    fn default() -> Self {
        Self {
            genre: String::new(),
            mood: String::new(),
            tempo: 90,
            instruments: Vec::new(),
            duration: "1min".to_string(),
        }
    }
}

impl MusicSettings {
    pub fn can_generate(&self) -> bool {
        !self.genre.is_empty() && !self.mood.is_empty() && !self.instruments.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedTrack {
    pub title: String,
    pub duration: String,
    pub tempo: u32,
}

impl GeneratedTrack {
    fn from_settings(settings: &MusicSettings) -> Self {
        Self {
            title: format!("{} {} Track", capitalize(&settings.mood), capitalize(&settings.genre)),
            duration: settings.duration.clone(),
            tempo: settings.tempo,
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicSession {
    pub settings: Option<MusicSettings>,
    pub generation: TimerState,
    pub track: Option<GeneratedTrack>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResearchSession {
    /// Last message routed to the helper; cleared shortly after.
    pub echo: String,
    pub clear: TimerState,
}

/// State the user has fed one grid instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum WidgetSession {
    ImageGenerator(ImageSession),
    DataAnalysis(DataSession),
    DocumentAi(DocumentSession),
    MusicComposer(MusicSession),
    ResearchHelper(ResearchSession),
    General,
}

fn cancel_pending(state: &mut TimerState, scheduler: &mut EffectScheduler) {
    if let TimerState::Pending(handle) = *state {
        scheduler.cancel(handle);
    }
    *state = TimerState::Idle;
}

impl WidgetSession {
    pub fn for_kind(kind: Option<WidgetKind>) -> Self {
        match kind {
            Some(WidgetKind::ImageGenerator) => Self::ImageGenerator(ImageSession::default()),
            Some(WidgetKind::DataAnalysis) => Self::DataAnalysis(DataSession::default()),
            Some(WidgetKind::DocumentAi) => Self::DocumentAi(DocumentSession::default()),
            Some(WidgetKind::MusicComposer) => Self::MusicComposer(MusicSession::default()),
            Some(WidgetKind::ResearchHelper) => Self::ResearchHelper(ResearchSession::default()),
            None => Self::General,
        }
    }

    pub fn kind(&self) -> Option<WidgetKind> {
        match self {
            Self::ImageGenerator(_) => Some(WidgetKind::ImageGenerator),
            Self::DataAnalysis(_) => Some(WidgetKind::DataAnalysis),
            Self::DocumentAi(_) => Some(WidgetKind::DocumentAi),
            Self::MusicComposer(_) => Some(WidgetKind::MusicComposer),
            Self::ResearchHelper(_) => Some(WidgetKind::ResearchHelper),
            Self::General => None,
        }
    }

    /// Drop transient state (uploads, prompts, generation, echoes) and
    /// cancel the timers behind it.
    pub fn reset(&mut self, scheduler: &mut EffectScheduler) {
        match self {
            Self::ImageGenerator(s) => {
                cancel_pending(&mut s.generation, scheduler);
                s.prompt.clear();
            }
            Self::DataAnalysis(s) => {
                s.upload.clear(scheduler);
                s.analyzed = false;
                s.drill_down = None;
            }
            Self::DocumentAi(s) => s.upload.clear(scheduler),
            Self::MusicComposer(s) => {
                cancel_pending(&mut s.generation, scheduler);
                s.settings = None;
                s.track = None;
            }
            Self::ResearchHelper(s) => {
                cancel_pending(&mut s.clear, scheduler);
                s.echo.clear();
            }
            Self::General => {}
        }
    }

    /// Apply an event reported by the widget's content.
    pub fn handle(
        &mut self,
        owner: InstanceId,
        event: WidgetEvent,
        timings: &EffectTimings,
        scheduler: &mut EffectScheduler,
    ) -> Result<EventOutcome, WidgetError> {
        let kind = self.kind();
        let unsupported = |event: &WidgetEvent| WidgetError::Unsupported { event: event.name(), kind };

        match (self, event) {
            (Self::DocumentAi(s), WidgetEvent::FileUploaded { file }) => {
                s.upload.stage(
                    file,
                    UploadPolicy::DOCUMENT,
                    owner,
                    Duration::from_millis(timings.document_upload_ms),
                    scheduler,
                )?;
            }
            (Self::DataAnalysis(s), WidgetEvent::FileUploaded { file }) => {
                s.upload.stage(
                    file,
                    UploadPolicy::DATA,
                    owner,
                    Duration::from_millis(timings.data_upload_ms),
                    scheduler,
                )?;
                s.analyzed = false;
                s.drill_down = None;
            }
            (Self::DocumentAi(s), WidgetEvent::FileRemoved) => s.upload.clear(scheduler),
            (Self::DataAnalysis(s), WidgetEvent::FileRemoved) => {
                s.upload.clear(scheduler);
                s.analyzed = false;
                s.drill_down = None;
            }
            (Self::DataAnalysis(s), WidgetEvent::Analyze) => {
                if s.upload.file.is_none() {
                    return Err(WidgetError::MissingFile);
                }
                s.analyzed = true;
            }
            (Self::DataAnalysis(s), WidgetEvent::DrillDown { chart, data }) => {
                if data.is_some() {
                    s.analyzed = true;
                }
                s.drill_down = data.map(|data| DrillDown { chart, data });
            }
            (Self::DocumentAi(s), WidgetEvent::Summarize) => {
                let file = s.upload.file.as_ref().ok_or(WidgetError::MissingFile)?;
                return Ok(EventOutcome::OpenSummary { file_name: file.name.clone() });
            }
            (Self::ImageGenerator(s), WidgetEvent::ExampleClicked { prompt }) => {
                start_image_generation(s, prompt, owner, timings, scheduler);
            }
            (_, WidgetEvent::ExampleClicked { .. }) => {}
            (Self::ResearchHelper(s), WidgetEvent::SendMessage { message }) => {
                echo_research(s, message, owner, timings, scheduler);
            }
            (Self::MusicComposer(s), WidgetEvent::GenerateMusic { settings }) => {
                if !settings.can_generate() {
                    return Err(WidgetError::IncompleteSettings);
                }
                cancel_pending(&mut s.generation, scheduler);
                s.track = None;
                s.settings = Some(settings);
                s.generation = TimerState::Pending(scheduler.schedule(
                    owner,
                    Duration::from_millis(timings.music_generation_ms),
                    Effect::MusicGenerated,
                ));
            }
            (_, event) => return Err(unsupported(&event)),
        }
        Ok(EventOutcome::Applied)
    }

    /// Route submitted chat text. Returns false when this widget does not
    /// react to chat input.
    pub fn submit_chat(
        &mut self,
        text: &str,
        owner: InstanceId,
        timings: &EffectTimings,
        scheduler: &mut EffectScheduler,
    ) -> bool {
        match self {
            Self::ImageGenerator(s) => {
                start_image_generation(s, text.to_string(), owner, timings, scheduler);
                true
            }
            Self::ResearchHelper(s) => {
                echo_research(s, text.to_string(), owner, timings, scheduler);
                true
            }
            _ => false,
        }
    }

    /// Apply a fired timer. Stale timers (superseded or reset) are ignored.
    pub fn apply_effect(&mut self, handle: TimerHandle, effect: Effect) -> bool {
        match (self, effect) {
            (Self::DocumentAi(s), Effect::UploadReady) => s.upload.complete(handle),
            (Self::DataAnalysis(s), Effect::UploadReady) => s.upload.complete(handle),
            (Self::ImageGenerator(s), Effect::ImageGenerated) if s.generation.waits_on(handle) => {
                s.generation = TimerState::Done;
                true
            }
            (Self::MusicComposer(s), Effect::MusicGenerated) if s.generation.waits_on(handle) => {
                s.track = s.settings.as_ref().map(GeneratedTrack::from_settings);
                s.generation = TimerState::Done;
                true
            }
            (Self::ResearchHelper(s), Effect::ResearchEchoCleared) if s.clear.waits_on(handle) => {
                s.echo.clear();
                s.clear = TimerState::Done;
                true
            }
            _ => false,
        }
    }
}

fn start_image_generation(
    session: &mut ImageSession,
    prompt: String,
    owner: InstanceId,
    timings: &EffectTimings,
    scheduler: &mut EffectScheduler,
) {
    cancel_pending(&mut session.generation, scheduler);
    session.prompt = prompt;
    session.generation = TimerState::Pending(scheduler.schedule(
        owner,
        Duration::from_millis(timings.image_generation_ms),
        Effect::ImageGenerated,
    ));
}

fn echo_research(
    session: &mut ResearchSession,
    message: String,
    owner: InstanceId,
    timings: &EffectTimings,
    scheduler: &mut EffectScheduler,
) {
    cancel_pending(&mut session.clear, scheduler);
    session.echo = message;
    session.clear = TimerState::Pending(scheduler.schedule(
        owner,
        Duration::from_millis(timings.research_echo_ms),
        Effect::ResearchEchoCleared,
    ));
}
