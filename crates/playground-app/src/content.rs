//! Plain-text content for grid instances.
//!
//! Each widget kind gets a renderer that describes its session in a line or
//! two; expanded instances get a little more detail.

use playground_core::widgets::{DataSession, DocumentSession, ImageSession, MusicSession, ResearchSession, UploadSlot};
use playground_core::{ContentRegistry, TimerState, WidgetContent, WidgetEvent, WidgetInvocation, WidgetKind};

/// Registry with a text renderer for every widget kind.
pub fn text_registry() -> ContentRegistry {
    let mut registry = ContentRegistry::new();
    for kind in WidgetKind::ALL {
        registry.register(kind.catalog_id(), Box::new(TextContent));
    }
    registry.set_fallback(Box::new(TextContent));
    registry
}

/// Describes any invocation as text.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextContent;

impl WidgetContent for TextContent {
    fn render(&mut self, invocation: &WidgetInvocation<'_>, _emit: &mut dyn FnMut(WidgetEvent)) -> String {
        let expanded = invocation.is_expanded();
        match *invocation {
            WidgetInvocation::ImageGenerator { session, .. } => image(session),
            WidgetInvocation::DataAnalysis { session, .. } => data(session, expanded),
            WidgetInvocation::DocumentAi { session, .. } => document(session),
            WidgetInvocation::MusicComposer { session, .. } => music(session, expanded),
            WidgetInvocation::ResearchHelper { session, .. } => research(session),
            WidgetInvocation::General { content, .. } => {
                let mut lines: Vec<&str> = Vec::new();
                lines.extend(content.title.as_deref());
                lines.extend(content.text.as_deref());
                if expanded {
                    lines.extend(content.description.as_deref());
                }
                lines.join(" | ")
            }
        }
    }
}

fn image(session: &ImageSession) -> String {
    match session.generation {
        TimerState::Pending(_) => format!("generating \"{}\"...", session.prompt),
        TimerState::Done => format!("image for \"{}\"", session.prompt),
        TimerState::Idle => "describe an image to generate".to_string(),
    }
}

fn upload(slot: &UploadSlot) -> String {
    match (&slot.file, &slot.staged) {
        (_, Some(staged)) if slot.is_uploading() => format!("uploading {}...", staged.name),
        (Some(file), _) => format!("{} ({})", file.name, file.formatted_size()),
        _ => "no file".to_string(),
    }
}

fn data(session: &DataSession, expanded: bool) -> String {
    let mut body = upload(&session.upload);
    if session.analyzed {
        body.push_str(" | analyzed");
    }
    if let (true, Some(drill)) = (expanded, &session.drill_down) {
        body.push_str(&format!(" | drill-down: {} {}", drill.chart, drill.data));
    }
    body
}

fn document(session: &DocumentSession) -> String {
    upload(&session.upload)
}

fn music(session: &MusicSession, expanded: bool) -> String {
    match (&session.generation, &session.track, &session.settings) {
        (TimerState::Pending(_), _, Some(settings)) => {
            format!("composing {} {}...", settings.mood, settings.genre)
        }
        (_, Some(track), _) if expanded => format!("{} ({}, {} bpm)", track.title, track.duration, track.tempo),
        (_, Some(track), _) => track.title.clone(),
        _ => "pick a genre, a mood and instruments".to_string(),
    }
}

fn research(session: &ResearchSession) -> String {
    if session.echo.is_empty() {
        "ask a research question".to_string()
    } else {
        format!("researching: {}", session.echo)
    }
}
