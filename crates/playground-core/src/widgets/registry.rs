//! Content renderers for grid instances, selected by catalog id.

use super::session::{
    DataSession, DocumentSession, ImageSession, MusicSession, ResearchSession, WidgetEvent, WidgetSession,
};
use crate::catalog::{CatalogId, ContentSnapshot, ItemKind};
use crate::placement::PlacedItem;
use std::collections::HashMap;

/// Everything a content renderer receives for one instance.
#[derive(Debug, Clone, Copy)]
pub enum WidgetInvocation<'a> {
    ImageGenerator {
        expanded: bool,
        session: &'a ImageSession,
    },
    DataAnalysis {
        expanded: bool,
        session: &'a DataSession,
    },
    DocumentAi {
        expanded: bool,
        session: &'a DocumentSession,
    },
    MusicComposer {
        expanded: bool,
        session: &'a MusicSession,
    },
    ResearchHelper {
        expanded: bool,
        session: &'a ResearchSession,
    },
    /// Widgets and prompts without dedicated content.
    General {
        expanded: bool,
        content: &'a ContentSnapshot,
    },
}

impl<'a> WidgetInvocation<'a> {
    pub fn new(item: &'a PlacedItem, session: &'a WidgetSession, expanded: bool) -> Self {
        match session {
            WidgetSession::ImageGenerator(session) => Self::ImageGenerator { expanded, session },
            WidgetSession::DataAnalysis(session) => Self::DataAnalysis { expanded, session },
            WidgetSession::DocumentAi(session) => Self::DocumentAi { expanded, session },
            WidgetSession::MusicComposer(session) => Self::MusicComposer { expanded, session },
            WidgetSession::ResearchHelper(session) => Self::ResearchHelper { expanded, session },
            WidgetSession::General => Self::General {
                expanded,
                content: &item.content,
            },
        }
    }

    pub fn is_expanded(&self) -> bool {
        match *self {
            Self::ImageGenerator { expanded, .. }
            | Self::DataAnalysis { expanded, .. }
            | Self::DocumentAi { expanded, .. }
            | Self::MusicComposer { expanded, .. }
            | Self::ResearchHelper { expanded, .. }
            | Self::General { expanded, .. } => expanded,
        }
    }
}

/// Produces the body of a grid instance.
///
/// Renderers report user actions by calling `emit`; the playground routes
/// those events back to the instance that was rendered.
pub trait WidgetContent {
    fn render(&mut self, invocation: &WidgetInvocation<'_>, emit: &mut dyn FnMut(WidgetEvent)) -> String;
}

/// Content renderers keyed by widget catalog id.
#[derive(Default)]
pub struct ContentRegistry {
    renderers: HashMap<CatalogId, Box<dyn WidgetContent>>,
    fallback: Option<Box<dyn WidgetContent>>,
}

impl ContentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the renderer for a widget id, replacing any previous one.
    pub fn register(&mut self, id: CatalogId, content: Box<dyn WidgetContent>) {
        self.renderers.insert(id, content);
    }

    /// Renderer used for prompts and widgets without a registered one.
    pub fn set_fallback(&mut self, content: Box<dyn WidgetContent>) {
        self.fallback = Some(content);
    }

    pub fn contains(&self, id: CatalogId) -> bool {
        self.renderers.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    /// Render one instance. Returns `None` when no renderer applies.
    pub fn render(
        &mut self,
        item: &PlacedItem,
        session: &WidgetSession,
        expanded: bool,
        emit: &mut dyn FnMut(WidgetEvent),
    ) -> Option<String> {
        let renderer = match item.kind {
            ItemKind::Widget => self.renderers.get_mut(&item.original_id),
            ItemKind::Prompt => None,
        };
        let renderer = match renderer {
            Some(renderer) => renderer,
            None => self.fallback.as_mut()?,
        };
        let invocation = WidgetInvocation::new(item, session, expanded);
        Some(renderer.render(&invocation, emit))
    }
}

impl std::fmt::Debug for ContentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<_> = self.renderers.keys().copied().collect();
        ids.sort_unstable();
        f.debug_struct("ContentRegistry")
            .field("ids", &ids)
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::InstanceId;
    use crate::widgets::WidgetKind;

    struct Probe;

    impl WidgetContent for Probe {
        fn render(&mut self, invocation: &WidgetInvocation<'_>, emit: &mut dyn FnMut(WidgetEvent)) -> String {
            if let WidgetInvocation::DocumentAi { session, .. } = invocation {
                if session.upload.file.is_some() {
                    emit(WidgetEvent::Summarize);
                }
            }
            format!("expanded={}", invocation.is_expanded())
        }
    }

    fn item(kind: ItemKind, id: CatalogId) -> PlacedItem {
        PlacedItem {
            instance_id: InstanceId::new(),
            original_id: id,
            kind,
            position: 0,
            content: ContentSnapshot::default(),
        }
    }

    #[test]
    fn test_render_registered() {
        let mut registry = ContentRegistry::new();
        registry.register(5, Box::new(Probe));
        assert!(registry.contains(5));

        let item = item(ItemKind::Widget, 5);
        let mut session = WidgetSession::for_kind(Some(WidgetKind::DocumentAi));
        if let WidgetSession::DocumentAi(doc) = &mut session {
            doc.upload.file = Some(crate::widgets::UploadedFile::new("a.pdf", 1));
        }

        let mut events = Vec::new();
        let body = registry.render(&item, &session, true, &mut |event| events.push(event));
        assert_eq!(body.as_deref(), Some("expanded=true"));
        assert_eq!(events, vec![WidgetEvent::Summarize]);
    }

    #[test]
    fn test_fallback() {
        let mut registry = ContentRegistry::new();
        let prompt = item(ItemKind::Prompt, 5);
        let session = WidgetSession::General;
        assert!(registry.render(&prompt, &session, false, &mut |_| {}).is_none());

        registry.set_fallback(Box::new(Probe));
        assert_eq!(
            registry.render(&prompt, &session, false, &mut |_| {}).as_deref(),
            Some("expanded=false")
        );
    }
}
