//! Widget kinds with dedicated content and their chat context.

use crate::catalog::{CatalogId, ItemKind};
use crate::placement::PlacedItem;
use serde::{Deserialize, Serialize};

/// Widgets that have dedicated content. Every other widget is general.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetKind {
    ImageGenerator,
    DataAnalysis,
    DocumentAi,
    MusicComposer,
    ResearchHelper,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 5] = [
        WidgetKind::ImageGenerator,
        WidgetKind::DataAnalysis,
        WidgetKind::DocumentAi,
        WidgetKind::MusicComposer,
        WidgetKind::ResearchHelper,
    ];

    pub fn from_catalog_id(id: CatalogId) -> Option<Self> {
        match id {
            2 => Some(WidgetKind::ImageGenerator),
            4 => Some(WidgetKind::DataAnalysis),
            5 => Some(WidgetKind::DocumentAi),
            9 => Some(WidgetKind::MusicComposer),
            10 => Some(WidgetKind::ResearchHelper),
            _ => None,
        }
    }

    /// Kind of a grid instance. Prompts never have dedicated content.
    pub fn of(item: &PlacedItem) -> Option<Self> {
        match item.kind {
            ItemKind::Widget => Self::from_catalog_id(item.original_id),
            ItemKind::Prompt => None,
        }
    }

    pub fn catalog_id(self) -> CatalogId {
        match self {
            WidgetKind::ImageGenerator => 2,
            WidgetKind::DataAnalysis => 4,
            WidgetKind::DocumentAi => 5,
            WidgetKind::MusicComposer => 9,
            WidgetKind::ResearchHelper => 10,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WidgetKind::ImageGenerator => "Image Generator",
            WidgetKind::DataAnalysis => "Data Analysis",
            WidgetKind::DocumentAi => "Document AI",
            WidgetKind::MusicComposer => "Music Composer",
            WidgetKind::ResearchHelper => "Research Helper",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            WidgetKind::ImageGenerator => "Describe the image you want to generate...",
            WidgetKind::DataAnalysis => "Ask me to analyze your data...",
            WidgetKind::DocumentAi => "Ask questions about your document...",
            WidgetKind::MusicComposer => "Ask me to create music or modify settings...",
            WidgetKind::ResearchHelper => {
                "What would you like to research? (Type 'summarize' for summary)"
            }
        }
    }

    fn default_icon(self) -> &'static str {
        match self {
            WidgetKind::ImageGenerator => "carbon:image-search",
            WidgetKind::DataAnalysis => "carbon:chart-line",
            WidgetKind::DocumentAi => "carbon:document",
            WidgetKind::MusicComposer => "carbon:music",
            WidgetKind::ResearchHelper => "carbon:search-locate",
        }
    }
}

const GENERAL_PLACEHOLDER: &str = "Chat with this widget...";
const GENERAL_ICON: &str = "carbon:cube";
const GENERAL_TITLE: &str = "Widget";

/// Describes the chat input shown while an instance is focused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetContext {
    /// `None` for general widgets and prompts.
    pub kind: Option<WidgetKind>,
    pub title: String,
    pub placeholder: String,
    pub icon: String,
}

impl WidgetContext {
    pub fn for_item(item: &PlacedItem) -> Self {
        let icon = item.content.icon.clone().filter(|icon| !icon.is_empty());
        match WidgetKind::of(item) {
            Some(kind) => Self {
                kind: Some(kind),
                title: kind.title().to_string(),
                placeholder: kind.placeholder().to_string(),
                icon: icon.unwrap_or_else(|| kind.default_icon().to_string()),
            },
            None => Self {
                kind: None,
                title: item
                    .content
                    .title
                    .clone()
                    .filter(|title| !title.is_empty())
                    .unwrap_or_else(|| GENERAL_TITLE.to_string()),
                placeholder: GENERAL_PLACEHOLDER.to_string(),
                icon: icon.unwrap_or_else(|| GENERAL_ICON.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, ContentSnapshot};
    use crate::placement::InstanceId;

    fn placed(kind: ItemKind, id: CatalogId) -> PlacedItem {
        let catalog = Catalog::builtin();
        let content = catalog.get(kind, id).map(ContentSnapshot::from).unwrap_or_default();
        PlacedItem {
            instance_id: InstanceId::new(),
            original_id: id,
            kind,
            position: 0,
            content,
        }
    }

    #[test]
    fn test_catalog_id_mapping() {
        for kind in WidgetKind::ALL {
            assert_eq!(WidgetKind::from_catalog_id(kind.catalog_id()), Some(kind));
        }
        assert_eq!(WidgetKind::from_catalog_id(1), None);
    }

    #[test]
    fn test_prompt_has_no_kind() {
        assert_eq!(WidgetKind::of(&placed(ItemKind::Prompt, 2)), None);
        assert_eq!(
            WidgetKind::of(&placed(ItemKind::Widget, 2)),
            Some(WidgetKind::ImageGenerator)
        );
    }

    #[test]
    fn test_context_for_research() {
        let context = WidgetContext::for_item(&placed(ItemKind::Widget, 10));
        assert_eq!(context.kind, Some(WidgetKind::ResearchHelper));
        assert_eq!(context.title, "Research Helper");
        assert!(context.placeholder.contains("summarize"));
    }

    #[test]
    fn test_general_context() {
        let mut item = placed(ItemKind::Widget, 1);
        let context = WidgetContext::for_item(&item);
        assert_eq!(context.kind, None);
        assert_eq!(context.placeholder, GENERAL_PLACEHOLDER);

        item.content = ContentSnapshot::default();
        let context = WidgetContext::for_item(&item);
        assert_eq!(context.title, GENERAL_TITLE);
        assert_eq!(context.icon, GENERAL_ICON);
    }
}
