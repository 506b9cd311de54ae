//! Static catalog of selectable prompts and widgets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric identifier of a catalog entry. Unique within a kind.
pub type CatalogId = u32;

/// The two kinds of selectable entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Prompt,
    Widget,
}

impl ItemKind {
    /// Both kinds, in tray display order.
    pub const ALL: [ItemKind; 2] = [ItemKind::Prompt, ItemKind::Widget];

    /// Short label used in logs and text frames.
    pub fn label(self) -> &'static str {
        match self {
            ItemKind::Prompt => "prompt",
            ItemKind::Widget => "widget",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: CatalogId,
    pub kind: ItemKind,
    pub title: String,
    pub description: String,
    pub icon: String,
}

impl CatalogEntry {
    fn widget(id: CatalogId, title: &str, description: &str, icon: &str) -> Self {
        Self {
            id,
            kind: ItemKind::Widget,
            title: title.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
        }
    }

    fn prompt(id: CatalogId, text: &str) -> Self {
        Self {
            id,
            kind: ItemKind::Prompt,
            title: text.to_string(),
            description: String::new(),
            icon: String::new(),
        }
    }
}

/// Display data copied from a catalog entry when it is placed on the grid.
///
/// Prompts only carry their text; widgets carry title, description and icon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl From<&CatalogEntry> for ContentSnapshot {
    fn from(entry: &CatalogEntry) -> Self {
        match entry.kind {
            ItemKind::Prompt => Self {
                text: Some(entry.title.clone()),
                ..Self::default()
            },
            ItemKind::Widget => Self {
                title: Some(entry.title.clone()),
                description: Some(entry.description.clone()),
                icon: Some(entry.icon.clone()),
                ..Self::default()
            },
        }
    }
}

/// Read-only lookup of catalog entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build a catalog from explicit entries. Later duplicates of a
    /// `(kind, id)` pair are ignored.
    pub fn new(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let mut catalog = Self { entries: Vec::new() };
        for entry in entries {
            if catalog.get(entry.kind, entry.id).is_some() {
                log::warn!("Duplicate catalog entry {} #{} ignored", entry.kind, entry.id);
                continue;
            }
            catalog.entries.push(entry);
        }
        catalog
    }

    /// The catalog shipped with the playground.
    pub fn builtin() -> Self {
        let widgets = [
            (1, "Content Assistant", "Generate blog posts, marketing copy, and more", "carbon:text-creation"),
            (2, "Image Generator", "Create custom images with AI", "carbon:image-search"),
            (3, "Code Helper", "Get assistance with coding and debugging", "carbon:code"),
            (4, "Data Analysis", "Analyze and visualize your data", "carbon:chart-line"),
            (5, "Document AI", "Extract insights from your documents", "carbon:document"),
            (6, "Video Creator", "Generate videos from text descriptions", "carbon:video"),
            (7, "Translation Hub", "Translate content across multiple languages", "carbon:translate"),
            (8, "Chat Simulator", "Practice conversations with AI personas", "carbon:chat"),
            (9, "Music Composer", "Create original music with AI", "carbon:music"),
            (10, "Research Helper", "Find and summarize research papers", "carbon:search-advanced"),
            (11, "Presentation Maker", "Generate slides and presentations", "carbon:presentation-file"),
            (12, "Voice Synthesizer", "Convert text to natural-sounding speech", "carbon:microphone"),
            (13, "Email Assistant", "Generate professional emails and responses", "carbon:email"),
            (14, "Social Media Manager", "Create engaging posts across platforms", "carbon:logo-instagram"),
            (15, "Budget Tracker", "Monitor expenses and financial planning", "carbon:money"),
        ];
        let prompts = [
            (1, "Create a responsive pricing table for a SaaS product"),
            (2, "Design a landing page with a hero section and feature grid"),
            (3, "Generate an animated dashboard with data visualizations"),
            (4, "Build a user profile page with settings and preferences"),
            (5, "Create a multi-step form with validation and progress tracking"),
            (6, "Design a dark mode toggle with smooth transition effects"),
            (7, "Develop an e-commerce product page with image gallery"),
            (8, "Build a custom modal dialog with animations"),
            (9, "Create an interactive map visualization with data overlays"),
            (10, "Design a responsive blog layout with featured posts"),
            (11, "Build a file upload component with progress indicators"),
            (12, "Generate an API documentation page with code examples"),
            (13, "Create a calendar interface with event scheduling"),
            (14, "Design a social media profile with activity feed"),
            (15, "Develop an interactive quiz with scoring system"),
        ];

        Self::new(
            prompts
                .into_iter()
                .map(|(id, text)| CatalogEntry::prompt(id, text))
                .chain(
                    widgets
                        .into_iter()
                        .map(|(id, title, description, icon)| CatalogEntry::widget(id, title, description, icon)),
                ),
        )
    }

    /// Look up an entry.
    pub fn get(&self, kind: ItemKind, id: CatalogId) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.kind == kind && e.id == id)
    }

    /// Check whether an entry exists.
    pub fn contains(&self, kind: ItemKind, id: CatalogId) -> bool {
        self.get(kind, id).is_some()
    }

    /// All entries of one kind, in catalog order.
    pub fn entries(&self, kind: ItemKind) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.entries(ItemKind::Widget).count(), 15);
        assert_eq!(catalog.entries(ItemKind::Prompt).count(), 15);

        let image = catalog.get(ItemKind::Widget, 2).unwrap();
        assert_eq!(image.title, "Image Generator");
        assert!(catalog.get(ItemKind::Widget, 99).is_none());
    }

    #[test]
    fn test_same_id_different_kind() {
        let catalog = Catalog::builtin();
        let prompt = catalog.get(ItemKind::Prompt, 4).unwrap();
        let widget = catalog.get(ItemKind::Widget, 4).unwrap();
        assert_ne!(prompt.title, widget.title);
    }

    #[test]
    fn test_duplicates_ignored() {
        let catalog = Catalog::new([
            CatalogEntry::prompt(1, "first"),
            CatalogEntry::prompt(1, "second"),
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(ItemKind::Prompt, 1).unwrap().title, "first");
    }

    #[test]
    fn test_snapshot_per_kind() {
        let catalog = Catalog::builtin();
        let prompt = ContentSnapshot::from(catalog.get(ItemKind::Prompt, 1).unwrap());
        assert!(prompt.text.is_some());
        assert!(prompt.title.is_none());

        let widget = ContentSnapshot::from(catalog.get(ItemKind::Widget, 9).unwrap());
        assert_eq!(widget.title.as_deref(), Some("Music Composer"));
        assert_eq!(widget.icon.as_deref(), Some("carbon:music"));
        assert!(widget.text.is_none());
    }
}
