//! Frame output: a text sketch of the screen, or a JSON snapshot.

use playground_core::{
    Catalog, CatalogEntry, CatalogId, CatalogPicker, DropTarget, GRID_CAPACITY, InstanceState, ItemKind, OverlayItem, PlaygroundView,
    RenderedWidget, StageKind, TraySelection,
};
use serde::Serialize;
use std::fmt::Write;

/// How frames are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FrameFormat {
    #[default]
    Text,
    Json,
}

/// Page state shown alongside a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PageStatus {
    pub interaction_suspended: bool,
    pub viewport_listeners: i32,
}

#[derive(Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
enum Snapshot<'a> {
    Picking {
        selection: &'a TraySelection,
        displayed: &'a [CatalogId],
        explore: Vec<CatalogId>,
        disabled: Vec<DisabledEntry>,
        playground_item_count: usize,
    },
    Playing {
        view: &'a PlaygroundView,
        widgets: &'a [RenderedWidget],
        page: PageStatus,
    },
}

#[derive(Serialize)]
struct DisabledEntry {
    kind: ItemKind,
    id: u32,
}

fn disabled_entries(picker: &CatalogPicker) -> Vec<DisabledEntry> {
    ItemKind::ALL
        .into_iter()
        .flat_map(|kind| picker.catalog().entries(kind))
        .filter(|entry| picker.is_disabled(entry.kind, entry.id))
        .map(|entry| DisabledEntry {
            kind: entry.kind,
            id: entry.id,
        })
        .collect()
}

/// JSON snapshot of the selection stage.
pub fn picking_json(picker: &CatalogPicker) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Snapshot::Picking {
        selection: picker.selection(),
        displayed: picker.displayed(),
        explore: picker.explore().map(|entry| entry.id).collect(),
        disabled: disabled_entries(picker),
        playground_item_count: picker.playground_item_count(),
    })
}

/// JSON snapshot of the playground.
pub fn playing_json(
    view: &PlaygroundView,
    widgets: &[RenderedWidget],
    page: PageStatus,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Snapshot::Playing { view, widgets, page })
}

fn header(out: &mut String, stage: StageKind, detail: &str) {
    let label = match stage {
        StageKind::Picking => "picking",
        StageKind::Playing => "playing",
    };
    let _ = writeln!(out, "== {} | {} ==", label, detail);
}

fn picking_line(out: &mut String, picker: &CatalogPicker, entry: &CatalogEntry) {
    let mark = if picker.is_selected(entry.kind, entry.id) { "x" } else { " " };
    let note = if picker.is_disabled(entry.kind, entry.id) { " (disabled)" } else { "" };
    let _ = writeln!(out, "  [{}] {:>2} {}{}", mark, entry.id, entry.title, note);
}

/// Text sketch of the selection stage. Offered widgets come first; the
/// rest of the catalog is listed under explore.
pub fn picking_text(picker: &CatalogPicker) -> String {
    let mut out = String::new();
    let selected = picker.selection().len();
    header(&mut out, StageKind::Picking, &format!("{} selected", selected));

    let _ = writeln!(out, "prompts");
    for entry in picker.catalog().entries(ItemKind::Prompt) {
        picking_line(&mut out, picker, entry);
    }

    let total = picker.explore().count();
    let _ = writeln!(out, "widgets (showing {} of {})", picker.displayed().len(), total);
    for &id in picker.displayed() {
        if let Some(entry) = picker.catalog().get(ItemKind::Widget, id) {
            picking_line(&mut out, picker, entry);
        }
    }
    let _ = writeln!(out, "explore");
    for entry in picker.explore().filter(|entry| !picker.is_displayed(entry.id)) {
        picking_line(&mut out, picker, entry);
    }
    out
}

fn entry_title(catalog: &Catalog, kind: ItemKind, id: u32) -> String {
    catalog
        .get(kind, id)
        .map_or_else(|| format!("#{}", id), |entry| entry.title.clone())
}

fn target_label(view: &PlaygroundView, catalog: &Catalog, target: &DropTarget) -> String {
    match *target {
        DropTarget::EmptySlot { position } => format!("empty slot {}", position),
        DropTarget::GridArea => "grid".to_string(),
        DropTarget::TrayArea => "tray".to_string(),
        DropTarget::TrayEntry { kind, id } => format!("{} \"{}\"", kind, entry_title(catalog, kind, id)),
        DropTarget::Instance { id } => view
            .slots
            .iter()
            .flatten()
            .find(|slot| slot.item.instance_id == id)
            .map_or_else(|| "instance".to_string(), |slot| format!("slot {}", slot.item.position)),
    }
}

/// Text sketch of the playground.
pub fn playing_text(view: &PlaygroundView, widgets: &[RenderedWidget], catalog: &Catalog, page: PageStatus) -> String {
    let mut out = String::new();
    let focus = if view.focused.is_some() { " | expanded" } else { "" };
    header(
        &mut out,
        StageKind::Playing,
        &format!("{}/{} in grid{}", view.item_count, GRID_CAPACITY, focus),
    );

    let _ = writeln!(out, "tray");
    for kind in ItemKind::ALL {
        for &id in view.tray.list(kind) {
            let blocked = view.reserve_blocked.iter().any(|b| b.kind == kind && b.id == id);
            let note = if blocked { " (reserved)" } else { "" };
            let _ = writeln!(out, "  {} {:>2} {}{}", kind, id, entry_title(catalog, kind, id), note);
        }
    }
    if view.tray.is_empty() {
        let _ = writeln!(out, "  (empty)");
    }

    let _ = writeln!(out, "grid");
    for (position, slot) in view.slots.iter().enumerate() {
        let Some(slot) = slot else {
            let _ = writeln!(out, "  [{}] (empty)", position);
            continue;
        };
        let title = slot
            .item
            .content
            .title
            .as_deref()
            .or(slot.item.content.text.as_deref())
            .unwrap_or("untitled");
        let state = match slot.state {
            InstanceState::Normal => "",
            InstanceState::Focused => " *",
            InstanceState::Disabled => " (disabled)",
        };
        let _ = writeln!(out, "  [{}] {}{}", position, title, state);
        let body = widgets
            .iter()
            .find(|w| w.instance_id == slot.item.instance_id)
            .and_then(|w| w.body.as_deref());
        if let Some(body) = body.filter(|body| !body.is_empty()) {
            let _ = writeln!(out, "      {}", body);
        }
    }

    if let Some(overlay) = &view.overlay {
        let what = match &overlay.item {
            OverlayItem::Entry { entry } => format!("{} \"{}\"", entry.kind, entry.title),
            OverlayItem::Instance { item } => format!("slot {}", item.position),
        };
        let over = view
            .hover
            .as_ref()
            .map_or_else(|| "nothing".to_string(), |target| target_label(view, catalog, target));
        let _ = writeln!(out, "drag: {} over {}", what, over);
    }

    if let Some(context) = &view.widget_context {
        let draft = if view.chat_draft.is_empty() {
            context.placeholder.as_str()
        } else {
            view.chat_draft.as_str()
        };
        let _ = writeln!(out, "chat [{}]: {}", context.title, draft);
    }
    if view.examples_clicked > 0 {
        let _ = writeln!(out, "examples tried: {}", view.examples_clicked);
    }
    if let Some(summary) = &view.summary {
        let _ = writeln!(out, "summary: {}", summary.file_name);
    }
    if page.interaction_suspended {
        let _ = writeln!(out, "page: interaction suspended");
    }
    out
}
