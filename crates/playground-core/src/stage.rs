//! Switching between the selection stage and the playground.

use crate::config::PlaygroundConfig;
use crate::controller::PlaygroundController;
use crate::page::PageEffects;
use crate::picker::CatalogPicker;
use serde::Serialize;
use std::rc::Rc;

/// Which stage is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Picking,
    Playing,
}

/// Owns the picker and, while playing, the playground built from it.
pub struct Stage {
    config: PlaygroundConfig,
    page: Rc<dyn PageEffects>,
    picker: CatalogPicker,
    playground: Option<PlaygroundController>,
}

impl Stage {
    pub fn new(picker: CatalogPicker, config: PlaygroundConfig, page: Rc<dyn PageEffects>) -> Self {
        Self {
            config,
            page,
            picker,
            playground: None,
        }
    }

    pub fn kind(&self) -> StageKind {
        if self.playground.is_some() {
            StageKind::Playing
        } else {
            StageKind::Picking
        }
    }

    pub fn picker(&self) -> &CatalogPicker {
        &self.picker
    }

    /// The picker is only editable while picking.
    pub fn picker_mut(&mut self) -> Option<&mut CatalogPicker> {
        match self.playground {
            Some(_) => None,
            None => Some(&mut self.picker),
        }
    }

    pub fn playground(&self) -> Option<&PlaygroundController> {
        self.playground.as_ref()
    }

    pub fn playground_mut(&mut self) -> Option<&mut PlaygroundController> {
        self.playground.as_mut()
    }

    /// Open the playground with the current selection. Returns false when
    /// already playing or nothing is selected.
    pub fn launch(&mut self) -> bool {
        if self.playground.is_some() || !self.picker.can_launch() {
            return false;
        }
        self.playground = Some(PlaygroundController::new(
            self.picker.catalog().clone(),
            self.picker.selection().clone(),
            self.config.clone(),
            self.page.clone(),
        ));
        true
    }

    /// Leave the playground. The picker keeps the selection it had at
    /// launch and learns how many items the playground held.
    pub fn back_to_selection(&mut self) -> bool {
        let Some(playground) = self.playground.take() else {
            return false;
        };
        let count = playground.item_count();
        self.picker.set_playground_item_count(count);
        log::info!("Back to selection with {} item(s) in the playground", count);
        true
    }
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("kind", &self.kind())
            .field("picker", &self.picker)
            .finish_non_exhaustive()
    }
}
