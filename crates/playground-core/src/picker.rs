//! Selection stage: choosing which catalog entries go into the tray.

use crate::catalog::{Catalog, CatalogEntry, CatalogId, ItemKind};
use crate::config::{PlaygroundConfig, ReserveSlot, SelectionLimits};
use crate::placement::{GRID_CAPACITY, TraySelection};
use rand::Rng;
use rand::seq::SliceRandom;
use std::sync::Arc;

/// Number of widgets offered at once; the rest are reachable through explore.
pub const WIDGET_DISPLAY_COUNT: usize = 6;

/// Result of toggling a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    Selected,
    Deselected,
    /// The kind already holds its maximum number of selections.
    LimitReached,
    /// The next selection would land in a reserve slot while the last
    /// playground was full.
    Reserved,
    Unknown,
}

/// Ordered selection of catalog entries, bounded per kind.
#[derive(Debug, Clone)]
pub struct CatalogPicker {
    catalog: Arc<Catalog>,
    limits: SelectionLimits,
    reserve_slots: Vec<ReserveSlot>,
    selection: TraySelection,
    /// Widgets currently offered. Always contains every selected widget
    /// that fits.
    displayed: Vec<CatalogId>,
    playground_item_count: usize,
}

impl CatalogPicker {
    pub fn new(catalog: Arc<Catalog>, config: &PlaygroundConfig) -> Self {
        let displayed = catalog
            .entries(ItemKind::Widget)
            .take(WIDGET_DISPLAY_COUNT)
            .map(|entry| entry.id)
            .collect();
        Self {
            catalog,
            limits: config.limits,
            reserve_slots: config.reserve_slots.clone(),
            selection: TraySelection::default(),
            displayed,
            playground_item_count: 0,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn selection(&self) -> &TraySelection {
        &self.selection
    }

    pub fn is_selected(&self, kind: ItemKind, id: CatalogId) -> bool {
        self.selection.contains(kind, id)
    }

    pub fn count(&self, kind: ItemKind) -> usize {
        self.selection.list(kind).len()
    }

    /// Widget ids currently offered, in display order.
    pub fn displayed(&self) -> &[CatalogId] {
        &self.displayed
    }

    pub fn is_displayed(&self, id: CatalogId) -> bool {
        self.displayed.contains(&id)
    }

    /// The full widget catalog, displayed or not.
    pub fn explore(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.catalog.entries(ItemKind::Widget)
    }

    /// Draw a new random subset of widgets to offer, keeping the selection.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut ids: Vec<CatalogId> = self.explore().map(|entry| entry.id).collect();
        ids.shuffle(rng);
        ids.truncate(WIDGET_DISPLAY_COUNT);
        self.displayed = ids;
        self.ensure_selected();
    }

    /// Drop the widget selection and draw a new subset. Prompts are kept.
    pub fn refresh<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.selection.widgets.clear();
        self.shuffle(rng);
        log::debug!("Widget suggestions refreshed: {:?}", self.displayed);
    }

    /// Swap selected widgets that are not offered into the subset, each
    /// replacing the first offered widget that is not selected.
    fn ensure_selected(&mut self) {
        for &id in &self.selection.widgets {
            if self.displayed.contains(&id) {
                continue;
            }
            let free = self
                .displayed
                .iter()
                .position(|shown| !self.selection.widgets.contains(shown));
            match free {
                Some(index) => self.displayed[index] = id,
                None if self.displayed.len() < WIDGET_DISPLAY_COUNT => self.displayed.push(id),
                None => {}
            }
        }
    }

    /// Number of grid items when the playground was last left.
    pub fn playground_item_count(&self) -> usize {
        self.playground_item_count
    }

    pub fn set_playground_item_count(&mut self, count: usize) {
        self.playground_item_count = count;
    }

    /// Why selecting an unselected entry would be refused, if it would be.
    fn refusal(&self, kind: ItemKind) -> Option<PickOutcome> {
        let count = self.count(kind);
        if count >= self.limits.max(kind) {
            return Some(PickOutcome::LimitReached);
        }
        let reserved = self
            .reserve_slots
            .iter()
            .any(|slot| slot.kind == kind && slot.index == count);
        (reserved && self.playground_item_count >= GRID_CAPACITY).then_some(PickOutcome::Reserved)
    }

    /// Whether the entry is shown as unavailable.
    pub fn is_disabled(&self, kind: ItemKind, id: CatalogId) -> bool {
        !self.is_selected(kind, id) && self.refusal(kind).is_some()
    }

    /// Select or deselect an entry.
    pub fn toggle(&mut self, kind: ItemKind, id: CatalogId) -> PickOutcome {
        if self.selection.remove(kind, id) {
            return PickOutcome::Deselected;
        }
        if !self.catalog.contains(kind, id) {
            return PickOutcome::Unknown;
        }
        if let Some(refused) = self.refusal(kind) {
            log::debug!("Selection of {} #{} refused: {:?}", kind, id, refused);
            return refused;
        }
        self.selection.push_back(kind, id);
        if kind == ItemKind::Widget {
            self.ensure_selected();
        }
        PickOutcome::Selected
    }

    pub fn clear(&mut self) {
        self.selection = TraySelection::default();
    }

    /// Whether there is anything to take into the playground.
    pub fn can_launch(&self) -> bool {
        !self.selection.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn picker() -> CatalogPicker {
        CatalogPicker::new(Arc::new(Catalog::builtin()), &PlaygroundConfig::default())
    }

    #[test]
    fn test_toggle() {
        let mut picker = picker();
        assert!(!picker.can_launch());
        assert_eq!(picker.toggle(ItemKind::Widget, 2), PickOutcome::Selected);
        assert!(picker.is_selected(ItemKind::Widget, 2));
        assert!(picker.can_launch());
        assert_eq!(picker.toggle(ItemKind::Widget, 2), PickOutcome::Deselected);
        assert!(!picker.can_launch());
        assert_eq!(picker.toggle(ItemKind::Widget, 99), PickOutcome::Unknown);
    }

    #[test]
    fn test_limit() {
        let mut picker = picker();
        for id in [2, 4, 5, 9, 10] {
            assert_eq!(picker.toggle(ItemKind::Widget, id), PickOutcome::Selected);
        }
        assert_eq!(picker.toggle(ItemKind::Widget, 1), PickOutcome::LimitReached);
        assert!(picker.is_disabled(ItemKind::Widget, 1));
        assert!(!picker.is_disabled(ItemKind::Widget, 2));
        assert_eq!(picker.selection().list(ItemKind::Widget), &[2, 4, 5, 9, 10]);

        for id in 1..=4 {
            assert_eq!(picker.toggle(ItemKind::Prompt, id), PickOutcome::Selected);
        }
        assert_eq!(picker.toggle(ItemKind::Prompt, 5), PickOutcome::LimitReached);
    }

    #[test]
    fn test_reserve_after_full_playground() {
        let mut picker = picker();
        for id in [2, 4, 5, 9] {
            picker.toggle(ItemKind::Widget, id);
        }
        picker.set_playground_item_count(4);
        assert!(picker.is_disabled(ItemKind::Widget, 10));
        assert_eq!(picker.toggle(ItemKind::Widget, 10), PickOutcome::Reserved);

        picker.set_playground_item_count(3);
        assert_eq!(picker.toggle(ItemKind::Widget, 10), PickOutcome::Selected);
    }

    #[test]
    fn test_clear() {
        let mut picker = picker();
        picker.toggle(ItemKind::Prompt, 1);
        picker.toggle(ItemKind::Widget, 2);
        picker.clear();
        assert!(!picker.can_launch());
        assert_eq!(picker.count(ItemKind::Widget), 0);
    }

    #[test]
    fn test_initial_display() {
        let picker = picker();
        assert_eq!(picker.displayed(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(picker.explore().count(), 15);
    }

    #[test]
    fn test_explore_selection_is_displayed() {
        let mut picker = picker();
        picker.toggle(ItemKind::Widget, 2);
        assert_eq!(picker.toggle(ItemKind::Widget, 12), PickOutcome::Selected);
        assert_eq!(picker.displayed(), &[12, 2, 3, 4, 5, 6]);
        assert_eq!(picker.displayed().len(), WIDGET_DISPLAY_COUNT);
    }

    #[test]
    fn test_selected_stays_displayed() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut picker = picker();
        for id in [3, 8, 11, 15] {
            picker.toggle(ItemKind::Widget, id);
        }
        for _ in 0..50 {
            picker.shuffle(&mut rng);
            let displayed = picker.displayed();
            assert_eq!(displayed.len(), WIDGET_DISPLAY_COUNT);
            for id in [3, 8, 11, 15] {
                assert!(displayed.contains(&id), "{} missing from {:?}", id, displayed);
            }
            let mut unique = displayed.to_vec();
            unique.sort_unstable();
            unique.dedup();
            assert_eq!(unique.len(), WIDGET_DISPLAY_COUNT);
        }
        assert_eq!(picker.selection().list(ItemKind::Widget), &[3, 8, 11, 15]);
    }

    #[test]
    fn test_refresh_clears_widget_selection() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut picker = picker();
        picker.toggle(ItemKind::Prompt, 1);
        picker.toggle(ItemKind::Widget, 2);
        picker.toggle(ItemKind::Widget, 9);

        picker.refresh(&mut rng);
        assert_eq!(picker.count(ItemKind::Widget), 0);
        assert!(picker.is_selected(ItemKind::Prompt, 1));
        assert_eq!(picker.displayed().len(), WIDGET_DISPLAY_COUNT);
        assert!(picker.displayed().iter().all(|&id| picker.catalog().contains(ItemKind::Widget, id)));
    }
}
