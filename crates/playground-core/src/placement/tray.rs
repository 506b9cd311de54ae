//! Ordered tray lists, one per item kind.

use crate::catalog::{CatalogId, ItemKind};
use serde::{Deserialize, Serialize};

/// Catalog ids available to drag from the tray, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraySelection {
    pub prompts: Vec<CatalogId>,
    pub widgets: Vec<CatalogId>,
}

impl TraySelection {
    pub fn new(prompts: Vec<CatalogId>, widgets: Vec<CatalogId>) -> Self {
        Self { prompts, widgets }
    }

    /// The list for one kind.
    pub fn list(&self, kind: ItemKind) -> &[CatalogId] {
        match kind {
            ItemKind::Prompt => &self.prompts,
            ItemKind::Widget => &self.widgets,
        }
    }

    fn list_mut(&mut self, kind: ItemKind) -> &mut Vec<CatalogId> {
        match kind {
            ItemKind::Prompt => &mut self.prompts,
            ItemKind::Widget => &mut self.widgets,
        }
    }

    pub fn index_of(&self, kind: ItemKind, id: CatalogId) -> Option<usize> {
        self.list(kind).iter().position(|&entry| entry == id)
    }

    pub fn contains(&self, kind: ItemKind, id: CatalogId) -> bool {
        self.index_of(kind, id).is_some()
    }

    /// Remove an id. Returns false if it was not present.
    pub fn remove(&mut self, kind: ItemKind, id: CatalogId) -> bool {
        let list = self.list_mut(kind);
        let before = list.len();
        list.retain(|&entry| entry != id);
        list.len() != before
    }

    /// Append an id unless it is already listed.
    /// Returns true if the id was appended.
    pub fn push_back(&mut self, kind: ItemKind, id: CatalogId) -> bool {
        if self.contains(kind, id) {
            return false;
        }
        self.list_mut(kind).push(id);
        true
    }

    /// Move the entry at `from` so that it ends up at `to`.
    /// Returns false if either index is out of range.
    pub fn reorder(&mut self, kind: ItemKind, from: usize, to: usize) -> bool {
        let list = self.list_mut(kind);
        if from >= list.len() || to >= list.len() {
            return false;
        }
        if from != to {
            let id = list.remove(from);
            list.insert(to, id);
        }
        true
    }

    /// Number of entries across both kinds.
    pub fn len(&self) -> usize {
        self.prompts.len() + self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty() && self.widgets.is_empty()
    }

    /// Every `(kind, id)` pair, prompts first.
    pub fn iter(&self) -> impl Iterator<Item = (ItemKind, CatalogId)> + '_ {
        ItemKind::ALL
            .into_iter()
            .flat_map(move |kind| self.list(kind).iter().map(move |&id| (kind, id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_back_is_idempotent() {
        let mut tray = TraySelection::new(vec![], vec![2, 4]);
        assert!(!tray.push_back(ItemKind::Widget, 4));
        assert!(tray.push_back(ItemKind::Widget, 9));
        assert_eq!(tray.widgets, vec![2, 4, 9]);
    }

    #[test]
    fn test_remove() {
        let mut tray = TraySelection::new(vec![1], vec![2, 4]);
        assert!(tray.remove(ItemKind::Widget, 2));
        assert!(!tray.remove(ItemKind::Widget, 2));
        assert!(!tray.remove(ItemKind::Prompt, 4));
        assert_eq!(tray.widgets, vec![4]);
        assert_eq!(tray.prompts, vec![1]);
    }

    #[test]
    fn test_reorder_moves_entry() {
        let mut tray = TraySelection::new(vec![], vec![2, 4, 5, 9]);
        assert!(tray.reorder(ItemKind::Widget, 0, 2));
        assert_eq!(tray.widgets, vec![4, 5, 2, 9]);
        assert!(tray.reorder(ItemKind::Widget, 3, 0));
        assert_eq!(tray.widgets, vec![9, 4, 5, 2]);
    }

    #[test]
    fn test_reorder_out_of_range() {
        let mut tray = TraySelection::new(vec![], vec![2, 4]);
        assert!(!tray.reorder(ItemKind::Widget, 0, 2));
        assert_eq!(tray.widgets, vec![2, 4]);
    }

    #[test]
    fn test_iter_order() {
        let tray = TraySelection::new(vec![3], vec![2]);
        let all: Vec<_> = tray.iter().collect();
        assert_eq!(all, vec![(ItemKind::Prompt, 3), (ItemKind::Widget, 2)]);
    }
}
