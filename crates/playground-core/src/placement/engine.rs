//! Membership and position bookkeeping for the tray and the grid.

use super::grid::{Grid, InstanceId, PlacedItem};
use super::tray::TraySelection;
use crate::catalog::{Catalog, CatalogId, ContentSnapshot, ItemKind};
use crate::config::ReserveSlot;
use crate::error::{PlacementError, PlacementResult};
use std::sync::Arc;

/// Owns the tray and grid and performs every move between them.
///
/// Every catalog id handed to [`PlacementEngine::new`] lives in exactly one
/// of the two zones at all times.
#[derive(Debug, Clone)]
pub struct PlacementEngine {
    catalog: Arc<Catalog>,
    tray: TraySelection,
    grid: Grid,
    reserve_slots: Vec<ReserveSlot>,
}

impl PlacementEngine {
    /// Create an engine with everything in the tray.
    ///
    /// Ids unknown to the catalog and repeated ids are dropped.
    pub fn new(catalog: Arc<Catalog>, selection: TraySelection, reserve_slots: Vec<ReserveSlot>) -> Self {
        let mut tray = TraySelection::default();
        for (kind, id) in selection.iter() {
            if !catalog.contains(kind, id) {
                log::warn!("Ignoring unknown {} #{} in initial selection", kind, id);
                continue;
            }
            if !tray.push_back(kind, id) {
                log::warn!("Ignoring repeated {} #{} in initial selection", kind, id);
            }
        }
        Self {
            catalog,
            tray,
            grid: Grid::new(),
            reserve_slots,
        }
    }

    pub fn tray(&self) -> &TraySelection {
        &self.tray
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Whether the tray entry is held back by a reserve slot guard right now.
    pub fn is_reserve_blocked(&self, kind: ItemKind, id: CatalogId) -> bool {
        self.reserve_violation(kind, id).is_some()
    }

    fn reserve_violation(&self, kind: ItemKind, id: CatalogId) -> Option<PlacementError> {
        if !self.grid.is_full() {
            return None;
        }
        let index = self.tray.index_of(kind, id)?;
        self.reserve_slots
            .iter()
            .any(|slot| slot.kind == kind && slot.index == index)
            .then_some(PlacementError::ReserveSlot { kind, index })
    }

    /// Move a tray entry onto the grid.
    ///
    /// The preferred position is used when it is free; otherwise the lowest
    /// free position is taken. Fails without side effects when the entry is
    /// not in the tray, when it sits in a reserve slot of a full grid, or when
    /// no position is free.
    pub fn move_to_grid(
        &mut self,
        kind: ItemKind,
        id: CatalogId,
        preferred: Option<usize>,
    ) -> PlacementResult<&PlacedItem> {
        if !self.tray.contains(kind, id) {
            return Err(PlacementError::UnknownEntry { kind, id });
        }
        let entry = self
            .catalog
            .get(kind, id)
            .ok_or(PlacementError::UnknownEntry { kind, id })?;
        if let Some(err) = self.reserve_violation(kind, id) {
            return Err(err);
        }
        let position = self
            .grid
            .resolve_position(preferred)
            .ok_or(PlacementError::CapacityExceeded)?;

        let item = PlacedItem {
            instance_id: InstanceId::new(),
            original_id: id,
            kind,
            position,
            content: ContentSnapshot::from(entry),
        };
        let instance_id = item.instance_id;

        self.tray.remove(kind, id);
        self.grid.insert(item);
        debug_assert!(self.is_consistent());

        log::info!("Placed {} #{} at position {} as {}", kind, id, position, instance_id);
        self.grid
            .get(instance_id)
            .ok_or(PlacementError::UnknownInstance(instance_id))
    }

    /// Return a grid instance to the end of its tray list, freeing its position.
    pub fn move_to_tray(&mut self, instance_id: InstanceId) -> PlacementResult<PlacedItem> {
        let item = self
            .grid
            .remove(instance_id)
            .ok_or(PlacementError::UnknownInstance(instance_id))?;
        self.tray.push_back(item.kind, item.original_id);
        debug_assert!(self.is_consistent());

        log::info!(
            "Returned {} #{} from position {} to the tray",
            item.kind,
            item.original_id,
            item.position
        );
        Ok(item)
    }

    /// Remove an instance from the grid. Removed items always go back to the tray.
    pub fn remove_from_grid(&mut self, instance_id: InstanceId) -> PlacementResult<PlacedItem> {
        self.move_to_tray(instance_id)
    }

    /// Reorder one tray list by index.
    pub fn reorder_tray(&mut self, kind: ItemKind, from: usize, to: usize) -> PlacementResult<()> {
        let len = self.tray.list(kind).len();
        if !self.tray.reorder(kind, from, to) {
            let index = if from >= len { from } else { to };
            return Err(PlacementError::IndexOutOfRange { kind, index, len });
        }
        Ok(())
    }

    /// Reorder one tray list by moving `from` to where `to` currently is.
    pub fn reorder_tray_by_id(&mut self, kind: ItemKind, from: CatalogId, to: CatalogId) -> PlacementResult<()> {
        let from_index = self
            .tray
            .index_of(kind, from)
            .ok_or(PlacementError::UnknownEntry { kind, id: from })?;
        let to_index = self
            .tray
            .index_of(kind, to)
            .ok_or(PlacementError::UnknownEntry { kind, id: to })?;
        self.reorder_tray(kind, from_index, to_index)
    }

    /// Reorder the grid's sortable order. Positions are untouched.
    pub fn reorder_grid(&mut self, from: InstanceId, to: InstanceId) -> PlacementResult<()> {
        if !self.grid.contains(from) {
            return Err(PlacementError::UnknownInstance(from));
        }
        if !self.grid.reorder(from, to) {
            return Err(PlacementError::UnknownInstance(to));
        }
        Ok(())
    }

    /// Tray and grid are disjoint and the grid positions are valid.
    pub fn is_consistent(&self) -> bool {
        self.grid.is_consistent()
            && self
                .grid
                .iter()
                .all(|item| !self.tray.contains(item.kind, item.original_id))
    }
}
