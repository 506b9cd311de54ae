//! The fixed-capacity grid workspace.

use crate::catalog::{CatalogId, ContentSnapshot, ItemKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Number of grid slots.
pub const GRID_CAPACITY: usize = 4;

/// Identifier of one placement event. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(Uuid);

impl InstanceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dropped-{}", self.0)
    }
}

/// A grid occupant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedItem {
    pub instance_id: InstanceId,
    pub original_id: CatalogId,
    pub kind: ItemKind,
    /// Visual slot in `0..GRID_CAPACITY`.
    pub position: usize,
    pub content: ContentSnapshot,
}

/// Grid occupants.
///
/// Two coordinates are kept per item: `position` picks the visual slot, and
/// the order of the instance list is the drag-sortable order. Reordering
/// changes only the latter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    instances: Vec<PlacedItem>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// All positions are taken.
    pub fn is_full(&self) -> bool {
        self.instances.len() >= GRID_CAPACITY
    }

    pub fn is_occupied(&self, position: usize) -> bool {
        self.instances.iter().any(|item| item.position == position)
    }

    /// Lowest unoccupied position.
    pub fn first_free(&self) -> Option<usize> {
        (0..GRID_CAPACITY).find(|&position| !self.is_occupied(position))
    }

    /// Pick a position for a new item: the preferred one if it is a free
    /// slot, otherwise the lowest free slot.
    pub fn resolve_position(&self, preferred: Option<usize>) -> Option<usize> {
        if self.is_full() {
            return None;
        }
        match preferred {
            Some(position) if position < GRID_CAPACITY && !self.is_occupied(position) => Some(position),
            _ => self.first_free(),
        }
    }

    pub fn get(&self, id: InstanceId) -> Option<&PlacedItem> {
        self.instances.iter().find(|item| item.instance_id == id)
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.get(id).is_some()
    }

    /// Index of an instance in sortable order.
    pub fn index_of(&self, id: InstanceId) -> Option<usize> {
        self.instances.iter().position(|item| item.instance_id == id)
    }

    pub fn at_position(&self, position: usize) -> Option<&PlacedItem> {
        self.instances.iter().find(|item| item.position == position)
    }

    /// Occupants indexed by position, with holes.
    pub fn slots(&self) -> [Option<&PlacedItem>; GRID_CAPACITY] {
        std::array::from_fn(|position| self.at_position(position))
    }

    /// Items in sortable order.
    pub fn iter(&self) -> impl Iterator<Item = &PlacedItem> {
        self.instances.iter()
    }

    pub(crate) fn insert(&mut self, item: PlacedItem) {
        debug_assert!(item.position < GRID_CAPACITY);
        debug_assert!(!self.is_occupied(item.position));
        self.instances.push(item);
    }

    pub(crate) fn remove(&mut self, id: InstanceId) -> Option<PlacedItem> {
        let index = self.index_of(id)?;
        Some(self.instances.remove(index))
    }

    /// Move `from` to the sortable index currently held by `to`.
    pub(crate) fn reorder(&mut self, from: InstanceId, to: InstanceId) -> bool {
        let (Some(from_index), Some(to_index)) = (self.index_of(from), self.index_of(to)) else {
            return false;
        };
        if from_index != to_index {
            let item = self.instances.remove(from_index);
            self.instances.insert(to_index, item);
        }
        true
    }

    /// Positions are in range and pairwise distinct, and there are at most
    /// `GRID_CAPACITY` items.
    pub fn is_consistent(&self) -> bool {
        let mut seen = [false; GRID_CAPACITY];
        for item in &self.instances {
            if item.position >= GRID_CAPACITY || seen[item.position] {
                return false;
            }
            seen[item.position] = true;
        }
        self.instances.len() <= GRID_CAPACITY
    }
}
