//! Draggable references and drop targets.

use crate::catalog::{CatalogId, ItemKind};
use crate::placement::InstanceId;
use serde::{Deserialize, Serialize};

/// The two drop zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Tray,
    Grid,
}

/// Something that can be picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DragSource {
    TrayEntry { kind: ItemKind, id: CatalogId },
    Instance { id: InstanceId },
}

impl DragSource {
    pub fn zone(&self) -> Zone {
        match self {
            Self::TrayEntry { .. } => Zone::Tray,
            Self::Instance { .. } => Zone::Grid,
        }
    }

    /// The sortable target that represents this source.
    pub fn as_target(&self) -> DropTarget {
        match *self {
            Self::TrayEntry { kind, id } => DropTarget::TrayEntry { kind, id },
            Self::Instance { id } => DropTarget::Instance { id },
        }
    }
}

/// Something a drag can be released over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DropTarget {
    /// A free numbered grid slot.
    EmptySlot { position: usize },
    /// The grid region as a whole.
    GridArea,
    /// The tray region as a whole.
    TrayArea,
    /// A sortable tray entry.
    TrayEntry { kind: ItemKind, id: CatalogId },
    /// A sortable grid instance.
    Instance { id: InstanceId },
}

impl DropTarget {
    pub fn zone(&self) -> Zone {
        match self {
            Self::EmptySlot { .. } | Self::GridArea | Self::Instance { .. } => Zone::Grid,
            Self::TrayArea | Self::TrayEntry { .. } => Zone::Tray,
        }
    }

    /// Area targets win over sortable siblings when the pointer is inside them.
    /// Lower rank wins.
    pub(crate) fn area_rank(&self) -> Option<u8> {
        match self {
            Self::EmptySlot { .. } => Some(0),
            Self::GridArea => Some(1),
            Self::TrayArea => Some(2),
            Self::TrayEntry { .. } | Self::Instance { .. } => None,
        }
    }

    /// Sortable siblings of `source`: entries of the same tray list, or grid
    /// instances.
    pub(crate) fn is_sibling_of(&self, source: &DragSource) -> bool {
        match (self, source) {
            (Self::TrayEntry { kind, .. }, DragSource::TrayEntry { kind: source_kind, .. }) => kind == source_kind,
            (Self::Instance { .. }, DragSource::Instance { .. }) => true,
            _ => false,
        }
    }

    /// The draggable this target represents, if it is a sortable item.
    pub fn as_source(&self) -> Option<DragSource> {
        match *self {
            Self::TrayEntry { kind, id } => Some(DragSource::TrayEntry { kind, id }),
            Self::Instance { id } => Some(DragSource::Instance { id }),
            _ => None,
        }
    }
}

/// What a release should do to the tray and grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropAction {
    ReorderTray {
        kind: ItemKind,
        from: CatalogId,
        to: CatalogId,
    },
    ReorderGrid {
        from: InstanceId,
        to: InstanceId,
    },
    MoveToGrid {
        kind: ItemKind,
        id: CatalogId,
        position: Option<usize>,
    },
    MoveToTray {
        id: InstanceId,
    },
    None,
}

impl DropAction {
    /// Decide the action for releasing `source` over `target`.
    pub fn resolve(source: DragSource, target: Option<DropTarget>) -> Self {
        let Some(target) = target else {
            return Self::None;
        };
        match (source, target) {
            (DragSource::TrayEntry { kind, id }, DropTarget::TrayEntry { kind: over_kind, id: over }) => {
                if kind == over_kind && id != over {
                    Self::ReorderTray { kind, from: id, to: over }
                } else {
                    Self::None
                }
            }
            (DragSource::Instance { id }, DropTarget::Instance { id: over }) => {
                if id != over {
                    Self::ReorderGrid { from: id, to: over }
                } else {
                    Self::None
                }
            }
            (DragSource::TrayEntry { kind, id }, DropTarget::EmptySlot { position }) => Self::MoveToGrid {
                kind,
                id,
                position: Some(position),
            },
            (DragSource::TrayEntry { kind, id }, DropTarget::GridArea | DropTarget::Instance { .. }) => {
                Self::MoveToGrid { kind, id, position: None }
            }
            (DragSource::Instance { id }, DropTarget::TrayArea | DropTarget::TrayEntry { .. }) => {
                Self::MoveToTray { id }
            }
            (DragSource::TrayEntry { .. }, DropTarget::TrayArea)
            | (DragSource::Instance { .. }, DropTarget::EmptySlot { .. } | DropTarget::GridArea) => Self::None,
        }
    }

    pub fn is_none(&self) -> bool {
        *self == Self::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(id: CatalogId) -> DragSource {
        DragSource::TrayEntry { kind: ItemKind::Widget, id }
    }

    #[test]
    fn test_tray_to_slot() {
        let action = DropAction::resolve(widget(2), Some(DropTarget::EmptySlot { position: 2 }));
        assert_eq!(
            action,
            DropAction::MoveToGrid { kind: ItemKind::Widget, id: 2, position: Some(2) }
        );
    }

    #[test]
    fn test_tray_to_grid_area_or_instance() {
        let expected = DropAction::MoveToGrid { kind: ItemKind::Widget, id: 2, position: None };
        assert_eq!(DropAction::resolve(widget(2), Some(DropTarget::GridArea)), expected);
        assert_eq!(
            DropAction::resolve(widget(2), Some(DropTarget::Instance { id: InstanceId::new() })),
            expected
        );
    }

    #[test]
    fn test_tray_reorder_same_kind_only() {
        let over_widget = DropTarget::TrayEntry { kind: ItemKind::Widget, id: 4 };
        let over_prompt = DropTarget::TrayEntry { kind: ItemKind::Prompt, id: 4 };
        assert_eq!(
            DropAction::resolve(widget(2), Some(over_widget)),
            DropAction::ReorderTray { kind: ItemKind::Widget, from: 2, to: 4 }
        );
        assert!(DropAction::resolve(widget(2), Some(over_prompt)).is_none());
        assert!(DropAction::resolve(widget(2), Some(DropTarget::TrayArea)).is_none());
    }

    #[test]
    fn test_instance_moves() {
        let a = InstanceId::new();
        let b = InstanceId::new();
        let source = DragSource::Instance { id: a };

        assert_eq!(
            DropAction::resolve(source, Some(DropTarget::Instance { id: b })),
            DropAction::ReorderGrid { from: a, to: b }
        );
        assert_eq!(
            DropAction::resolve(source, Some(DropTarget::TrayArea)),
            DropAction::MoveToTray { id: a }
        );
        assert_eq!(
            DropAction::resolve(source, Some(DropTarget::TrayEntry { kind: ItemKind::Prompt, id: 1 })),
            DropAction::MoveToTray { id: a }
        );
        assert!(DropAction::resolve(source, Some(DropTarget::GridArea)).is_none());
        assert!(DropAction::resolve(source, Some(DropTarget::Instance { id: a })).is_none());
    }

    #[test]
    fn test_no_target() {
        assert!(DropAction::resolve(widget(2), None).is_none());
    }

    #[test]
    fn test_zones() {
        assert_eq!(DropTarget::EmptySlot { position: 0 }.zone(), Zone::Grid);
        assert_eq!(DropTarget::TrayArea.zone(), Zone::Tray);
        assert_eq!(widget(1).zone(), Zone::Tray);
    }
}
