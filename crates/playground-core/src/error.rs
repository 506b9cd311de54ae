//! Rejection reasons for playground mutations.

use crate::catalog::{CatalogId, ItemKind};
use crate::placement::InstanceId;
use thiserror::Error;

/// Why a placement, reorder or drag operation was refused.
///
/// None of these are fatal. Callers driven by pointer gestures log them and
/// carry on; the tray and grid are left exactly as they were.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("{kind} #{id} is not in the tray")]
    UnknownEntry { kind: ItemKind, id: CatalogId },
    #[error("grid instance {0} does not exist")]
    UnknownInstance(InstanceId),
    #[error("index {index} out of range for {kind} tray of length {len}")]
    IndexOutOfRange {
        kind: ItemKind,
        index: usize,
        len: usize,
    },
    #[error("all grid positions are occupied")]
    CapacityExceeded,
    #[error("{kind} tray slot {index} is reserved while the grid is full")]
    ReserveSlot { kind: ItemKind, index: usize },
    #[error("interaction is locked while {0} is focused")]
    Focused(InstanceId),
    #[error("a drag is already in progress")]
    DragInProgress,
}

/// Coarse grouping of [`PlacementError`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InvalidReference,
    CapacityExceeded,
    GuardedWhileFocused,
    /// Another gesture already owns the interaction.
    Busy,
}

impl PlacementError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownEntry { .. } | Self::UnknownInstance(_) | Self::IndexOutOfRange { .. } => {
                ErrorCategory::InvalidReference
            }
            Self::CapacityExceeded | Self::ReserveSlot { .. } => ErrorCategory::CapacityExceeded,
            Self::Focused(_) => ErrorCategory::GuardedWhileFocused,
            Self::DragInProgress => ErrorCategory::Busy,
        }
    }
}

/// Result type for placement operations.
pub type PlacementResult<T> = Result<T, PlacementError>;
