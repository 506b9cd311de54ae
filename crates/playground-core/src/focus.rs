//! Single-item focus (expanded view) and the interaction lock it implies.

use crate::placement::InstanceId;
use serde::{Deserialize, Serialize};

/// Display state of a grid instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceState {
    /// No instance is focused.
    #[default]
    Normal,
    /// This instance is expanded.
    Focused,
    /// Another instance is expanded; this one ignores input.
    Disabled,
}

impl InstanceState {
    pub fn is_focused(self) -> bool {
        self == Self::Focused
    }

    pub fn is_disabled(self) -> bool {
        self == Self::Disabled
    }
}

/// Result of a focus toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusChange {
    Focused(InstanceId),
    Cleared(InstanceId),
    /// A different instance already holds focus.
    Refused { held_by: InstanceId },
}

/// Tracks the focused grid instance, if any.
///
/// While set, drag sessions cannot start anywhere in the playground.
/// Focusing a second instance while one is held is refused; callers clear
/// the current focus first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusLock {
    focused: Option<InstanceId>,
}

impl FocusLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Focus `id`, or clear focus if `id` already holds it.
    pub fn toggle(&mut self, id: InstanceId) -> FocusChange {
        match self.focused {
            None => {
                self.focused = Some(id);
                FocusChange::Focused(id)
            }
            Some(current) if current == id => {
                self.focused = None;
                FocusChange::Cleared(id)
            }
            Some(current) => FocusChange::Refused { held_by: current },
        }
    }

    /// Clear focus unconditionally. Returns the previously focused instance.
    pub fn unfocus(&mut self) -> Option<InstanceId> {
        self.focused.take()
    }

    /// Clear focus if it is held by `id`.
    pub fn release(&mut self, id: InstanceId) -> bool {
        if self.focused == Some(id) {
            self.focused = None;
            true
        } else {
            false
        }
    }

    pub fn focused(&self) -> Option<InstanceId> {
        self.focused
    }

    pub fn is_locked(&self) -> bool {
        self.focused.is_some()
    }

    /// Display state of `id` under the current focus.
    pub fn state_of(&self, id: InstanceId) -> InstanceState {
        match self.focused {
            None => InstanceState::Normal,
            Some(current) if current == id => InstanceState::Focused,
            Some(_) => InstanceState::Disabled,
        }
    }
}
