//! Playground configuration.

use crate::catalog::ItemKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Maximum number of selections per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionLimits {
    pub max_prompts: usize,
    pub max_widgets: usize,
}

impl Default for SelectionLimits {
    fn default() -> Self {
        Self {
            max_prompts: 4,
            max_widgets: 5,
        }
    }
}

impl SelectionLimits {
    pub fn max(&self, kind: ItemKind) -> usize {
        match kind {
            ItemKind::Prompt => self.max_prompts,
            ItemKind::Widget => self.max_widgets,
        }
    }
}

/// A tray index that may not be placed while the grid is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveSlot {
    pub kind: ItemKind,
    pub index: usize,
}

/// Thresholds a gesture must pass before it becomes a drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivationConfig {
    /// Mouse/pen travel in pixels before a press turns into a drag.
    pub pointer_distance: f64,
    /// Touch hold time before a press turns into a drag.
    pub touch_delay_ms: u64,
    /// Touch travel allowed during the hold.
    pub touch_tolerance: f64,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            pointer_distance: 3.0,
            touch_delay_ms: 50,
            touch_tolerance: 3.0,
        }
    }
}

impl ActivationConfig {
    pub fn touch_delay(&self) -> Duration {
        Duration::from_millis(self.touch_delay_ms)
    }
}

/// Delays of the simulated widget work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectTimings {
    pub image_generation_ms: u64,
    pub research_echo_ms: u64,
    pub document_upload_ms: u64,
    pub data_upload_ms: u64,
    pub music_generation_ms: u64,
}

impl Default for EffectTimings {
    fn default() -> Self {
        Self {
            image_generation_ms: 5000,
            research_echo_ms: 100,
            document_upload_ms: 500,
            data_upload_ms: 1000,
            music_generation_ms: 4000,
        }
    }
}

/// Top-level playground configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    pub limits: SelectionLimits,
    pub reserve_slots: Vec<ReserveSlot>,
    pub activation: ActivationConfig,
    pub timings: EffectTimings,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            limits: SelectionLimits::default(),
            reserve_slots: vec![ReserveSlot {
                kind: ItemKind::Widget,
                index: 4,
            }],
            activation: ActivationConfig::default(),
            timings: EffectTimings::default(),
        }
    }
}

impl PlaygroundConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded playground config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.activation.pointer_distance.is_finite() || self.activation.pointer_distance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "pointer_distance must be a non-negative number, got {}",
                self.activation.pointer_distance
            )));
        }
        if !self.activation.touch_tolerance.is_finite() || self.activation.touch_tolerance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "touch_tolerance must be a non-negative number, got {}",
                self.activation.touch_tolerance
            )));
        }
        for slot in &self.reserve_slots {
            let max = self.limits.max(slot.kind);
            if slot.index >= max {
                return Err(ConfigError::Invalid(format!(
                    "reserve slot {} is outside the {} limit of {}",
                    slot.index, slot.kind, max
                )));
            }
        }
        Ok(())
    }

    /// Whether `index` in the `kind` tray is a reserve slot.
    pub fn is_reserve_slot(&self, kind: ItemKind, index: usize) -> bool {
        self.reserve_slots
            .iter()
            .any(|slot| slot.kind == kind && slot.index == index)
    }
}
