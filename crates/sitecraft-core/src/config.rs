//! Editor configuration.

use crate::autosave::DEFAULT_AUTOSAVE_INTERVAL_SECS;
use crate::clock::Duration;
use crate::element::MIN_ELEMENT_SIZE;
use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::interaction::PointerSettings;
use crate::snap::{GRID_SIZE, SNAP_TOLERANCE, SnapMode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Tunables of an editor session. Every field has a default, so partial
/// JSON documents are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Distance within which edges snap to alignment guides.
    pub snap_tolerance: f64,
    /// Smallest width/height of an element.
    pub min_element_size: f64,
    pub snap_mode: SnapMode,
    pub grid_size: f64,
    pub autosave_interval_secs: u64,
    /// Number of undoable actions kept.
    pub history_limit: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            snap_tolerance: SNAP_TOLERANCE,
            min_element_size: MIN_ELEMENT_SIZE,
            snap_mode: SnapMode::default(),
            grid_size: GRID_SIZE,
            autosave_interval_secs: DEFAULT_AUTOSAVE_INTERVAL_SECS,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.snap_tolerance.is_nan() || self.snap_tolerance < 0.0 {
            return Err(ConfigError::Invalid(format!("snap_tolerance must be >= 0, got {}", self.snap_tolerance)));
        }
        if self.min_element_size.is_nan() || self.min_element_size < MIN_ELEMENT_SIZE {
            return Err(ConfigError::Invalid(format!(
                "min_element_size must be >= {MIN_ELEMENT_SIZE}, got {}",
                self.min_element_size
            )));
        }
        if self.grid_size.is_nan() || self.grid_size <= 0.0 {
            return Err(ConfigError::Invalid(format!("grid_size must be > 0, got {}", self.grid_size)));
        }
        if self.autosave_interval_secs == 0 {
            return Err(ConfigError::Invalid("autosave_interval_secs must be at least 1".into()));
        }
        if self.history_limit == 0 {
            return Err(ConfigError::Invalid("history_limit must be at least 1".into()));
        }
        Ok(())
    }

    pub fn with_snap_mode(mut self, snap_mode: SnapMode) -> Self {
        self.snap_mode = snap_mode;
        self
    }

    pub fn autosave_interval(&self) -> Duration {
        Duration::from_secs(self.autosave_interval_secs)
    }

    /// Settings used while following the pointer.
    pub fn pointer_settings(&self) -> PointerSettings {
        PointerSettings {
            snap_mode: self.snap_mode,
            snap_tolerance: self.snap_tolerance,
            grid_size: self.grid_size,
            min_size: self.min_element_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.snap_tolerance, 5.0);
        assert_eq!(config.min_element_size, 20.0);
        assert_eq!(config.snap_mode, SnapMode::Guides);
        assert_eq!(config.autosave_interval(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = EditorConfig::from_json(r#"{"snap_mode": "all", "history_limit": 10}"#).unwrap();
        assert_eq!(config.snap_mode, SnapMode::All);
        assert_eq!(config.history_limit, 10);
        assert_eq!(config.grid_size, GRID_SIZE);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            EditorConfig::from_json(r#"{"min_element_size": 0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EditorConfig::from_json(r#"{"min_element_size": 1}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(EditorConfig::from_json(r#"{"min_element_size": 40}"#).is_ok());
        assert!(matches!(EditorConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }
}
