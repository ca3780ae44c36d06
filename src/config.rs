// History configuration, loaded from RON

use crate::codec::CodecKind;
use crate::history::buffer::DEFAULT_CAPACITY;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Settings for a history session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of snapshots retained
    pub capacity: usize,
    /// Snapshot format
    pub codec: CodecKind,
    /// Pretty-print snapshots (larger, easier to inspect)
    pub pretty: bool,
    /// Put the popped snapshot back when restoring the prior one fails
    pub restore_on_decode_failure: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            codec: CodecKind::default(),
            pretty: false,
            restore_on_decode_failure: false,
        }
    }
}

impl HistoryConfig {
    /// Parse and validate a RON document; missing fields take defaults
    pub fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        let config: HistoryConfig =
            ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a RON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_ron_str(&contents)?;
        tracing::debug!(path = %path.display(), ?config, "Loaded history config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // Undo needs a current and a prior snapshot
        if self.capacity < 2 {
            return Err(ConfigError::Invalid(format!(
                "capacity must be at least 2, got {}",
                self.capacity
            )));
        }
        Ok(())
    }
}
