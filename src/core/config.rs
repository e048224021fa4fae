//! Configuration system: TOML file + CLI overrides + smart defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::{JdError, Result};

/// Full jetdash configuration model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Redraw interval in milliseconds.
    pub refresh_ms: u64,
    /// Disable color output (also honored via `NO_COLOR`).
    pub no_color: bool,
    /// Optional JSON snapshot file to replay instead of simulated telemetry.
    pub replay_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_ms: 1000,
            no_color: false,
            replay_file: None,
        }
    }
}

impl Config {
    /// Load configuration from an explicit TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(JdError::MissingConfig {
                path: path.to_path_buf(),
            });
        }
        let raw = fs::read_to_string(path).map_err(|e| JdError::io(path, e))?;
        Self::from_toml(&raw)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw).map_err(|e| JdError::ConfigParse {
            context: "config.toml",
            details: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an optional path; fall back to defaults when absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::from_file)
    }

    fn validate(&self) -> Result<()> {
        if self.refresh_ms == 0 {
            return Err(JdError::InvalidConfig {
                details: "refresh_ms must be positive".into(),
            });
        }
        Ok(())
    }
}
