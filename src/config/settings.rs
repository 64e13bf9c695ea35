use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::protocol::types::DeviceProtocol;

/// Settings shared by the device page and the runtime configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Device type selected when the page loads.
    pub default_protocol: DeviceProtocol,
    /// Interval between master polls of each slave, in milliseconds.
    pub polling_period_ms: u32,
    /// How long the master waits for a slave response, in milliseconds.
    pub timeout_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_protocol: DeviceProtocol::Uno,
            polling_period_ms: 100,
            timeout_ms: 1000,
        }
    }
}

impl Settings {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse settings")
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {path}"))?;
        let settings = Self::from_toml(&content)?;
        log::debug!("Loaded settings from {path}: {settings:?}");
        Ok(settings)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize settings")
    }
}
