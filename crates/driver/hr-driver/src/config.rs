//! Project configuration read from `heron.toml`

use anyhow::{Context, Result};
use hr_pycode::PrinterSettings;
use serde::Deserialize;
use std::path::Path;

/// Name of the configuration file looked up next to the sources
pub const CONFIG_FILE: &str = "heron.toml";

/// Translation settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeronConfig {
    /// Python printer settings, `[printer]` table
    pub printer: PrinterSettings,
}

impl HeronConfig {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load `heron.toml` from a directory, falling back to the defaults when
    /// the directory has none
    pub fn find_in_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.is_file() {
            tracing::debug!(path = %config_path.display(), "loading config");
            Self::from_file(&config_path)
        } else {
            Ok(Self::default())
        }
    }
}
