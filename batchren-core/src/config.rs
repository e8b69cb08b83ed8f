use crate::policy::Policy;
use crate::scanner::default_extensions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Pattern heuristics
    #[serde(default)]
    pub policy: Policy,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DefaultsConfig {
    /// Default preview format: "table", "summary", "json", or "none"
    #[serde(default = "default_preview")]
    pub preview_format: String,

    /// Extensions (without the dot) listed from the target directory
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Whether to use color output by default (None = auto-detect)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_color: Option<bool>,

    /// Append-only apply log
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            preview_format: default_preview(),
            extensions: default_extensions(),
            use_color: None,
            log_file: None,
        }
    }
}

fn default_preview() -> String {
    "table".to_string()
}

impl Config {
    /// Load config from .batchren/config.toml if it exists
    pub fn load() -> Result<Self> {
        if let Ok(cwd) = std::env::current_dir() {
            let config_path = cwd.join(".batchren").join("config.toml");
            if config_path.exists() {
                return Self::load_from_path(&config_path);
            }
        }

        Ok(Self::default())
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Save config to .batchren/config.toml
    pub fn save(&self) -> Result<()> {
        let cwd = std::env::current_dir()?;
        let config_dir = cwd.join(".batchren");

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        self.save_to_path(&config_dir.join("config.toml"))
    }

    /// Save config to a specific path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
