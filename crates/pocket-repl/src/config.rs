//! REPL configuration.
//!
//! Loaded from `~/.config/pocket/config.toml`. Every field is optional.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplConfig {
    /// Text before the cwd in the prompt.
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Color directory names in `ls`.
    #[serde(default = "default_true")]
    pub color: bool,

    /// Keep line history across sessions.
    #[serde(default = "default_true")]
    pub history: bool,

    /// JSON tree snapshot to load instead of the welcome workspace.
    #[serde(default)]
    pub seed: Option<PathBuf>,
}

fn default_prompt() -> String {
    "pocket-coder".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            color: default_true(),
            history: default_true(),
            seed: None,
        }
    }
}

impl ReplConfig {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Get the default config file path.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "pocket").context("Could not determine config directory")?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Where line history is kept, if history is enabled.
    pub fn history_path(&self) -> Option<PathBuf> {
        if !self.history {
            return None;
        }
        directories::BaseDirs::new().map(|b| b.data_dir().join("pocket").join("history.txt"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ReplConfig::default();
        assert_eq!(config.prompt, "pocket-coder");
        assert!(config.color);
        assert!(config.history);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: ReplConfig = toml::from_str("color = false").unwrap();
        assert!(!config.color);
        assert_eq!(config.prompt, "pocket-coder");
        assert!(config.history);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "prompt = \"dev\"\nhistory = false\nseed = \"/tmp/ws.json\"").unwrap();

        let config = ReplConfig::load_from(file.path()).unwrap();
        assert_eq!(config.prompt, "dev");
        assert!(!config.history);
        assert_eq!(config.seed, Some(PathBuf::from("/tmp/ws.json")));
        assert!(config.history_path().is_none());
    }

    #[test]
    fn test_load_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = ReplConfig::load_from(&missing).unwrap_err();
        assert!(err.to_string().contains("nope.toml"));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "color = \"maybe\"").unwrap();
        let err = ReplConfig::load_from(&bad).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse config"));
    }
}
