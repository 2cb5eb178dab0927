//! Overlay configuration management.
//!
//! Configuration is stored as TOML:
//! - Linux/macOS: `~/.config/ceti/overlay.toml`
//! - Windows: `%APPDATA%/ceti/overlay.toml`

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Where candidate system names come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Follow the game journal.
    #[default]
    Journal,
    /// Poll the system clipboard.
    Clipboard,
}

/// Overlay configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub mode: InputMode,

    /// Journal directory; the game's default location when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal_dir: Option<PathBuf>,

    /// Interval between journal or clipboard polls.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Per-request timeout for lookup sources.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Show the overlay only while the galaxy map is open.
    #[serde(default)]
    pub visibility_tied_to_map: bool,

    /// Append every resolved system to the export log.
    #[serde(default)]
    pub export_on_resolve: bool,

    /// Export log location; next to the config file when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_path: Option<PathBuf>,
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_request_timeout_secs() -> u64 {
    8
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: InputMode::default(),
            journal_dir: None,
            poll_interval_ms: default_poll_interval_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            visibility_tied_to_map: false,
            export_on_resolve: false,
            export_path: None,
        }
    }
}

impl Config {
    /// Loads configuration from the default location.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Loads configuration from `path`, writing defaults if it is missing.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Saves the configuration to `path`.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Resolved journal directory.
    pub fn journal_dir(&self) -> anyhow::Result<PathBuf> {
        match &self.journal_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(ceti_journal::journal_dir()?),
        }
    }

    /// Resolved export log path.
    pub fn export_path(&self) -> anyhow::Result<PathBuf> {
        match &self.export_path {
            Some(path) => Ok(path.clone()),
            None => Ok(config_dir()?.join("saved_systems.csv")),
        }
    }
}

/// Returns the platform-specific configuration file path.
fn config_path() -> anyhow::Result<PathBuf> {
    Ok(config_dir()?.join("overlay.toml"))
}

fn config_dir() -> anyhow::Result<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        Ok(PathBuf::from(appdata).join("ceti"))
    }

    #[cfg(not(target_os = "windows"))]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        Ok(PathBuf::from(home).join(".config").join("ceti"))
    }
}
