//! Demo configuration management.
//!
//! Configuration is stored as TOML:
//! - Linux: `~/.config/traykit/demo.toml`
//! - Windows: `%APPDATA%/traykit/demo.toml`

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Demo configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Title shown next to the tray icon.
    #[serde(default = "default_name")]
    pub name: String,

    /// Hover tooltip text.
    #[serde(default = "default_tooltip")]
    pub tooltip: String,

    /// Show the icon immediately on start.
    #[serde(default = "default_true")]
    pub show_on_start: bool,
}

fn default_name() -> String {
    "TrayKit Demo".into()
}

fn default_tooltip() -> String {
    "TrayKit tray icon demo".into()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: default_name(),
            tooltip: default_tooltip(),
            show_on_start: true,
        }
    }
}

impl Config {
    /// Loads configuration from disk, or creates a default if not found.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Saves the current configuration to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }
}

/// Returns the platform-specific configuration file path.
fn config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        PathBuf::from(appdata).join("traykit").join("demo.toml")
    }

    #[cfg(not(target_os = "windows"))]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        PathBuf::from(home)
            .join(".config")
            .join("traykit")
            .join("demo.toml")
    }
}
