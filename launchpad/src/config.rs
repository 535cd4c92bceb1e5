use crate::error::LaunchpadError;
use crate::geometry::Rect;
use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Unattended (demo) mode settings
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DemoConfig {
    pub enabled: bool,
    /// Refuse to close the dialog while in demo mode
    pub block_exit: bool,
    /// Seconds without input before a demo scenario is launched
    pub idle_seconds: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            block_exit: false,
            idle_seconds: 300,
        }
    }
}

/// Which optional pages appear in the menu at startup
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct PagesConfig {
    pub show_video: bool,
}

/// Launch dialog configuration
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LaunchpadConfig {
    pub version: u32,
    /// Last selected scenario path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
    pub demo: DemoConfig,
    pub pages: PagesConfig,
    /// Last window rectangle in screen coordinates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<Rect>,
}

impl Default for LaunchpadConfig {
    fn default() -> Self {
        Self {
            version: 1,
            scenario: None,
            demo: DemoConfig::default(),
            pages: PagesConfig::default(),
            window: None,
        }
    }
}

impl LaunchpadConfig {
    /// Read a config file
    pub fn load(path: &Path) -> Result<Self, LaunchpadError> {
        let contents = fs::read_to_string(path).map_err(|source| LaunchpadError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| LaunchpadError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize launchpad config")
    }
}

/// Manages the launchpad config file
pub struct ConfigManager {
    config: LaunchpadConfig,
    config_path: PathBuf,
}

impl ConfigManager {
    /// Load the config from the user's config directory, writing defaults if
    /// none exists yet
    pub fn new() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        Self::with_path(config_path)
    }

    /// Load the config from a specific file, writing defaults if it is missing
    pub fn with_path(config_path: PathBuf) -> Result<Self> {
        let config = if config_path.exists() {
            info!("Loading config from {:?}", config_path);
            LaunchpadConfig::load(&config_path)?
        } else {
            info!("No config found at {:?}, using defaults", config_path);
            let default_config = LaunchpadConfig::default();

            if let Err(e) = Self::save_config(&config_path, &default_config) {
                warn!("Failed to save default config: {:#}", e);
            }

            default_config
        };

        Ok(Self {
            config,
            config_path,
        })
    }

    /// Get the configuration file path
    fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("launchpad");

        Ok(config_dir.join("launchpad.toml"))
    }

    /// Save configuration to file
    fn save_config(path: &Path, config: &LaunchpadConfig) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).context("Failed to create config directory")?;
        }

        fs::write(path, config.to_toml()?).context("Failed to write config file")?;

        info!("Config saved to {:?}", path);
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    pub fn config(&self) -> &LaunchpadConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut LaunchpadConfig {
        &mut self.config
    }

    /// Replace the in-memory config, e.g. with the one handed back by a closed
    /// dialog
    pub fn replace(&mut self, config: LaunchpadConfig) {
        self.config = config;
    }

    /// Save current configuration to disk
    pub fn save(&self) -> Result<()> {
        Self::save_config(&self.config_path, &self.config)
    }
}
