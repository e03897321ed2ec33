use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::AppConfig;

const CONFIG_FILE_NAME: &str = "config.toml";

pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service bound to `<platform config dir>/config.toml`, or `./config.toml`
    /// when the platform has no config directory.
    pub fn with_default_path() -> Self {
        let path = ProjectDirs::from("com", "KenBoyle", "RoomScheduler")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and validate the configuration. A missing file yields defaults.
    pub fn load(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            return Ok(AppConfig::default());
        }

        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read config from {}", self.path.display()))?;
        let config: AppConfig = toml::from_str(&data)
            .with_context(|| format!("failed to parse config from {}", self.path.display()))?;
        config
            .validate()
            .map_err(|e| anyhow!("Invalid config in {}: {}", self.path.display(), e))?;

        Ok(config)
    }

    /// Like [`load`](Self::load), falling back to defaults on any error.
    pub fn load_or_default(&self) -> AppConfig {
        match self.load() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load config: {:#}, using defaults", e);
                AppConfig::default()
            }
        }
    }

    pub fn save(&self, config: &AppConfig) -> Result<()> {
        config
            .validate()
            .map_err(|e| anyhow!("Invalid config: {}", e))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {}", parent.display()))?;
        }

        let data = toml::to_string_pretty(config).context("failed to serialize config")?;
        fs::write(&self.path, data)
            .with_context(|| format!("failed to write config to {}", self.path.display()))?;
        Ok(())
    }
}
