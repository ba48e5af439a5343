//! Settings storage.
//!
//! The engine keeps its own copy of [`TooltipConfig`] and is told about
//! changes through `on_config_changed`. The store is only consulted on load
//! and when a hotkey commits a filter list edit.

use std::path::{Path, PathBuf};

use lingering_types::{ConfigKey, TooltipConfig};

use crate::error::ConfigError;

const APP_DIR: &str = "lingering-click-tooltips";
const CONFIG_FILE: &str = "config.toml";

/// Backing storage for settings.
pub trait ConfigStore {
    fn load(&self) -> Result<TooltipConfig, ConfigError>;

    /// Persist a filter list. Only [`ConfigKey::Blacklist`] and
    /// [`ConfigKey::Whitelist`] are writable.
    fn write_list(&mut self, key: ConfigKey, csv: &str) -> Result<(), ConfigError>;
}

fn apply_list(config: &mut TooltipConfig, key: ConfigKey, csv: &str) -> Result<(), ConfigError> {
    match key {
        ConfigKey::Blacklist => config.blacklist = csv.to_string(),
        ConfigKey::Whitelist => config.whitelist = csv.to_string(),
        other => return Err(ConfigError::ReadOnlyKey(other)),
    }
    Ok(())
}

/// In-memory store, used by tests and the replay tool when no file is given.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigStore {
    config: TooltipConfig,
}

impl MemoryConfigStore {
    pub fn new(config: TooltipConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TooltipConfig {
        &self.config
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> Result<TooltipConfig, ConfigError> {
        Ok(self.config.clone())
    }

    fn write_list(&mut self, key: ConfigKey, csv: &str) -> Result<(), ConfigError> {
        apply_list(&mut self.config, key, csv)
    }
}

/// TOML file store backed by confy.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/lingering-click-tooltips/config.toml`
    pub fn default_location() -> Result<Self, ConfigError> {
        dirs::config_dir()
            .map(|dir| Self::new(dir.join(APP_DIR).join(CONFIG_FILE)))
            .ok_or(ConfigError::NoConfigDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn store(&self, config: &TooltipConfig) -> Result<(), ConfigError> {
        confy::store_path(&self.path, config).map_err(|source| ConfigError::Store {
            path: self.path.clone(),
            source,
        })
    }
}

impl ConfigStore for FileConfigStore {
    /// Missing files are created with defaults.
    fn load(&self) -> Result<TooltipConfig, ConfigError> {
        confy::load_path(&self.path).map_err(|source| ConfigError::Load {
            path: self.path.clone(),
            source,
        })
    }

    fn write_list(&mut self, key: ConfigKey, csv: &str) -> Result<(), ConfigError> {
        let mut config = self.load()?;
        apply_list(&mut config, key, csv)?;
        self.store(&config)?;
        tracing::debug!(key = %key, path = ?self.path, "Persisted filter list");
        Ok(())
    }
}
