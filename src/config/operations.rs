//! Config loading, validation, and utility operations.

use super::model::Config;
use super::types::CONFIG_FILE_NAME;
use crate::error::{LfsLockError, Result};
use crate::fs::build_exclude_set;
use globset::GlobSet;
use std::path::Path;
use tracing::debug;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            LfsLockError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load `<root>/.lfslock.yaml` if it exists, otherwise the defaults.
    pub fn load_from_root<P: AsRef<Path>>(root: P) -> Result<Self> {
        let path = root.as_ref().join(CONFIG_FILE_NAME);
        if path.is_file() {
            debug!(path = %path.display(), "loading config");
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml).map_err(|e| {
            LfsLockError::ConfigError(format!("failed to parse config YAML: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            LfsLockError::ConfigError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values.
    ///
    /// - `pool_capacity` must be positive
    /// - no command template may be blank
    /// - every `exclude` entry must be a valid glob
    pub fn validate(&self) -> Result<()> {
        if self.pool_capacity == 0 {
            return Err(LfsLockError::ConfigError(
                "pool_capacity must be greater than 0".to_string(),
            ));
        }

        for (name, template) in self.commands.named() {
            if template.trim().is_empty() {
                return Err(LfsLockError::ConfigError(format!(
                    "command template '{}' must not be empty",
                    name
                )));
            }
        }

        self.exclude_set()?;
        Ok(())
    }

    /// Compiled `exclude` globs.
    pub fn exclude_set(&self) -> Result<GlobSet> {
        build_exclude_set(&self.exclude)
    }
}
