//! Configuration loader
//!
//! Sources are merged in this order (later sources override earlier):
//! 1. Default values from `ScanConfig::default()`
//! 2. TOML configuration file (explicit path, or `docscan.toml` in the working directory)
//! 3. Environment variables with prefix (e.g. `DOCSCAN_ANALYSIS__INCLUDE_VARIABLES=true`)

use super::ScanConfig;
use crate::Result;
use crate::constants::{CONFIG_ENV_PREFIX, DEFAULT_CONFIG_FILENAME};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// An explicit config path that does not exist is an error; the implicit
    /// `docscan.toml` is only used when present.
    pub fn load(&self) -> Result<ScanConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(ScanConfig::default()));

        if let Some(config_path) = &self.config_path {
            if !config_path.exists() {
                return Err(crate::ScanError::Config(format!(
                    "configuration file not found: {}",
                    config_path.display()
                )));
            }
        }
        if let Some(file) = self.source_file() {
            figment = figment.merge(Toml::file(file));
        }

        // Double underscore separates nested keys so field names keep their underscores
        figment = figment.merge(Env::prefixed(&format!("{}_", self.env_prefix)).split("__"));

        let config: ScanConfig = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// TOML file `load` reads: the explicit path, or `docscan.toml` when it exists
    pub fn source_file(&self) -> Option<PathBuf> {
        match &self.config_path {
            Some(path) => Some(path.clone()),
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILENAME);
                default_path.exists().then_some(default_path)
            }
        }
    }
}
