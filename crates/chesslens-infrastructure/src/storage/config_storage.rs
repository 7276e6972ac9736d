//! Client configuration file storage.
//!
//! Reads `config.toml`, falls back to defaults for a missing or empty file,
//! then applies environment overrides.

use crate::paths::LensPaths;
use chesslens_core::config::ClientConfig;
use chesslens_core::{LensError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Overrides `api_base_url`.
pub const API_URL_ENV: &str = "CHESSLENS_API_URL";
/// Overrides `analysis_base_url`.
pub const ANALYSIS_URL_ENV: &str = "CHESSLENS_ANALYSIS_URL";

pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Storage at the default location, `<config dir>/chesslens/config.toml`.
    pub fn new() -> Result<Self> {
        let path = LensPaths::config_file().map_err(|e| LensError::config(e.to_string()))?;
        Ok(Self { path })
    }

    /// Storage at a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the file, then applies overrides from the process environment.
    pub fn load(&self) -> Result<ClientConfig> {
        let config = self.load_file()?;
        Ok(apply_overrides(config, |key| std::env::var(key).ok()))
    }

    /// Loads the file only.
    ///
    /// # Returns
    ///
    /// - `Ok(ClientConfig)`: parsed file, or defaults when the file is missing or blank
    /// - `Err(LensError::Io)`: the file exists but could not be read
    /// - `Err(LensError::Serialization)`: invalid TOML
    pub fn load_file(&self) -> Result<ClientConfig> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No config file, using defaults");
            return Ok(ClientConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(ClientConfig::default());
        }

        Ok(toml::from_str(&content)?)
    }
}

/// Applies environment overrides. Blank values are ignored.
pub fn apply_overrides(
    mut config: ClientConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> ClientConfig {
    let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(url) = value(API_URL_ENV) {
        debug!(env = API_URL_ENV, "Overriding API base URL");
        config.api_base_url = url;
    }
    if let Some(url) = value(ANALYSIS_URL_ENV) {
        debug!(env = ANALYSIS_URL_ENV, "Overriding analysis base URL");
        config.analysis_base_url = url;
    }
    config
}
