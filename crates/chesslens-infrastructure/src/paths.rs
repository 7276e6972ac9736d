//! Unified path management for ChessLens configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/chesslens/         # Config directory (platform config dir)
//! ├── config.toml              # Client configuration
//! └── credential.json          # Bearer token of the signed-in user
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "chesslens";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

pub struct LensPaths;

impl LensPaths {
    /// Returns the ChessLens configuration directory, e.g. `~/.config/chesslens/`.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to config.toml.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the stored credential.
    ///
    /// # Security Note
    ///
    /// The file holds a bearer token and is written with mode 600 on Unix.
    pub fn credential_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("credential.json"))
    }
}
