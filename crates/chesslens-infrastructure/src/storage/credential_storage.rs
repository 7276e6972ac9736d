//! Saved credential storage (credential.json).
//!
//! Keeps the bearer token across CLI invocations. The in-memory
//! `SessionContext` is hydrated from this file at start-up.
//!
//! # Security Note
//!
//! The token is stored as plaintext JSON. On Unix the file is created with
//! mode 600.

use crate::paths::LensPaths;
use chesslens_core::session::Credential;
use chesslens_core::{LensError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Serialize, Deserialize)]
struct StoredCredential {
    access_token: String,
    #[serde(default = "bearer")]
    token_type: String,
}

fn bearer() -> String {
    "bearer".to_string()
}

pub struct CredentialStorage {
    path: PathBuf,
}

impl CredentialStorage {
    /// Storage at the default location, `<config dir>/chesslens/credential.json`.
    pub fn new() -> Result<Self> {
        let path = LensPaths::credential_file().map_err(|e| LensError::config(e.to_string()))?;
        Ok(Self { path })
    }

    /// Storage at a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the saved credential.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Credential))`: a token was saved
    /// - `Ok(None)`: nothing saved, or the file holds an empty token
    /// - `Err(LensError)`: the file could not be read or parsed
    pub fn load(&self) -> Result<Option<Credential>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        let stored: StoredCredential = serde_json::from_str(&content)?;
        if stored.access_token.is_empty() {
            warn!(path = %self.path.display(), "Saved credential is empty, ignoring");
            return Ok(None);
        }
        Ok(Some(Credential::new(stored.access_token)))
    }

    pub fn save(&self, credential: &Credential) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let stored = StoredCredential {
            access_token: credential.bearer_token().to_string(),
            token_type: bearer(),
        };
        let content = serde_json::to_string_pretty(&stored)?;
        write_private(&self.path, &content)?;

        debug!(path = %self.path.display(), "Credential saved");
        Ok(())
    }

    /// Removes the saved credential. Returns whether a file was removed.
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)?;
        debug!(path = %self.path.display(), "Credential cleared");
        Ok(true)
    }
}

#[cfg(unix)]
fn write_private(path: &Path, content: &str) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode() only applies on creation
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(content.as_bytes())
}

#[cfg(not(unix))]
fn write_private(path: &Path, content: &str) -> std::io::Result<()> {
    fs::write(path, content)
}
