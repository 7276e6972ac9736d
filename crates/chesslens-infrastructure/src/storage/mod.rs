//! File storage for client configuration and the saved credential.

mod config_storage;
mod credential_storage;

pub use config_storage::{ANALYSIS_URL_ENV, API_URL_ENV, ConfigStorage, apply_overrides};
pub use credential_storage::CredentialStorage;
