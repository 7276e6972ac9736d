//! Client configuration and its defaults.

use crate::fen;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_ANALYSIS_BASE_URL: &str = "https://lichess.org/editor";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client configuration, stored as `config.toml`.
///
/// Every key is optional in the file; missing keys take the defaults above.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the ChessLens API, without a trailing slash
    pub api_base_url: String,
    /// Base path of the external analysis editor
    pub analysis_base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            analysis_base_url: DEFAULT_ANALYSIS_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Analysis link for `fen` under the configured base path.
    pub fn analysis_url(&self, fen: &str) -> String {
        fen::analysis_url(&self.analysis_base_url, fen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ClientConfig = toml::from_str("api_base_url = \"http://example.test/api\"")
            .unwrap();
        assert_eq!(config.api_base_url, "http://example.test/api");
        assert_eq!(config.analysis_base_url, DEFAULT_ANALYSIS_BASE_URL);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_analysis_url_uses_base() {
        let config = ClientConfig::default();
        assert_eq!(
            config.analysis_url("8/8/8/8/8/8/8/8 w - - 0 1"),
            "https://lichess.org/editor/8/8/8/8/8/8/8/8_w_-_-_0_1"
        );
    }
}
