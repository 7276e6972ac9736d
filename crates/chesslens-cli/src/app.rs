//! Wiring shared by all commands.

use anyhow::{Context, Result};
use chesslens_core::config::ClientConfig;
use chesslens_core::navigation::{Navigator, Route};
use chesslens_core::session::SessionContext;
use chesslens_infrastructure::HttpLibraryClient;
use chesslens_infrastructure::storage::{ConfigStorage, CredentialStorage};
use colored::Colorize;
use std::sync::Arc;
use tracing::debug;

pub struct App {
    pub config: ClientConfig,
    pub session: SessionContext,
    pub credentials: CredentialStorage,
    pub client: Arc<HttpLibraryClient>,
}

impl App {
    /// Loads the config, restores the saved credential, and builds the client.
    pub fn init(api_url: Option<String>) -> Result<Self> {
        let storage = ConfigStorage::new()?;
        let mut config = storage
            .load()
            .with_context(|| format!("Failed to load {}", storage.path().display()))?;
        if let Some(url) = api_url {
            config.api_base_url = url;
        }
        debug!(api = %config.api_base_url, "Configuration loaded");

        let credentials = CredentialStorage::new()?;
        let session = SessionContext::new();
        if let Some(credential) = credentials.load()? {
            session.login(credential);
        }

        let client = Arc::new(HttpLibraryClient::new(&config, session.clone())?);
        Ok(Self {
            config,
            session,
            credentials,
            client,
        })
    }
}

/// Routes become hints on stdout; the next command is up to the user.
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate(&self, route: Route) {
        let hint = match &route {
            Route::Editor(id) => format!("chesslens show {id}"),
            Route::Library => "chesslens library".to_string(),
            Route::Login => "chesslens login <username>".to_string(),
        };
        println!("{} {} ({})", "->".cyan(), route, hint.dimmed());
    }
}
