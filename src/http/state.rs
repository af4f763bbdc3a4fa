//! Application state for the HTTP server.

use std::sync::Arc;

use super::fetcher::{HttpRoundFetcher, SharedRoundFetcher};
use crate::config::AppConfig;
use crate::db::RepositoryProvider;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Shared-round storage
    pub storage: Arc<RepositoryProvider>,
    /// Source of shared rounds for oEmbed documents
    pub fetcher: Arc<dyn SharedRoundFetcher>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        storage: Arc<RepositoryProvider>,
        fetcher: Arc<dyn SharedRoundFetcher>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            storage,
            fetcher,
        }
    }

    /// Production wiring: oEmbed fetches go back through the public share endpoint.
    pub fn from_config(config: AppConfig) -> Result<Self, reqwest::Error> {
        let storage = Arc::new(RepositoryProvider::from_config(&config));
        let fetcher = Arc::new(HttpRoundFetcher::new(config.base_url.clone())?);
        Ok(Self::new(config, storage, fetcher))
    }
}
