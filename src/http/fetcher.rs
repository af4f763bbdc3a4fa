//! Lookup of shared rounds for oEmbed documents.
//!
//! In production the oEmbed handler asks the public share endpoint, the same
//! way an external consumer would. Tests read the repository directly.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::db::{RepositoryError, RepositoryProvider};
use crate::models::SharedRoundData;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Source of shared rounds. `Ok(None)` means the round is not available.
#[async_trait]
pub trait SharedRoundFetcher: Send + Sync {
    async fn fetch(&self, round_id: &str) -> Result<Option<SharedRoundData>, FetchError>;
}

/// Fetches rounds from `{base_url}/api/share-round?id=`.
pub struct HttpRoundFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRoundFetcher {
    /// Fails when the HTTP client cannot be initialized (e.g. no TLS backend).
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl SharedRoundFetcher for HttpRoundFetcher {
    async fn fetch(&self, round_id: &str) -> Result<Option<SharedRoundData>, FetchError> {
        let response = self
            .client
            .get(format!("{}/api/share-round", self.base_url))
            .query(&[("id", round_id)])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!(round_id, %status, "Shared round lookup was not successful");
            return Ok(None);
        }

        Ok(Some(response.json().await?))
    }
}

/// Reads rounds straight from the repository.
pub struct RepositoryRoundFetcher {
    storage: Arc<RepositoryProvider>,
}

impl RepositoryRoundFetcher {
    pub fn new(storage: Arc<RepositoryProvider>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl SharedRoundFetcher for RepositoryRoundFetcher {
    async fn fetch(&self, round_id: &str) -> Result<Option<SharedRoundData>, FetchError> {
        match self.storage.get().retrieve(round_id).await {
            Ok(round) => Ok(round),
            // The share endpoint answers 400 here, which the HTTP path maps to None.
            Err(e) if e.is_validation() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
