//! Repository trait for published rounds.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::SharedRoundData;

/// Key-value store of published rounds, keyed by round id.
///
/// `store` is an upsert: publishing the same id twice keeps the last write.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to be shared across axum handlers.
#[async_trait]
pub trait SharedRoundRepository: Send + Sync {
    /// Check whether the backend is usable.
    ///
    /// # Returns
    /// - `Ok(true)` if the backend can accept writes
    /// - `Ok(false)` if it cannot, without a hard error
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Store (or overwrite) a published round.
    ///
    /// # Arguments
    /// * `data` - The public round record; `data.id` is the key
    ///
    /// # Returns
    /// * `Err(RepositoryError::ValidationError)` - If the id is rejected by the backend
    /// * `Err(RepositoryError)` - If the write fails
    async fn store(&self, data: &SharedRoundData) -> RepositoryResult<()>;

    /// Retrieve a published round.
    ///
    /// # Returns
    /// * `Ok(Some(data))` - The stored record
    /// * `Ok(None)` - Nothing stored under this id
    /// * `Err(RepositoryError::ValidationError)` - If the id is rejected by the backend
    /// * `Err(RepositoryError)` - If the read or decoding fails
    async fn retrieve(&self, id: &str) -> RepositoryResult<Option<SharedRoundData>>;
}
