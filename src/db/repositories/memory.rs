//! In-memory shared-round repository.
//!
//! Used by the test environment so the HTTP endpoints can be exercised without
//! disk I/O. Records are cloned on the way in and on the way out, so callers
//! never alias the stored value.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::db::repository::{RepositoryResult, SharedRoundRepository};
use crate::models::SharedRoundData;

#[derive(Clone, Default)]
pub struct InMemoryRepository {
    data: Arc<RwLock<MemoryData>>,
}

struct MemoryData {
    rounds: HashMap<String, SharedRoundData>,
    is_healthy: bool,
}

impl Default for MemoryData {
    fn default() -> Self {
        Self {
            rounds: HashMap::new(),
            is_healthy: true,
        }
    }
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the health status for testing degraded storage.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    pub fn len(&self) -> usize {
        self.data.read().rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.data.write().rounds.clear();
    }
}

#[async_trait]
impl SharedRoundRepository for InMemoryRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn store(&self, data: &SharedRoundData) -> RepositoryResult<()> {
        self.data
            .write()
            .rounds
            .insert(data.id.clone(), data.clone());
        Ok(())
    }

    async fn retrieve(&self, id: &str) -> RepositoryResult<Option<SharedRoundData>> {
        Ok(self.data.read().rounds.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn shared(id: &str, team_name: &str) -> SharedRoundData {
        SharedRoundData {
            id: id.to_string(),
            completed_at: Utc::now(),
            total_time: 135_000,
            laps: vec![],
            team_name: team_name.to_string(),
            description: None,
            scoring: Default::default(),
            team_average_age: None,
        }
    }

    #[tokio::test]
    async fn test_store_and_retrieve() {
        let repo = InMemoryRepository::new();
        assert!(repo.retrieve("a").await.unwrap().is_none());

        repo.store(&shared("a", "Team A")).await.unwrap();
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.retrieve("a").await.unwrap().unwrap().team_name, "Team A");
    }

    #[tokio::test]
    async fn test_store_overwrites() {
        let repo = InMemoryRepository::new();
        repo.store(&shared("a", "first")).await.unwrap();
        repo.store(&shared("a", "second")).await.unwrap();
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.retrieve("a").await.unwrap().unwrap().team_name, "second");
    }

    #[tokio::test]
    async fn test_values_are_copied() {
        let repo = InMemoryRepository::new();
        let mut original = shared("a", "original");
        repo.store(&original).await.unwrap();

        original.team_name = "mutated".to_string();
        let mut retrieved = repo.retrieve("a").await.unwrap().unwrap();
        retrieved.team_name = "also mutated".to_string();

        assert_eq!(repo.retrieve("a").await.unwrap().unwrap().team_name, "original");
    }

    #[tokio::test]
    async fn test_health_and_clear() {
        let repo = InMemoryRepository::new();
        assert!(repo.health_check().await.unwrap());
        repo.set_healthy(false);
        assert!(!repo.health_check().await.unwrap());

        repo.store(&shared("a", "x")).await.unwrap();
        repo.clear();
        assert!(repo.is_empty());
    }
}
