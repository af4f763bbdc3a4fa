//! Shared-round repository factory for dependency injection.
//!
//! The backend is chosen at runtime: in-memory under the test environment,
//! filesystem otherwise. [`RepositoryProvider`] holds that choice as an
//! explicit object handed to the HTTP layer, with an override hook so tests
//! can swap in their own repository.

use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use super::repositories::{FilesystemRepository, InMemoryRepository};
use super::repository::SharedRoundRepository;
use crate::config::AppConfig;

/// Value of `NODE_ENV` that selects the in-memory backend.
pub const TEST_ENVIRONMENT: &str = "test";

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// One JSON file per round
    Filesystem,
    /// Process-local map
    Memory,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string.
    ///
    /// # Arguments
    /// * `s` - String representation ("filesystem", "fs", "memory", "in-memory")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "filesystem" | "fs" | "file" => Ok(Self::Filesystem),
            "memory" | "in-memory" | "inmemory" | "local" => Ok(Self::Memory),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Pick the backend from an explicit type and the environment name.
    ///
    /// A parseable explicit type wins. Otherwise the test environment gets the
    /// in-memory backend and everything else the filesystem.
    pub fn resolve(explicit: Option<&str>, environment: Option<&str>) -> Self {
        if let Some(repo_type) = explicit.and_then(|s| s.parse().ok()) {
            return repo_type;
        }

        match environment.map(str::trim) {
            Some(TEST_ENVIRONMENT) => Self::Memory,
            _ => Self::Filesystem,
        }
    }

    /// Get repository type from `REPOSITORY_TYPE` and `NODE_ENV`.
    pub fn from_env() -> Self {
        Self::resolve(
            std::env::var("REPOSITORY_TYPE").ok().as_deref(),
            std::env::var("NODE_ENV").ok().as_deref(),
        )
    }
}

/// Repository factory for creating repository instances.
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// # Arguments
    /// * `repo_type` - Type of repository to create
    /// * `storage_dir` - Directory for the filesystem backend (ignored for memory)
    pub fn create(repo_type: RepositoryType, storage_dir: &Path) -> Arc<dyn SharedRoundRepository> {
        match repo_type {
            RepositoryType::Filesystem => Self::create_filesystem(storage_dir),
            RepositoryType::Memory => Self::create_memory(),
        }
    }

    pub fn create_filesystem(storage_dir: &Path) -> Arc<dyn SharedRoundRepository> {
        Arc::new(FilesystemRepository::new(storage_dir))
    }

    pub fn create_memory() -> Arc<dyn SharedRoundRepository> {
        Arc::new(InMemoryRepository::new())
    }
}

/// Process-wide access point to the shared-round repository.
///
/// The repository is built lazily from the configured type and directory and
/// then reused. [`set_override`](Self::set_override) replaces it (for test
/// isolation) until [`reset`](Self::reset) is called.
pub struct RepositoryProvider {
    repo_type: RepositoryType,
    storage_dir: PathBuf,
    active: RwLock<Option<Arc<dyn SharedRoundRepository>>>,
}

impl RepositoryProvider {
    pub fn new(repo_type: RepositoryType, storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_type,
            storage_dir: storage_dir.into(),
            active: RwLock::new(None),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.repository_type, config.storage_dir.clone())
    }

    /// A provider that always hands out `repository`.
    pub fn fixed(repository: Arc<dyn SharedRoundRepository>) -> Self {
        let provider = Self::new(RepositoryType::Memory, PathBuf::new());
        provider.set_override(repository);
        provider
    }

    pub fn repository_type(&self) -> RepositoryType {
        self.repo_type
    }

    /// The active repository, creating it on first use.
    pub fn get(&self) -> Arc<dyn SharedRoundRepository> {
        if let Some(repository) = self.active.read().as_ref() {
            return Arc::clone(repository);
        }

        let mut active = self.active.write();
        let repository = active.get_or_insert_with(|| {
            info!(
                repository_type = ?self.repo_type,
                storage_dir = %self.storage_dir.display(),
                "Creating shared round repository"
            );
            RepositoryFactory::create(self.repo_type, &self.storage_dir)
        });
        Arc::clone(repository)
    }

    /// Replace the active repository.
    pub fn set_override(&self, repository: Arc<dyn SharedRoundRepository>) {
        *self.active.write() = Some(repository);
    }

    /// Drop the active repository; the next [`get`](Self::get) builds a fresh one.
    pub fn reset(&self) {
        *self.active.write() = None;
    }
}
