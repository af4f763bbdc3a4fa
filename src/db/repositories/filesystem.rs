//! Filesystem-backed shared-round repository.
//!
//! Each round is one pretty-printed JSON document at `{directory}/{id}.json`.
//! The id ends up in a path, so it must be a canonical RFC 4122 UUID; anything
//! else is rejected before a path is even built.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::db::repository::{
    ErrorContext, RepositoryError, RepositoryResult, SharedRoundRepository,
};
use crate::models::SharedRoundData;

static ROUND_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .expect("round id pattern is valid")
});

const ENTITY: &str = "shared_round";

/// Reject anything that is not a version 1-5 UUID.
pub fn validate_round_id(id: &str, operation: &str) -> RepositoryResult<()> {
    if ROUND_ID_PATTERN.is_match(id) {
        return Ok(());
    }
    warn!(operation, id = %id.escape_debug(), "Rejected shared round id");
    Err(RepositoryError::validation_with_context(
        "Invalid round ID: potential path traversal",
        ErrorContext::new(operation).with_entity(ENTITY),
    ))
}

/// The file operations the repository needs.
///
/// Abstracted so tests can observe that rejected ids never reach the disk.
#[async_trait]
pub trait FileSystem: Send + Sync {
    async fn create_dir_all(&self, path: &Path) -> io::Result<()>;
    async fn read_to_string(&self, path: &Path) -> io::Result<String>;
    async fn write(&self, path: &Path, contents: Vec<u8>) -> io::Result<()>;
}

/// [`FileSystem`] on top of `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileSystem;

#[async_trait]
impl FileSystem for TokioFileSystem {
    async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        tokio::fs::create_dir_all(path).await
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }

    async fn write(&self, path: &Path, contents: Vec<u8>) -> io::Result<()> {
        tokio::fs::write(path, contents).await
    }
}

pub struct FilesystemRepository<F = TokioFileSystem> {
    directory: PathBuf,
    fs: F,
}

impl FilesystemRepository<TokioFileSystem> {
    /// Create a repository writing into `directory`. The directory is created on first write.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self::with_file_system(directory, TokioFileSystem)
    }
}

impl<F: FileSystem> FilesystemRepository<F> {
    pub fn with_file_system(directory: impl Into<PathBuf>, fs: F) -> Self {
        Self {
            directory: directory.into(),
            fs,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the document for an already validated id.
    fn document_path(&self, id: &str) -> PathBuf {
        self.directory.join(format!("{}.json", id))
    }
}

#[async_trait]
impl<F: FileSystem> SharedRoundRepository for FilesystemRepository<F> {
    async fn health_check(&self) -> RepositoryResult<bool> {
        match self.fs.create_dir_all(&self.directory).await {
            Ok(()) => Ok(true),
            Err(e) => {
                warn!(directory = %self.directory.display(), error = %e, "Storage directory unavailable");
                Ok(false)
            }
        }
    }

    async fn store(&self, data: &SharedRoundData) -> RepositoryResult<()> {
        const OPERATION: &str = "store_shared_round";
        validate_round_id(&data.id, OPERATION)?;

        let context = || ErrorContext::new(OPERATION).with_entity(ENTITY).with_entity_id(&data.id);

        self.fs.create_dir_all(&self.directory).await.map_err(|e| {
            RepositoryError::io_with_context(
                format!("Failed to create storage directory: {}", e),
                context(),
            )
        })?;

        let json = serde_json::to_vec_pretty(data).map_err(|e| {
            RepositoryError::serialization_with_context(
                format!("Failed to encode shared round: {}", e),
                context(),
            )
        })?;

        let path = self.document_path(&data.id);
        self.fs.write(&path, json).await.map_err(|e| {
            RepositoryError::io_with_context(format!("Failed to store shared round: {}", e), context())
        })?;

        debug!(id = %data.id, path = %path.display(), "Stored shared round");
        Ok(())
    }

    async fn retrieve(&self, id: &str) -> RepositoryResult<Option<SharedRoundData>> {
        const OPERATION: &str = "retrieve_shared_round";
        validate_round_id(id, OPERATION)?;

        let context = || ErrorContext::new(OPERATION).with_entity(ENTITY).with_entity_id(id);

        let content = match self.fs.read_to_string(&self.document_path(id)).await {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(RepositoryError::io_with_context(
                    format!("Failed to retrieve shared round: {}", e),
                    context(),
                ))
            }
        };

        serde_json::from_str(&content).map(Some).map_err(|e| {
            RepositoryError::serialization_with_context(
                "Failed to retrieve shared round",
                context().with_details(e.to_string()),
            )
        })
    }
}
