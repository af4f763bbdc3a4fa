//! Server configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use crate::db::factory::RepositoryType;
use crate::db::repo_config::RepositoryConfig;
use crate::db::repository::{RepositoryError, RepositoryResult};

/// Fallback public origin.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
/// Default directory for shared-round documents.
pub const DEFAULT_STORAGE_DIR: &str = "./data/rounds";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

/// Runtime configuration of the share server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Public origin used to build shared URLs, without a trailing slash.
    pub base_url: String,
    /// Directory of the filesystem backend.
    pub storage_dir: PathBuf,
    /// Backend used for shared rounds.
    pub repository_type: RepositoryType,
    pub host: String,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            repository_type: RepositoryType::Filesystem,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    /// Load the configuration from the process environment.
    ///
    /// # Environment Variables
    /// - `BASE_URL`: public origin (default: `http://localhost:3000`)
    /// - `ROUNDS_STORAGE_DIR`: filesystem backend directory (default: `./data/rounds`)
    /// - `REPOSITORY_TYPE`: `filesystem` or `memory`, overrides `NODE_ENV`
    /// - `NODE_ENV`: `test` selects the in-memory backend
    /// - `HOST`: bind host (default: 0.0.0.0)
    /// - `PORT`: bind port (default: 3000)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load the configuration from the environment and an optional `repository.toml`.
    ///
    /// The file pins the backend and its directory. `REPOSITORY_TYPE` and
    /// `ROUNDS_STORAGE_DIR` still take precedence over it, and it takes
    /// precedence over `NODE_ENV`.
    pub fn load() -> RepositoryResult<Self> {
        let file = RepositoryConfig::from_default_location()?;
        Self::from_sources(|key| env::var(key).ok(), file.as_ref())
    }

    /// Combine a variable source with an optional repository file.
    pub fn from_sources<F>(lookup: F, file: Option<&RepositoryConfig>) -> RepositoryResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let explicit_type = lookup("REPOSITORY_TYPE")
            .filter(|repo_type| repo_type.parse::<RepositoryType>().is_ok());
        let explicit_dir = lookup("ROUNDS_STORAGE_DIR").filter(|dir| !dir.trim().is_empty());
        let mut config = Self::from_lookup(&lookup);

        if let Some(file) = file {
            if explicit_type.is_none() {
                config.repository_type = file.repository_type().map_err(|e| {
                    RepositoryError::configuration(format!("Invalid repository type: {}", e))
                })?;
            }
            if explicit_dir.is_none() {
                config.storage_dir = file.filesystem.directory.clone();
            }
        }

        Ok(config)
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_dir = lookup("ROUNDS_STORAGE_DIR")
            .map(|dir| dir.trim().to_string())
            .filter(|dir| !dir.is_empty())
            .unwrap_or_else(|| DEFAULT_STORAGE_DIR.to_string());

        let repository_type = RepositoryType::resolve(
            lookup("REPOSITORY_TYPE").as_deref(),
            lookup("NODE_ENV").as_deref(),
        );

        Self {
            base_url: normalize_base_url(lookup("BASE_URL").as_deref()),
            storage_dir: PathBuf::from(storage_dir),
            repository_type,
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: lookup("PORT")
                .and_then(|port| port.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }

    /// Public URL of a shared round.
    pub fn shared_url(&self, round_id: &str) -> String {
        format!("{}/shared/{}", self.base_url, round_id)
    }

    /// URL of the embeddable view of a shared round.
    pub fn embed_url(&self, round_id: &str) -> String {
        format!("{}/embed/{}", self.base_url, round_id)
    }
}

/// Trim the configured origin and strip trailing slashes.
///
/// Unset, blank and slash-only values fall back to [`DEFAULT_BASE_URL`].
pub fn normalize_base_url(raw: Option<&str>) -> String {
    let trimmed = raw.unwrap_or("").trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}
