//! Repository configuration file support.
//!
//! An optional `repository.toml` can pin the shared-round backend instead of
//! relying on environment variables.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::factory::RepositoryType;
use super::repository::RepositoryError;
use crate::config::DEFAULT_STORAGE_DIR;

/// Repository configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub repository: RepositorySettings,
    #[serde(default)]
    pub filesystem: FilesystemSettings,
}

/// Repository type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type")]
    pub repo_type: String,
}

/// Filesystem backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesystemSettings {
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
}

impl Default for FilesystemSettings {
    fn default() -> Self {
        Self {
            directory: default_directory(),
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from(DEFAULT_STORAGE_DIR)
}

impl RepositoryConfig {
    /// Load repository configuration from a TOML file.
    ///
    /// # Returns
    /// * `Ok(RepositoryConfig)` if successful
    /// * `Err(RepositoryError)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!("Failed to read config file: {}", e))
        })?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, RepositoryError> {
        toml::from_str(content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })
    }

    /// Load repository configuration from the default location.
    ///
    /// Searches for `repository.toml` in the current and parent directory.
    /// Returns `Ok(None)` when there is no such file.
    pub fn from_default_location() -> Result<Option<Self>, RepositoryError> {
        let search_paths = [
            PathBuf::from("repository.toml"),
            PathBuf::from("../repository.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path).map(Some);
            }
        }

        Ok(None)
    }

    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> Result<RepositoryType, String> {
        RepositoryType::from_str(&self.repository.repo_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_memory_config() {
        let toml = r#"
[repository]
type = "memory"
"#;

        let config = RepositoryConfig::from_toml(toml).unwrap();
        assert_eq!(config.repository.repo_type, "memory");
        assert_eq!(config.repository_type().unwrap(), RepositoryType::Memory);
        assert_eq!(config.filesystem.directory, PathBuf::from(DEFAULT_STORAGE_DIR));
    }

    #[test]
    fn test_parse_filesystem_config() {
        let toml = r#"
[repository]
type = "filesystem"

[filesystem]
directory = "/srv/timer/rounds"
"#;

        let config = RepositoryConfig::from_toml(toml).unwrap();
        assert_eq!(config.repository_type().unwrap(), RepositoryType::Filesystem);
        assert_eq!(config.filesystem.directory, PathBuf::from("/srv/timer/rounds"));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("repository.toml");
        std::fs::write(&path, "[repository]\ntype = \"fs\"\n").unwrap();

        let config = RepositoryConfig::from_file(&path).unwrap();
        assert_eq!(config.repository_type().unwrap(), RepositoryType::Filesystem);

        let missing = RepositoryConfig::from_file(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, RepositoryError::ConfigurationError { .. }));
    }

    #[test]
    fn test_rejects_unknown_type_and_bad_toml() {
        let config = RepositoryConfig::from_toml("[repository]\ntype = \"postgres\"\n").unwrap();
        assert!(config.repository_type().is_err());

        assert!(RepositoryConfig::from_toml("[repository").is_err());
    }
}
