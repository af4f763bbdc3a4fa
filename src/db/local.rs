//! Client-side store for teams, rounds and settings.
//!
//! Records are kept as JSON documents in three namespaces and decoded on every
//! read, so instants written as strings or epoch milliseconds come back as
//! `DateTime<Utc>`. A store can live purely in memory or be backed by a JSON
//! snapshot file that is rewritten after each mutation.
//!
//! Every operation fails with [`RepositoryError::NotInitialized`] until
//! [`LocalStore::open`] has completed.

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use super::repository::{ErrorContext, RepositoryError, RepositoryResult};
use crate::models::{Round, Team};

pub const TEAMS_STORE: &str = "teams";
pub const ROUNDS_STORE: &str = "rounds";
pub const SETTINGS_STORE: &str = "settings";

/// Serialized content of all namespaces.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    teams: BTreeMap<String, Value>,
    #[serde(default)]
    rounds: BTreeMap<String, Value>,
    #[serde(default)]
    settings: BTreeMap<String, Value>,
}

pub struct LocalStore {
    data: RwLock<Option<Snapshot>>,
    path: Option<PathBuf>,
    /// Held from applying a mutation until its snapshot is committed.
    writer: Mutex<()>,
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

fn decode<T: DeserializeOwned>(store: &str, key: &str, value: &Value) -> RepositoryResult<T> {
    T::deserialize(value).map_err(|e| {
        RepositoryError::serialization_with_context(
            format!("Failed to decode record: {}", e),
            ErrorContext::new("read").with_entity(store).with_entity_id(key),
        )
    })
}

fn encode<T: Serialize>(store: &str, key: &str, record: &T) -> RepositoryResult<Value> {
    serde_json::to_value(record).map_err(|e| {
        RepositoryError::serialization_with_context(
            format!("Failed to encode record: {}", e),
            ErrorContext::new("write").with_entity(store).with_entity_id(key),
        )
    })
}

fn sort_rounds(rounds: &mut [Round]) {
    rounds.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
}

impl LocalStore {
    /// A store that keeps everything in memory. Still needs [`open`](Self::open).
    pub fn in_memory() -> Self {
        Self {
            data: RwLock::new(None),
            path: None,
            writer: Mutex::new(()),
        }
    }

    /// A store persisted to a JSON snapshot at `path`.
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self {
            data: RwLock::new(None),
            path: Some(path.into()),
            writer: Mutex::new(()),
        }
    }

    /// Create and open an in-memory store.
    pub async fn open_in_memory() -> RepositoryResult<Self> {
        let store = Self::in_memory();
        store.open().await?;
        Ok(store)
    }

    /// Create and open a store persisted at `path`.
    pub async fn open_file(path: impl Into<PathBuf>) -> RepositoryResult<Self> {
        let store = Self::with_file(path);
        store.open().await?;
        Ok(store)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.data.read().is_some()
    }

    /// Open the store, loading the snapshot file if there is one.
    pub async fn open(&self) -> RepositoryResult<()> {
        let snapshot = match &self.path {
            Some(path) => Self::load_snapshot(path).await?,
            None => Snapshot::default(),
        };

        info!(
            teams = snapshot.teams.len(),
            rounds = snapshot.rounds.len(),
            "Opened local store"
        );
        *self.data.write() = Some(snapshot);
        Ok(())
    }

    async fn load_snapshot(path: &Path) -> RepositoryResult<Snapshot> {
        let context = || ErrorContext::new("open").with_details(path.display().to_string());

        match tokio::fs::read_to_string(path).await {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                RepositoryError::serialization_with_context(
                    format!("Failed to parse local store snapshot: {}", e),
                    context(),
                )
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Snapshot::default()),
            Err(e) => Err(RepositoryError::io_with_context(
                format!("Failed to read local store snapshot: {}", e),
                context(),
            )),
        }
    }

    fn read<T>(&self, operation: &str, f: impl FnOnce(&Snapshot) -> T) -> RepositoryResult<T> {
        let guard = self.data.read();
        let snapshot = guard
            .as_ref()
            .ok_or_else(|| RepositoryError::not_initialized(operation))?;
        Ok(f(snapshot))
    }

    /// Apply a mutation and commit the result.
    ///
    /// Mutations run one at a time against a copy of the snapshot. The copy
    /// replaces the in-memory state only after it has been persisted, so a
    /// failed write leaves both memory and disk unchanged.
    async fn mutate<T>(
        &self,
        operation: &str,
        f: impl FnOnce(&mut Snapshot) -> RepositoryResult<T>,
    ) -> RepositoryResult<T> {
        let _writer = self.writer.lock().await;

        let mut next = self.read(operation, Snapshot::clone)?;
        let result = f(&mut next).map_err(|e| e.with_operation(operation))?;

        if let Some(path) = &self.path {
            Self::persist(path, &next, operation).await?;
        }

        *self.data.write() = Some(next);
        debug!(operation, "Local store updated");
        Ok(result)
    }

    /// Write the snapshot to a sibling temp file and rename it over `path`.
    async fn persist(path: &Path, snapshot: &Snapshot, operation: &str) -> RepositoryResult<()> {
        let context = || ErrorContext::new(operation).with_details(path.display().to_string());

        let bytes = serde_json::to_vec_pretty(snapshot).map_err(|e| {
            RepositoryError::serialization_with_context(
                format!("Failed to encode local store snapshot: {}", e),
                context(),
            )
        })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                RepositoryError::io_with_context(
                    format!("Failed to create local store directory: {}", e),
                    context(),
                )
            })?;
        }

        let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
        temp_name.push(".tmp");
        let temp_path = path.with_file_name(temp_name);

        tokio::fs::write(&temp_path, bytes).await.map_err(|e| {
            RepositoryError::io_with_context(
                format!("Failed to write local store snapshot: {}", e),
                context(),
            )
        })?;
        tokio::fs::rename(&temp_path, path).await.map_err(|e| {
            RepositoryError::io_with_context(
                format!("Failed to replace local store snapshot: {}", e),
                context(),
            )
        })
    }

    // ==================== Teams ====================

    /// All teams, oldest first.
    pub async fn get_all_teams(&self) -> RepositoryResult<Vec<Team>> {
        let values = self.read("get_all_teams", |s| s.teams.clone())?;
        let mut teams = values
            .iter()
            .map(|(key, value)| decode::<Team>(TEAMS_STORE, key, value))
            .collect::<RepositoryResult<Vec<_>>>()?;
        teams.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(teams)
    }

    pub async fn get_team(&self, id: Uuid) -> RepositoryResult<Option<Team>> {
        let key = id.to_string();
        let value = self.read("get_team", |s| s.teams.get(&key).cloned())?;
        value
            .map(|value| decode(TEAMS_STORE, &key, &value))
            .transpose()
    }

    /// Insert or replace a team.
    pub async fn save_team(&self, team: &Team) -> RepositoryResult<()> {
        let key = team.id.to_string();
        let value = encode(TEAMS_STORE, &key, team)?;
        self.mutate("save_team", |s| {
            s.teams.insert(key, value);
            Ok(())
        })
        .await
    }

    /// Delete a team together with all of its rounds.
    ///
    /// The last remaining team cannot be deleted. Unknown ids are a no-op.
    pub async fn delete_team(&self, id: Uuid) -> RepositoryResult<()> {
        let key = id.to_string();
        self.mutate("delete_team", |s| {
            if !s.teams.contains_key(&key) {
                return Ok(());
            }
            if s.teams.len() == 1 {
                return Err(RepositoryError::validation_with_context(
                    "Cannot delete the last team",
                    ErrorContext::default().with_entity(TEAMS_STORE).with_entity_id(&key),
                ));
            }

            s.teams.remove(&key);
            s.rounds.retain(|_, round| {
                round.get("teamId").and_then(Value::as_str) != Some(key.as_str())
            });
            Ok(())
        })
        .await
    }

    // ==================== Rounds ====================

    /// All rounds, most recently completed first.
    pub async fn get_all_rounds(&self) -> RepositoryResult<Vec<Round>> {
        let values = self.read("get_all_rounds", |s| s.rounds.clone())?;
        let mut rounds = values
            .iter()
            .map(|(key, value)| decode::<Round>(ROUNDS_STORE, key, value))
            .collect::<RepositoryResult<Vec<_>>>()?;
        sort_rounds(&mut rounds);
        Ok(rounds)
    }

    /// Rounds of one team, most recently completed first.
    pub async fn get_rounds_by_team(&self, team_id: Uuid) -> RepositoryResult<Vec<Round>> {
        let mut rounds = self
            .get_all_rounds()
            .await
            .map_err(|e| e.with_operation("get_rounds_by_team"))?;
        rounds.retain(|round| round.team_id == team_id);
        Ok(rounds)
    }

    pub async fn get_round(&self, id: Uuid) -> RepositoryResult<Option<Round>> {
        let key = id.to_string();
        let value = self.read("get_round", |s| s.rounds.get(&key).cloned())?;
        value
            .map(|value| decode(ROUNDS_STORE, &key, &value))
            .transpose()
    }

    /// The team's latest round, the baseline for comparisons.
    pub async fn get_latest_round(&self, team_id: Uuid) -> RepositoryResult<Option<Round>> {
        let rounds = self.get_rounds_by_team(team_id).await?;
        Ok(rounds.into_iter().next())
    }

    /// Insert or replace a round.
    pub async fn save_round(&self, round: &Round) -> RepositoryResult<()> {
        let key = round.id.to_string();
        let value = encode(ROUNDS_STORE, &key, round)?;
        self.mutate("save_round", |s| {
            s.rounds.insert(key, value);
            Ok(())
        })
        .await
    }

    pub async fn delete_round(&self, id: Uuid) -> RepositoryResult<()> {
        let key = id.to_string();
        self.mutate("delete_round", |s| {
            s.rounds.remove(&key);
            Ok(())
        })
        .await
    }

    pub async fn clear_all_rounds(&self) -> RepositoryResult<()> {
        self.mutate("clear_all_rounds", |s| {
            s.rounds.clear();
            Ok(())
        })
        .await
    }

    // ==================== Settings ====================

    pub async fn get_setting<T: DeserializeOwned>(&self, key: &str) -> RepositoryResult<Option<T>> {
        let value = self.read("get_setting", |s| s.settings.get(key).cloned())?;
        value
            .map(|value| decode(SETTINGS_STORE, key, &value))
            .transpose()
    }

    pub async fn set_setting<T: Serialize>(&self, key: &str, value: &T) -> RepositoryResult<()> {
        let value = encode(SETTINGS_STORE, key, value)?;
        let key = key.to_string();
        self.mutate("set_setting", |s| {
            s.settings.insert(key, value);
            Ok(())
        })
        .await
    }
}
