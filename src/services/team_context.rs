//! The currently selected team.
//!
//! The selection is stored under the `selectedTeamId` setting so it survives
//! restarts. A store without teams gets a default team on load.

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::{ErrorContext, LocalStore, RepositoryError, RepositoryResult};
use crate::models::{Team, DEFAULT_TEAM_COLOR};

/// Settings key holding the selected team id.
pub const SELECTED_TEAM_SETTING: &str = "selectedTeamId";
/// Name of the team created for an empty store.
pub const DEFAULT_TEAM_NAME: &str = "Team 1";

#[derive(Debug, Clone)]
pub struct TeamContext {
    teams: Vec<Team>,
    selected: Uuid,
}

impl TeamContext {
    /// Load teams and the persisted selection.
    ///
    /// Falls back to the oldest team when the stored selection is missing or
    /// points at a deleted team.
    pub async fn load(store: &LocalStore) -> RepositoryResult<Self> {
        let mut teams = store.get_all_teams().await?;
        if teams.is_empty() {
            let team = Team::new(DEFAULT_TEAM_NAME, DEFAULT_TEAM_COLOR, Utc::now());
            info!(team_id = %team.id, "Creating default team");
            store.save_team(&team).await?;
            teams.push(team);
        }

        let stored = store.get_setting::<Uuid>(SELECTED_TEAM_SETTING).await?;
        let selected = match stored {
            Some(id) if teams.iter().any(|t| t.id == id) => id,
            other => {
                if let Some(id) = other {
                    warn!(team_id = %id, "Selected team no longer exists");
                }
                let id = teams[0].id;
                store.set_setting(SELECTED_TEAM_SETTING, &id).await?;
                id
            }
        };

        Ok(Self { teams, selected })
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn selected(&self) -> &Team {
        self.teams
            .iter()
            .find(|t| t.id == self.selected)
            .unwrap_or(&self.teams[0])
    }

    /// Switch to another known team and persist the choice.
    pub async fn select(&mut self, store: &LocalStore, id: Uuid) -> RepositoryResult<&Team> {
        if !self.teams.iter().any(|t| t.id == id) {
            return Err(RepositoryError::not_found_with_context(
                "Unknown team",
                ErrorContext::new("select_team")
                    .with_entity("teams")
                    .with_entity_id(id),
            ));
        }

        store.set_setting(SELECTED_TEAM_SETTING, &id).await?;
        self.selected = id;
        Ok(self.selected())
    }

    /// Re-read teams after they were edited elsewhere.
    pub async fn refresh(&mut self, store: &LocalStore) -> RepositoryResult<()> {
        *self = Self::load(store).await?;
        Ok(())
    }
}
