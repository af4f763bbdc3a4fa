use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::timestamp;

/// Colour given to teams created without one.
pub const DEFAULT_TEAM_COLOR: &str = "#dc2626";

/// A competing group. `average_age` drives the B-part target time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_age: Option<f64>,
}

impl Team {
    /// Create a team with a fresh id.
    pub fn new(name: impl Into<String>, color: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color: color.into(),
            created_at,
            average_age: None,
        }
    }

    pub fn with_average_age(mut self, average_age: f64) -> Self {
        self.average_age = Some(average_age);
        self
    }
}
