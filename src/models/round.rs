//! Rounds, laps and the public shared-round record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::timestamp;

/// Maximum number of laps in a round. Recording the last one finishes the round.
pub const MAX_LAPS: usize = 13;

/// A single checkpoint of a round.
///
/// `time` is cumulative from the start signal, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lap {
    pub lap_number: u32,
    pub time: i64,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl Lap {
    pub fn new(lap_number: u32, time: i64, timestamp: DateTime<Utc>) -> Self {
        Self {
            lap_number,
            time,
            timestamp,
        }
    }
}

/// Judge-entered values feeding the score formula. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringInputs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a_part_error_points: Option<f64>,
    /// Knot task duration in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knot_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a_part_penalty_seconds: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b_part_error_points: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_impression: Option<f64>,
}

/// A completed, timed attempt of one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub id: Uuid,
    #[serde(with = "timestamp")]
    pub completed_at: DateTime<Utc>,
    pub total_time: i64,
    pub laps: Vec<Lap>,
    pub team_id: Uuid,
    pub team_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub scoring: ScoringInputs,
}

impl Round {
    /// Whether the round has been published. Edits are locked in the UI afterwards.
    pub fn is_shared(&self) -> bool {
        self.shared_url.is_some()
    }

    /// Total time in seconds, used as the B-part run time.
    pub fn total_seconds(&self) -> f64 {
        self.total_time as f64 / 1000.0
    }

    /// Build the public record for this round.
    pub fn to_shared(&self, team_average_age: Option<f64>) -> SharedRoundData {
        SharedRoundData {
            id: self.id.to_string(),
            completed_at: self.completed_at,
            total_time: self.total_time,
            laps: self.laps.clone(),
            team_name: self.team_name.clone(),
            description: self.description.clone(),
            scoring: self.scoring.clone(),
            team_average_age,
        }
    }
}

/// The subset of a round exposed at its public URL.
///
/// `id` stays a string here: it comes straight from request payloads and is
/// validated by the storage backend before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedRoundData {
    pub id: String,
    #[serde(with = "timestamp")]
    pub completed_at: DateTime<Utc>,
    pub total_time: i64,
    pub laps: Vec<Lap>,
    pub team_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub scoring: ScoringInputs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_average_age: Option<f64>,
}
