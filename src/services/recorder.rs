//! Lap recording state machine.
//!
//! The UI owns the clock and passes elapsed milliseconds in; this type only
//! enforces the ordering rules and builds the finished [`Round`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Lap, Round, ScoringInputs, Team, MAX_LAPS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimerState {
    Idle,
    Running,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecorderError {
    #[error("Timer is not running")]
    NotRunning,
    #[error("Timer is already running")]
    AlreadyRunning,
    #[error("Round is not finished")]
    NotFinished,
    #[error("Elapsed time {attempted} ms is before the last lap at {previous} ms")]
    NonMonotonic { previous: i64, attempted: i64 },
}

#[derive(Debug, Clone)]
pub struct LapRecorder {
    state: TimerState,
    laps: Vec<Lap>,
    total_time: Option<i64>,
}

impl Default for LapRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl LapRecorder {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
            laps: Vec::with_capacity(MAX_LAPS),
            total_time: None,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    pub fn total_time(&self) -> Option<i64> {
        self.total_time
    }

    pub fn is_finished(&self) -> bool {
        self.state == TimerState::Finished
    }

    pub fn start(&mut self) -> Result<(), RecorderError> {
        match self.state {
            TimerState::Idle => {
                self.state = TimerState::Running;
                Ok(())
            }
            TimerState::Running => Err(RecorderError::AlreadyRunning),
            TimerState::Finished => Err(RecorderError::NotRunning),
        }
    }

    fn check_elapsed(&self, elapsed_ms: i64) -> Result<(), RecorderError> {
        match self.laps.last() {
            Some(last) if elapsed_ms < last.time => Err(RecorderError::NonMonotonic {
                previous: last.time,
                attempted: elapsed_ms,
            }),
            _ => Ok(()),
        }
    }

    /// Record the next lap. The lap that reaches [`MAX_LAPS`] finishes the round.
    pub fn record_lap(
        &mut self,
        elapsed_ms: i64,
        timestamp: DateTime<Utc>,
    ) -> Result<TimerState, RecorderError> {
        if self.state != TimerState::Running {
            return Err(RecorderError::NotRunning);
        }
        self.check_elapsed(elapsed_ms)?;

        let lap_number = self.laps.len() as u32 + 1;
        self.laps.push(Lap::new(lap_number, elapsed_ms, timestamp));

        if self.laps.len() == MAX_LAPS {
            self.total_time = Some(elapsed_ms);
            self.state = TimerState::Finished;
        }
        Ok(self.state)
    }

    /// Stop the timer before all laps are recorded.
    pub fn finish(&mut self, elapsed_ms: i64) -> Result<(), RecorderError> {
        if self.state != TimerState::Running {
            return Err(RecorderError::NotRunning);
        }
        self.check_elapsed(elapsed_ms)?;

        self.total_time = Some(elapsed_ms);
        self.state = TimerState::Finished;
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Build the round for `team`. Only valid once finished.
    pub fn to_round(&self, team: &Team, completed_at: DateTime<Utc>) -> Result<Round, RecorderError> {
        let total_time = match (self.state, self.total_time) {
            (TimerState::Finished, Some(total_time)) => total_time,
            _ => return Err(RecorderError::NotFinished),
        };

        Ok(Round {
            id: Uuid::new_v4(),
            completed_at,
            total_time,
            laps: self.laps.clone(),
            team_id: team.id,
            team_name: team.name.clone(),
            shared_url: None,
            description: None,
            scoring: ScoringInputs::default(),
        })
    }
}
