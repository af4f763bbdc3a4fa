//! Round-to-round comparison.

use serde::{Deserialize, Serialize};

use super::activities::calculate_activity_times;
use crate::models::{Lap, Round};

/// The timing data of a round that may still be in progress.
#[derive(Debug, Clone, Copy)]
pub struct RoundTimes<'a> {
    pub total_time: i64,
    pub laps: &'a [Lap],
}

impl<'a> From<&'a Round> for RoundTimes<'a> {
    fn from(round: &'a Round) -> Self {
        Self {
            total_time: round.total_time,
            laps: &round.laps,
        }
    }
}

/// Difference for one activity. Negative `diff` means the current round was faster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDiff {
    pub name: String,
    pub current_time: i64,
    pub previous_time: i64,
    pub diff: i64,
    pub is_faster: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundComparison {
    pub total_time_diff: i64,
    pub is_faster_overall: bool,
    /// Activities measured in both rounds, in table order.
    pub activities: Vec<ActivityDiff>,
}

impl RoundComparison {
    pub fn activity(&self, name: &str) -> Option<&ActivityDiff> {
        self.activities.iter().find(|diff| diff.name == name)
    }

    /// Total-time difference to display.
    ///
    /// A running total is not comparable to a finished one, so nothing is
    /// shown until the current round is finished.
    pub fn visible_total_diff(&self, current_finished: bool) -> Option<i64> {
        current_finished.then_some(self.total_time_diff)
    }
}

/// Compare the current round against the team's previous round.
///
/// Returns `None` when there is no previous round. Activities measured in
/// only one of the two rounds are left out.
pub fn compare_rounds(current: RoundTimes<'_>, previous: Option<&Round>) -> Option<RoundComparison> {
    let previous = previous?;

    let total_time_diff = current.total_time - previous.total_time;
    let previous_times = calculate_activity_times(&previous.laps);

    let activities = calculate_activity_times(current.laps)
        .into_iter()
        .filter_map(|current_activity| {
            let previous_activity = previous_times
                .iter()
                .find(|candidate| candidate.name == current_activity.name)?;
            let diff = current_activity.time - previous_activity.time;

            Some(ActivityDiff {
                name: current_activity.name,
                current_time: current_activity.time,
                previous_time: previous_activity.time,
                diff,
                is_faster: diff < 0,
            })
        })
        .collect();

    Some(RoundComparison {
        total_time_diff,
        is_faster_overall: total_time_diff < 0,
        activities,
    })
}
