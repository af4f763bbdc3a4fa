//! Activity segmentation of a round's laps.

use serde::{Deserialize, Serialize};

use crate::models::{Lap, ACTIVITIES};

/// Measured duration of one activity, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityTime {
    pub name: String,
    pub time: i64,
    pub start_time: i64,
    pub end_time: i64,
}

fn lap_time(laps: &[Lap], lap_number: u32) -> Option<i64> {
    laps.iter()
        .find(|lap| lap.lap_number == lap_number)
        .map(|lap| lap.time)
}

/// Derive activity times from the recorded laps.
///
/// Activities are emitted in table order. An activity whose end lap has not
/// been recorded is skipped; a missing start lap counts as time 0.
pub fn calculate_activity_times(laps: &[Lap]) -> Vec<ActivityTime> {
    ACTIVITIES
        .iter()
        .filter_map(|activity| {
            let end_time = lap_time(laps, activity.end_index)?;
            let start_time = match activity.start_index {
                0 => 0,
                start => lap_time(laps, start).unwrap_or(0),
            };

            Some(ActivityTime {
                name: activity.name.to_string(),
                time: end_time - start_time,
                start_time,
                end_time,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn laps(times: &[i64]) -> Vec<Lap> {
        let now = Utc::now();
        times
            .iter()
            .enumerate()
            .map(|(i, &time)| Lap::new(i as u32 + 1, time, now))
            .collect()
    }

    #[test]
    fn test_empty_laps() {
        assert!(calculate_activity_times(&[]).is_empty());
    }

    #[test]
    fn test_single_lap() {
        let times = calculate_activity_times(&laps(&[30_000]));
        assert_eq!(times.len(), 1);
        assert_eq!(times[0].name, "Läufer 1");
        assert_eq!(times[0].time, 30_000);
        assert_eq!(times[0].start_time, 0);
    }

    #[test]
    fn test_missing_start_lap_counts_as_zero() {
        // Lap 3 missing: Schlauchrollen (3 -> 4) measures from 0.
        let now = Utc::now();
        let partial = vec![
            Lap::new(1, 10_000, now),
            Lap::new(2, 20_000, now),
            Lap::new(4, 40_000, now),
        ];
        let times = calculate_activity_times(&partial);
        let rollen = times.iter().find(|t| t.name == "Schlauchrollen").unwrap();
        assert_eq!(rollen.start_time, 0);
        assert_eq!(rollen.time, 40_000);
    }
}
