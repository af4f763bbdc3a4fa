#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::HashSet;
use std::sync::Mutex;
use uuid::Uuid;

use wettkampf_timer::models::{Lap, Round, ScoringInputs, SharedRoundData, Team};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Cumulative lap times of a complete reference round, in milliseconds.
pub const CANONICAL_LAP_TIMES: [i64; 13] = [
    10_000, 20_000, 25_000, 40_000, 45_000, 55_000, 70_000, 80_000, 90_000, 100_000, 115_000,
    125_000, 135_000,
];

pub const ROUND_ID: &str = "3f2b8c1e-9a4d-4e6f-8b7a-1c2d3e4f5a6b";

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the previous values on unwind and serializes access to the
/// process environment across parallel tests.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
}

pub fn laps_from(times: &[i64]) -> Vec<Lap> {
    let start = start_time();
    times
        .iter()
        .enumerate()
        .map(|(i, &time)| Lap::new(i as u32 + 1, time, start + Duration::milliseconds(time)))
        .collect()
}

pub fn canonical_laps() -> Vec<Lap> {
    laps_from(&CANONICAL_LAP_TIMES)
}

pub fn team(name: &str, created_offset_days: i64) -> Team {
    Team::new(name, "#dc2626", start_time() + Duration::days(created_offset_days))
}

pub fn round_for(team: &Team, times: &[i64], completed_offset_minutes: i64) -> Round {
    Round {
        id: Uuid::new_v4(),
        completed_at: start_time() + Duration::minutes(completed_offset_minutes),
        total_time: times.last().copied().unwrap_or(0),
        laps: laps_from(times),
        team_id: team.id,
        team_name: team.name.clone(),
        shared_url: None,
        description: None,
        scoring: ScoringInputs::default(),
    }
}

pub fn shared_round(id: &str) -> SharedRoundData {
    SharedRoundData {
        id: id.to_string(),
        completed_at: start_time() + Duration::milliseconds(135_000),
        total_time: 135_000,
        laps: canonical_laps(),
        team_name: "Löschzwerge".to_string(),
        description: None,
        scoring: ScoringInputs {
            knot_time: Some(28.5),
            a_part_penalty_seconds: Some(0.0),
            a_part_error_points: Some(5.0),
            ..Default::default()
        },
        team_average_age: Some(12.0),
    }
}
