//! Domain logic for timing, comparing and scoring rounds.
//!
//! Everything here is pure computation over the models, apart from
//! [`team_context`] which reads and writes the local store.

pub mod activities;
pub mod compare;
pub mod recorder;
pub mod scoring;
pub mod team_context;
pub mod time_format;



pub use activities::{calculate_activity_times, ActivityTime};
pub use compare::{compare_rounds, ActivityDiff, RoundComparison, RoundTimes};
pub use recorder::{LapRecorder, RecorderError, TimerState};
pub use scoring::{
    calculate_a_part_points, calculate_b_part_points, calculate_target_time_ms,
    calculate_total_score, format_points, score_round, APartBreakdown, BPartBreakdown,
    BPartInputs, Score, TotalScore,
};
pub use team_context::TeamContext;
pub use time_format::{format_time, format_time_str, parse_time, TimeFormat};
