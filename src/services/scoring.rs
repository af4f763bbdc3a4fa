//! Competition score formula.
//!
//! The score has two independently judged parts. Each part is only computed
//! when all of its inputs are present; otherwise it is [`Score::Insufficient`].
//! Missing inputs are the normal state while judges are still entering values,
//! so nothing here returns an error.

use serde::Serialize;

use crate::models::{Round, ScoringInputs};

/// Starting points of the A-part (knot task).
pub const A_PART_BASE_POINTS: f64 = 1000.0;
/// Starting points of the B-part (relay run).
pub const B_PART_BASE_POINTS: f64 = 400.0;
/// Target time for an average age of zero, in seconds.
const TARGET_TIME_BASE_SECONDS: f64 = 210.0;
/// Seconds removed from the target time per year of average age.
const TARGET_TIME_SECONDS_PER_YEAR: f64 = 5.0;

/// Either a computed score with its audit breakdown, or a marker that inputs are missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Score<B> {
    Computed { points: f64, breakdown: B },
    Insufficient,
}

impl<B> Score<B> {
    pub fn points(&self) -> Option<f64> {
        match self {
            Self::Computed { points, .. } => Some(*points),
            Self::Insufficient => None,
        }
    }

    pub fn breakdown(&self) -> Option<&B> {
        match self {
            Self::Computed { breakdown, .. } => Some(breakdown),
            Self::Insufficient => None,
        }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, Self::Computed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct APartBreakdown {
    pub base_points: f64,
    pub knot_time_deduction: f64,
    pub penalty_seconds_deduction: f64,
    pub error_points_deduction: f64,
    pub final_points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BPartBreakdown {
    pub base_points: f64,
    /// Target time in seconds.
    pub target_time: f64,
    /// Run time minus target time, in seconds.
    pub time_difference: f64,
    /// Bonus (positive) or penalty (negative) for the run time.
    pub time_points: f64,
    pub error_points_deduction: f64,
    pub final_points: f64,
}

/// Inputs of the B-part.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BPartInputs {
    /// Run time in seconds.
    pub b_part_time: Option<f64>,
    pub team_average_age: Option<f64>,
    pub b_part_error_points: Option<f64>,
}

/// Both parts plus the combined total.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalScore {
    pub a_part: Score<APartBreakdown>,
    pub b_part: Score<BPartBreakdown>,
    pub overall_impression_deduction: f64,
    pub total_points: Option<f64>,
    pub can_calculate: bool,
}

/// A-part: `max(0, 1000 - knot time - penalty seconds - error points)`.
pub fn calculate_a_part_points(inputs: &ScoringInputs) -> Score<APartBreakdown> {
    let (Some(knot_time), Some(penalty_seconds), Some(error_points)) = (
        inputs.knot_time,
        inputs.a_part_penalty_seconds,
        inputs.a_part_error_points,
    ) else {
        return Score::Insufficient;
    };

    let final_points = (A_PART_BASE_POINTS - knot_time - penalty_seconds - error_points).max(0.0);

    Score::Computed {
        points: final_points,
        breakdown: APartBreakdown {
            base_points: A_PART_BASE_POINTS,
            knot_time_deduction: knot_time,
            penalty_seconds_deduction: penalty_seconds,
            error_points_deduction: error_points,
            final_points,
        },
    }
}

/// Target time (Sollzeit) in milliseconds for a team's average age.
///
/// The age is not range checked; implausible ages give implausible targets.
pub fn calculate_target_time_ms(average_age: Option<f64>) -> Option<f64> {
    average_age.map(|age| (TARGET_TIME_BASE_SECONDS - age * TARGET_TIME_SECONDS_PER_YEAR) * 1000.0)
}

/// B-part: `max(0, 400 + (target - run time) - error points)`.
///
/// Every second under the target is a bonus point, without a cap.
pub fn calculate_b_part_points(inputs: &BPartInputs) -> Score<BPartBreakdown> {
    let (Some(b_part_time), Some(error_points)) = (inputs.b_part_time, inputs.b_part_error_points)
    else {
        return Score::Insufficient;
    };
    let Some(target_time_ms) = calculate_target_time_ms(inputs.team_average_age) else {
        return Score::Insufficient;
    };

    let target_time = target_time_ms / 1000.0;
    let time_difference = b_part_time - target_time;
    let time_points = -time_difference;
    let final_points = (B_PART_BASE_POINTS + time_points - error_points).max(0.0);

    Score::Computed {
        points: final_points,
        breakdown: BPartBreakdown {
            base_points: B_PART_BASE_POINTS,
            target_time,
            time_difference,
            time_points,
            error_points_deduction: error_points,
            final_points,
        },
    }
}

/// Combine both parts and subtract the overall impression.
///
/// Only the two parts gate the total; a missing overall impression counts as 0.
/// The total is not floored and may carry a decimal.
pub fn calculate_total_score(inputs: &ScoringInputs, b_part: &BPartInputs) -> TotalScore {
    let a_part = calculate_a_part_points(inputs);
    let b_part = calculate_b_part_points(b_part);
    let overall_impression_deduction = inputs.overall_impression.unwrap_or(0.0);

    let total_points = match (a_part.points(), b_part.points()) {
        (Some(a), Some(b)) => Some(a + b - overall_impression_deduction),
        _ => None,
    };

    TotalScore {
        can_calculate: total_points.is_some(),
        a_part,
        b_part,
        overall_impression_deduction,
        total_points,
    }
}

/// Score a finished round. The round's total time is the B-part run time.
pub fn score_round(round: &Round, team_average_age: Option<f64>) -> TotalScore {
    let b_part = BPartInputs {
        b_part_time: Some(round.total_seconds()),
        team_average_age,
        b_part_error_points: round.scoring.b_part_error_points,
    };
    calculate_total_score(&round.scoring, &b_part)
}

/// Render points for display: `-` when not computable.
pub fn format_points(points: Option<f64>) -> String {
    match points {
        Some(points) => points.to_string(),
        None => "-".to_string(),
    }
}
