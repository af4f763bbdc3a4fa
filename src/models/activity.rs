//! The fixed lap-to-activity table of the competition run.

use serde::Serialize;

/// A named span of the run, measured between two lap marks.
///
/// `start_index` 0 means the start signal. Several activities share a start
/// lap, so their intervals overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub name: &'static str,
    pub start_index: u32,
    pub end_index: u32,
}

impl Activity {
    const fn new(name: &'static str, start_index: u32, end_index: u32) -> Self {
        Self {
            name,
            start_index,
            end_index,
        }
    }
}

/// Activities in display order. End indices never exceed the 13 laps of a run.
pub const ACTIVITIES: [Activity; 12] = [
    Activity::new("Läufer 1", 0, 1),
    Activity::new("Läufer 2", 1, 2),
    Activity::new("Schlauchrollen", 3, 4),
    Activity::new("Läufer 3", 2, 5),
    Activity::new("Läufer 4", 5, 6),
    Activity::new("Läufer 5", 6, 7),
    Activity::new("Läufer 6", 7, 8),
    Activity::new("Läufer 7", 8, 9),
    Activity::new("Leinenbeutel", 9, 10),
    Activity::new("Kuppeln", 10, 11),
    Activity::new("Läufer 8", 10, 12),
    Activity::new("Läufer 9", 12, 13),
];

/// Look up an activity by its display name.
pub fn find_activity(name: &str) -> Option<&'static Activity> {
    ACTIVITIES.iter().find(|activity| activity.name == name)
}
