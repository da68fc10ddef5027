use tracing::debug;

use super::types::{ColumnKey, Day, SlotType};

/// Theory lecture hours and the grid column each one lands in.
///
/// This is the only copy of the lecture-hour to column offset. Lecture hour N
/// of a session maps to column N of the same session; the sixth column of
/// each session is lab-only.
const LECTURE_HOURS: [(&str, ColumnKey); 10] = [
    ("08:00", ColumnKey::Morning1),
    ("09:00", ColumnKey::Morning2),
    ("10:00", ColumnKey::Morning3),
    ("11:00", ColumnKey::Morning4),
    ("12:00", ColumnKey::Morning5),
    ("14:00", ColumnKey::Afternoon1),
    ("15:00", ColumnKey::Afternoon2),
    ("16:00", ColumnKey::Afternoon3),
    ("17:00", ColumnKey::Afternoon4),
    ("18:00", ColumnKey::Afternoon5),
];

/// Morning lecture hours in grid order
pub const MORNING_LECTURE_HOURS: [&str; 5] = ["08:00", "09:00", "10:00", "11:00", "12:00"];

/// Afternoon lecture hours in grid order
pub const AFTERNOON_LECTURE_HOURS: [&str; 5] = ["14:00", "15:00", "16:00", "17:00", "18:00"];

/// Maps one catalog occurrence to its canonical grid column.
///
/// Every occurrence, theory or lab, goes through here before it is compared
/// or placed. Returns `None` when the raw time has no column; the lunch
/// sentinel is never a valid target.
pub fn to_column_key(slot_type: SlotType, day: Day, raw_time: &str) -> Option<ColumnKey> {
    let raw_time = raw_time.trim();
    let column = match slot_type {
        SlotType::Theory => LECTURE_HOURS
            .iter()
            .find(|(hour, _)| *hour == raw_time)
            .map(|(_, column)| *column),
        SlotType::Lab => ColumnKey::from_key(raw_time).filter(|column| !column.is_lunch()),
    };

    if column.is_none() {
        debug!(%day, %slot_type, raw_time, "no grid column for occurrence");
    }
    column
}

/// Splits a "+"-joined slot combination into uppercase slot codes.
///
/// Empty components (e.g. from "A1++B1" or a trailing "+") are dropped;
/// order is preserved and duplicates are kept.
pub fn parse_slot_combination(combination: &str) -> Vec<String> {
    combination
        .split('+')
        .map(|part| part.trim().to_uppercase())
        .filter(|part| !part.is_empty())
        .collect()
}
