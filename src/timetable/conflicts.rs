use std::collections::{BTreeMap, HashSet};

use tracing::{debug, warn};

use super::catalog::resolve_slot;
use super::normalizer::{parse_slot_combination, to_column_key};
use super::types::{ColumnKey, ConflictRecord, Day, OccupancyRecord};
use crate::registration::CourseRegistration;

/// Occupancy of one registration plus the components that resolved to nothing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    pub records: Vec<OccupancyRecord>,
    /// Unknown slot codes, and codes with an occurrence that has no column
    pub unresolved: Vec<String>,
    /// Records landing on a cell already taken by another slot of the same
    /// course, e.g. L1 in "A1+L1". They stay in `records` too.
    pub self_overlaps: Vec<OccupancyRecord>,
}

/// Expands a registration's slot combination into grid occupancy.
///
/// Unresolved components contribute no records. That means a mistyped code
/// never schedules and never conflicts; they are reported in `unresolved`
/// so callers can warn about it.
pub fn expand_registration(registration: &CourseRegistration) -> Expansion {
    let mut expansion = Expansion::default();
    let mut taken: BTreeMap<(Day, ColumnKey), String> = BTreeMap::new();

    for code in parse_slot_combination(&registration.slot_combination) {
        let Some(slot) = resolve_slot(&code) else {
            expansion.unresolved.push(code);
            continue;
        };

        let mut complete = true;
        for (day, raw_time) in &slot.occurrences {
            let Some(column) = to_column_key(slot.slot_type, *day, raw_time) else {
                complete = false;
                continue;
            };
            let record = OccupancyRecord {
                course: registration.id,
                course_number: registration.course_number,
                slot_code: slot.code.clone(),
                slot_type: slot.slot_type,
                day: *day,
                column,
            };
            let owner = taken.entry((*day, column)).or_insert_with(|| slot.code.clone());
            if *owner != slot.code {
                expansion.self_overlaps.push(record.clone());
            }
            expansion.records.push(record);
        }
        if !complete {
            expansion.unresolved.push(code);
        }
    }

    expansion
}

/// Reports every pair of courses that share a (day, column), whatever their
/// slot types.
///
/// There is one record per (course pair, day, column) even when a course
/// reaches the cell through more than one of its slots; the lowest-ordered
/// pair of records is kept. Registrations still being edited are skipped.
/// The order of the result is not significant.
pub fn detect_conflicts(registrations: &[CourseRegistration]) -> Vec<ConflictRecord> {
    let mut cells: BTreeMap<(Day, ColumnKey), Vec<OccupancyRecord>> = BTreeMap::new();

    for registration in registrations.iter().filter(|r| r.is_committed()) {
        let expansion = expand_registration(registration);
        if !expansion.unresolved.is_empty() {
            warn!(
                course = registration.course_number,
                slots = ?expansion.unresolved,
                "unresolved slot codes ignored during conflict check"
            );
        }
        for record in expansion.records {
            cells.entry((record.day, record.column)).or_default().push(record);
        }
    }

    let mut seen = HashSet::new();
    let mut conflicts = Vec::new();
    for ((day, column), records) in cells.iter_mut() {
        records.sort();
        for (i, a) in records.iter().enumerate() {
            for b in &records[i + 1..] {
                if a.course == b.course {
                    continue;
                }
                let pair = (a.course.min(b.course), a.course.max(b.course), *day, *column);
                if seen.insert(pair) {
                    conflicts.push(ConflictRecord::new(a.clone(), b.clone()));
                }
            }
        }
    }

    debug!(conflicts = conflicts.len(), "conflict check finished");
    conflicts
}
