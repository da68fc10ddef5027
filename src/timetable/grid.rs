use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::conflicts::{detect_conflicts, expand_registration};
use super::types::{ColumnKey, Day};
use crate::error::{Result, TimetableError};
use crate::registration::CourseRegistration;

/// What the grid shows for an occupied cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub faculty_name: String,
    pub slot_code: String,
    pub course_number: u32,
    pub slot_combination: String,
}

/// One day of the grid, one cell per column in `ColumnKey::ALL` order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRow {
    pub day: Day,
    pub cells: Vec<Option<GridCell>>,
}

/// Day x column matrix produced by a successful generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableGrid {
    pub rows: Vec<GridRow>,
}

impl TimetableGrid {
    pub fn empty() -> Self {
        Self {
            rows: Day::ALL
                .iter()
                .map(|day| GridRow {
                    day: *day,
                    cells: vec![None; ColumnKey::ALL.len()],
                })
                .collect(),
        }
    }

    pub fn cell(&self, day: Day, column: ColumnKey) -> Option<&GridCell> {
        self.rows
            .get(day.index())
            .and_then(|row| row.cells.get(column.index()))
            .and_then(|cell| cell.as_ref())
    }

    fn cell_mut(&mut self, day: Day, column: ColumnKey) -> Option<&mut Option<GridCell>> {
        self.rows
            .get_mut(day.index())
            .and_then(|row| row.cells.get_mut(column.index()))
    }

    /// Number of occupied cells
    pub fn occupied(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .filter(|cell| cell.is_some())
            .count()
    }
}

/// Builds the grid from committed registrations.
///
/// Runs the conflict check first and refuses with every conflict found if
/// there are any; a partial grid is never returned. Registrations still
/// being edited or with a blank slot combination are left out.
pub fn generate(registrations: &[CourseRegistration]) -> Result<TimetableGrid> {
    let schedulable: Vec<&CourseRegistration> = registrations.iter().filter(|r| r.is_schedulable()).collect();
    if schedulable.is_empty() {
        return Err(TimetableError::EmptyRegistrationSet);
    }

    let conflicts = detect_conflicts(registrations);
    if !conflicts.is_empty() {
        info!(conflicts = conflicts.len(), "timetable generation rejected");
        return Err(TimetableError::ConflictDetected { conflicts });
    }

    let mut grid = TimetableGrid::empty();
    for registration in schedulable {
        let expansion = expand_registration(registration);
        if !expansion.unresolved.is_empty() {
            warn!(
                course = registration.course_number,
                slots = ?expansion.unresolved,
                "unresolved slot codes left off the timetable"
            );
        }
        if !expansion.self_overlaps.is_empty() {
            let hidden: Vec<String> = expansion
                .self_overlaps
                .iter()
                .map(|r| format!("{} {} {}", r.slot_code, r.day, r.column))
                .collect();
            warn!(
                course = registration.course_number,
                slots = ?hidden,
                "course overlaps itself; later slots hidden behind earlier ones"
            );
        }

        for record in expansion.records {
            let Some(cell) = grid.cell_mut(record.day, record.column) else {
                continue;
            };
            // Only the same course can land here twice; reported above
            if cell.is_some() {
                continue;
            }
            *cell = Some(GridCell {
                faculty_name: registration.faculty_name.clone(),
                slot_code: record.slot_code,
                course_number: registration.course_number,
                slot_combination: registration.slot_combination.clone(),
            });
        }
    }

    info!(cells = grid.occupied(), "timetable generated");
    Ok(grid)
}
