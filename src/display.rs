use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::timetable::{ColumnKey, ConflictRecord, GridCell, OccupancyRecord, TimetableGrid};

/// Formats a grid cell as "[slot] faculty (course N)"
pub fn format_cell(cell: &GridCell) -> String {
    if cell.faculty_name.is_empty() {
        format!("[{}] course {}", cell.slot_code, cell.course_number)
    } else {
        format!("[{}] {} (course {})", cell.slot_code, cell.faculty_name, cell.course_number)
    }
}

fn format_occupant(record: &OccupancyRecord) -> String {
    format!("course {} {} ({})", record.course_number, record.slot_code, record.slot_type)
}

/// One line per conflict: "MON 08:00: course 1 A1 (Theory) <-> course 2 L1 (Lab)"
pub fn format_conflict(conflict: &ConflictRecord) -> String {
    format!(
        "{} {}: {} <-> {}",
        conflict.day,
        conflict.column,
        format_occupant(&conflict.first),
        format_occupant(&conflict.second)
    )
}

/// Renders the grid day by day in the format: DAY HH:MM window -> cell
pub fn render_grid(grid: &TimetableGrid) -> String {
    let mut out = String::new();
    for row in &grid.rows {
        let _ = writeln!(out, "** {} **", row.day);
        for (column, cell) in ColumnKey::ALL.iter().zip(row.cells.iter()) {
            if column.is_lunch() {
                let _ = writeln!(out, "  ----- LUNCH -----");
                continue;
            }
            let (start, end) = column.window();
            let label = match cell {
                Some(cell) => format_cell(cell),
                None => "[EMPTY]".to_string(),
            };
            let _ = writeln!(out, "  {}-{} {}", start.format("%H:%M"), end.format("%H:%M"), label);
        }
    }
    out
}

/// Writes the rendered grid to a file
pub fn write_grid_to_file<P: AsRef<Path>>(grid: &TimetableGrid, path: P) -> Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "** FFCS Timetable **")?;
    file.write_all(render_grid(grid).as_bytes())?;
    Ok(())
}

/// Prints a generated grid with a short summary
pub fn print_grid(grid: &TimetableGrid) {
    println!("\n=== Timetable ===");
    println!("Occupied cells: {}", grid.occupied());
    print!("{}", render_grid(grid));
}

/// Prints a conflict report
pub fn print_conflicts(conflicts: &[ConflictRecord]) {
    println!("⚠️  {} slot conflict(s):", conflicts.len());
    for conflict in conflicts {
        let marker = if conflict.is_cross_category() { " [theory/lab]" } else { "" };
        println!("  - {}{}", format_conflict(conflict), marker);
    }
}
