use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;

use crate::error::Result;
use crate::timetable::{ColumnKey, GridCell, TimetableGrid};

fn cell_text(cell: Option<&GridCell>) -> String {
    match cell {
        Some(cell) => format!("{} #{} {}", cell.slot_code, cell.course_number, cell.faculty_name)
            .trim_end()
            .to_string(),
        None => String::new(),
    }
}

/// Writes the grid as CSV: a `day` column followed by one column per
/// canonical column key. Empty cells are empty strings.
pub fn export_grid<W: Write>(grid: &TimetableGrid, writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

    let mut header = vec!["day".to_string()];
    header.extend(ColumnKey::ALL.iter().map(|column| column.key().to_string()));
    wtr.write_record(&header)?;

    for row in &grid.rows {
        let mut record = vec![row.day.to_string()];
        record.extend(row.cells.iter().map(|cell| cell_text(cell.as_ref())));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports the grid to a CSV file, replacing any existing file
pub fn export_grid_to_csv<P: AsRef<Path>>(grid: &TimetableGrid, csv_path: P) -> Result<()> {
    let file = File::create(csv_path)?;
    export_grid(grid, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::{CourseRegistration, RegistrationId};
    use crate::timetable::generate;

    fn committed(id: u64, faculty: &str, slots: &str) -> CourseRegistration {
        CourseRegistration {
            id: RegistrationId(id),
            course_number: id as u32,
            faculty_name: faculty.to_string(),
            slot_combination: slots.to_string(),
            is_editing: false,
        }
    }

    #[test]
    fn test_export_grid_layout() {
        let grid = generate(&[committed(1, "Dr. Rao", "A1"), committed(2, "Dr. Iyer", "L8")]).unwrap();
        let mut buffer = Vec::new();
        export_grid(&grid, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 6);
        assert_eq!(
            lines[0],
            "day,08:00,08:51,09:51,10:41,11:40,12:31,Lunch,14:00,14:51,15:51,16:41,17:40,18:31"
        );
        assert_eq!(lines[1], "MON,A1 #1 Dr. Rao,,,,,,,,,,,,");
        assert_eq!(lines[2], "TUE,,L8 #2 Dr. Iyer,,,,,,,,,,,");
        assert_eq!(lines[3], "WED,A1 #1 Dr. Rao,,,,,,,,,,,,");
    }

    #[test]
    fn test_export_grid_to_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timetable.csv");
        let grid = generate(&[committed(1, "Dr. Rao", "B2")]).unwrap();
        export_grid_to_csv(&grid, &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 5);
        // B2 is TUE/THU 14:00
        assert_eq!(&rows[1][8], "B2 #1 Dr. Rao");
        assert_eq!(&rows[3][8], "B2 #1 Dr. Rao");
        assert_eq!(&rows[0][8], "");
    }
}
