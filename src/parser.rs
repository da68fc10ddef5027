use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::warn;

use crate::error::Result;
use crate::registration::{CommitOutcome, CourseRegistrationStore, RegistrationField};

/// A store filled from a CSV file, with what each commit surfaced
#[derive(Debug)]
pub struct LoadedRegistrations {
    pub store: CourseRegistrationStore,
    /// (course number, outcome) for every committed row
    pub outcomes: Vec<(u32, CommitOutcome)>,
    /// Rows dropped for a missing faculty or slot combination
    pub skipped: usize,
}

fn is_header(record: &StringRecord) -> bool {
    record.iter().any(|field| {
        let field = field.to_lowercase();
        field.contains("faculty") || field.contains("slot")
    })
}

/// Reads registrations from CSV with a faculty column and a slots column.
///
/// Headers are matched loosely ("Faculty Name", "slot combination", ...).
/// A first row with no such header is data, and the first two columns are
/// used. Every complete row becomes a committed registration in file order.
pub fn read_registrations<R: Read>(reader: R) -> Result<LoadedRegistrations> {
    let mut reader = ReaderBuilder::new().has_headers(false).from_reader(reader);
    let mut records = reader.records();

    let first = records.next().transpose()?;
    let headers = first.as_ref().filter(|record| is_header(record));
    let faculty_col = headers
        .and_then(|h| h.iter().position(|f| f.to_lowercase().contains("faculty")))
        .unwrap_or(0);
    let slots_col = headers
        .and_then(|h| h.iter().position(|f| f.to_lowercase().contains("slot")))
        .unwrap_or(1);
    let leading = first.filter(|record| !is_header(record)).map(Ok);

    let mut store = CourseRegistrationStore::new();
    let mut outcomes = Vec::new();
    let mut skipped = 0;
    // The fresh store's blank course takes the first row
    let mut next_id = store.registrations().first().map(|r| r.id);

    for (line, result) in leading.into_iter().chain(records).enumerate() {
        let record = result?;
        let faculty = record.get(faculty_col).unwrap_or("").trim();
        let slots = record.get(slots_col).unwrap_or("").trim();

        if faculty.is_empty() || slots.is_empty() {
            warn!(row = line + 1, "skipping registration row with missing fields");
            skipped += 1;
            continue;
        }

        let id = match next_id.take() {
            Some(id) => id,
            None => store.add(),
        };
        store.update(id, RegistrationField::FacultyName, faculty)?;
        store.update(id, RegistrationField::SlotCombination, slots)?;
        let outcome = store.commit(id)?;
        let course_number = store.get(id).map(|r| r.course_number).unwrap_or_default();
        outcomes.push((course_number, outcome));
    }

    Ok(LoadedRegistrations {
        store,
        outcomes,
        skipped,
    })
}

/// Loads registrations from a CSV file
pub fn load_registrations<P: AsRef<Path>>(csv_path: P) -> Result<LoadedRegistrations> {
    let file = std::fs::File::open(csv_path)?;
    read_registrations(file)
}
