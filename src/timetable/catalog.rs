use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::debug;

use super::normalizer::{AFTERNOON_LECTURE_HOURS, MORNING_LECTURE_HOURS};
use super::types::{ColumnKey, Day, SlotDefinition, SlotType};

/// Morning theory layout, one row per day in `Day::ALL` order and one entry
/// per morning lecture hour. The afternoon layout is the same with suffix 2.
const MORNING_THEORY: [[&str; 5]; 5] = [
    ["A1", "F1", "D1", "TB1", "TG1"],
    ["B1", "G1", "E1", "TA1", "TF1"],
    ["A1", "F1", "C1", "TD1", "TE1"],
    ["B1", "G1", "D1", "TC1", "TAA1"],
    ["C1", "E1", "TCC1", "TBB1", "TDD1"],
];

/// Labs per day and session
const LABS_PER_SESSION: usize = 6;

static CATALOG: Lazy<HashMap<String, SlotDefinition>> = Lazy::new(build_catalog);

fn build_catalog() -> HashMap<String, SlotDefinition> {
    let mut catalog: HashMap<String, SlotDefinition> = HashMap::new();

    let sessions = [(&MORNING_LECTURE_HOURS, "1"), (&AFTERNOON_LECTURE_HOURS, "2")];
    for (hours, suffix) in sessions {
        for (day, row) in Day::ALL.iter().zip(MORNING_THEORY.iter()) {
            for (hour, code) in hours.iter().zip(row.iter()) {
                // Afternoon codes swap the trailing 1 for a 2
                let code = match code.strip_suffix('1') {
                    Some(stem) => format!("{}{}", stem, suffix),
                    None => code.to_string(),
                };
                catalog
                    .entry(code.clone())
                    .or_insert_with(|| SlotDefinition {
                        code,
                        slot_type: SlotType::Theory,
                        occurrences: Vec::new(),
                    })
                    .occurrences
                    .push((*day, hour.to_string()));
            }
        }
    }

    // L1..L30 fill the morning columns day by day, L31..L60 the afternoon
    let lab_sessions = [(&ColumnKey::MORNING, 0usize), (&ColumnKey::AFTERNOON, 30usize)];
    for (columns, offset) in lab_sessions {
        for (day_index, day) in Day::ALL.iter().enumerate() {
            for (column_index, column) in columns.iter().enumerate() {
                let number = offset + day_index * LABS_PER_SESSION + column_index + 1;
                let code = format!("L{}", number);
                catalog.insert(
                    code.clone(),
                    SlotDefinition {
                        code,
                        slot_type: SlotType::Lab,
                        occurrences: vec![(*day, column.key().to_string())],
                    },
                );
            }
        }
    }

    debug!(slots = catalog.len(), "slot catalog loaded");
    catalog
}

/// Looks up a slot code. Codes are matched after trimming and uppercasing.
pub fn resolve_slot(code: &str) -> Option<&'static SlotDefinition> {
    let code = code.trim().to_uppercase();
    CATALOG.get(&code)
}

/// All catalog entries, sorted by code
pub fn all_slots() -> Vec<&'static SlotDefinition> {
    let mut slots: Vec<&'static SlotDefinition> = CATALOG.values().collect();
    slots.sort_by(|a, b| a.code.cmp(&b.code));
    slots
}
