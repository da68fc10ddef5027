pub mod types;
pub mod normalizer;
pub mod catalog;
pub mod conflicts;
pub mod grid;

pub use types::{ColumnKey, ConflictRecord, Day, OccupancyRecord, SlotDefinition, SlotType};
pub use normalizer::{parse_slot_combination, to_column_key};
pub use catalog::{all_slots, resolve_slot};
pub use conflicts::{detect_conflicts, expand_registration, Expansion};
pub use grid::{generate, GridCell, GridRow, TimetableGrid};
