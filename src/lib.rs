//! FFCS timetable engine.
//!
//! A fixed catalog of weekly slot codes, a normalizer that turns theory
//! lecture hours and lab periods into one set of grid columns, a course
//! registration store, a pairwise conflict detector and a grid builder that
//! refuses to produce anything while conflicts exist.
//!
//! ```
//! use ffcs_timetable::registration::{CourseRegistrationStore, RegistrationField};
//! use ffcs_timetable::timetable::{generate, ColumnKey, Day};
//!
//! let mut store = CourseRegistrationStore::new();
//! let id = store.registrations()[0].id;
//! store.update(id, RegistrationField::FacultyName, "Dr. Rao").unwrap();
//! store.update(id, RegistrationField::SlotCombination, "A1+TA1").unwrap();
//! store.commit(id).unwrap();
//!
//! let grid = generate(&store.committed()).unwrap();
//! assert_eq!(grid.cell(Day::Mon, ColumnKey::Morning1).unwrap().slot_code, "A1");
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod parser;
pub mod planner;
pub mod registration;
pub mod timetable;
pub mod web;

pub use error::{Result, TimetableError};
