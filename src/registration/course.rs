use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimetableError};

/// Stable identity of a registration. Never reused within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationId(pub u64);

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Editable text fields of a registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationField {
    FacultyName,
    SlotCombination,
}

/// One course row as entered by the student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRegistration {
    pub id: RegistrationId,
    /// Display position, 1-based. Recomputed on delete.
    pub course_number: u32,
    pub faculty_name: String,
    /// Raw "+"-joined slot codes, e.g. "A1+TA1"
    pub slot_combination: String,
    pub is_editing: bool,
}

impl CourseRegistration {
    /// A blank registration in the editable state
    pub fn blank(id: RegistrationId, course_number: u32) -> Self {
        Self {
            id,
            course_number,
            faculty_name: String::new(),
            slot_combination: String::new(),
            is_editing: true,
        }
    }

    pub fn is_committed(&self) -> bool {
        !self.is_editing
    }

    /// True once committed with at least one non-blank character of slots
    pub fn is_schedulable(&self) -> bool {
        self.is_committed() && !self.slot_combination.trim().is_empty()
    }
}

/// Checks that both fields are filled in before a commit
pub fn validate_registration(registration: &CourseRegistration) -> Result<()> {
    if registration.faculty_name.trim().is_empty() {
        return Err(TimetableError::Validation(format!(
            "Faculty name is required for course {}",
            registration.course_number
        )));
    }
    if registration.slot_combination.trim().is_empty() {
        return Err(TimetableError::Validation(format!(
            "Slot combination is required for course {}",
            registration.course_number
        )));
    }
    Ok(())
}
