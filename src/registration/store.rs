use serde::Serialize;
use tracing::{info, warn};

use super::course::{validate_registration, CourseRegistration, RegistrationField, RegistrationId};
use crate::error::{Result, TimetableError};
use crate::timetable::{detect_conflicts, expand_registration, ConflictRecord};

/// What a successful commit surfaced. Neither field blocks the commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommitOutcome {
    /// Conflicts between the committed course and other committed courses
    pub conflicts: Vec<ConflictRecord>,
    /// Slot codes in the combination that resolve to nothing
    pub unresolved_slots: Vec<String>,
}

impl CommitOutcome {
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty() && self.unresolved_slots.is_empty()
    }
}

/// Ordered list of course registrations; the single writer of that list.
///
/// A store always holds at least one registration. Course numbers stay a
/// contiguous 1..N in list order; ids never change.
#[derive(Debug, Clone, Serialize)]
pub struct CourseRegistrationStore {
    registrations: Vec<CourseRegistration>,
    #[serde(skip)]
    next_id: u64,
}

impl CourseRegistrationStore {
    /// Creates a store with one blank course
    pub fn new() -> Self {
        let mut store = Self {
            registrations: Vec::new(),
            next_id: 1,
        };
        store.add();
        store
    }

    /// Appends a blank editable registration and returns its id
    pub fn add(&mut self) -> RegistrationId {
        let id = RegistrationId(self.next_id);
        self.next_id += 1;
        let course_number = self.registrations.len() as u32 + 1;
        self.registrations.push(CourseRegistration::blank(id, course_number));
        id
    }

    /// Sets a field while the registration is being edited.
    ///
    /// Returns `Ok(false)` without touching anything if it is committed.
    pub fn update(&mut self, id: RegistrationId, field: RegistrationField, value: &str) -> Result<bool> {
        let registration = self.get_mut(id)?;
        if !registration.is_editing {
            return Ok(false);
        }
        match field {
            RegistrationField::FacultyName => registration.faculty_name = value.to_string(),
            RegistrationField::SlotCombination => registration.slot_combination = value.to_string(),
        }
        Ok(true)
    }

    /// Puts a committed registration back into the editable state
    pub fn edit(&mut self, id: RegistrationId) -> Result<()> {
        self.get_mut(id)?.is_editing = true;
        Ok(())
    }

    /// Removes a registration and renumbers the rest
    pub fn delete(&mut self, id: RegistrationId) -> Result<()> {
        let position = self
            .registrations
            .iter()
            .position(|r| r.id == id)
            .ok_or(TimetableError::RegistrationNotFound(id))?;
        if self.registrations.len() == 1 {
            return Err(TimetableError::CannotDeleteLast);
        }

        self.registrations.remove(position);
        for (index, registration) in self.registrations.iter_mut().enumerate() {
            registration.course_number = index as u32 + 1;
        }
        Ok(())
    }

    /// Validates and commits a registration, then checks it against the
    /// other committed courses.
    pub fn commit(&mut self, id: RegistrationId) -> Result<CommitOutcome> {
        let registration = self.get_mut(id)?;
        validate_registration(registration)?;
        registration.is_editing = false;

        let unresolved_slots = expand_registration(registration).unresolved;
        let course_number = registration.course_number;

        let conflicts: Vec<ConflictRecord> = detect_conflicts(&self.committed())
            .into_iter()
            .filter(|conflict| conflict.involves(id))
            .collect();

        if !unresolved_slots.is_empty() {
            warn!(course = course_number, slots = ?unresolved_slots, "committed course has unknown slot codes");
        }
        info!(course = course_number, conflicts = conflicts.len(), "course committed");

        Ok(CommitOutcome {
            conflicts,
            unresolved_slots,
        })
    }

    pub fn get(&self, id: RegistrationId) -> Option<&CourseRegistration> {
        self.registrations.iter().find(|r| r.id == id)
    }

    fn get_mut(&mut self, id: RegistrationId) -> Result<&mut CourseRegistration> {
        self.registrations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(TimetableError::RegistrationNotFound(id))
    }

    pub fn registrations(&self) -> &[CourseRegistration] {
        &self.registrations
    }

    /// Owned snapshot of the committed registrations, in list order
    pub fn committed(&self) -> Vec<CourseRegistration> {
        self.registrations
            .iter()
            .filter(|r| r.is_committed())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

impl Default for CourseRegistrationStore {
    fn default() -> Self {
        Self::new()
    }
}
