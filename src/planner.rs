//! Generation coordination for a single student's course list.
//!
//! The planner owns the registration store and serializes timetable
//! generation against it: one generation at a time, computed from a
//! snapshot, and thrown away if the registrations changed before it
//! finished.

use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, TimetableError};
use crate::registration::{
    CommitOutcome, CourseRegistration, CourseRegistrationStore, RegistrationField, RegistrationId,
};
use crate::timetable::{self, ConflictRecord, TimetableGrid};

/// State of the most recent generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    Idle,
    Checking,
    Generated,
    Rejected,
}

#[derive(Debug)]
struct GeneratedGrid {
    revision: u64,
    grid: TimetableGrid,
}

#[derive(Debug)]
struct PlannerState {
    store: CourseRegistrationStore,
    /// Bumped on every change to the registration list
    revision: u64,
    status: GenerationStatus,
    grid: Option<GeneratedGrid>,
}

impl PlannerState {
    fn touch(&mut self) {
        self.revision += 1;
        if self.status != GenerationStatus::Checking {
            self.status = GenerationStatus::Idle;
        }
    }
}

/// Resets a generation left in `Checking` when its future is dropped early.
struct CheckingGuard<'a> {
    state: &'a Mutex<PlannerState>,
    armed: bool,
}

impl Drop for CheckingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            let mut state = self.state.lock();
            if state.status == GenerationStatus::Checking {
                state.status = GenerationStatus::Idle;
            }
        }
    }
}

/// A registration store plus its generation state machine.
#[derive(Debug)]
pub struct Planner {
    state: Mutex<PlannerState>,
}

impl Planner {
    pub fn new() -> Self {
        Self::with_store(CourseRegistrationStore::new())
    }

    pub fn with_store(store: CourseRegistrationStore) -> Self {
        Self {
            state: Mutex::new(PlannerState {
                store,
                revision: 0,
                status: GenerationStatus::Idle,
                grid: None,
            }),
        }
    }

    pub fn registrations(&self) -> Vec<CourseRegistration> {
        self.state.lock().store.registrations().to_vec()
    }

    pub fn registration(&self, id: RegistrationId) -> Option<CourseRegistration> {
        self.state.lock().store.get(id).cloned()
    }

    pub fn status(&self) -> GenerationStatus {
        self.state.lock().status
    }

    pub fn revision(&self) -> u64 {
        self.state.lock().revision
    }

    pub fn add(&self) -> RegistrationId {
        let mut state = self.state.lock();
        let id = state.store.add();
        state.touch();
        id
    }

    pub fn update(&self, id: RegistrationId, field: RegistrationField, value: &str) -> Result<bool> {
        let mut state = self.state.lock();
        let changed = state.store.update(id, field, value)?;
        if changed {
            state.touch();
        }
        Ok(changed)
    }

    /// Sets either or both fields under one lock, so readers never see
    /// half of the change and the revision moves at most once.
    pub fn update_fields(
        &self,
        id: RegistrationId,
        faculty_name: Option<&str>,
        slot_combination: Option<&str>,
    ) -> Result<bool> {
        let mut state = self.state.lock();
        let mut changed = false;
        if let Some(value) = faculty_name {
            changed |= state.store.update(id, RegistrationField::FacultyName, value)?;
        }
        if let Some(value) = slot_combination {
            changed |= state.store.update(id, RegistrationField::SlotCombination, value)?;
        }
        if changed {
            state.touch();
        }
        Ok(changed)
    }

    pub fn edit(&self, id: RegistrationId) -> Result<()> {
        let mut state = self.state.lock();
        state.store.edit(id)?;
        state.touch();
        Ok(())
    }

    pub fn delete(&self, id: RegistrationId) -> Result<()> {
        let mut state = self.state.lock();
        state.store.delete(id)?;
        state.touch();
        Ok(())
    }

    pub fn commit(&self, id: RegistrationId) -> Result<CommitOutcome> {
        let mut state = self.state.lock();
        let outcome = state.store.commit(id)?;
        state.touch();
        Ok(outcome)
    }

    /// Conflicts among the currently committed registrations
    pub fn conflicts(&self) -> Vec<ConflictRecord> {
        let snapshot = self.state.lock().store.committed();
        timetable::detect_conflicts(&snapshot)
    }

    /// The last generated grid, unless registrations changed since.
    pub fn current_grid(&self) -> Option<TimetableGrid> {
        let state = self.state.lock();
        state
            .grid
            .as_ref()
            .filter(|generated| generated.revision == state.revision)
            .map(|generated| generated.grid.clone())
    }

    /// Generates the timetable from the committed registrations.
    ///
    /// `delay` is waited out between taking the snapshot and computing, the
    /// way a UI action with latency would. A second call while one is
    /// running fails with `GenerationInProgress`; a generation whose
    /// registrations changed underneath it fails with `StaleGeneration`.
    pub async fn generate(&self, delay: Duration) -> Result<TimetableGrid> {
        let (snapshot, revision) = {
            let mut state = self.state.lock();
            if state.status == GenerationStatus::Checking {
                return Err(TimetableError::GenerationInProgress);
            }
            state.status = GenerationStatus::Checking;
            (state.store.committed(), state.revision)
        };
        let mut guard = CheckingGuard {
            state: &self.state,
            armed: true,
        };
        debug!(revision, courses = snapshot.len(), "generation started");

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let result = timetable::generate(&snapshot);

        guard.armed = false;
        let mut state = self.state.lock();
        if state.revision != revision {
            info!(started = revision, now = state.revision, "discarding stale generation");
            state.status = GenerationStatus::Idle;
            return Err(TimetableError::StaleGeneration);
        }

        match result {
            Ok(grid) => {
                state.status = GenerationStatus::Generated;
                state.grid = Some(GeneratedGrid {
                    revision,
                    grid: grid.clone(),
                });
                Ok(grid)
            }
            Err(err @ TimetableError::ConflictDetected { .. }) => {
                state.status = GenerationStatus::Rejected;
                state.grid = None;
                Err(err)
            }
            Err(err) => {
                state.status = GenerationStatus::Idle;
                Err(err)
            }
        }
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new()
    }
}
