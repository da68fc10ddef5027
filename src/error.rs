//! Error types for the timetable engine

use thiserror::Error;

use crate::registration::RegistrationId;
use crate::timetable::ConflictRecord;

/// Result type for timetable operations
pub type Result<T> = std::result::Result<T, TimetableError>;

/// Errors returned by the registration store, the slot engine and the planner.
///
/// None of these are fatal; callers decide how to present them.
#[derive(Error, Debug)]
pub enum TimetableError {
    /// Commit attempted with a missing faculty name or slot combination
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A slot code is not in the catalog or has no grid column
    #[error("Unknown slot code: {0}")]
    UnknownSlotCode(String),

    /// Generation refused because two courses share a grid cell
    #[error("{} slot conflict(s) detected", .conflicts.len())]
    ConflictDetected { conflicts: Vec<ConflictRecord> },

    /// Generation requested with no committed, non-empty registration
    #[error("No committed registration with a slot combination")]
    EmptyRegistrationSet,

    /// The only remaining registration cannot be deleted
    #[error("Cannot delete the last remaining course")]
    CannotDeleteLast,

    #[error("Registration not found: {0}")]
    RegistrationNotFound(RegistrationId),

    /// A generation is already running for this planner
    #[error("A timetable generation is already in progress")]
    GenerationInProgress,

    /// Registrations changed while the generation was running
    #[error("Registrations changed during generation; result discarded")]
    StaleGeneration,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl TimetableError {
    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            TimetableError::Validation(_) => "VALIDATION_ERROR",
            TimetableError::UnknownSlotCode(_) => "UNKNOWN_SLOT_CODE",
            TimetableError::ConflictDetected { .. } => "CONFLICT_DETECTED",
            TimetableError::EmptyRegistrationSet => "EMPTY_REGISTRATION_SET",
            TimetableError::CannotDeleteLast => "CANNOT_DELETE_LAST",
            TimetableError::RegistrationNotFound(_) => "NOT_FOUND",
            TimetableError::GenerationInProgress => "GENERATION_IN_PROGRESS",
            TimetableError::StaleGeneration => "STALE_GENERATION",
            TimetableError::Io(_) => "IO_ERROR",
            TimetableError::Csv(_) => "CSV_ERROR",
        }
    }
}
