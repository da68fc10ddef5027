pub mod course;
pub mod store;

pub use course::{validate_registration, CourseRegistration, RegistrationField, RegistrationId};
pub use store::{CommitOutcome, CourseRegistrationStore};
