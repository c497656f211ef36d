// models/src/lib.rs

pub mod errors;
pub mod identifiers;
pub mod medical;

pub use errors::{MedibookError, MedibookResult, StorageError, ValidationError, ValidationResult};
pub use identifiers::AppointmentId;
pub use medical::{Appointment, AppointmentStatus, Role, VisitRecord};
