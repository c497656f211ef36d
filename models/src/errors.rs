// models/src/errors.rs

use chrono::NaiveDate;
pub use thiserror::Error;

use crate::identifiers::AppointmentId;

#[derive(Debug, Error)]
pub enum MedibookError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("appointment with id {0} already exists")]
    DuplicateId(AppointmentId),
    #[error("appointment with id {0} was not found")]
    NotFound(AppointmentId),
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl From<serde_json::Error> for MedibookError {
    fn from(err: serde_json::Error) -> Self {
        MedibookError::SerializationError(format!("JSON processing error: {}", err))
    }
}

/// Failures of the key/value storage backing the application state.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be reached or opened.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// Writing `key` would push the store past its byte quota.
    #[error("quota of {limit} bytes exceeded while writing '{key}'")]
    QuotaExceeded { key: String, limit: usize },
    #[error("storage backend error: {0}")]
    Backend(String),
    #[cfg(feature = "sled-errors")]
    #[error(transparent)]
    Sled(#[from] sled::Error),
}

/// A validation error raised by form-level checks.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A required field was left empty.
    #[error("{0} is required")]
    MissingField(String),
    /// A date string did not match `yyyy-MM-dd`.
    #[error("invalid date format: {0}")]
    InvalidDateFormat(String),
    #[error("{0} falls on a weekend")]
    WeekendDate(NaiveDate),
    #[error("{0} is in the past")]
    DateInPast(NaiveDate),
    #[error("{date} is more than {max_days} days ahead")]
    DateBeyondWindow { date: NaiveDate, max_days: i64 },
    /// The chosen time is not offered for the selected doctor and date.
    #[error("time slot '{0}' is not available")]
    TimeSlotUnavailable(String),
    /// Physical visits must carry a payment method.
    #[error("a payment method is required for physical visits")]
    PaymentMethodRequired,
    #[error("cannot move appointment from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
    /// A value outside a closed vocabulary (status, visit type, role, ...).
    #[error("unknown {field}: '{value}'")]
    UnknownValue { field: String, value: String },
}

/// A type alias for a `Result` that returns a `MedibookError` on failure.
pub type MedibookResult<T> = Result<T, MedibookError>;

/// A type alias for a `Result` that returns a `ValidationError` on failure.
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_wrap_validation_error_transparently() {
        let err: MedibookError = ValidationError::PaymentMethodRequired.into();
        assert_eq!(err.to_string(), "a payment method is required for physical visits");
    }

    #[test]
    fn should_convert_json_error() {
        let json_err = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let err: MedibookError = json_err.into();
        assert!(matches!(err, MedibookError::SerializationError(_)));
    }

    #[test]
    fn should_describe_quota_exceeded() {
        let err = StorageError::QuotaExceeded { key: "appointments".to_string(), limit: 16 };
        assert_eq!(err.to_string(), "quota of 16 bytes exceeded while writing 'appointments'");
    }
}
