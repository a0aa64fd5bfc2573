//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i32,
        max: i32,
        actual: i32,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i32, max: i32, actual: i32) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,

    // Not found errors
    MemberNotFound,
    ClassNotFound,
    ReservationNotFound,
    RoutineNotFound,
    ExerciseNotFound,

    // Reservation rejections
    CapacityFull,
    ClassCancelled,
    MemberInactive,
    DuplicateReservation,

    // Access rejections
    TokenInvalid,
    MembershipExpired,
    MembershipSuspended,
    TokenAlreadyIssued,

    // State errors
    InvalidStateTransition,
    DocumentoTaken,

    // Authorization errors
    Unauthorized,
    Forbidden,

    // Infrastructure errors
    DatabaseError,
    InternalError,
}

impl ErrorCode {
    /// Stable wire representation of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::MemberNotFound => "MEMBER_NOT_FOUND",
            ErrorCode::ClassNotFound => "CLASS_NOT_FOUND",
            ErrorCode::ReservationNotFound => "RESERVATION_NOT_FOUND",
            ErrorCode::RoutineNotFound => "ROUTINE_NOT_FOUND",
            ErrorCode::ExerciseNotFound => "EXERCISE_NOT_FOUND",
            ErrorCode::CapacityFull => "CAPACITY_FULL",
            ErrorCode::ClassCancelled => "CLASS_CANCELLED",
            ErrorCode::MemberInactive => "MEMBER_INACTIVE",
            ErrorCode::DuplicateReservation => "DUPLICATE_RESERVATION",
            ErrorCode::TokenInvalid => "TOKEN_INVALID",
            ErrorCode::MembershipExpired => "MEMBERSHIP_EXPIRED",
            ErrorCode::MembershipSuspended => "MEMBERSHIP_SUSPENDED",
            ErrorCode::TokenAlreadyIssued => "TOKEN_ALREADY_ISSUED",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::DocumentoTaken => "DOCUMENTO_TAKEN",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a database error, the usual shape of adapter failures.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            details: HashMap::new(),
        }
        .with_detail("field", field.into())
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let field = err.field().to_string();
        DomainError::validation(field, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("documento");
        assert_eq!(format!("{}", err), "Field 'documento' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("cupo", 1, 500, 0);
        assert_eq!(
            format!("{}", err),
            "Field 'cupo' must be between 1 and 500, got 0"
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::ClassNotFound, "Class not found");
        assert_eq!(format!("{}", err), "[CLASS_NOT_FOUND] Class not found");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::ValidationFailed, "Validation failed")
            .with_detail("field", "cupo")
            .with_detail("reason", "must be positive");

        assert_eq!(err.details.get("field"), Some(&"cupo".to_string()));
        assert_eq!(err.details.get("reason"), Some(&"must be positive".to_string()));
    }

    #[test]
    fn validation_error_converts_with_field_detail() {
        let err: DomainError = ValidationError::empty_field("nombre").into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.get("field"), Some(&"nombre".to_string()));
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::CapacityFull), "CAPACITY_FULL");
        assert_eq!(format!("{}", ErrorCode::InternalError), "INTERNAL_ERROR");
    }
}
