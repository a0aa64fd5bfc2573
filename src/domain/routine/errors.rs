//! Routine error types.

use crate::domain::foundation::{
    DomainError, ErrorCode, ExerciseId, MemberId, RoutineId, ValidationError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutineError {
    NotFound(RoutineId),
    ExerciseNotFound(ExerciseId),
    MemberNotFound(MemberId),
    Forbidden,
    ValidationFailed { field: String, message: String },
    Infrastructure(String),
}

impl RoutineError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        RoutineError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            RoutineError::NotFound(_) => ErrorCode::RoutineNotFound,
            RoutineError::ExerciseNotFound(_) => ErrorCode::ExerciseNotFound,
            RoutineError::MemberNotFound(_) => ErrorCode::MemberNotFound,
            RoutineError::Forbidden => ErrorCode::Forbidden,
            RoutineError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            RoutineError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            RoutineError::NotFound(id) => format!("Routine not found: {}", id),
            RoutineError::ExerciseNotFound(id) => format!("Exercise not found: {}", id),
            RoutineError::MemberNotFound(id) => format!("Member not found: {}", id),
            RoutineError::Forbidden => "Not allowed to perform this action".to_string(),
            RoutineError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            RoutineError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for RoutineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for RoutineError {}

impl From<ValidationError> for RoutineError {
    fn from(err: ValidationError) -> Self {
        RoutineError::validation(err.field(), err.to_string())
    }
}

impl From<DomainError> for RoutineError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => RoutineError::ValidationFailed {
                field: err.details.get("field").cloned().unwrap_or_else(|| "unknown".into()),
                message: err.message,
            },
            _ => RoutineError::Infrastructure(err.to_string()),
        }
    }
}

impl From<RoutineError> for DomainError {
    fn from(err: RoutineError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
