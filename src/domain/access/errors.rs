//! Access-token and audit-log error types.
//!
//! Door verdicts are never errors; these cover token management, QR
//! rendering, and log queries.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | MemberNotFound | 404 |
//! | TokenNotIssued | 404 |
//! | TokenAlreadyIssued | 409 |
//! | Forbidden | 403 |
//! | ValidationFailed | 400 |
//! | Render / Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, MemberId, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    MemberNotFound(MemberId),

    /// The member has no live token.
    TokenNotIssued(MemberId),

    /// `issue` was called for a member that already has a token.
    TokenAlreadyIssued(MemberId),

    Forbidden,

    ValidationFailed { field: String, message: String },

    /// QR image could not be produced.
    Render(String),

    Infrastructure(String),
}

impl AccessError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AccessError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AccessError::MemberNotFound(_) => ErrorCode::MemberNotFound,
            AccessError::TokenNotIssued(_) => ErrorCode::TokenInvalid,
            AccessError::TokenAlreadyIssued(_) => ErrorCode::TokenAlreadyIssued,
            AccessError::Forbidden => ErrorCode::Forbidden,
            AccessError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            AccessError::Render(_) => ErrorCode::InternalError,
            AccessError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AccessError::MemberNotFound(id) => format!("Member not found: {}", id),
            AccessError::TokenNotIssued(id) => format!("No access token issued for member {}", id),
            AccessError::TokenAlreadyIssued(id) => {
                format!("Member {} already has an access token; rotate it instead", id)
            }
            AccessError::Forbidden => "Not allowed to perform this action".to_string(),
            AccessError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            AccessError::Render(msg) => format!("Could not render QR code: {}", msg),
            AccessError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for AccessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AccessError {}

impl From<ValidationError> for AccessError {
    fn from(err: ValidationError) -> Self {
        AccessError::validation(err.field(), err.to_string())
    }
}

impl From<DomainError> for AccessError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => AccessError::ValidationFailed {
                field: err.details.get("field").cloned().unwrap_or_else(|| "unknown".into()),
                message: err.message,
            },
            _ => AccessError::Infrastructure(err.to_string()),
        }
    }
}

impl From<AccessError> for DomainError {
    fn from(err: AccessError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
