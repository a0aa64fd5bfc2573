//! Member-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | DocumentoNotFound | 404 |
//! | DocumentoTaken | 409 |
//! | Forbidden | 403 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, MemberId, ValidationError};

/// Member-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberError {
    /// Member was not found.
    NotFound(MemberId),

    /// No member has this identity document.
    DocumentoNotFound(String),

    /// Another member already uses this identity document.
    DocumentoTaken(String),

    /// Caller may not read or change this member.
    Forbidden,

    ValidationFailed {
        field: String,
        message: String,
    },

    Infrastructure(String),
}

impl MemberError {
    pub fn not_found(id: MemberId) -> Self {
        MemberError::NotFound(id)
    }

    pub fn documento_not_found(documento: impl Into<String>) -> Self {
        MemberError::DocumentoNotFound(documento.into())
    }

    pub fn documento_taken(documento: impl Into<String>) -> Self {
        MemberError::DocumentoTaken(documento.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MemberError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        MemberError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MemberError::NotFound(_) | MemberError::DocumentoNotFound(_) => {
                ErrorCode::MemberNotFound
            }
            MemberError::DocumentoTaken(_) => ErrorCode::DocumentoTaken,
            MemberError::Forbidden => ErrorCode::Forbidden,
            MemberError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            MemberError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            MemberError::NotFound(id) => format!("Member not found: {}", id),
            MemberError::DocumentoNotFound(doc) => {
                format!("No member with documento '{}'", doc)
            }
            MemberError::DocumentoTaken(doc) => {
                format!("Documento '{}' is already registered", doc)
            }
            MemberError::Forbidden => "Not allowed to access this member".to_string(),
            MemberError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            MemberError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for MemberError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for MemberError {}

impl From<DomainError> for MemberError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::DocumentoTaken => MemberError::DocumentoTaken(
                err.details.get("documento").cloned().unwrap_or_default(),
            ),
            ErrorCode::MemberNotFound => match err
                .details
                .get("member_id")
                .and_then(|raw| raw.parse::<MemberId>().ok())
            {
                Some(id) => MemberError::NotFound(id),
                None => MemberError::Infrastructure(err.to_string()),
            },
            ErrorCode::ValidationFailed => MemberError::ValidationFailed {
                field: err.details.get("field").cloned().unwrap_or_else(|| "unknown".into()),
                message: err.message,
            },
            _ => MemberError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationError> for MemberError {
    fn from(err: ValidationError) -> Self {
        MemberError::validation(err.field(), err.to_string())
    }
}

impl From<MemberError> for DomainError {
    fn from(err: MemberError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
