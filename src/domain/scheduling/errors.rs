//! Scheduling error types (classes and reservations).
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | ClassNotFound / ReservationNotFound / MemberNotFound | 404 |
//! | CapacityFull / ClassCancelled / MemberInactive / DuplicateReservation | 409 |
//! | InvalidStateTransition | 400 |
//! | Forbidden | 403 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{
    ClassId, DomainError, ErrorCode, MemberId, ReservationId, ValidationError,
};

use super::ReservationStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    ClassNotFound(ClassId),

    ReservationNotFound(ReservationId),

    MemberNotFound(MemberId),

    /// Every seat is taken.
    CapacityFull { class_id: ClassId, capacity: u32 },

    /// The class is no longer `activa`.
    ClassCancelled(ClassId),

    /// Self-service booking by a member not in good standing.
    MemberInactive(MemberId),

    /// The member already holds an active seat in this class.
    DuplicateReservation {
        class_id: ClassId,
        member_id: MemberId,
    },

    InvalidStateTransition {
        current: ReservationStatus,
        attempted: String,
    },

    Forbidden,

    ValidationFailed { field: String, message: String },

    Infrastructure(String),
}

impl SchedulingError {
    pub fn invalid_state(current: ReservationStatus, attempted: impl Into<String>) -> Self {
        SchedulingError::InvalidStateTransition {
            current,
            attempted: attempted.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SchedulingError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        SchedulingError::Infrastructure(message.into())
    }

    /// True for the expected business rejections of a booking attempt.
    pub fn is_booking_rejection(&self) -> bool {
        matches!(
            self,
            SchedulingError::CapacityFull { .. }
                | SchedulingError::ClassCancelled(_)
                | SchedulingError::MemberInactive(_)
                | SchedulingError::DuplicateReservation { .. }
        )
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SchedulingError::ClassNotFound(_) => ErrorCode::ClassNotFound,
            SchedulingError::ReservationNotFound(_) => ErrorCode::ReservationNotFound,
            SchedulingError::MemberNotFound(_) => ErrorCode::MemberNotFound,
            SchedulingError::CapacityFull { .. } => ErrorCode::CapacityFull,
            SchedulingError::ClassCancelled(_) => ErrorCode::ClassCancelled,
            SchedulingError::MemberInactive(_) => ErrorCode::MemberInactive,
            SchedulingError::DuplicateReservation { .. } => ErrorCode::DuplicateReservation,
            SchedulingError::InvalidStateTransition { .. } => ErrorCode::InvalidStateTransition,
            SchedulingError::Forbidden => ErrorCode::Forbidden,
            SchedulingError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SchedulingError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// User-displayable message.
    pub fn message(&self) -> String {
        match self {
            SchedulingError::ClassNotFound(id) => format!("Class not found: {}", id),
            SchedulingError::ReservationNotFound(id) => format!("Reservation not found: {}", id),
            SchedulingError::MemberNotFound(id) => format!("Member not found: {}", id),
            SchedulingError::CapacityFull { capacity, .. } => {
                format!("Class is full: all {} seats are taken", capacity)
            }
            SchedulingError::ClassCancelled(_) => "Class has been cancelled".to_string(),
            SchedulingError::MemberInactive(_) => {
                "Membership is not active; booking requires an active membership".to_string()
            }
            SchedulingError::DuplicateReservation { .. } => {
                "Member already has a reservation for this class".to_string()
            }
            SchedulingError::InvalidStateTransition { current, attempted } => {
                format!("Cannot {} a reservation in '{}' state", attempted, current)
            }
            SchedulingError::Forbidden => "Not allowed to perform this action".to_string(),
            SchedulingError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SchedulingError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for SchedulingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SchedulingError {}

impl From<ValidationError> for SchedulingError {
    fn from(err: ValidationError) -> Self {
        SchedulingError::validation(err.field(), err.to_string())
    }
}

/// Id carried in a not-found error's details, if the adapter attached one.
fn detail_id<T: std::str::FromStr>(err: &DomainError, key: &str) -> Option<T> {
    err.details.get(key).and_then(|raw| raw.parse().ok())
}

impl From<DomainError> for SchedulingError {
    fn from(err: DomainError) -> Self {
        let not_found = match err.code {
            ErrorCode::ClassNotFound => {
                detail_id(&err, "class_id").map(SchedulingError::ClassNotFound)
            }
            ErrorCode::ReservationNotFound => {
                detail_id(&err, "reservation_id").map(SchedulingError::ReservationNotFound)
            }
            ErrorCode::MemberNotFound => {
                detail_id(&err, "member_id").map(SchedulingError::MemberNotFound)
            }
            _ => None,
        };
        if let Some(mapped) = not_found {
            return mapped;
        }

        match err.code {
            ErrorCode::ValidationFailed => SchedulingError::ValidationFailed {
                field: err.details.get("field").cloned().unwrap_or_else(|| "unknown".into()),
                message: err.message,
            },
            _ => SchedulingError::Infrastructure(err.to_string()),
        }
    }
}

impl From<SchedulingError> for DomainError {
    fn from(err: SchedulingError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
