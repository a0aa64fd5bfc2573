//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, time, errors, and auth types that form the
//! vocabulary of the gym domain.

mod auth;
mod clock;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser, Role};
pub use clock::GymClock;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    AccessLogId, ClassId, ExerciseId, InstructorId, MemberId, ReservationId, RoutineId, UserId,
};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
