//! Routine handlers.
//!
//! ## Commands
//! - Create a routine for a member
//! - Review one exercise (aprobado / rechazado, repeatable)
//!
//! ## Queries
//! - Get a routine with per-exercise review state

mod create_routine;
mod get_routine;
mod review_exercise;

#[cfg(test)]
mod test_support;

// Commands
pub use create_routine::{CreateRoutineCommand, CreateRoutineHandler};
pub use review_exercise::{ReviewExerciseCommand, ReviewExerciseHandler};

// Queries
pub use get_routine::{GetRoutineHandler, GetRoutineQuery};
