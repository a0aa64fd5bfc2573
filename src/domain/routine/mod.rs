//! Routines and the instructor exercise-review workflow.

mod aggregate;
mod errors;
mod review;

pub use aggregate::{NewExercise, Routine, RoutineExercise};
pub use errors::RoutineError;
pub use review::{ExerciseReview, ReviewStatus, ReviewVerdict};
