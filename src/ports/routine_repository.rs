//! Routine repository port.
//!
//! Adapters map stored review state to `ReviewStatus` when reading (see
//! `ReviewStatus::from_legacy`) and always write the canonical value.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ExerciseId, RoutineId};
use crate::domain::routine::{ExerciseReview, Routine, RoutineExercise};

#[async_trait]
pub trait RoutineRepository: Send + Sync {
    /// Stores a new routine and all of its exercises.
    async fn save(&self, routine: &Routine) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &RoutineId) -> Result<Option<Routine>, DomainError>;

    /// An exercise together with the routine it belongs to.
    async fn find_exercise(
        &self,
        id: &ExerciseId,
    ) -> Result<Option<(RoutineId, RoutineExercise)>, DomainError>;

    /// Overwrites the review of one exercise.
    ///
    /// # Errors
    ///
    /// - `ExerciseNotFound` if the exercise doesn't exist
    async fn update_exercise_review(
        &self,
        id: &ExerciseId,
        review: &ExerciseReview,
    ) -> Result<(), DomainError>;
}
