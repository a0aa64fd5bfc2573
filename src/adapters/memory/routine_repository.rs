//! In-memory routine store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, ExerciseId, RoutineId, Timestamp};
use crate::domain::routine::{ExerciseReview, Routine, RoutineExercise};
use crate::ports::RoutineRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryRoutineRepository {
    routines: Arc<RwLock<HashMap<RoutineId, Routine>>>,
}

impl InMemoryRoutineRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoutineRepository for InMemoryRoutineRepository {
    async fn save(&self, routine: &Routine) -> Result<(), DomainError> {
        self.routines.write().await.insert(routine.id, routine.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &RoutineId) -> Result<Option<Routine>, DomainError> {
        Ok(self.routines.read().await.get(id).cloned())
    }

    async fn find_exercise(
        &self,
        id: &ExerciseId,
    ) -> Result<Option<(RoutineId, RoutineExercise)>, DomainError> {
        let routines = self.routines.read().await;
        Ok(routines
            .values()
            .find_map(|r| r.exercise(id).map(|e| (r.id, e.clone()))))
    }

    async fn update_exercise_review(
        &self,
        id: &ExerciseId,
        review: &ExerciseReview,
    ) -> Result<(), DomainError> {
        let mut routines = self.routines.write().await;
        for routine in routines.values_mut() {
            if let Some(exercise) = routine.exercises.iter_mut().find(|e| &e.id == id) {
                exercise.review = review.clone();
                routine.updated_at = Timestamp::now();
                return Ok(());
            }
        }
        Err(DomainError::new(
            ErrorCode::ExerciseNotFound,
            format!("Exercise not found: {}", id),
        ))
    }
}
