//! ReviewExerciseHandler - Command handler for the exercise review workflow.
//!
//! An exercise may be reviewed again at any time; the latest verdict wins.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, ExerciseId};
use crate::domain::routine::{ReviewVerdict, RoutineError, RoutineExercise};
use crate::ports::RoutineRepository;

#[derive(Debug, Clone)]
pub struct ReviewExerciseCommand {
    pub actor: AuthenticatedUser,
    pub exercise_id: ExerciseId,
    pub verdict: ReviewVerdict,
    pub notes: Option<String>,
}

pub struct ReviewExerciseHandler {
    routines: Arc<dyn RoutineRepository>,
}

impl ReviewExerciseHandler {
    pub fn new(routines: Arc<dyn RoutineRepository>) -> Self {
        Self { routines }
    }

    pub async fn handle(&self, cmd: ReviewExerciseCommand) -> Result<RoutineExercise, RoutineError> {
        if !cmd.actor.role.can_review_exercises() {
            return Err(RoutineError::Forbidden);
        }

        let (routine_id, mut exercise) = self
            .routines
            .find_exercise(&cmd.exercise_id)
            .await?
            .ok_or(RoutineError::ExerciseNotFound(cmd.exercise_id))?;

        let previous = exercise.review.status;
        exercise
            .review
            .record(cmd.verdict, cmd.notes, cmd.actor.user_id.clone())?;

        self.routines
            .update_exercise_review(&exercise.id, &exercise.review)
            .await?;

        tracing::info!(
            routine_id = %routine_id,
            exercise_id = %exercise.id,
            from = previous.as_str(),
            to = exercise.review.status.as_str(),
            reviewer = %cmd.actor.user_id,
            "exercise reviewed"
        );

        Ok(exercise)
    }
}
