//! Routine aggregate: a training plan assigned to a member.

use crate::domain::foundation::{
    ExerciseId, MemberId, RoutineId, Timestamp, UserId, ValidationError,
};

use super::{ExerciseReview, RoutineError};

const MAX_SETS_OR_REPS: u32 = 1000;

/// One exercise within a routine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineExercise {
    pub id: ExerciseId,
    pub name: String,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    pub review: ExerciseReview,
}

/// Input for one exercise when creating a routine.
#[derive(Debug, Clone)]
pub struct NewExercise {
    pub name: String,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routine {
    pub id: RoutineId,
    pub member_id: MemberId,
    pub name: String,
    pub exercises: Vec<RoutineExercise>,
    pub created_by: UserId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Routine {
    /// Creates a routine whose exercises all start pending review.
    pub fn create(
        member_id: MemberId,
        name: impl Into<String>,
        exercises: Vec<NewExercise>,
        created_by: UserId,
    ) -> Result<Self, RoutineError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("nombre").into());
        }
        if exercises.is_empty() {
            return Err(RoutineError::validation(
                "ejercicios",
                "a routine needs at least one exercise",
            ));
        }

        let exercises = exercises
            .into_iter()
            .map(RoutineExercise::from_new)
            .collect::<Result<Vec<_>, _>>()?;

        let now = Timestamp::now();
        Ok(Self {
            id: RoutineId::new(),
            member_id,
            name,
            exercises,
            created_by,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn exercise(&self, id: &ExerciseId) -> Option<&RoutineExercise> {
        self.exercises.iter().find(|e| &e.id == id)
    }
}

impl RoutineExercise {
    fn from_new(new: NewExercise) -> Result<Self, RoutineError> {
        let name = new.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("ejercicios.nombre").into());
        }
        check_count("ejercicios.series", new.sets)?;
        check_count("ejercicios.repeticiones", new.reps)?;

        Ok(Self {
            id: ExerciseId::new(),
            name,
            sets: new.sets,
            reps: new.reps,
            review: ExerciseReview::pending(),
        })
    }
}

fn check_count(field: &str, value: Option<u32>) -> Result<(), ValidationError> {
    match value {
        Some(v) if v == 0 || v > MAX_SETS_OR_REPS => Err(ValidationError::out_of_range(
            field,
            1,
            MAX_SETS_OR_REPS as i32,
            v.min(i32::MAX as u32) as i32,
        )),
        _ => Ok(()),
    }
}
