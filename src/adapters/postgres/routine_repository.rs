//! PostgreSQL implementation of RoutineRepository.
//!
//! Review state is read through `ReviewStatus::from_legacy`, which accepts
//! both the canonical `estado` and the old console's free text or numeric
//! `estado_id`. Writes store the canonical value and its matching id.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, ExerciseId, MemberId, RoutineId, Timestamp, UserId,
};
use crate::domain::routine::{ExerciseReview, ReviewStatus, Routine, RoutineExercise};
use crate::ports::RoutineRepository;

use super::db_error;

pub struct PostgresRoutineRepository {
    pool: PgPool,
}

impl PostgresRoutineRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RoutineRow {
    id: Uuid,
    member_id: Uuid,
    nombre: String,
    created_by: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct ExerciseRow {
    id: Uuid,
    routine_id: Uuid,
    nombre: String,
    series: Option<i32>,
    repeticiones: Option<i32>,
    estado: Option<String>,
    estado_id: Option<i16>,
    notas_instructor: Option<String>,
    reviewed_by: Option<String>,
    reviewed_at: Option<DateTime<Utc>>,
}

impl From<ExerciseRow> for RoutineExercise {
    fn from(row: ExerciseRow) -> Self {
        RoutineExercise {
            id: ExerciseId::from_uuid(row.id),
            name: row.nombre,
            sets: row.series.and_then(|v| u32::try_from(v).ok()),
            reps: row.repeticiones.and_then(|v| u32::try_from(v).ok()),
            review: ExerciseReview {
                status: ReviewStatus::from_legacy(row.estado.as_deref(), row.estado_id),
                notes: row.notas_instructor,
                reviewed_by: row.reviewed_by.and_then(|u| UserId::new(u).ok()),
                reviewed_at: row.reviewed_at.map(Timestamp::from_datetime),
            },
        }
    }
}

const EXERCISE_COLUMNS: &str = r#"
    id, routine_id, nombre, series, repeticiones, estado, estado_id,
    notas_instructor, reviewed_by, reviewed_at
"#;

fn count_column(value: Option<u32>) -> Option<i32> {
    value.and_then(|v| i32::try_from(v).ok())
}

async fn insert_exercise(
    tx: &mut Transaction<'static, Postgres>,
    routine_id: &RoutineId,
    position: i32,
    exercise: &RoutineExercise,
) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        INSERT INTO routine_exercises (
            id, routine_id, position, nombre, series, repeticiones, estado, estado_id,
            notas_instructor, reviewed_by, reviewed_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        "#,
    )
    .bind(exercise.id.as_uuid())
    .bind(routine_id.as_uuid())
    .bind(position)
    .bind(&exercise.name)
    .bind(count_column(exercise.sets))
    .bind(count_column(exercise.reps))
    .bind(exercise.review.status.as_str())
    .bind(exercise.review.status.legacy_id())
    .bind(&exercise.review.notes)
    .bind(exercise.review.reviewed_by.as_ref().map(|u| u.as_str().to_string()))
    .bind(exercise.review.reviewed_at.as_ref().map(|t| *t.as_datetime()))
    .execute(&mut **tx)
    .await
    .map_err(|e| db_error("insert exercise", e))?;

    Ok(())
}

#[async_trait]
impl RoutineRepository for PostgresRoutineRepository {
    async fn save(&self, routine: &Routine) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("begin transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO routines (id, member_id, nombre, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(routine.id.as_uuid())
        .bind(routine.member_id.as_uuid())
        .bind(&routine.name)
        .bind(routine.created_by.as_str())
        .bind(routine.created_at.as_datetime())
        .bind(routine.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("insert routine", e))?;

        for (position, exercise) in routine.exercises.iter().enumerate() {
            let position = i32::try_from(position).unwrap_or(i32::MAX);
            insert_exercise(&mut tx, &routine.id, position, exercise).await?;
        }

        tx.commit()
            .await
            .map_err(|e| db_error("commit routine", e))
    }

    async fn find_by_id(&self, id: &RoutineId) -> Result<Option<Routine>, DomainError> {
        let row: Option<RoutineRow> = sqlx::query_as(
            "SELECT id, member_id, nombre, created_by, created_at, updated_at FROM routines WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("fetch routine", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let exercises: Vec<ExerciseRow> = sqlx::query_as(&format!(
            "SELECT {} FROM routine_exercises WHERE routine_id = $1 ORDER BY position",
            EXERCISE_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("fetch exercises", e))?;

        let created_by = UserId::new(row.created_by)
            .map_err(|e| DomainError::database(format!("Invalid stored created_by: {}", e)))?;

        Ok(Some(Routine {
            id: RoutineId::from_uuid(row.id),
            member_id: MemberId::from_uuid(row.member_id),
            name: row.nombre,
            exercises: exercises.into_iter().map(RoutineExercise::from).collect(),
            created_by,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }))
    }

    async fn find_exercise(
        &self,
        id: &ExerciseId,
    ) -> Result<Option<(RoutineId, RoutineExercise)>, DomainError> {
        let row: Option<ExerciseRow> = sqlx::query_as(&format!(
            "SELECT {} FROM routine_exercises WHERE id = $1",
            EXERCISE_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("fetch exercise", e))?;

        Ok(row.map(|row| (RoutineId::from_uuid(row.routine_id), RoutineExercise::from(row))))
    }

    async fn update_exercise_review(
        &self,
        id: &ExerciseId,
        review: &ExerciseReview,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("begin transaction", e))?;

        let routine: Option<(Uuid,)> = sqlx::query_as(
            r#"
            UPDATE routine_exercises SET
                estado = $2,
                estado_id = $3,
                notas_instructor = $4,
                reviewed_by = $5,
                reviewed_at = $6
            WHERE id = $1
            RETURNING routine_id
            "#,
        )
        .bind(id.as_uuid())
        .bind(review.status.as_str())
        .bind(review.status.legacy_id())
        .bind(&review.notes)
        .bind(review.reviewed_by.as_ref().map(|u| u.as_str().to_string()))
        .bind(review.reviewed_at.as_ref().map(|t| *t.as_datetime()))
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| db_error("update exercise review", e))?;

        let Some((routine_id,)) = routine else {
            return Err(DomainError::new(
                ErrorCode::ExerciseNotFound,
                format!("Exercise not found: {}", id),
            ));
        };

        sqlx::query("UPDATE routines SET updated_at = $2 WHERE id = $1")
            .bind(routine_id)
            .bind(Timestamp::now().as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("touch routine", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("commit exercise review", e))
    }
}
